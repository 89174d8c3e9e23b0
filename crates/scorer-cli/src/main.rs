//! 이동평균 신호 스코어러 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # CSV 일봉 파일 분석 (종목 코드는 파일 이름에서 추출)
//! scorer analyze -i data/FPT.csv
//!
//! # 디렉토리에서 종목 파일을 찾아 텍스트 보고서 출력
//! scorer analyze -i data -s VCB -f text
//!
//! # 사실 정보 모드, 아이콘/색상 매핑 포함
//! scorer analyze -i data/FPT.json --factual --with-presentation
//!
//! # 적용된 설정 확인
//! scorer config
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use scorer_cli::commands::analyze::{run_analyze, AnalyzeConfig};
use scorer_cli::commands::report::OutputFormat;
use scorer_core::{init_logging, init_logging_from_env, AppConfig, LogConfig};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "scorer")]
#[command(about = "이동평균 신호 스코어러 - EMA 10/20/50 패턴 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml, 없으면 기본값 사용)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 일봉 이력 파일로 이동평균 점수 분석
    Analyze {
        /// 가격 이력 파일(CSV, JSON) 또는 디렉토리
        #[arg(short, long)]
        input: String,

        /// 종목 코드 (디렉토리 입력 시 필수)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 출력 형식 (json, text)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// 사실 정보만 출력 (매매 신호 HOLD, 추천 문구 없음)
        #[arg(long, default_value = "false")]
        factual: bool,

        /// 조회 기간 (달력 기준 일수, 기본: 설정값)
        #[arg(long)]
        lookback_days: Option<u32>,

        /// 아이콘/색상 매핑 포함 (JSON 전용)
        #[arg(long, default_value = "false")]
        with_presentation: bool,

        /// 결과 저장 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 적용된 설정을 TOML로 출력
    Config,
}

/// 설정 파일 로드. 명시한 파일이 없으면 에러, 기본 경로 파일이 없으면 `None`.
fn load_config(path: Option<&str>) -> Result<Option<AppConfig>> {
    match path {
        Some(path) => AppConfig::load(path)
            .map(Some)
            .with_context(|| format!("설정 로드 실패: {}", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => AppConfig::load_default()
            .map(Some)
            .context("기본 설정 로드 실패"),
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let file_config = load_config(cli.config.as_deref())?;

    // 설정 파일이 없으면 RUST_LOG, LOG_FORMAT 환경 변수로 로깅
    match &file_config {
        Some(config) => init_logging(LogConfig::from(&config.logging)),
        None => init_logging_from_env(),
    }
    .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;
    let config = file_config.unwrap_or_default();
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Analyze {
            input,
            symbol,
            format,
            factual,
            lookback_days,
            with_presentation,
            output,
        } => {
            let format = OutputFormat::from_str(&format)
                .ok_or_else(|| anyhow!("Invalid format: {}. Supported: json, text", format))?;

            let analyze_config = AnalyzeConfig {
                input: PathBuf::from(input),
                symbol,
                format,
                factual,
                lookback_days,
                with_presentation,
                output: output.map(PathBuf::from),
            };

            let rendered = run_analyze(&config, &analyze_config)?;
            if analyze_config.output.is_none() {
                println!("{}", rendered);
            }
        }

        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("설정 직렬화 실패")?;
            println!("{}", rendered);
        }
    }

    Ok(())
}
