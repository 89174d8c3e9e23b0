//! 분석 명령.
//!
//! 가격 이력 파일(또는 디렉토리)에서 종목 일봉을 읽어 이동평균 점수를 계산하고
//! JSON 또는 텍스트로 출력합니다.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use scorer_analytics::MaScorer;
use scorer_core::{AppConfig, RecommendationMode};

use super::history::FileHistoryProvider;
use super::report::{render_json, render_text, OutputFormat};

/// 분석 명령 설정.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// 가격 이력 파일 또는 디렉토리
    pub input: PathBuf,
    /// 종목 코드 (없으면 파일 이름에서 추출)
    pub symbol: Option<String>,
    pub format: OutputFormat,
    /// 사실 정보 모드 강제
    pub factual: bool,
    /// 조회 기간 (없으면 설정값)
    pub lookback_days: Option<u32>,
    pub with_presentation: bool,
    /// 결과 저장 경로 (없으면 stdout)
    pub output: Option<PathBuf>,
}

/// 입력 경로에서 종목 코드를 추출합니다 (`data/FPT.csv` → `FPT`).
fn symbol_from_path(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
}

/// 분석을 실행하고 렌더링된 결과를 반환합니다.
///
/// `output`이 지정되면 파일에도 저장합니다.
pub fn run_analyze(app: &AppConfig, config: &AnalyzeConfig) -> Result<String> {
    let symbol = config
        .symbol
        .clone()
        .or_else(|| symbol_from_path(&config.input))
        .context("종목 코드를 알 수 없습니다. --symbol을 지정하세요")?;

    let mut analysis = app.analysis.clone();
    if config.factual {
        analysis.recommendation_mode = RecommendationMode::Factual;
    }
    let scorer = MaScorer::with_config(analysis).context("분석 설정이 올바르지 않습니다")?;

    let lookback_days = config.lookback_days.unwrap_or(app.data.lookback_days);
    let provider = FileHistoryProvider::new(&config.input);
    let result = scorer
        .analyze_symbol(&provider, &symbol, lookback_days)
        .with_context(|| format!("가격 이력 로드 실패: {}", config.input.display()))?;

    info!(
        "Analyzed {} ({} bars): score {} {}",
        symbol, result.bar_count, result.score, result.status
    );

    let rendered = match config.format {
        OutputFormat::Json => render_json(&result, config.with_presentation)?,
        OutputFormat::Text => render_text(&result),
    };

    if let Some(output) = &config.output {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, &rendered)
            .with_context(|| format!("결과 저장 실패: {}", output.display()))?;
        info!("Saved result to {}", output.display());
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use tempfile::{tempdir, TempDir};

    /// `fpt.csv`에 `days`일 동안 1씩 오르는 일봉을 기록합니다.
    fn write_rising_csv(days: i64) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fpt.csv");

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut csv = String::from("date,open,high,low,close,volume\n");
        for i in 0..days {
            let close = 100 + i;
            csv.push_str(&format!(
                "{},{},{},{},{},10000\n",
                start + Duration::days(i),
                close,
                close + 1,
                close - 1,
                close
            ));
        }
        std::fs::write(&path, csv).unwrap();
        (dir, path)
    }

    fn config(input: PathBuf, format: OutputFormat) -> AnalyzeConfig {
        AnalyzeConfig {
            input,
            symbol: None,
            format,
            factual: false,
            lookback_days: None,
            with_presentation: false,
            output: None,
        }
    }

    #[test]
    fn test_symbol_from_file_name() {
        let (_dir, path) = write_rising_csv(60);
        let rendered = run_analyze(&AppConfig::default(), &config(path.clone(), OutputFormat::Json))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["symbol"], "FPT");
        assert_eq!(json["status"], "GOOD");
        assert_eq!(json["perfectOrder"], true);
    }

    #[test]
    fn test_factual_flag_removes_recommendation() {
        let (_dir, path) = write_rising_csv(60);
        let rendered = run_analyze(
            &AppConfig::default(),
            &AnalyzeConfig {
                factual: true,
                ..config(path.clone(), OutputFormat::Json)
            },
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["signal"], "HOLD");
        assert!(json.get("recommendation").is_none());
    }

    #[test]
    fn test_text_output_written_to_file() {
        let (_dir, path) = write_rising_csv(60);
        let output = path.with_file_name("report.txt");
        let rendered = run_analyze(
            &AppConfig::default(),
            &AnalyzeConfig {
                output: Some(output.clone()),
                ..config(path.clone(), OutputFormat::Text)
            },
        )
        .unwrap();

        assert!(rendered.starts_with("FPT"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), rendered);
    }

    #[test]
    fn test_directory_input_requires_symbol() {
        let (tmp, _path) = write_rising_csv(60);
        let dir = tmp.path().to_path_buf();

        assert!(run_analyze(&AppConfig::default(), &config(dir.clone(), OutputFormat::Json)).is_err());

        let rendered = run_analyze(
            &AppConfig::default(),
            &AnalyzeConfig {
                symbol: Some("fpt".to_string()),
                ..config(dir.clone(), OutputFormat::Json)
            },
        )
        .unwrap();
        assert!(rendered.contains("\"FPT\""));
    }
}
