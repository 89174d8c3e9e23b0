//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `SCORER__` 접두사 환경 변수 순서로 설정을 병합합니다.
//!
//! ```toml
//! [analysis]
//! fast_period = 10
//! recommendation_mode = "factual"
//! ```
//!
//! 환경 변수 예: `SCORER__ANALYSIS__MIN_BARS=60`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ScorerError, ScorerResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 분석 엔진 설정
    pub analysis: AnalysisConfig,
    /// 가격 이력 조회 설정
    pub data: DataConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 추천 신호 생성 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationMode {
    /// 예측 시나리오 기반 매매 신호와 추천 문구를 생성
    #[default]
    Advisory,
    /// 사실 정보만 제공 (신호는 항상 HOLD, 추천 문구 없음)
    Factual,
}

/// 분석 엔진 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 단기 EMA 기간
    pub fast_period: usize,
    /// 중기 EMA 기간
    pub medium_period: usize,
    /// 장기 EMA 기간
    pub slow_period: usize,
    /// 분석에 필요한 최소 봉 개수
    pub min_bars: usize,
    /// 거래량 평균 산출 기간
    pub volume_lookback: usize,
    /// 추천 신호 생성 방식
    pub recommendation_mode: RecommendationMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fast_period: 10,
            medium_period: 20,
            slow_period: 50,
            min_bars: 50,
            volume_lookback: 20,
            recommendation_mode: RecommendationMode::Advisory,
        }
    }
}

impl AnalysisConfig {
    /// 설정값의 일관성을 검증합니다.
    ///
    /// # 에러
    ///
    /// - 기간이 0인 경우
    /// - 단기 < 중기 < 장기 순서가 아닌 경우
    /// - 최소 봉 개수가 장기 기간보다 작은 경우
    pub fn validate(&self) -> ScorerResult<()> {
        if self.fast_period == 0 || self.volume_lookback == 0 {
            return Err(ScorerError::Config(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if !(self.fast_period < self.medium_period && self.medium_period < self.slow_period) {
            return Err(ScorerError::Config(format!(
                "EMA 기간은 단기 < 중기 < 장기여야 합니다: {}/{}/{}",
                self.fast_period, self.medium_period, self.slow_period
            )));
        }
        if self.min_bars < self.slow_period {
            return Err(ScorerError::Config(format!(
                "최소 봉 개수({})는 장기 기간({})보다 작을 수 없습니다",
                self.min_bars, self.slow_period
            )));
        }
        Ok(())
    }
}

/// 가격 이력 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 조회 기간 (달력 기준 일수)
    pub lookback_days: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { lookback_days: 90 }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ScorerResult<Self> {
        let builder = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("SCORER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// 기본 경로(`config/default.toml`)에서 설정을 로드합니다.
    pub fn load_default() -> ScorerResult<Self> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analysis_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fast_period, 10);
        assert_eq!(config.medium_period, 20);
        assert_eq!(config.slow_period, 50);
        assert_eq!(config.recommendation_mode, RecommendationMode::Advisory);
    }

    #[test]
    fn test_validate_rejects_unordered_periods() {
        let config = AnalysisConfig {
            fast_period: 20,
            medium_period: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_min_bars() {
        let config = AnalysisConfig {
            min_bars: 30,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [analysis]
            recommendation_mode = "factual"
            min_bars = 60
            "#,
        )
        .unwrap();

        assert_eq!(parsed.analysis.recommendation_mode, RecommendationMode::Factual);
        assert_eq!(parsed.analysis.min_bars, 60);
        assert_eq!(parsed.analysis.slow_period, 50);
        assert_eq!(parsed.data.lookback_days, 90);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "scorer-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[data]\nlookback_days = 120\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.data.lookback_days, 120);
        assert_eq!(config.analysis.volume_lookback, 20);

        std::fs::remove_file(&path).ok();
    }
}
