//! 기술적 지표 모듈.
//!
//! - `moving_average` - 지수 이동평균(EMA) 3종 세트
//! - `volume` - 거래량 추세
//!
//! 지표 계산은 데이터가 부족해도 실패하지 않습니다. 파라미터 구성 단계에서만
//! `IndicatorError`가 발생합니다.

pub mod moving_average;
pub mod volume;

pub use moving_average::*;
pub use volume::*;

use scorer_core::ScorerError;
use thiserror::Error;

/// 지표 파라미터 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

impl From<IndicatorError> for ScorerError {
    fn from(err: IndicatorError) -> Self {
        ScorerError::Config(err.to_string())
    }
}
