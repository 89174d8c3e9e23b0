//! 이동평균 신호 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (EMA 3종 세트, 거래량 추세)
//! - 이동평균 패턴 감지 (수렴, 확산, 골든/데드 크로스, 강한 수렴)
//! - 모멘텀 분석과 거래량-수렴 상관
//! - 우선순위 신호 목록과 0~10 점수 종합
//! - 추천 문구 계층 (선택)
//!
//! 모든 분석 함수는 입력을 변경하지 않는 순수 함수이며, 데이터가 부족해도
//! 에러 대신 NA 결과를 반환합니다.
//!
//! # 예제
//!
//! ```ignore
//! use scorer_analytics::MaScorer;
//!
//! let result = MaScorer::new().analyze(&series);
//! println!("{} ({})", result.score, result.status);
//! ```

pub mod indicators;
pub mod ma;
pub mod recommendation;

// Indicators 모듈 re-exports
pub use indicators::{
    analyze_volume_trend, ema, IndicatorError, IndicatorResult, MaLine, MaPeriods, MaSeries,
    MaSnapshot, VolumeTrend, VolumeTrendResult,
};

// MA 모듈 re-exports
pub use ma::{MaScorer, MaSignal, ScoreResult, SignalCategory};

pub use recommendation::{build_recommendation, Recommendation};
