//! 이동평균 패턴 분석.
//!
//! 10/20/50 EMA 3종 세트 위에서 동작하는 감지기와 스코어러입니다.
//!
//! - `convergence` - 밴드폭 기반 수렴
//! - `expansion` - 정배열 확산 품질
//! - `cross` - 골든/데드 크로스, 매도 경고 단계
//! - `tight_convergence` - 돌파 임박 강한 수렴
//! - `momentum` - EMA 기울기와 정렬
//! - `volume_signal` - 거래량-수렴 상관
//! - `price_position` - 종가 위치, 꼬리 반발
//! - `signals` - 우선순위 신호 목록
//! - `forecast` - 추세 시나리오와 매매 신호
//! - `presentation` - 아이콘/색상 매핑
//! - `scorer` - 점수 종합

pub mod convergence;
pub mod cross;
pub mod expansion;
pub mod forecast;
pub mod momentum;
pub mod presentation;
pub mod price_position;
pub mod scorer;
pub mod signals;
pub mod tight_convergence;
pub mod volume_signal;

pub use convergence::{
    convergence_strength, detect_convergence, ConvergenceLevel, ConvergenceResult, MaSlope,
};
pub use cross::{
    detect_death_cross, detect_golden_cross, CrossEvent, CrossPair, DeathCrossResult,
    GoldenCrossResult, PriceBelowMa, SellWarningLevel,
};
pub use expansion::{detect_expansion, ExpansionQuality, ExpansionResult};
pub use forecast::{
    classify_forecast, to_trade_signal, ForecastConfidence, ForecastInputs, ForecastResult,
    ForecastScenario,
};
pub use momentum::{
    analyze_momentum, line_slope, LineMomentum, MomentumAlignment, MomentumResult,
    MomentumStrength, MomentumTrend,
};
pub use presentation::{MarketColor, Presentation};
pub use price_position::{
    analyze_price_position, PricePositionResult, PriceZone, WickDirection, WickRejection,
};
pub use scorer::{compute_score, MaScorer, ScoreInputs, ScoreResult, MAX_SCORE};
pub use signals::{format_signals, MaSignal, SignalCategory, SignalInputs};
pub use tight_convergence::{detect_tight_convergence, TightConvergenceResult, TightStructure};
pub use volume_signal::{correlate_volume, VolumeConvergenceSignal, VolumeSignalQuality};
