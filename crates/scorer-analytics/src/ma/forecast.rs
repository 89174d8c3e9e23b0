//! 추세 시나리오 예측과 매매 신호 매핑.
//!
//! 모멘텀 정렬, 장기 EMA 기울기, 수렴 강도를 순서대로 확인하며 처음 일치하는
//! 시나리오를 선택합니다.
//!
//! | 순서 | 시나리오 | 조건 |
//! |------|----------|------|
//! | 1 | STRONG_UPTREND | 3선 상승 정렬, 장기 기울기 > 0.3, 정배열 |
//! | 2 | BREAKOUT_SOON | 수렴 강도 > 70, 종가 > 장기, 장기 기울기 > 0 |
//! | 3 | STRONG_DOWNTREND | 장기 기울기 < -0.1, 3선 하락 정렬 |
//! | 4 | DOWNTREND_WARNING | CRITICAL/HIGH 경고 또는 하락 쪽 정렬 |
//! | 5 | UPTREND_CONSOLIDATION | (정배열 또는 상승 쪽 정렬), 장기 기울기 > 0 |
//! | 6 | SIDEWAY | 그 외 |

use serde::{Deserialize, Serialize};

use scorer_core::{RecommendationMode, ScoreStatus, TradeSignal};

use crate::ma::cross::SellWarningLevel;
use crate::ma::momentum::MomentumAlignment;

const STRONG_UPTREND_SLOPE: f64 = 0.3;
const STRONG_DOWNTREND_SLOPE: f64 = -0.1;
const BREAKOUT_STRENGTH: f64 = 70.0;
const BREAKOUT_HIGH_CONFIDENCE_STRENGTH: f64 = 85.0;

/// 추세 시나리오.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastScenario {
    StrongUptrend,
    BreakoutSoon,
    UptrendConsolidation,
    DowntrendWarning,
    StrongDowntrend,
    #[default]
    Sideway,
}

/// 예측 신뢰도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastConfidence {
    High,
    Medium,
    #[default]
    Low,
}

/// 예측 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub scenario: ForecastScenario,
    pub confidence: ForecastConfidence,
    pub message: String,
}

/// 예측 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInputs {
    pub alignment: MomentumAlignment,
    /// 장기 EMA 일평균 기울기 (%)
    pub slow_slope: f64,
    /// 수렴 강도 (0~100)
    pub convergence_strength: f64,
    pub price_above_slow: bool,
    pub is_perfect_order: bool,
    pub sell_warning: SellWarningLevel,
}

/// 시나리오를 분류합니다.
pub fn classify_forecast(inputs: &ForecastInputs) -> ForecastResult {
    let slope = inputs.slow_slope;

    let (scenario, confidence) = if inputs.alignment == MomentumAlignment::BullishAligned
        && slope > STRONG_UPTREND_SLOPE
        && inputs.is_perfect_order
    {
        (ForecastScenario::StrongUptrend, ForecastConfidence::High)
    } else if inputs.convergence_strength > BREAKOUT_STRENGTH
        && inputs.price_above_slow
        && slope > 0.0
    {
        let confidence = if inputs.convergence_strength > BREAKOUT_HIGH_CONFIDENCE_STRENGTH {
            ForecastConfidence::High
        } else {
            ForecastConfidence::Medium
        };
        (ForecastScenario::BreakoutSoon, confidence)
    } else if slope < STRONG_DOWNTREND_SLOPE
        && inputs.alignment == MomentumAlignment::BearishAligned
    {
        (ForecastScenario::StrongDowntrend, ForecastConfidence::High)
    } else if inputs.sell_warning.is_severe() || inputs.alignment.is_bearish() {
        (ForecastScenario::DowntrendWarning, ForecastConfidence::Medium)
    } else if (inputs.is_perfect_order || inputs.alignment.is_bullish()) && slope > 0.0 {
        (ForecastScenario::UptrendConsolidation, ForecastConfidence::Medium)
    } else {
        (ForecastScenario::Sideway, ForecastConfidence::Low)
    };

    let message = match scenario {
        ForecastScenario::StrongUptrend => format!("강한 상승 추세 (장기 기울기 {:+.2}%/일)", slope),
        ForecastScenario::BreakoutSoon => format!(
            "수렴 후 상승 돌파 가능 (수렴 강도 {:.0})",
            inputs.convergence_strength
        ),
        ForecastScenario::StrongDowntrend => format!("강한 하락 추세 (장기 기울기 {:+.2}%/일)", slope),
        ForecastScenario::DowntrendWarning => "하락 전환 주의".to_string(),
        ForecastScenario::UptrendConsolidation => "상승 추세 내 조정/횡보".to_string(),
        ForecastScenario::Sideway => "뚜렷한 방향 없음".to_string(),
    };

    ForecastResult {
        scenario,
        confidence,
        message,
    }
}

/// 시나리오와 등급을 매매 신호로 변환합니다.
///
/// 하락 쪽도 두 단계로 나눕니다: 하락 경고는 `Sell`, 강한 하락은 `StrongSell`.
/// 횡보는 등급이 WARNING 이하일 때만 `Caution`이고 나머지는 `Hold`입니다.
/// 사실 정보 모드이거나 등급이 NA이면 항상 `Hold`입니다.
pub fn to_trade_signal(
    scenario: ForecastScenario,
    status: ScoreStatus,
    mode: RecommendationMode,
) -> TradeSignal {
    if mode == RecommendationMode::Factual || status == ScoreStatus::Na {
        return TradeSignal::Hold;
    }
    match scenario {
        ForecastScenario::StrongUptrend | ForecastScenario::BreakoutSoon => TradeSignal::StrongBuy,
        ForecastScenario::UptrendConsolidation => TradeSignal::Buy,
        ForecastScenario::DowntrendWarning => TradeSignal::Sell,
        ForecastScenario::StrongDowntrend => TradeSignal::StrongSell,
        ForecastScenario::Sideway if status.is_weak() => TradeSignal::Caution,
        ForecastScenario::Sideway => TradeSignal::Hold,
    }
}
