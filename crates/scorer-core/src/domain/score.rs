//! 점수 등급과 매매 신호.
//!
//! 색상/아이콘 같은 표시 정보는 여기 두지 않습니다. 표시 매핑은
//! `scorer_analytics::ma::presentation`이 담당합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 0~10 점수로부터 결정되는 상태 등급.
///
/// # 구간
///
/// - **Excellent**: 9점 이상
/// - **Good**: 7점 이상
/// - **Acceptable**: 4점 이상
/// - **Warning**: 2점 이상
/// - **Poor**: 2점 미만
/// - **Na**: 데이터 부족으로 평가 불가
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreStatus {
    Excellent,
    Good,
    Acceptable,
    Warning,
    Poor,
    #[default]
    Na,
}

impl ScoreStatus {
    /// 점수 구간으로 등급을 결정합니다.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            ScoreStatus::Excellent
        } else if score >= 7.0 {
            ScoreStatus::Good
        } else if score >= 4.0 {
            ScoreStatus::Acceptable
        } else if score >= 2.0 {
            ScoreStatus::Warning
        } else {
            ScoreStatus::Poor
        }
    }

    /// 주의가 필요한 하위 등급(WARNING, POOR)인지 확인합니다.
    pub fn is_weak(self) -> bool {
        matches!(self, ScoreStatus::Warning | ScoreStatus::Poor)
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreStatus::Excellent => "EXCELLENT",
            ScoreStatus::Good => "GOOD",
            ScoreStatus::Acceptable => "ACCEPTABLE",
            ScoreStatus::Warning => "WARNING",
            ScoreStatus::Poor => "POOR",
            ScoreStatus::Na => "NA",
        };
        write!(f, "{}", s)
    }
}

/// 이산 매매 신호.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSignal {
    StrongBuy,
    Buy,
    #[default]
    Hold,
    Caution,
    Sell,
    StrongSell,
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeSignal::StrongBuy => "STRONG_BUY",
            TradeSignal::Buy => "BUY",
            TradeSignal::Hold => "HOLD",
            TradeSignal::Caution => "CAUTION",
            TradeSignal::Sell => "SELL",
            TradeSignal::StrongSell => "STRONG_SELL",
        };
        write!(f, "{}", s)
    }
}
