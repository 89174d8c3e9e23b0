//! 이동평균 확산 감지.
//!
//! 단기/중기 EMA의 장기 EMA 대비 이격도와 장기 EMA의 10봉 변화율을 함께 보고
//! 확산 품질을 분류합니다. 한 차원만 튀는 경우 STRONG으로 올라가지 않도록
//! 모든 조건을 동시에 요구합니다.
//!
//! | 품질 | 단기 이격 | 중기 이격 | 장기 기울기 |
//! |------|-----------|-----------|-------------|
//! | STRONG | > 6% | > 3% | > 2% |
//! | MODERATE | > 3% | > 1.5% | > 0.5% |
//! | WEAK | > 1% | - | > 0% |
//! | CONTRACTING | < -1% 또는 기울기 < -0.5% | | |
//!
//! 확산 중(`is_expanding`) 판정은 정배열이면서 STRONG/MODERATE인 경우에만 참입니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{pct_change, round_to};

use crate::indicators::{MaLine, MaSeries};
use crate::ma::convergence::SLOW_TREND_BARS;

/// 확산 품질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpansionQuality {
    Strong,
    Moderate,
    Weak,
    #[default]
    Neutral,
    Contracting,
}

impl ExpansionQuality {
    /// 추세 확산으로 인정되는 품질(STRONG/MODERATE)인지 확인합니다.
    pub fn is_confirmed(self) -> bool {
        matches!(self, ExpansionQuality::Strong | ExpansionQuality::Moderate)
    }
}

/// 확산 감지 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionResult {
    pub is_expanding: bool,
    pub quality: ExpansionQuality,
    /// 단기 EMA의 장기 EMA 대비 이격도 (%)
    pub fast_slow_distance: f64,
    /// 중기 EMA의 장기 EMA 대비 이격도 (%)
    pub medium_slow_distance: f64,
    /// 장기 EMA 10봉 변화율 (%)
    pub slow_slope: f64,
    pub is_perfect_order: bool,
    pub message: String,
}

impl ExpansionResult {
    /// 데이터 부족 결과.
    pub fn insufficient() -> Self {
        Self {
            message: "데이터 부족".to_string(),
            ..Default::default()
        }
    }
}

fn classify(fast_dist: f64, medium_dist: f64, slope: f64) -> ExpansionQuality {
    if fast_dist > 6.0 && medium_dist > 3.0 && slope > 2.0 {
        ExpansionQuality::Strong
    } else if fast_dist > 3.0 && medium_dist > 1.5 && slope > 0.5 {
        ExpansionQuality::Moderate
    } else if fast_dist > 1.0 && slope > 0.0 {
        ExpansionQuality::Weak
    } else if fast_dist < -1.0 || slope < -0.5 {
        ExpansionQuality::Contracting
    } else {
        ExpansionQuality::Neutral
    }
}

/// 최근 봉의 이동평균 확산을 감지합니다.
pub fn detect_expansion(ma: &MaSeries) -> ExpansionResult {
    let Some(latest) = ma.latest().filter(|_| ma.has_min_bars()) else {
        return ExpansionResult::insufficient();
    };

    let is_perfect_order = latest.is_perfect_order();
    if latest.slow <= Decimal::ZERO {
        return ExpansionResult {
            is_perfect_order,
            message: "장기 이동평균이 0 이하".to_string(),
            ..Default::default()
        };
    }

    let fast_dist = pct_change(latest.fast, latest.slow);
    let medium_dist = pct_change(latest.medium, latest.slow);
    let slope = ma.change_pct(MaLine::Slow, SLOW_TREND_BARS);
    let quality = classify(fast_dist, medium_dist, slope);
    let is_expanding = is_perfect_order && quality.is_confirmed();

    let detail = format!(
        "단기 {:+.1}%, 중기 {:+.1}%, 장기 기울기 {:+.1}%",
        fast_dist, medium_dist, slope
    );
    let message = match quality {
        ExpansionQuality::Strong => format!("이동평균 강한 확산 ({})", detail),
        ExpansionQuality::Moderate => format!("이동평균 확산 중 ({})", detail),
        ExpansionQuality::Weak => format!("이동평균 약한 확산 ({})", detail),
        ExpansionQuality::Contracting => format!("이동평균 수축 중 ({})", detail),
        ExpansionQuality::Neutral => format!("이동평균 중립 ({})", detail),
    };

    ExpansionResult {
        is_expanding,
        quality,
        fast_slow_distance: round_to(fast_dist, 2),
        medium_slow_distance: round_to(medium_dist, 2),
        slow_slope: round_to(slope, 2),
        is_perfect_order,
        message,
    }
}
