//! 이동평균 수렴 감지.
//!
//! 세 EMA의 밴드폭 `(최대 - 최소) / 최소 × 100`으로 수렴 정도를 분류하고,
//! 장기 EMA의 10봉 변화율로 방향을 판단합니다.
//!
//! 같은 수렴이라도 정배열 여부에 따라 의미가 다릅니다:
//! - 정배열 + 수렴: 추세 가속 구간
//! - 비정배열 + 수렴: 방향성 돌파 임박

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{percent_of, ratio, round_to};

use crate::indicators::{MaLine, MaSeries, MaSnapshot};

/// SUPER_TIGHT 밴드폭 상한 (%).
const SUPER_TIGHT_PCT: f64 = 1.5;
/// TIGHT 밴드폭 상한 (%). 이 값 미만이면 수렴으로 판정합니다.
const TIGHT_PCT: f64 = 3.0;
/// 방향 판정 기준 (장기 EMA 10봉 변화율, %).
const SLOPE_THRESHOLD_PCT: f64 = 0.5;
/// 방향 판정에 사용하는 봉 수.
pub(crate) const SLOW_TREND_BARS: usize = 10;

/// 수렴 강도 0점이 되는 평균 이격도 (%).
const STRENGTH_ZERO_DISTANCE_PCT: f64 = 10.0;

/// 수렴 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConvergenceLevel {
    /// 밴드폭 1.5% 미만
    SuperTight,
    /// 밴드폭 3.0% 미만
    Tight,
    /// 밴드폭 3.0% 이상
    Loose,
    #[default]
    Na,
}

impl ConvergenceLevel {
    /// 표시용 이름.
    pub fn label(self) -> &'static str {
        match self {
            ConvergenceLevel::SuperTight => "SUPER_TIGHT",
            ConvergenceLevel::Tight => "TIGHT",
            ConvergenceLevel::Loose => "LOOSE",
            ConvergenceLevel::Na => "NA",
        }
    }
}

/// 장기 EMA 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaSlope {
    Up,
    Down,
    Neutral,
    #[default]
    Na,
}

/// 수렴 감지 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceResult {
    pub is_converging: bool,
    /// 세 EMA 밴드폭 (%)
    pub bandwidth_pct: f64,
    /// 수렴 강도 (0~100, 단기/중기의 장기 대비 평균 이격도 기준)
    pub strength: f64,
    pub level: ConvergenceLevel,
    pub slope: MaSlope,
    /// 판정 시점의 정배열 여부 (메시지 분기 기준)
    pub is_perfect_order: bool,
    pub message: String,
}

impl ConvergenceResult {
    /// 데이터 부족 결과.
    pub fn insufficient() -> Self {
        Self {
            message: "데이터 부족".to_string(),
            ..Default::default()
        }
    }
}

/// 수렴 강도를 계산합니다.
///
/// 평균 이격도 = (|단기 - 장기| / 장기 + |중기 - 장기| / 장기) / 2 × 100,
/// 강도 = clamp((10 - 평균 이격도) / 10 × 100, 0, 100).
///
/// 장기 EMA가 0 이하이면 0을 반환합니다.
pub fn convergence_strength(snapshot: &MaSnapshot) -> f64 {
    if snapshot.slow <= Decimal::ZERO {
        return 0.0;
    }
    let fast_dist = ratio((snapshot.fast - snapshot.slow).abs(), snapshot.slow);
    let medium_dist = ratio((snapshot.medium - snapshot.slow).abs(), snapshot.slow);
    let avg_distance = (fast_dist + medium_dist) / 2.0 * 100.0;

    ((STRENGTH_ZERO_DISTANCE_PCT - avg_distance) / STRENGTH_ZERO_DISTANCE_PCT * 100.0)
        .clamp(0.0, 100.0)
}

/// 최근 봉의 이동평균 수렴을 감지합니다.
pub fn detect_convergence(ma: &MaSeries) -> ConvergenceResult {
    let Some(latest) = ma.latest().filter(|_| ma.has_min_bars()) else {
        return ConvergenceResult::insufficient();
    };

    let max_ma = latest.fast.max(latest.medium).max(latest.slow);
    let min_ma = latest.fast.min(latest.medium).min(latest.slow);
    let is_perfect_order = latest.is_perfect_order();

    if min_ma <= Decimal::ZERO {
        return ConvergenceResult {
            is_perfect_order,
            message: "이동평균 값이 0 이하".to_string(),
            ..Default::default()
        };
    }

    let bandwidth = percent_of(max_ma - min_ma, min_ma);
    let level = if bandwidth < SUPER_TIGHT_PCT {
        ConvergenceLevel::SuperTight
    } else if bandwidth < TIGHT_PCT {
        ConvergenceLevel::Tight
    } else {
        ConvergenceLevel::Loose
    };
    let is_converging = bandwidth < TIGHT_PCT;
    let slope = slow_slope(ma);

    let message = match (is_converging, is_perfect_order) {
        (true, true) => format!(
            "정배열 상태 수렴 {:.1}% ({}): 추세 가속 가능 구간",
            bandwidth,
            level.label()
        ),
        (true, false) => format!(
            "이동평균 수렴 {:.1}% ({}): 방향성 돌파 임박",
            bandwidth,
            level.label()
        ),
        (false, _) => format!("이동평균 밴드폭 {:.1}%: 수렴 아님", bandwidth),
    };

    ConvergenceResult {
        is_converging,
        bandwidth_pct: round_to(bandwidth, 2),
        strength: round_to(convergence_strength(&latest), 1),
        level,
        slope,
        is_perfect_order,
        message,
    }
}

fn slow_slope(ma: &MaSeries) -> MaSlope {
    match ma.value_bars_ago(MaLine::Slow, SLOW_TREND_BARS) {
        Some(past) if past > Decimal::ZERO => {
            let change = ma.change_pct(MaLine::Slow, SLOW_TREND_BARS);
            if change > SLOPE_THRESHOLD_PCT {
                MaSlope::Up
            } else if change < -SLOPE_THRESHOLD_PCT {
                MaSlope::Down
            } else {
                MaSlope::Neutral
            }
        }
        _ => MaSlope::Na,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::MaPeriods;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ma_from(closes: Vec<Decimal>) -> MaSeries {
        MaSeries::compute(&closes, MaPeriods::default())
    }

    #[test]
    fn test_flat_series_is_super_tight() {
        let result = detect_convergence(&ma_from(vec![dec!(100); 60]));

        assert!(result.is_converging);
        assert_eq!(result.level, ConvergenceLevel::SuperTight);
        assert_eq!(result.bandwidth_pct, 0.0);
        assert_eq!(result.strength, 100.0);
        assert_eq!(result.slope, MaSlope::Neutral);
        assert!(!result.is_perfect_order);
    }

    #[test]
    fn test_rising_series_is_loose_and_up() {
        let closes = (0..60).map(|i| dec!(100) + Decimal::from(i)).collect();
        let result = detect_convergence(&ma_from(closes));

        assert!(!result.is_converging);
        assert_eq!(result.level, ConvergenceLevel::Loose);
        assert_eq!(result.slope, MaSlope::Up);
        assert!(result.is_perfect_order);
    }

    #[test]
    fn test_insufficient_data() {
        let result = detect_convergence(&ma_from(vec![dec!(100); 49]));

        assert!(!result.is_converging);
        assert_eq!(result.level, ConvergenceLevel::Na);
        assert_eq!(result.strength, 0.0);
    }

    #[test]
    fn test_zero_prices_are_guarded() {
        let result = detect_convergence(&ma_from(vec![Decimal::ZERO; 60]));

        assert!(!result.is_converging);
        assert_eq!(result.level, ConvergenceLevel::Na);
        assert!(result.bandwidth_pct.is_finite());
    }

    #[test]
    fn test_convergence_strength_formula() {
        // 평균 이격도 = (2% + 1%) / 2 = 1.5% → 강도 85
        let snapshot = MaSnapshot {
            fast: dec!(102),
            medium: dec!(101),
            slow: dec!(100),
        };
        assert!((convergence_strength(&snapshot) - 85.0).abs() < 1e-9);

        let wide = MaSnapshot {
            fast: dec!(130),
            medium: dec!(120),
            slow: dec!(100),
        };
        assert_eq!(convergence_strength(&wide), 0.0);
    }
}
