//! 이동평균 모멘텀 분석.
//!
//! 각 EMA의 기울기(일평균 변화율, %)를 선마다 다른 기간으로 계산합니다.
//! 반응이 빠른 선일수록 짧은 기간을 씁니다 (단기 5, 중기 10, 장기 20).
//!
//! 기울기 = (현재값 - N봉 전 값) / N봉 전 값 × 100 / N

use serde::{Deserialize, Serialize};

use scorer_core::round_to;

use crate::indicators::{MaLine, MaSeries};

/// 단기 EMA 기울기 산출 기간.
pub const FAST_SLOPE_BARS: usize = 5;
/// 중기 EMA 기울기 산출 기간.
pub const MEDIUM_SLOPE_BARS: usize = 10;
/// 장기 EMA 기울기 산출 기간.
pub const SLOW_SLOPE_BARS: usize = 20;

/// 정렬 판정에서 상승/하락으로 세는 기울기 기준.
const ALIGNMENT_THRESHOLD: f64 = 0.1;

/// 기울기 기반 추세 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumTrend {
    Uptrend,
    MildUptrend,
    #[default]
    Neutral,
    MildDowntrend,
    Downtrend,
}

impl MomentumTrend {
    fn from_slope(slope: f64) -> Self {
        if slope > 0.3 {
            MomentumTrend::Uptrend
        } else if slope > 0.1 {
            MomentumTrend::MildUptrend
        } else if slope > -0.1 {
            MomentumTrend::Neutral
        } else if slope > -0.3 {
            MomentumTrend::MildDowntrend
        } else {
            MomentumTrend::Downtrend
        }
    }
}

/// 기울기 절대값 기반 강도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumStrength {
    VeryStrong,
    Strong,
    Moderate,
    #[default]
    Weak,
}

impl MomentumStrength {
    fn from_slope(slope: f64) -> Self {
        let abs = slope.abs();
        if abs > 0.5 {
            MomentumStrength::VeryStrong
        } else if abs > 0.3 {
            MomentumStrength::Strong
        } else if abs > 0.15 {
            MomentumStrength::Moderate
        } else {
            MomentumStrength::Weak
        }
    }
}

/// 세 EMA 기울기 방향의 정렬 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumAlignment {
    /// 3개 모두 상승
    BullishAligned,
    /// 2개 상승
    MostlyBullish,
    Mixed,
    /// 2개 하락
    MostlyBearish,
    /// 3개 모두 하락
    BearishAligned,
    /// 데이터 부족
    #[default]
    Na,
}

impl MomentumAlignment {
    /// 상승 쪽 정렬(BULLISH_ALIGNED, MOSTLY_BULLISH)인지 확인합니다.
    pub fn is_bullish(self) -> bool {
        matches!(
            self,
            MomentumAlignment::BullishAligned | MomentumAlignment::MostlyBullish
        )
    }

    /// 하락 쪽 정렬(BEARISH_ALIGNED, MOSTLY_BEARISH)인지 확인합니다.
    pub fn is_bearish(self) -> bool {
        matches!(
            self,
            MomentumAlignment::BearishAligned | MomentumAlignment::MostlyBearish
        )
    }
}

/// 선 하나의 모멘텀.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMomentum {
    /// 일평균 변화율 (%)
    pub slope: f64,
    pub trend: MomentumTrend,
    pub strength: MomentumStrength,
    /// 기울기 산출 기간 (봉)
    pub lookback: usize,
}

/// 모멘텀 분석 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumResult {
    pub fast: LineMomentum,
    pub medium: LineMomentum,
    pub slow: LineMomentum,
    pub alignment: MomentumAlignment,
    pub uptrend_count: u8,
    pub downtrend_count: u8,
    pub summary: String,
}

/// 지정한 선의 일평균 기울기(%)를 계산합니다.
///
/// 이력이 `bars`봉 이하이거나 과거값이 0 이하이면 0.
pub fn line_slope(ma: &MaSeries, line: MaLine, bars: usize) -> f64 {
    if bars == 0 {
        return 0.0;
    }
    ma.change_pct(line, bars) / bars as f64
}

fn line_momentum(ma: &MaSeries, line: MaLine, bars: usize) -> LineMomentum {
    let slope = line_slope(ma, line, bars);
    LineMomentum {
        slope: round_to(slope, 3),
        trend: MomentumTrend::from_slope(slope),
        strength: MomentumStrength::from_slope(slope),
        lookback: bars,
    }
}

/// 세 EMA의 모멘텀과 정렬 상태를 분석합니다.
pub fn analyze_momentum(ma: &MaSeries) -> MomentumResult {
    if ma.is_empty() {
        return MomentumResult {
            summary: "데이터 부족".to_string(),
            ..Default::default()
        };
    }

    let fast = line_momentum(ma, MaLine::Fast, FAST_SLOPE_BARS);
    let medium = line_momentum(ma, MaLine::Medium, MEDIUM_SLOPE_BARS);
    let slow = line_momentum(ma, MaLine::Slow, SLOW_SLOPE_BARS);

    let slopes = [
        line_slope(ma, MaLine::Fast, FAST_SLOPE_BARS),
        line_slope(ma, MaLine::Medium, MEDIUM_SLOPE_BARS),
        line_slope(ma, MaLine::Slow, SLOW_SLOPE_BARS),
    ];
    let uptrend_count = slopes.iter().filter(|s| **s > ALIGNMENT_THRESHOLD).count() as u8;
    let downtrend_count = slopes.iter().filter(|s| **s < -ALIGNMENT_THRESHOLD).count() as u8;

    let alignment = match (uptrend_count, downtrend_count) {
        (3, _) => MomentumAlignment::BullishAligned,
        (_, 3) => MomentumAlignment::BearishAligned,
        (2, _) => MomentumAlignment::MostlyBullish,
        (_, 2) => MomentumAlignment::MostlyBearish,
        _ => MomentumAlignment::Mixed,
    };

    let summary = match alignment {
        MomentumAlignment::BullishAligned => "세 이동평균 모두 상승 중".to_string(),
        MomentumAlignment::MostlyBullish => "이동평균 대부분 상승 중".to_string(),
        MomentumAlignment::BearishAligned => "세 이동평균 모두 하락 중".to_string(),
        MomentumAlignment::MostlyBearish => "이동평균 대부분 하락 중".to_string(),
        _ => format!(
            "이동평균 방향 혼조 (단기 {:+.2}%/일, 중기 {:+.2}%/일, 장기 {:+.2}%/일)",
            fast.slope, medium.slope, slow.slope
        ),
    };

    MomentumResult {
        fast,
        medium,
        slow,
        alignment,
        uptrend_count,
        downtrend_count,
        summary,
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
    fn test_trend_and_strength_thresholds() {
        assert_eq!(MomentumTrend::from_slope(0.31), MomentumTrend::Uptrend);
        assert_eq!(MomentumTrend::from_slope(0.2), MomentumTrend::MildUptrend);
        assert_eq!(MomentumTrend::from_slope(0.0), MomentumTrend::Neutral);
        assert_eq!(MomentumTrend::from_slope(-0.2), MomentumTrend::MildDowntrend);
        assert_eq!(MomentumTrend::from_slope(-0.3), MomentumTrend::Downtrend);

        assert_eq!(MomentumStrength::from_slope(-0.6), MomentumStrength::VeryStrong);
        assert_eq!(MomentumStrength::from_slope(0.4), MomentumStrength::Strong);
        assert_eq!(MomentumStrength::from_slope(0.2), MomentumStrength::Moderate);
        assert_eq!(MomentumStrength::from_slope(0.15), MomentumStrength::Weak);
    }

    #[test]
    fn test_rising_series_is_bullish_aligned() {
        let result = analyze_momentum(&ma_from((0..60).map(|i| Decimal::from(100 + i)).collect()));

        assert_eq!(result.alignment, MomentumAlignment::BullishAligned);
        assert_eq!(result.uptrend_count, 3);
        assert!(result.slow.slope > 0.3);
        assert_eq!(result.slow.lookback, SLOW_SLOPE_BARS);
    }

    #[test]
    fn test_falling_series_is_bearish_aligned() {
        let result = analyze_momentum(&ma_from((0..60).map(|i| Decimal::from(300 - i)).collect()));
        assert_eq!(result.alignment, MomentumAlignment::BearishAligned);
        assert!(result.alignment.is_bearish());
    }

    #[test]
    fn test_flat_series_is_mixed_with_zero_slopes() {
        let result = analyze_momentum(&ma_from(vec![dec!(100); 60]));

        assert_eq!(result.alignment, MomentumAlignment::Mixed);
        assert_eq!(result.fast.slope, 0.0);
        assert_eq!(result.medium.slope, 0.0);
        assert_eq!(result.slow.slope, 0.0);
    }

    #[test]
    fn test_short_history_yields_zero_slope() {
        // 장기 기울기는 20봉 전 값이 필요
        let ma = ma_from((0..15).map(|i| Decimal::from(100 + i)).collect());
        let result = analyze_momentum(&ma);

        assert!(result.fast.slope > 0.0);
        assert_eq!(result.slow.slope, 0.0);
        assert_eq!(result.slow.trend, MomentumTrend::Neutral);
    }

    #[test]
    fn test_empty_series_is_na() {
        let result = analyze_momentum(&ma_from(Vec::new()));
        assert_eq!(result.alignment, MomentumAlignment::Na);
    }
}
