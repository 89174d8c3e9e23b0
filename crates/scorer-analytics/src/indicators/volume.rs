//! 거래량 추세 지표.
//!
//! 최근 거래량을 N일 평균(현재 봉 포함)과 비교해 감소/유지/증가로 분류합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{checked_sum, ratio, round_to, to_f64, PriceSeries};

/// 감소 판정 기준 (평균 대비 비율).
const DECREASING_RATIO: f64 = 0.7;
/// 증가 판정 기준 (평균 대비 비율).
const INCREASING_RATIO: f64 = 1.3;

/// 거래량 추세.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeTrend {
    Decreasing,
    Stable,
    Increasing,
    #[default]
    Na,
}

/// 거래량 추세 분석 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTrendResult {
    /// 최근 거래량
    pub current_volume: f64,
    /// N일 평균 거래량
    pub avg_volume: f64,
    /// 평균 대비 비율 (소수 2자리)
    pub volume_ratio: f64,
    pub trend: VolumeTrend,
    pub is_decreasing: bool,
}

/// 최근 `lookback`봉 평균 대비 현재 거래량 추세를 분석합니다.
///
/// 봉 개수가 `lookback`보다 적거나 평균이 0이면 `Na`.
pub fn analyze_volume_trend(series: &PriceSeries, lookback: usize) -> VolumeTrendResult {
    let volumes = series.volumes();
    if lookback == 0 || volumes.len() < lookback {
        return VolumeTrendResult::default();
    }

    let window = &volumes[volumes.len() - lookback..];
    let current = window[window.len() - 1];
    let Some(sum) = checked_sum(window.iter().copied()) else {
        return VolumeTrendResult {
            current_volume: to_f64(current),
            ..Default::default()
        };
    };
    let avg = sum / Decimal::from(lookback);

    if avg.is_zero() {
        return VolumeTrendResult {
            current_volume: to_f64(current),
            ..Default::default()
        };
    }

    let ratio = ratio(current, avg);
    let trend = if ratio < DECREASING_RATIO {
        VolumeTrend::Decreasing
    } else if ratio > INCREASING_RATIO {
        VolumeTrend::Increasing
    } else {
        VolumeTrend::Stable
    };

    VolumeTrendResult {
        current_volume: to_f64(current),
        avg_volume: to_f64(avg),
        volume_ratio: round_to(ratio, 2),
        trend,
        is_decreasing: trend == VolumeTrend::Decreasing,
    }
}
