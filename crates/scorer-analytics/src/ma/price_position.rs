//! 종가의 이동평균 대비 위치와 꼬리 반발(wick rejection) 감지.
//!
//! 꼬리 반발은 최근 캔들이 중기/장기 EMA를 시험한 뒤 되돌아온 경우입니다.
//!
//! **상승 반발** (아래꼬리):
//! - 저가 ≤ EMA < 종가
//! - (종가 - 저가) / (고가 - 저가) ≥ 0.6
//! - 아래꼬리 ≥ 몸통 × 1.5 (몸통 0이면 충족)
//! - EMA 5봉 변화율 ≥ -1.5% (급하락 중인 선은 제외)
//! - 거래량 ≤ 평균의 2.5배
//!
//! **하락 반발** (위꼬리)은 대칭 조건입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use scorer_core::{
    checked_sum, pct_change, percent_of, ratio, round_to, PriceBar, PriceSeries,
};

use crate::indicators::{MaLine, MaSeries, MaSnapshot};

const MIN_WICK_RATIO: f64 = 0.6;
const MIN_SHADOW_BODY_RATIO: Decimal = dec!(1.5);
const MAX_SLOPE_AGAINST_PCT: f64 = 1.5;
const MAX_VOLUME_SPIKE: Decimal = dec!(2.5);
const SLOPE_BARS: usize = 5;

/// 종가가 위치한 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceZone {
    /// 장기 EMA 위
    AboveSlow,
    /// 장기 EMA 아래, 중기 EMA 위
    AboveMedium,
    /// 중기 EMA 아래, 단기 EMA 위
    AboveFast,
    /// 모든 EMA 아래 (또는 같음)
    BelowAll,
    #[default]
    Na,
}

/// 꼬리 반발 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WickDirection {
    Bullish,
    Bearish,
}

/// 꼬리 반발 신호.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WickRejection {
    pub line: MaLine,
    pub direction: WickDirection,
    /// EMA를 관통한 깊이 (%)
    pub test_depth_pct: f64,
    /// 반발 꼬리 비율 (0~1)
    pub wick_ratio: f64,
}

/// 가격 위치 분석 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePositionResult {
    pub zone: PriceZone,
    /// 단기 EMA 대비 (%)
    pub vs_fast: f64,
    /// 중기 EMA 대비 (%)
    pub vs_medium: f64,
    /// 장기 EMA 대비 (%)
    pub vs_slow: f64,
    pub wick_rejections: Vec<WickRejection>,
    pub message: String,
}

fn zone_of(close: Decimal, snapshot: &MaSnapshot) -> PriceZone {
    if close > snapshot.slow {
        PriceZone::AboveSlow
    } else if close > snapshot.medium {
        PriceZone::AboveMedium
    } else if close > snapshot.fast {
        PriceZone::AboveFast
    } else {
        PriceZone::BelowAll
    }
}

/// 최근 거래량이 평균의 2.5배 이하인지 확인합니다. 이력이 부족하면 통과.
fn is_volume_ok(series: &PriceSeries, lookback: usize) -> bool {
    let volumes = series.volumes();
    if lookback == 0 || volumes.len() < lookback {
        return true;
    }
    let window = &volumes[volumes.len() - lookback..];
    let Some(sum) = checked_sum(window.iter().copied()) else {
        return true;
    };
    let avg = sum / Decimal::from(lookback);
    if avg.is_zero() {
        return true;
    }
    window[window.len() - 1]
        .checked_div(avg)
        .is_some_and(|spike| spike <= MAX_VOLUME_SPIKE)
}

fn detect_wick(
    bar: &PriceBar,
    level: Decimal,
    slope: f64,
    volume_ok: bool,
) -> Option<(WickDirection, f64, f64)> {
    let range = bar.range();
    if level <= Decimal::ZERO || range <= Decimal::ZERO || !volume_ok {
        return None;
    }
    let body = bar.body_size();
    let shadow_ok = |shadow: Decimal| {
        body.is_zero()
            || shadow
                .checked_div(body)
                .map_or(true, |r| r >= MIN_SHADOW_BODY_RATIO)
    };

    if bar.low <= level && bar.close > level {
        let wick = ratio(bar.close - bar.low, range);
        if wick >= MIN_WICK_RATIO
            && shadow_ok(bar.lower_shadow())
            && slope >= -MAX_SLOPE_AGAINST_PCT
        {
            let depth = percent_of(level - bar.low, level);
            return Some((WickDirection::Bullish, depth, wick));
        }
    } else if bar.high >= level && bar.close < level {
        let wick = ratio(bar.high - bar.close, range);
        if wick >= MIN_WICK_RATIO
            && shadow_ok(bar.upper_shadow())
            && slope <= MAX_SLOPE_AGAINST_PCT
        {
            let depth = percent_of(bar.high - level, level);
            return Some((WickDirection::Bearish, depth, wick));
        }
    }
    None
}

/// 최근 종가의 이동평균 대비 위치를 분석합니다.
///
/// # 인자
/// * `series` - 일봉 시퀀스
/// * `ma` - 같은 시퀀스로 계산한 EMA
/// * `volume_lookback` - 거래량 평균 기간
pub fn analyze_price_position(
    series: &PriceSeries,
    ma: &MaSeries,
    volume_lookback: usize,
) -> PricePositionResult {
    let (Some(bar), Some(latest)) = (series.latest(), ma.latest()) else {
        return PricePositionResult {
            message: "데이터 부족".to_string(),
            ..Default::default()
        };
    };
    if !ma.has_min_bars() {
        return PricePositionResult {
            message: "데이터 부족".to_string(),
            ..Default::default()
        };
    }

    let close = bar.close;
    let zone = zone_of(close, &latest);
    let volume_ok = is_volume_ok(series, volume_lookback);

    // 장기 EMA 반발을 먼저 기록합니다.
    let wick_rejections: Vec<WickRejection> = [MaLine::Slow, MaLine::Medium]
        .into_iter()
        .filter_map(|line| {
            let slope = ma.change_pct(line, SLOPE_BARS);
            detect_wick(bar, latest.get(line), slope, volume_ok).map(
                |(direction, depth, ratio)| WickRejection {
                    line,
                    direction,
                    test_depth_pct: round_to(depth, 2),
                    wick_ratio: round_to(ratio, 2),
                },
            )
        })
        .collect();

    let vs_slow = pct_change(close, latest.slow);
    let message = match zone {
        PriceZone::AboveSlow => format!("종가가 장기 이동평균 위 ({:+.1}%)", vs_slow),
        PriceZone::AboveMedium => "종가가 장기 아래, 중기 이동평균 위".to_string(),
        PriceZone::AboveFast => "종가가 중기 아래, 단기 이동평균 위".to_string(),
        _ => format!("종가가 모든 이동평균 아래 (장기 대비 {:+.1}%)", vs_slow),
    };

    PricePositionResult {
        zone,
        vs_fast: round_to(pct_change(close, latest.fast), 2),
        vs_medium: round_to(pct_change(close, latest.medium), 2),
        vs_slow: round_to(vs_slow, 2),
        wick_rejections,
        message,
    }
}
