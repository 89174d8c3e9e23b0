//! 골든 크로스 / 데드 크로스 감지.
//!
//! 직전 봉과 최근 봉 사이에서 발생한 교차만 봅니다.
//!
//! - 골든 크로스: 직전 `단기 <= 장기`, 최근 `단기 > 장기`
//! - 데드 크로스: 직전 `단기 >= 장기`, 최근 `단기 < 장기`
//!
//! 느린 쌍(중기/장기)의 교차가 더 지속적이므로 신뢰도가 높습니다.
//!
//! 데드 크로스 결과는 매도 경고 단계(`SellWarningLevel`)도 함께 제공합니다.
//! 경고 단계는 사실 정보이며 매매 지시가 아닙니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::indicators::{MaLine, MaSeries, MaSnapshot};
use crate::ma::convergence::SLOW_TREND_BARS;

/// 장기 EMA 상승 둔화 판정 기준 (10봉 변화율, %).
const FLATTENING_SLOPE_PCT: f64 = 0.5;

/// 교차한 이동평균 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossPair {
    /// 단기/중기
    FastMedium,
    /// 중기/장기
    MediumSlow,
}

impl CrossPair {
    /// 교차 신뢰도 (0~10).
    pub fn credibility(self) -> u8 {
        match self {
            CrossPair::FastMedium => 6,
            CrossPair::MediumSlow => 10,
        }
    }

    fn lines(self) -> (MaLine, MaLine) {
        match self {
            CrossPair::FastMedium => (MaLine::Fast, MaLine::Medium),
            CrossPair::MediumSlow => (MaLine::Medium, MaLine::Slow),
        }
    }
}

/// 교차 이벤트.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossEvent {
    pub pair: CrossPair,
    pub credibility: u8,
    pub label: String,
}

/// 골든 크로스 감지 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenCrossResult {
    pub has_cross: bool,
    pub crosses: Vec<CrossEvent>,
    /// 신뢰도가 가장 높은 교차
    pub best_cross: Option<CrossEvent>,
    pub message: String,
}

/// 매도 경고 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellWarningLevel {
    /// 중기/장기 데드 크로스
    Critical,
    /// 단기/중기 데드 크로스
    High,
    /// 정배열이었던 종목의 종가가 단기 또는 중기 EMA 아래로 이탈
    Medium,
    /// 경고 없음
    Low,
    /// 데이터 부족
    #[default]
    Na,
}

impl SellWarningLevel {
    /// 경고 단계의 우선순위를 반환합니다 (낮을수록 심각).
    pub fn priority(self) -> u8 {
        match self {
            SellWarningLevel::Critical => 1,
            SellWarningLevel::High => 2,
            SellWarningLevel::Medium => 3,
            SellWarningLevel::Low => 4,
            SellWarningLevel::Na => 5,
        }
    }

    /// CRITICAL 또는 HIGH인지 확인합니다.
    pub fn is_severe(self) -> bool {
        matches!(self, SellWarningLevel::Critical | SellWarningLevel::High)
    }
}

/// 종가의 이동평균 하회 여부.
///
/// 중기/장기 플래그는 직전 봉이 정배열이었을 때만 켜집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBelowMa {
    pub below_fast: bool,
    pub below_medium: bool,
    pub below_slow: bool,
}

/// 데드 크로스 감지 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathCrossResult {
    pub has_death_cross: bool,
    pub crosses: Vec<CrossEvent>,
    /// 가장 심각한 교차
    pub strongest_cross: Option<CrossEvent>,
    pub severity: SellWarningLevel,
    /// 직전 봉 정배열 여부
    pub was_in_perfect_order: bool,
    pub price_below_ma: PriceBelowMa,
    /// 정배열 상태에서 장기 EMA 상승이 둔화됨 (10봉 변화율 0.5% 미만)
    pub slow_ma_flattening: bool,
    pub message: String,
}

fn crossed_up(prev: &MaSnapshot, cur: &MaSnapshot, pair: CrossPair) -> bool {
    let (short, long) = pair.lines();
    prev.get(short) <= prev.get(long) && cur.get(short) > cur.get(long)
}

fn crossed_down(prev: &MaSnapshot, cur: &MaSnapshot, pair: CrossPair) -> bool {
    let (short, long) = pair.lines();
    prev.get(short) >= prev.get(long) && cur.get(short) < cur.get(long)
}

fn last_two(ma: &MaSeries) -> Option<(MaSnapshot, MaSnapshot)> {
    if !ma.has_min_bars() {
        return None;
    }
    Some((ma.previous()?, ma.latest()?))
}

/// 골든 크로스를 감지합니다.
pub fn detect_golden_cross(ma: &MaSeries) -> GoldenCrossResult {
    let Some((prev, cur)) = last_two(ma) else {
        return GoldenCrossResult {
            message: "데이터 부족".to_string(),
            ..Default::default()
        };
    };

    let crosses: Vec<CrossEvent> = [CrossPair::FastMedium, CrossPair::MediumSlow]
        .into_iter()
        .filter(|pair| crossed_up(&prev, &cur, *pair))
        .map(|pair| CrossEvent {
            pair,
            credibility: pair.credibility(),
            label: match pair {
                CrossPair::FastMedium => "단기 골든 크로스".to_string(),
                CrossPair::MediumSlow => "중장기 골든 크로스".to_string(),
            },
        })
        .collect();

    let best_cross = crosses.iter().max_by_key(|c| c.credibility).cloned();
    let message = match &best_cross {
        Some(best) => format!("{} 발생 (신뢰도 {}/10)", best.label, best.credibility),
        None => "최근 골든 크로스 없음".to_string(),
    };

    GoldenCrossResult {
        has_cross: !crosses.is_empty(),
        crosses,
        best_cross,
        message,
    }
}

/// 데드 크로스와 매도 경고 단계를 감지합니다.
///
/// # 인자
/// * `ma` - EMA 시계열
/// * `close` - 최근 종가
pub fn detect_death_cross(ma: &MaSeries, close: Decimal) -> DeathCrossResult {
    let Some((prev, cur)) = last_two(ma) else {
        return DeathCrossResult {
            message: "데이터 부족".to_string(),
            ..Default::default()
        };
    };

    let was_in_perfect_order = prev.is_perfect_order();

    // 중기/장기 교차가 있으면 단기/중기 교차는 보지 않습니다.
    let cross = if crossed_down(&prev, &cur, CrossPair::MediumSlow) {
        Some(CrossEvent {
            pair: CrossPair::MediumSlow,
            credibility: CrossPair::MediumSlow.credibility(),
            label: "중장기 데드 크로스".to_string(),
        })
    } else if crossed_down(&prev, &cur, CrossPair::FastMedium) {
        Some(CrossEvent {
            pair: CrossPair::FastMedium,
            credibility: CrossPair::FastMedium.credibility(),
            label: "단기 데드 크로스".to_string(),
        })
    } else {
        None
    };

    let price_below_ma = PriceBelowMa {
        below_fast: close < cur.fast,
        below_medium: was_in_perfect_order && close < cur.medium,
        below_slow: was_in_perfect_order && close < cur.slow,
    };

    let severity = match &cross {
        Some(c) if c.pair == CrossPair::MediumSlow => SellWarningLevel::Critical,
        Some(_) => SellWarningLevel::High,
        None if was_in_perfect_order
            && (price_below_ma.below_medium || price_below_ma.below_fast) =>
        {
            SellWarningLevel::Medium
        }
        None => SellWarningLevel::Low,
    };

    let slow_ma_flattening = was_in_perfect_order
        && ma.change_pct(MaLine::Slow, SLOW_TREND_BARS) < FLATTENING_SLOPE_PCT;

    let message = match (&cross, severity) {
        (Some(c), _) => format!("{} 발생 (신뢰도 {}/10)", c.label, c.credibility),
        (None, SellWarningLevel::Medium) if price_below_ma.below_medium => {
            "정배열 종목의 종가가 중기 이동평균 아래로 이탈".to_string()
        }
        (None, SellWarningLevel::Medium) => {
            "정배열 종목의 종가가 단기 이동평균 아래로 이탈".to_string()
        }
        _ => "데드 크로스 없음".to_string(),
    };

    DeathCrossResult {
        has_death_cross: cross.is_some(),
        strongest_cross: cross.clone(),
        crosses: cross.into_iter().collect(),
        severity,
        was_in_perfect_order,
        price_below_ma,
        slow_ma_flattening,
        message,
    }
}
