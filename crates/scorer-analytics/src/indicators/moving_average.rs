//! 지수 이동평균 (Exponential Moving Average).
//!
//! 종가 시계열로부터 단기/중기/장기 EMA 3개를 계산합니다.
//!
//! EMA는 첫 종가로 시작하며(SMA 시드 아님), 차트 플랫폼과 같은 방식으로
//! `ema = 이전 ema + (종가 - 이전 ema) × k`, `k = 2 / (N + 1)`로 갱신합니다.
//! 이 형태는 가격이 일정하면 EMA도 정확히 일정하게 유지됩니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use scorer_core::{pct_change, PriceSeries};

use super::{IndicatorError, IndicatorResult};

/// EMA 기간 세트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaPeriods {
    /// 단기 기간 (기본: 10)
    pub fast: usize,
    /// 중기 기간 (기본: 20)
    pub medium: usize,
    /// 장기 기간 (기본: 50)
    pub slow: usize,
}

impl Default for MaPeriods {
    fn default() -> Self {
        Self {
            fast: 10,
            medium: 20,
            slow: 50,
        }
    }
}

impl MaPeriods {
    /// 기간 세트를 생성합니다.
    ///
    /// # 에러
    ///
    /// 기간이 0이거나 단기 < 중기 < 장기 순서가 아니면 `InvalidParameter`.
    pub fn new(fast: usize, medium: usize, slow: usize) -> IndicatorResult<Self> {
        if fast == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if !(fast < medium && medium < slow) {
            return Err(IndicatorError::InvalidParameter(format!(
                "기간 순서 오류: {}/{}/{}",
                fast, medium, slow
            )));
        }
        Ok(Self { fast, medium, slow })
    }
}

/// 이동평균선 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaLine {
    Fast,
    Medium,
    Slow,
}

/// 한 시점의 EMA 3종 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaSnapshot {
    pub fast: Decimal,
    pub medium: Decimal,
    pub slow: Decimal,
}

impl MaSnapshot {
    /// 정배열(단기 > 중기 > 장기) 여부.
    pub fn is_perfect_order(&self) -> bool {
        self.fast > self.medium && self.medium > self.slow
    }

    /// 준정배열 여부: 단기와 중기가 모두 장기 위에 있음 (둘 사이 순서는 무관).
    pub fn is_near_perfect_order(&self) -> bool {
        self.fast > self.slow && self.medium > self.slow
    }

    /// 지정한 선의 값을 반환합니다.
    pub fn get(&self, line: MaLine) -> Decimal {
        match line {
            MaLine::Fast => self.fast,
            MaLine::Medium => self.medium,
            MaLine::Slow => self.slow,
        }
    }
}

/// 전체 가격 시계열에 대한 EMA 3종 시계열.
///
/// 세 시계열의 길이는 항상 원본 가격 시계열 길이와 같습니다.
#[derive(Debug, Clone)]
pub struct MaSeries {
    periods: MaPeriods,
    fast: Vec<Decimal>,
    medium: Vec<Decimal>,
    slow: Vec<Decimal>,
}

impl MaSeries {
    /// 종가 목록으로부터 EMA 3종을 계산합니다.
    pub fn compute(closes: &[Decimal], periods: MaPeriods) -> Self {
        Self {
            periods,
            fast: ema(closes, periods.fast),
            medium: ema(closes, periods.medium),
            slow: ema(closes, periods.slow),
        }
    }

    /// 일봉 시퀀스의 종가로부터 EMA 3종을 계산합니다.
    pub fn from_series(series: &PriceSeries, periods: MaPeriods) -> Self {
        Self::compute(&series.closes(), periods)
    }

    pub fn len(&self) -> usize {
        self.fast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast.is_empty()
    }

    pub fn periods(&self) -> MaPeriods {
        self.periods
    }

    /// 패턴 감지에 필요한 최소 길이(장기 기간)를 충족하는지 확인합니다.
    pub fn has_min_bars(&self) -> bool {
        !self.is_empty() && self.len() >= self.periods.slow
    }

    /// 지정한 선의 전체 시계열.
    pub fn line(&self, line: MaLine) -> &[Decimal] {
        match line {
            MaLine::Fast => &self.fast,
            MaLine::Medium => &self.medium,
            MaLine::Slow => &self.slow,
        }
    }

    /// `index` 시점의 값.
    pub fn snapshot(&self, index: usize) -> Option<MaSnapshot> {
        Some(MaSnapshot {
            fast: *self.fast.get(index)?,
            medium: *self.medium.get(index)?,
            slow: *self.slow.get(index)?,
        })
    }

    /// 최근 시점의 값.
    pub fn latest(&self) -> Option<MaSnapshot> {
        self.len().checked_sub(1).and_then(|i| self.snapshot(i))
    }

    /// 직전 시점의 값.
    pub fn previous(&self) -> Option<MaSnapshot> {
        self.len().checked_sub(2).and_then(|i| self.snapshot(i))
    }

    /// 최근 시점으로부터 `bars`봉 전의 값. 범위를 벗어나면 `None`.
    pub fn value_bars_ago(&self, line: MaLine, bars: usize) -> Option<Decimal> {
        let values = self.line(line);
        let index = values.len().checked_sub(1)?.checked_sub(bars)?;
        values.get(index).copied()
    }

    /// `bars`봉 동안의 누적 변화율(%).
    ///
    /// 이력이 부족하거나 기준값이 0이면 0을 반환합니다.
    pub fn change_pct(&self, line: MaLine, bars: usize) -> f64 {
        match (self.value_bars_ago(line, 0), self.value_bars_ago(line, bars)) {
            (Some(current), Some(past)) if past > Decimal::ZERO => pct_change(current, past),
            _ => 0.0,
        }
    }
}

/// 지수 이동평균 (EMA) 계산.
///
/// # 인자
/// * `prices` - 가격 데이터
/// * `period` - EMA 기간
///
/// # 반환
/// 입력과 같은 길이의 EMA 값. 빈 입력이면 빈 벡터.
pub fn ema(prices: &[Decimal], period: usize) -> Vec<Decimal> {
    let Some(&first) = prices.first() else {
        return Vec::new();
    };

    let k = dec!(2) / Decimal::from(period + 1);
    let mut result = Vec::with_capacity(prices.len());
    let mut prev = first;
    result.push(prev);

    for &price in &prices[1..] {
        // 부호가 다른 극단값은 차이가 범위를 넘으므로 가중 평균 형태로 계산
        prev = price
            .checked_sub(prev)
            .and_then(|diff| diff.checked_mul(k))
            .and_then(|step| prev.checked_add(step))
            .unwrap_or_else(|| prev * (Decimal::ONE - k) + price * k);
        result.push(prev);
    }

    result
}
