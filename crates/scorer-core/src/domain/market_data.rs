//! 일봉 가격 데이터 타입.
//!
//! - `PriceBar` - 하루치 OHLCV 데이터
//! - `PriceSeries` - 날짜 오름차순으로 정렬된 불변 일봉 시퀀스

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ScorerError, ScorerResult};
use crate::types::{Price, Volume};

/// 하루치 OHLCV 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    pub volume: Volume,
}

impl PriceBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Volume,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 위꼬리 길이를 반환합니다.
    pub fn upper_shadow(&self) -> Decimal {
        self.high - self.open.max(self.close)
    }

    /// 아래꼬리 길이를 반환합니다.
    pub fn lower_shadow(&self) -> Decimal {
        self.open.min(self.close) - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// 날짜 오름차순으로 정렬된 일봉 시퀀스.
///
/// 생성 후에는 변경할 수 없습니다. 날짜 사이의 공백(휴장일, 누락된 봉)은 허용되며,
/// 분석은 인덱스 순서만을 시간 순서로 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// 일봉 목록으로 시퀀스를 생성합니다.
    ///
    /// # 에러
    ///
    /// 날짜가 엄격한 오름차순이 아니면(역순 또는 중복) `ScorerError::InvalidInput`을 반환합니다.
    pub fn new(bars: Vec<PriceBar>) -> ScorerResult<Self> {
        if let Some(pos) = bars.windows(2).position(|w| w[0].date >= w[1].date) {
            return Err(ScorerError::InvalidInput(format!(
                "일봉 날짜가 오름차순이 아닙니다: {} 다음에 {}",
                bars[pos].date,
                bars[pos + 1].date
            )));
        }
        Ok(Self { bars })
    }

    /// 빈 시퀀스를 생성합니다.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 봉 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 전체 봉을 반환합니다.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// 가장 최근 봉을 반환합니다.
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// 종가 목록을 반환합니다.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 거래량 목록을 반환합니다.
    pub fn volumes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// 최근 봉 날짜 기준으로 `days`일(달력 기준) 이내의 봉만 남긴 새 시퀀스를 반환합니다.
    pub fn last_days(&self, days: u32) -> Self {
        let Some(latest) = self.latest() else {
            return Self::empty();
        };
        let cutoff = latest.date - Duration::days(i64::from(days));
        Self {
            bars: self
                .bars
                .iter()
                .filter(|b| b.date > cutoff)
                .cloned()
                .collect(),
        }
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = ScorerError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}
