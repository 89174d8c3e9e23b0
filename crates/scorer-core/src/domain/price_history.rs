//! 가격 이력 제공자 trait.
//!
//! 분석 코어는 네트워크나 파일에 접근하지 않습니다. 가격 이력은 항상 이 trait의
//! 구현체가 분석 전에 조회해서 넘겨줍니다.

use std::collections::HashMap;

use crate::domain::market_data::PriceSeries;
use crate::error::ScorerResult;

/// 종목의 일봉 이력을 제공하는 협력자.
pub trait PriceHistoryProvider {
    /// 최근 `lookback_days`일(달력 기준) 동안의 일봉을 조회합니다.
    ///
    /// # 반환
    ///
    /// - `Ok(Some(series))` - 조회 성공
    /// - `Ok(None)` - 해당 종목 데이터 없음 (분석 불가, NA 결과로 처리)
    ///
    /// # 에러
    ///
    /// 조회 자체가 실패한 경우 (파일 읽기 실패, 잘못된 형식 등)
    fn fetch_history(&self, symbol: &str, lookback_days: u32) -> ScorerResult<Option<PriceSeries>>;
}

/// 메모리에 보관된 일봉 이력 제공자.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceHistory {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceHistory {
    /// 빈 제공자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목의 일봉 이력을 등록합니다. 종목 코드는 대문자로 정규화됩니다.
    pub fn insert(&mut self, symbol: &str, series: PriceSeries) {
        self.series.insert(symbol.to_uppercase(), series);
    }

    /// 종목 이력을 등록한 제공자를 반환합니다.
    pub fn with_series(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }
}

impl PriceHistoryProvider for InMemoryPriceHistory {
    fn fetch_history(&self, symbol: &str, lookback_days: u32) -> ScorerResult<Option<PriceSeries>> {
        Ok(self
            .series
            .get(&symbol.to_uppercase())
            .map(|s| s.last_days(lookback_days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::PriceBar;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn series(days: i64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..days)
            .map(|i| {
                let p = Decimal::from(100 + i);
                PriceBar::new(start + Duration::days(i), p, p, p, p, Decimal::from(1000))
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    #[test]
    fn test_in_memory_lookup_is_case_insensitive() {
        let provider = InMemoryPriceHistory::new().with_series("vcb", series(10));

        let found = provider.fetch_history("VCB", 90).unwrap();
        assert_eq!(found.map(|s| s.len()), Some(10));
    }

    #[test]
    fn test_in_memory_missing_symbol_is_none() {
        let provider = InMemoryPriceHistory::new();
        assert!(provider.fetch_history("FPT", 90).unwrap().is_none());
    }

    #[test]
    fn test_in_memory_applies_lookback_window() {
        let provider = InMemoryPriceHistory::new().with_series("HPG", series(200));

        let found = provider.fetch_history("HPG", 90).unwrap().unwrap();
        assert_eq!(found.len(), 90);
    }
}
