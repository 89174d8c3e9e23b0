//! 가격 계산을 위한 Decimal 유틸리티.
//!
//! 가격과 거래량은 입력값 그대로 보존하기 위해 `Decimal`로 다루고,
//! 백분율 지표는 분류와 보고를 위해 `f64`로 변환합니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 가격 타입.
pub type Price = Decimal;

/// 거래량 타입.
pub type Volume = Decimal;

/// `Decimal`을 `f64`로 변환합니다. 표현 불가능한 값은 0으로 처리합니다.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `numerator / denominator`를 `f64`로 반환합니다.
///
/// 분모가 0이거나 몫이 `Decimal` 범위를 넘으면 0을 반환합니다.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    numerator.checked_div(denominator).map(to_f64).unwrap_or(0.0)
}

/// `numerator / denominator × 100`을 계산합니다.
///
/// 분모가 0이거나 몫이 `Decimal` 범위를 넘으면 0을 반환합니다.
/// 몫에 100을 곱한 값만 범위를 넘으면 `f64`로 곱합니다.
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(to_f64)
            .unwrap_or_else(|| to_f64(quotient) * 100.0),
        None => 0.0,
    }
}

/// `base` 대비 `value`의 변화율(%)을 계산합니다.
///
/// 기준값이 0이거나 계산이 `Decimal` 범위를 넘으면 0을 반환합니다.
pub fn pct_change(value: Decimal, base: Decimal) -> f64 {
    match value.checked_sub(base) {
        Some(diff) => percent_of(diff, base),
        None => 0.0,
    }
}

/// 값들의 합. 합이 `Decimal` 범위를 넘으면 `None`.
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// 소수점 `dp` 자리로 반올림합니다.
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pct_change() {
        assert!((pct_change(dec!(110), dec!(100)) - 10.0).abs() < 1e-9);
        assert!((pct_change(dec!(95), dec!(100)) + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_pct_change_zero_base() {
        assert_eq!(pct_change(dec!(10), Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_ratio_overflow_is_zero() {
        let tiny = Decimal::new(1, 25);
        assert_eq!(ratio(Decimal::MAX, tiny), 0.0);
        assert_eq!(percent_of(Decimal::MAX, tiny), 0.0);
        assert_eq!(pct_change(Decimal::MAX, tiny), 0.0);
        assert!((ratio(dec!(1), dec!(4)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_percent_of_large_quotient() {
        // 몫은 범위 안, 100배는 범위 밖
        let value = percent_of(Decimal::MAX, dec!(2));
        assert!(value > 3.9e30);
    }

    #[test]
    fn test_pct_change_opposite_signs_overflow() {
        assert_eq!(pct_change(Decimal::MAX, Decimal::MIN), 0.0);
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5)]), Some(dec!(3.5)));
        assert_eq!(checked_sum([Decimal::MAX, Decimal::ONE]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.125, 1), -0.1);
    }
}
