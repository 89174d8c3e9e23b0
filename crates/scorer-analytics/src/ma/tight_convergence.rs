//! 강한 수렴(돌파 임박) 감지.
//!
//! 다음 조건을 모두 만족할 때만 활성화됩니다:
//! 1. 수렴 강도 ≥ 75
//! 2. 종가 > 장기 EMA
//! 3. 정배열, 준정배열, 또는 초강력 수렴(강도 ≥ 95) 중 하나
//! 4. CRITICAL 데드 크로스 없음
//!
//! 하락 추세 안에서의 횡보 수렴은 3, 4번 조건에서 걸러집니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::round_to;

use crate::indicators::MaSeries;
use crate::ma::convergence::convergence_strength;
use crate::ma::cross::{DeathCrossResult, SellWarningLevel};

/// 활성화에 필요한 최소 수렴 강도.
const MIN_STRENGTH: f64 = 75.0;
/// 초강력 수렴 기준 강도.
const ULTRA_TIGHT_STRENGTH: f64 = 95.0;

/// 강한 수렴을 뒷받침하는 이동평균 구조.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TightStructure {
    PerfectOrder,
    NearPerfectOrder,
    UltraTight,
    #[default]
    None,
}

/// 강한 수렴 감지 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TightConvergenceResult {
    pub is_active: bool,
    /// 수렴 강도 (0~100)
    pub strength: f64,
    pub structure: TightStructure,
    pub price_above_slow: bool,
    /// CRITICAL 데드 크로스로 차단되었는지 여부
    pub blocked_by_death_cross: bool,
    pub message: String,
}

/// 강한 수렴을 감지합니다.
///
/// # 인자
/// * `ma` - EMA 시계열
/// * `close` - 최근 종가
/// * `death_cross` - 같은 시점의 데드 크로스 결과
pub fn detect_tight_convergence(
    ma: &MaSeries,
    close: Decimal,
    death_cross: &DeathCrossResult,
) -> TightConvergenceResult {
    let Some(latest) = ma.latest().filter(|_| ma.has_min_bars()) else {
        return TightConvergenceResult {
            message: "데이터 부족".to_string(),
            ..Default::default()
        };
    };

    let strength = convergence_strength(&latest);
    let price_above_slow = close > latest.slow;
    let structure = if latest.is_perfect_order() {
        TightStructure::PerfectOrder
    } else if latest.is_near_perfect_order() {
        TightStructure::NearPerfectOrder
    } else if strength >= ULTRA_TIGHT_STRENGTH {
        TightStructure::UltraTight
    } else {
        TightStructure::None
    };
    let blocked_by_death_cross = death_cross.severity == SellWarningLevel::Critical;

    let is_active = strength >= MIN_STRENGTH
        && price_above_slow
        && structure != TightStructure::None
        && !blocked_by_death_cross;

    let message = if is_active {
        format!(
            "이동평균 강한 수렴 (강도 {:.0}, {}): 돌파 임박 구간",
            strength,
            match structure {
                TightStructure::PerfectOrder => "정배열",
                TightStructure::NearPerfectOrder => "준정배열",
                _ => "초강력 수렴",
            }
        )
    } else if blocked_by_death_cross {
        "중장기 데드 크로스로 강한 수렴 신호 제외".to_string()
    } else {
        format!("강한 수렴 조건 미충족 (강도 {:.0})", strength)
    };

    TightConvergenceResult {
        is_active,
        strength: round_to(strength, 1),
        structure,
        price_above_slow,
        blocked_by_death_cross,
        message,
    }
}
