//! 사실 기반 신호 목록 생성.
//!
//! 감지기 결과를 우선순위 순서의 신호 목록으로 정리합니다. 신호에는 매매 지시가
//! 없으며 분류, 우선순위, 설명만 담습니다.
//!
//! # 우선순위 (낮을수록 우선)
//!
//! 1. 매도 경고 / 데드 크로스
//! 2. 강한 수렴
//! 3. 확산
//! 4. 약한 상승 (정배열 없이 종가가 장기 EMA 위)
//! 5. 골든 크로스
//! 6. 수렴
//! 7. 정배열
//! 8. 모멘텀 (참고)
//! 9. 가격 위치 (참고)
//!
//! # 충돌 해소
//!
//! - CRITICAL/HIGH 경고가 있으면 골든 크로스와 수렴 신호를 표시하지 않습니다.
//! - 수렴은 종가가 장기 EMA 위이고 아직 정배열이 아닐 때만 표시합니다.
//!   정배열이 되면 확산/정배열 신호가 대신합니다.

use serde::{Deserialize, Serialize};

use crate::indicators::MaLine;
use crate::ma::convergence::ConvergenceResult;
use crate::ma::cross::{DeathCrossResult, GoldenCrossResult, SellWarningLevel};
use crate::ma::expansion::ExpansionResult;
use crate::ma::momentum::{MomentumAlignment, MomentumResult};
use crate::ma::price_position::{PricePositionResult, PriceZone, WickDirection};
use crate::ma::tight_convergence::TightConvergenceResult;

/// 신호 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    SellWarning,
    TightConvergence,
    Expansion,
    WeakUptrend,
    GoldenCross,
    Convergence,
    PerfectOrder,
    Momentum,
    PricePosition,
}

impl SignalCategory {
    /// 표시 우선순위 (낮을수록 우선).
    pub fn priority(self) -> u8 {
        match self {
            SignalCategory::SellWarning => 1,
            SignalCategory::TightConvergence => 2,
            SignalCategory::Expansion => 3,
            SignalCategory::WeakUptrend => 4,
            SignalCategory::GoldenCross => 5,
            SignalCategory::Convergence => 6,
            SignalCategory::PerfectOrder => 7,
            SignalCategory::Momentum => 8,
            SignalCategory::PricePosition => 9,
        }
    }

    /// 참고용 신호(모멘텀, 가격 위치)인지 확인합니다.
    pub fn is_informational(self) -> bool {
        matches!(self, SignalCategory::Momentum | SignalCategory::PricePosition)
    }
}

/// 신호 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaSignal {
    pub category: SignalCategory,
    pub priority: u8,
    /// 매도 경고 단계 (매도 경고 신호에만 존재)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SellWarningLevel>,
    pub title: String,
    pub description: String,
}

impl MaSignal {
    fn new(category: SignalCategory, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category,
            priority: category.priority(),
            severity: None,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// 신호 생성 입력.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs<'a> {
    pub is_perfect_order: bool,
    pub price_above_slow: bool,
    pub expansion: &'a ExpansionResult,
    pub convergence: &'a ConvergenceResult,
    pub golden_cross: &'a GoldenCrossResult,
    pub death_cross: &'a DeathCrossResult,
    pub tight_convergence: &'a TightConvergenceResult,
    pub momentum: &'a MomentumResult,
    pub price_position: &'a PricePositionResult,
}

/// 감지기 결과로부터 우선순위 순서의 신호 목록을 만듭니다.
pub fn format_signals(inputs: &SignalInputs<'_>) -> Vec<MaSignal> {
    let mut signals = Vec::new();
    let death = inputs.death_cross;
    let severe = death.severity.is_severe();

    if matches!(
        death.severity,
        SellWarningLevel::Critical | SellWarningLevel::High | SellWarningLevel::Medium
    ) {
        let title = match death.severity {
            SellWarningLevel::Critical => "중장기 데드 크로스",
            SellWarningLevel::High => "단기 데드 크로스",
            _ => "이동평균 이탈",
        };
        let mut description = death.message.clone();
        if death.slow_ma_flattening {
            description.push_str(", 장기 이동평균 상승 둔화");
        }
        signals.push(MaSignal {
            severity: Some(death.severity),
            ..MaSignal::new(SignalCategory::SellWarning, title, description)
        });
    }

    let tight_shown = inputs.tight_convergence.is_active;
    if tight_shown {
        signals.push(MaSignal::new(
            SignalCategory::TightConvergence,
            "강한 수렴",
            inputs.tight_convergence.message.clone(),
        ));
    }

    let expansion_shown = !tight_shown && inputs.expansion.is_expanding;
    if expansion_shown {
        signals.push(MaSignal::new(
            SignalCategory::Expansion,
            "이동평균 확산",
            inputs.expansion.message.clone(),
        ));
    }

    if inputs.price_above_slow && !inputs.is_perfect_order {
        signals.push(MaSignal::new(
            SignalCategory::WeakUptrend,
            "약한 상승",
            "종가가 장기 이동평균 위에 있으나 정배열은 아님",
        ));
    }

    if !severe {
        if let Some(best) = &inputs.golden_cross.best_cross {
            signals.push(MaSignal::new(
                SignalCategory::GoldenCross,
                best.label.clone(),
                inputs.golden_cross.message.clone(),
            ));
        }
    }

    if !severe
        && inputs.convergence.is_converging
        && inputs.price_above_slow
        && !inputs.is_perfect_order
    {
        signals.push(MaSignal::new(
            SignalCategory::Convergence,
            "이동평균 수렴",
            inputs.convergence.message.clone(),
        ));
    }

    if inputs.is_perfect_order && !expansion_shown && !tight_shown {
        signals.push(MaSignal::new(
            SignalCategory::PerfectOrder,
            "정배열",
            "단기 > 중기 > 장기 이동평균 정배열 유지",
        ));
    }

    if inputs.momentum.alignment != MomentumAlignment::Na {
        signals.push(MaSignal::new(
            SignalCategory::Momentum,
            "모멘텀",
            inputs.momentum.summary.clone(),
        ));
    }

    let position = inputs.price_position;
    if position.zone != PriceZone::Na {
        let mut description = position.message.clone();
        for wick in &position.wick_rejections {
            let kind = match wick.direction {
                WickDirection::Bullish => "아래꼬리 지지",
                WickDirection::Bearish => "위꼬리 저항",
            };
            let line = match wick.line {
                MaLine::Fast => "단기",
                MaLine::Medium => "중기",
                MaLine::Slow => "장기",
            };
            description.push_str(&format!(
                ", {} EMA {} (관통 {:.2}%)",
                line, kind, wick.test_depth_pct
            ));
        }
        signals.push(MaSignal::new(
            SignalCategory::PricePosition,
            "가격 위치",
            description,
        ));
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ma::cross::{CrossEvent, CrossPair};

    struct Fixture {
        expansion: ExpansionResult,
        convergence: ConvergenceResult,
        golden_cross: GoldenCrossResult,
        death_cross: DeathCrossResult,
        tight_convergence: TightConvergenceResult,
        momentum: MomentumResult,
        price_position: PricePositionResult,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                expansion: ExpansionResult::default(),
                convergence: ConvergenceResult::default(),
                golden_cross: GoldenCrossResult::default(),
                death_cross: DeathCrossResult {
                    severity: SellWarningLevel::Low,
                    ..Default::default()
                },
                tight_convergence: TightConvergenceResult::default(),
                momentum: MomentumResult::default(),
                price_position: PricePositionResult::default(),
            }
        }

        fn signals(&self, is_perfect_order: bool, price_above_slow: bool) -> Vec<MaSignal> {
            format_signals(&SignalInputs {
                is_perfect_order,
                price_above_slow,
                expansion: &self.expansion,
                convergence: &self.convergence,
                golden_cross: &self.golden_cross,
                death_cross: &self.death_cross,
                tight_convergence: &self.tight_convergence,
                momentum: &self.momentum,
                price_position: &self.price_position,
            })
        }
    }

    fn categories(signals: &[MaSignal]) -> Vec<SignalCategory> {
        signals.iter().map(|s| s.category).collect()
    }

    fn golden(pair: CrossPair) -> GoldenCrossResult {
        let event = CrossEvent {
            pair,
            credibility: pair.credibility(),
            label: "골든 크로스".to_string(),
        };
        GoldenCrossResult {
            has_cross: true,
            crosses: vec![event.clone()],
            best_cross: Some(event),
            message: String::new(),
        }
    }

    #[test]
    fn test_signals_are_ordered_by_priority() {
        let mut fx = Fixture::new();
        fx.golden_cross = golden(CrossPair::FastMedium);
        fx.convergence.is_converging = true;
        fx.momentum.alignment = MomentumAlignment::Mixed;
        fx.price_position.zone = PriceZone::AboveSlow;

        let signals = fx.signals(false, true);
        assert_eq!(
            categories(&signals),
            vec![
                SignalCategory::WeakUptrend,
                SignalCategory::GoldenCross,
                SignalCategory::Convergence,
                SignalCategory::Momentum,
                SignalCategory::PricePosition,
            ]
        );
        assert!(signals.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn test_severe_warning_suppresses_golden_cross_and_convergence() {
        let mut fx = Fixture::new();
        fx.golden_cross = golden(CrossPair::FastMedium);
        fx.convergence.is_converging = true;
        fx.death_cross.severity = SellWarningLevel::High;

        let signals = fx.signals(false, true);
        let cats = categories(&signals);

        assert_eq!(cats[0], SignalCategory::SellWarning);
        assert_eq!(signals[0].severity, Some(SellWarningLevel::High));
        assert!(!cats.contains(&SignalCategory::GoldenCross));
        assert!(!cats.contains(&SignalCategory::Convergence));
    }

    #[test]
    fn test_medium_warning_keeps_golden_cross() {
        let mut fx = Fixture::new();
        fx.golden_cross = golden(CrossPair::MediumSlow);
        fx.death_cross.severity = SellWarningLevel::Medium;

        let cats = categories(&fx.signals(true, true));
        assert!(cats.contains(&SignalCategory::SellWarning));
        assert!(cats.contains(&SignalCategory::GoldenCross));
    }

    #[test]
    fn test_perfect_order_excludes_convergence() {
        let mut fx = Fixture::new();
        fx.convergence.is_converging = true;

        let cats = categories(&fx.signals(true, true));
        assert!(cats.contains(&SignalCategory::PerfectOrder));
        assert!(!cats.contains(&SignalCategory::Convergence));
    }

    #[test]
    fn test_expansion_replaces_perfect_order_fallback() {
        let mut fx = Fixture::new();
        fx.expansion.is_expanding = true;

        let cats = categories(&fx.signals(true, true));
        assert_eq!(cats, vec![SignalCategory::Expansion]);
    }

    #[test]
    fn test_tight_convergence_hides_expansion() {
        let mut fx = Fixture::new();
        fx.expansion.is_expanding = true;
        fx.tight_convergence.is_active = true;

        let cats = categories(&fx.signals(true, true));
        assert_eq!(cats, vec![SignalCategory::TightConvergence]);
    }

    #[test]
    fn test_no_action_field_in_json() {
        let mut fx = Fixture::new();
        fx.death_cross.severity = SellWarningLevel::Critical;
        let json = serde_json::to_value(fx.signals(false, false)).unwrap();

        assert_eq!(json[0]["category"], "sell_warning");
        assert_eq!(json[0]["severity"], "CRITICAL");
        assert!(json[0].get("action").is_none());
    }
}
