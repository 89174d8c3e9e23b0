//! 분석 결과의 표시 매핑 (아이콘, 색상).
//!
//! 점수 계산은 이 모듈에 의존하지 않습니다. 렌더러가 열거형 값을 화면 표현으로
//! 바꿀 때만 사용합니다.
//!
//! 색상은 국내 시세 표시 관례를 따릅니다: 상한 보라, 상승 초록, 기준 노랑,
//! 하락 빨강, 하한 청록, 중립 회색.

use serde::Serialize;

use scorer_core::{ScoreStatus, TradeSignal};

use crate::indicators::VolumeTrend;
use crate::ma::convergence::ConvergenceLevel;
use crate::ma::cross::SellWarningLevel;
use crate::ma::expansion::ExpansionQuality;
use crate::ma::forecast::ForecastScenario;
use crate::ma::momentum::MomentumAlignment;

/// 시세 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketColor {
    /// 상한
    Purple,
    /// 상승
    Green,
    /// 기준
    Yellow,
    /// 하락
    Red,
    /// 하한
    Cyan,
    /// 중립
    Grey,
}

impl MarketColor {
    /// CSS 색상 코드.
    pub fn hex(self) -> &'static str {
        match self {
            MarketColor::Purple => "#9c27b0",
            MarketColor::Green => "#4caf50",
            MarketColor::Yellow => "#ffc107",
            MarketColor::Red => "#f44336",
            MarketColor::Cyan => "#00bcd4",
            MarketColor::Grey => "#9e9e9e",
        }
    }
}

/// 아이콘과 색상 한 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Material Design 아이콘 이름
    pub icon: &'static str,
    pub color: MarketColor,
}

const fn present(icon: &'static str, color: MarketColor) -> Presentation {
    Presentation { icon, color }
}

pub fn status(value: ScoreStatus) -> Presentation {
    match value {
        ScoreStatus::Excellent => present("mdi-star", MarketColor::Purple),
        ScoreStatus::Good => present("mdi-thumb-up", MarketColor::Green),
        ScoreStatus::Acceptable => present("mdi-check", MarketColor::Yellow),
        ScoreStatus::Warning => present("mdi-alert", MarketColor::Red),
        ScoreStatus::Poor => present("mdi-close-circle", MarketColor::Cyan),
        ScoreStatus::Na => present("mdi-help-circle", MarketColor::Grey),
    }
}

pub fn trade_signal(value: TradeSignal) -> Presentation {
    match value {
        TradeSignal::StrongBuy => present("mdi-arrow-up-bold-circle", MarketColor::Purple),
        TradeSignal::Buy => present("mdi-arrow-up-bold", MarketColor::Green),
        TradeSignal::Hold => present("mdi-pause-circle", MarketColor::Yellow),
        TradeSignal::Caution => present("mdi-alert-circle-outline", MarketColor::Grey),
        TradeSignal::Sell => present("mdi-arrow-down-bold", MarketColor::Red),
        TradeSignal::StrongSell => present("mdi-arrow-down-bold-circle", MarketColor::Cyan),
    }
}

pub fn convergence_level(value: ConvergenceLevel) -> Presentation {
    match value {
        ConvergenceLevel::SuperTight => present("mdi-arrow-collapse-horizontal", MarketColor::Purple),
        ConvergenceLevel::Tight => present("mdi-arrow-collapse", MarketColor::Green),
        ConvergenceLevel::Loose => present("mdi-arrow-expand", MarketColor::Grey),
        ConvergenceLevel::Na => present("mdi-help-circle", MarketColor::Grey),
    }
}

pub fn expansion_quality(value: ExpansionQuality) -> Presentation {
    match value {
        ExpansionQuality::Strong => present("mdi-chart-line-variant", MarketColor::Purple),
        ExpansionQuality::Moderate => present("mdi-trending-up", MarketColor::Green),
        ExpansionQuality::Weak => present("mdi-trending-neutral", MarketColor::Yellow),
        ExpansionQuality::Neutral => present("mdi-minus", MarketColor::Grey),
        ExpansionQuality::Contracting => present("mdi-trending-down", MarketColor::Red),
    }
}

pub fn momentum_alignment(value: MomentumAlignment) -> Presentation {
    match value {
        MomentumAlignment::BullishAligned => present("mdi-rocket-launch", MarketColor::Purple),
        MomentumAlignment::MostlyBullish => present("mdi-trending-up", MarketColor::Green),
        MomentumAlignment::Mixed => present("mdi-swap-vertical", MarketColor::Yellow),
        MomentumAlignment::MostlyBearish => present("mdi-trending-down", MarketColor::Red),
        MomentumAlignment::BearishAligned => present("mdi-arrow-down-circle", MarketColor::Cyan),
        MomentumAlignment::Na => present("mdi-help-circle", MarketColor::Grey),
    }
}

pub fn sell_warning(value: SellWarningLevel) -> Presentation {
    match value {
        SellWarningLevel::Critical => present("mdi-alert-octagon", MarketColor::Cyan),
        SellWarningLevel::High => present("mdi-alert", MarketColor::Red),
        SellWarningLevel::Medium => present("mdi-alert-outline", MarketColor::Yellow),
        SellWarningLevel::Low => present("mdi-shield-check", MarketColor::Green),
        SellWarningLevel::Na => present("mdi-help-circle", MarketColor::Grey),
    }
}

pub fn volume_trend(value: VolumeTrend) -> Presentation {
    match value {
        VolumeTrend::Decreasing => present("mdi-volume-low", MarketColor::Yellow),
        VolumeTrend::Stable => present("mdi-volume-medium", MarketColor::Grey),
        VolumeTrend::Increasing => present("mdi-volume-high", MarketColor::Green),
        VolumeTrend::Na => present("mdi-help-circle", MarketColor::Grey),
    }
}

pub fn forecast(value: ForecastScenario) -> Presentation {
    match value {
        ForecastScenario::StrongUptrend => present("mdi-rocket-launch", MarketColor::Purple),
        ForecastScenario::BreakoutSoon => present("mdi-flash", MarketColor::Green),
        ForecastScenario::UptrendConsolidation => present("mdi-chart-timeline-variant", MarketColor::Green),
        ForecastScenario::Sideway => present("mdi-arrow-left-right", MarketColor::Yellow),
        ForecastScenario::DowntrendWarning => present("mdi-alert", MarketColor::Red),
        ForecastScenario::StrongDowntrend => present("mdi-arrow-down-circle", MarketColor::Cyan),
    }
}
