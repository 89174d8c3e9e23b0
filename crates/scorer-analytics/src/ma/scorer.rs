//! 이동평균 신호 스코어러.
//!
//! 모든 감지기 결과를 0~10 점수와 등급으로 종합합니다.
//!
//! # 가산 규칙
//!
//! 1. 정배열 + 확산 품질: STRONG +6, MODERATE +5, 그 외 +3.
//!    정배열이 아니면 단기 > 중기일 때 +2
//! 2. 종가 위치: 장기 위 +2, 중기 위 +1, 단기 위 +0.5
//! 3. 골든 크로스: 최고 신뢰도 × 0.3
//! 4. 수렴: 강도 70 초과 시 +1
//! 5. 강한 수렴: +2, MEDIUM/LOW 이탈 경고 감점 면제
//!
//! 가산 합계는 10점에서 자릅니다.
//!
//! # 감점
//!
//! CRITICAL -5, HIGH -3, MEDIUM -1 (0점 하한)
//!
//! 데이터가 부족하면 점수 0, 등급 NA, 신호 HOLD인 결과를 반환합니다.
//! 분석 과정에서 에러는 발생하지 않습니다.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use scorer_core::{
    analysis_span, round_to, AnalysisConfig, PriceHistoryProvider, PriceSeries,
    RecommendationMode, ScoreStatus, ScorerResult, TradeSignal,
};

use crate::indicators::{analyze_volume_trend, MaPeriods, MaSeries};
use crate::ma::convergence::{detect_convergence, ConvergenceResult};
use crate::ma::cross::{
    detect_death_cross, detect_golden_cross, DeathCrossResult, GoldenCrossResult,
    SellWarningLevel,
};
use crate::ma::expansion::{detect_expansion, ExpansionQuality, ExpansionResult};
use crate::ma::forecast::{classify_forecast, to_trade_signal, ForecastInputs, ForecastResult};
use crate::ma::momentum::{analyze_momentum, MomentumResult};
use crate::ma::price_position::{analyze_price_position, PricePositionResult, PriceZone};
use crate::ma::signals::{format_signals, MaSignal, SignalInputs};
use crate::ma::tight_convergence::{detect_tight_convergence, TightConvergenceResult};
use crate::ma::volume_signal::{correlate_volume, VolumeConvergenceSignal};
use crate::recommendation::{build_recommendation, Recommendation};

/// 최대 점수.
pub const MAX_SCORE: f64 = 10.0;

const GOLDEN_CROSS_WEIGHT: f64 = 0.3;
const CONVERGENCE_BONUS_STRENGTH: f64 = 70.0;

/// 분석 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 분석에 사용한 봉 개수
    pub bar_count: usize,
    /// 0~10
    pub score: f64,
    pub status: ScoreStatus,
    pub reasons: Vec<String>,
    pub perfect_order: bool,
    pub expansion: ExpansionResult,
    pub convergence: ConvergenceResult,
    pub golden_cross: GoldenCrossResult,
    pub death_cross: DeathCrossResult,
    pub momentum: MomentumResult,
    pub price_position: PricePositionResult,
    /// 거래량-수렴 상관 신호
    pub volume: VolumeConvergenceSignal,
    pub tight_convergence: TightConvergenceResult,
    pub forecast: ForecastResult,
    pub signal: TradeSignal,
    pub signals: Vec<MaSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

impl ScoreResult {
    /// 데이터 부족 결과.
    pub fn insufficient(bar_count: usize, required: usize) -> Self {
        Self {
            bar_count,
            reasons: vec![format!(
                "데이터 부족: 필요 {}개, 제공 {}개",
                required, bar_count
            )],
            ..Default::default()
        }
    }
}

/// 점수 계산 입력.
///
/// 감지기 결과에서 점수에 필요한 값만 뽑아 둔 형태입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInputs {
    pub is_perfect_order: bool,
    pub fast_above_medium: bool,
    pub expansion_quality: ExpansionQuality,
    pub expansion_message: String,
    pub zone: PriceZone,
    pub vs_slow: f64,
    pub vs_medium: f64,
    pub vs_fast: f64,
    /// 최고 신뢰도 골든 크로스 (신뢰도, 메시지)
    pub golden_cross: Option<(u8, String)>,
    pub is_converging: bool,
    pub convergence_strength: f64,
    pub convergence_message: String,
    pub tight_convergence_active: bool,
    pub sell_warning: SellWarningLevel,
    pub death_cross_label: Option<String>,
}

impl ScoreInputs {
    fn collect(
        expansion: &ExpansionResult,
        convergence: &ConvergenceResult,
        golden_cross: &GoldenCrossResult,
        death_cross: &DeathCrossResult,
        tight: &TightConvergenceResult,
        position: &PricePositionResult,
        fast_above_medium: bool,
    ) -> Self {
        Self {
            is_perfect_order: expansion.is_perfect_order,
            fast_above_medium,
            expansion_quality: expansion.quality,
            expansion_message: expansion.message.clone(),
            zone: position.zone,
            vs_slow: position.vs_slow,
            vs_medium: position.vs_medium,
            vs_fast: position.vs_fast,
            golden_cross: golden_cross
                .best_cross
                .as_ref()
                .map(|c| (c.credibility, golden_cross.message.clone())),
            is_converging: convergence.is_converging,
            convergence_strength: convergence.strength,
            convergence_message: convergence.message.clone(),
            tight_convergence_active: tight.is_active,
            sell_warning: death_cross.severity,
            death_cross_label: death_cross.strongest_cross.as_ref().map(|c| c.label.clone()),
        }
    }
}

/// 가산/감점 규칙으로 점수와 근거 목록을 계산합니다.
///
/// # 반환
/// (0~10 점수, 근거 목록)
pub fn compute_score(inputs: &ScoreInputs) -> (f64, Vec<String>) {
    let mut score: f64 = 0.0;
    let mut reasons = Vec::new();

    // 1. 정배열 + 확산
    if inputs.is_perfect_order {
        match inputs.expansion_quality {
            ExpansionQuality::Strong => {
                score += 6.0;
                reasons.push(inputs.expansion_message.clone());
            }
            ExpansionQuality::Moderate => {
                score += 5.0;
                reasons.push(inputs.expansion_message.clone());
            }
            _ => {
                score += 3.0;
                reasons.push("정배열이나 이동평균 확산은 아직 뚜렷하지 않음".to_string());
            }
        }
    } else if inputs.fast_above_medium {
        score += 2.0;
        reasons.push("단기 이동평균이 중기 위 (단기 > 중기)".to_string());
    } else {
        reasons.push("정배열 아님".to_string());
    }

    // 2. 종가 위치
    match inputs.zone {
        PriceZone::AboveSlow => {
            score += 2.0;
            reasons.push(format!("종가가 장기 이동평균 위 ({:+.1}%)", inputs.vs_slow));
        }
        PriceZone::AboveMedium => {
            score += 1.0;
            reasons.push(format!("종가가 중기 이동평균 위 ({:+.1}%)", inputs.vs_medium));
        }
        PriceZone::AboveFast => {
            score += 0.5;
            reasons.push(format!("종가가 단기 이동평균 위에만 있음 ({:+.1}%)", inputs.vs_fast));
        }
        _ => reasons.push("종가가 단기 이동평균 아래".to_string()),
    }

    // 3. 골든 크로스
    if let Some((credibility, message)) = &inputs.golden_cross {
        score += f64::from(*credibility) * GOLDEN_CROSS_WEIGHT;
        reasons.push(message.clone());
    }

    // 4. 수렴
    if inputs.is_converging {
        if inputs.convergence_strength > CONVERGENCE_BONUS_STRENGTH {
            score += 1.0;
        }
        reasons.push(inputs.convergence_message.clone());
    }

    // 5. 강한 수렴
    let mut penalty_waived = false;
    if inputs.tight_convergence_active {
        score += 2.0;
        reasons.push(format!(
            "이동평균 강한 수렴 (강도 {:.0}): 돌파 임박 구간",
            inputs.convergence_strength
        ));
        penalty_waived = matches!(
            inputs.sell_warning,
            SellWarningLevel::Medium | SellWarningLevel::Low
        );
    }

    let mut score = score.min(MAX_SCORE);

    // 6. 이탈 경고 감점
    let penalty = match inputs.sell_warning {
        SellWarningLevel::Critical => 5.0,
        SellWarningLevel::High => 3.0,
        SellWarningLevel::Medium if !penalty_waived => 1.0,
        _ => 0.0,
    };
    if penalty > 0.0 {
        score = (score - penalty).max(0.0);
        let label = inputs
            .death_cross_label
            .clone()
            .unwrap_or_else(|| "이동평균 이탈".to_string());
        reasons.push(format!(
            "{} (경고 단계 {:?}, -{}점)",
            label, inputs.sell_warning, penalty
        ));
    } else if penalty_waived && inputs.sell_warning == SellWarningLevel::Medium {
        reasons.push("강한 수렴 구간의 단기 이탈은 감점하지 않음".to_string());
    }

    (round_to(score.clamp(0.0, MAX_SCORE), 2), reasons)
}

/// 이동평균 신호 스코어러.
#[derive(Debug, Clone)]
pub struct MaScorer {
    config: AnalysisConfig,
    periods: MaPeriods,
}

impl MaScorer {
    /// 기본 설정(10/20/50 EMA)으로 스코어러를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            periods: MaPeriods::default(),
        }
    }

    /// 설정으로 스코어러를 생성합니다.
    ///
    /// # 에러
    ///
    /// 설정 검증에 실패하면 `ScorerError::Config`.
    pub fn with_config(config: AnalysisConfig) -> ScorerResult<Self> {
        config.validate()?;
        let periods = MaPeriods::new(
            config.fast_period,
            config.medium_period,
            config.slow_period,
        )?;
        Ok(Self { config, periods })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 일봉 시퀀스를 분석합니다.
    pub fn analyze(&self, series: &PriceSeries) -> ScoreResult {
        let bar_count = series.len();
        let Some(latest_bar) = series.latest().filter(|_| bar_count >= self.config.min_bars)
        else {
            debug!(
                bars = bar_count,
                required = self.config.min_bars,
                "Insufficient price history, returning NA result"
            );
            return ScoreResult::insufficient(bar_count, self.config.min_bars);
        };
        let close = latest_bar.close;

        let ma = MaSeries::from_series(series, self.periods);
        let Some(latest) = ma.latest() else {
            return ScoreResult::insufficient(bar_count, self.config.min_bars);
        };
        let perfect_order = latest.is_perfect_order();
        let price_above_slow = close > latest.slow;

        let expansion = detect_expansion(&ma);
        debug!(
            quality = ?expansion.quality,
            expanding = expansion.is_expanding,
            "Expansion detected"
        );

        let convergence = detect_convergence(&ma);
        debug!(
            converging = convergence.is_converging,
            bandwidth = convergence.bandwidth_pct,
            strength = convergence.strength,
            "Convergence detected"
        );

        let golden_cross = detect_golden_cross(&ma);
        let death_cross = detect_death_cross(&ma, close);
        debug!(
            golden = golden_cross.has_cross,
            death = death_cross.has_death_cross,
            severity = ?death_cross.severity,
            "Cross detection finished"
        );

        let tight_convergence = detect_tight_convergence(&ma, close, &death_cross);
        let momentum = analyze_momentum(&ma);
        debug!(
            alignment = ?momentum.alignment,
            tight = tight_convergence.is_active,
            "Momentum analyzed"
        );

        let price_position = analyze_price_position(series, &ma, self.config.volume_lookback);
        let volume_trend = analyze_volume_trend(series, self.config.volume_lookback);
        let volume = correlate_volume(&convergence, &volume_trend);
        debug!(
            zone = ?price_position.zone,
            wicks = price_position.wick_rejections.len(),
            volume_signal = volume.has_signal,
            "Price position analyzed"
        );

        let inputs = ScoreInputs::collect(
            &expansion,
            &convergence,
            &golden_cross,
            &death_cross,
            &tight_convergence,
            &price_position,
            latest.fast > latest.medium,
        );
        let (score, mut reasons) = compute_score(&inputs);
        if momentum.alignment.is_bullish() {
            reasons.push(momentum.summary.clone());
        }
        if volume.has_signal {
            reasons.push(volume.message.clone());
        }
        let status = ScoreStatus::from_score(score);

        let forecast = classify_forecast(&ForecastInputs {
            alignment: momentum.alignment,
            slow_slope: momentum.slow.slope,
            convergence_strength: convergence.strength,
            price_above_slow,
            is_perfect_order: perfect_order,
            sell_warning: death_cross.severity,
        });
        let mode = self.config.recommendation_mode;
        let signal = to_trade_signal(forecast.scenario, status, mode);
        let recommendation = build_recommendation(&forecast, status, signal, mode);

        let signals = format_signals(&SignalInputs {
            is_perfect_order: perfect_order,
            price_above_slow,
            expansion: &expansion,
            convergence: &convergence,
            golden_cross: &golden_cross,
            death_cross: &death_cross,
            tight_convergence: &tight_convergence,
            momentum: &momentum,
            price_position: &price_position,
        });

        info!(
            bars = bar_count,
            score,
            status = %status,
            scenario = ?forecast.scenario,
            signal = %signal,
            "MA analysis completed"
        );

        ScoreResult {
            symbol: None,
            bar_count,
            score,
            status,
            reasons,
            perfect_order,
            expansion,
            convergence,
            golden_cross,
            death_cross,
            momentum,
            price_position,
            volume,
            tight_convergence,
            forecast,
            signal,
            signals,
            recommendation,
        }
    }

    /// 제공자에서 종목 이력을 조회해 분석합니다.
    ///
    /// 이력이 없으면 NA 결과를 반환합니다.
    ///
    /// # 에러
    ///
    /// 제공자 조회가 실패한 경우
    pub fn analyze_symbol<P>(
        &self,
        provider: &P,
        symbol: &str,
        lookback_days: u32,
    ) -> ScorerResult<ScoreResult>
    where
        P: PriceHistoryProvider + ?Sized,
    {
        let series = provider
            .fetch_history(symbol, lookback_days)?
            .unwrap_or_else(PriceSeries::empty);

        let span = analysis_span!("ma_score", symbol, series.len());
        let _guard = span.enter();

        let mut result = self.analyze(&series);
        result.symbol = Some(symbol.to_uppercase());
        Ok(result)
    }

    /// 사실 정보 모드인지 확인합니다.
    pub fn is_factual(&self) -> bool {
        self.config.recommendation_mode == RecommendationMode::Factual
    }
}

impl Default for MaScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use scorer_core::PriceBar;

    fn series_from(closes: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                PriceBar::new(
                    start + Duration::days(i as i64),
                    *close,
                    *close + dec!(1),
                    *close - dec!(1),
                    *close,
                    dec!(10000),
                )
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn base_inputs() -> ScoreInputs {
        ScoreInputs {
            is_perfect_order: false,
            fast_above_medium: false,
            expansion_quality: ExpansionQuality::Neutral,
            expansion_message: String::new(),
            zone: PriceZone::BelowAll,
            vs_slow: 0.0,
            vs_medium: 0.0,
            vs_fast: 0.0,
            golden_cross: None,
            is_converging: false,
            convergence_strength: 0.0,
            convergence_message: String::new(),
            tight_convergence_active: false,
            sell_warning: SellWarningLevel::Low,
            death_cross_label: None,
        }
    }

    #[test]
    fn test_compute_score_additive_rules() {
        let (score, reasons) = compute_score(&ScoreInputs {
            is_perfect_order: true,
            expansion_quality: ExpansionQuality::Moderate,
            zone: PriceZone::AboveSlow,
            golden_cross: Some((6, "단기 골든 크로스".to_string())),
            ..base_inputs()
        });
        // 5 + 2 + 1.8
        assert_eq!(score, 8.8);
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn test_compute_score_caps_at_ten() {
        let (score, _) = compute_score(&ScoreInputs {
            is_perfect_order: true,
            expansion_quality: ExpansionQuality::Strong,
            zone: PriceZone::AboveSlow,
            golden_cross: Some((10, String::new())),
            is_converging: true,
            convergence_strength: 90.0,
            tight_convergence_active: true,
            ..base_inputs()
        });
        assert_eq!(score, MAX_SCORE);
    }

    #[test]
    fn test_critical_penalty_applies_after_cap() {
        let full = ScoreInputs {
            is_perfect_order: true,
            expansion_quality: ExpansionQuality::Strong,
            zone: PriceZone::AboveSlow,
            golden_cross: Some((10, String::new())),
            ..base_inputs()
        };
        let (without, _) = compute_score(&full);
        let (with, _) = compute_score(&ScoreInputs {
            sell_warning: SellWarningLevel::Critical,
            ..full
        });
        assert_eq!(without, 10.0);
        assert_eq!(with, 5.0);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let (score, _) = compute_score(&ScoreInputs {
            fast_above_medium: true,
            sell_warning: SellWarningLevel::High,
            ..base_inputs()
        });
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_tight_convergence_waives_medium_penalty() {
        let inputs = ScoreInputs {
            zone: PriceZone::AboveSlow,
            sell_warning: SellWarningLevel::Medium,
            ..base_inputs()
        };
        let (plain, _) = compute_score(&inputs);
        let (tight, reasons) = compute_score(&ScoreInputs {
            tight_convergence_active: true,
            ..inputs
        });

        assert_eq!(plain, 1.0);
        assert_eq!(tight, 4.0);
        assert!(reasons.iter().any(|r| r.contains("감점하지 않음")));
    }

    #[test]
    fn test_rising_series_is_good() {
        let closes: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i)).collect();
        let result = MaScorer::new().analyze(&series_from(&closes));

        assert!(result.perfect_order);
        assert_eq!(result.score, 8.0);
        assert_eq!(result.status, ScoreStatus::Good);
        assert_eq!(result.signal, TradeSignal::StrongBuy);
        assert!(result.recommendation.is_some());
    }

    #[test]
    fn test_flat_series_is_poor_caution() {
        let result = MaScorer::new().analyze(&series_from(&[dec!(100); 60]));

        assert_eq!(result.score, 1.0);
        assert_eq!(result.status, ScoreStatus::Poor);
        assert_eq!(result.signal, TradeSignal::Caution);
    }

    #[test]
    fn test_factual_mode_has_no_recommendation() {
        let config = AnalysisConfig {
            recommendation_mode: RecommendationMode::Factual,
            ..Default::default()
        };
        let scorer = MaScorer::with_config(config).unwrap();
        let closes: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i)).collect();
        let result = scorer.analyze(&series_from(&closes));

        assert!(scorer.is_factual());
        assert_eq!(result.signal, TradeSignal::Hold);
        assert!(result.recommendation.is_none());
    }

    #[test]
    fn test_insufficient_history_is_na() {
        let result = MaScorer::new().analyze(&series_from(&[dec!(100); 49]));

        assert_eq!(result.status, ScoreStatus::Na);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.signal, TradeSignal::Hold);
        assert!(result.signals.is_empty());
        assert_eq!(result.bar_count, 49);
    }

    #[test]
    fn test_extreme_price_ratio_does_not_overflow() {
        let tiny = Decimal::new(1, 25);
        let huge = Decimal::from_scientific("7e28").unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..60)
            .map(|i| {
                let value = if i < 55 { tiny } else { huge };
                PriceBar::new(start + Duration::days(i), value, value, value, value, value)
            })
            .collect();
        let series = PriceSeries::new(bars).unwrap();

        let result = MaScorer::new().analyze(&series);

        assert_eq!(result.bar_count, 60);
        assert_ne!(result.status, ScoreStatus::Na);
        assert!((0.0..=MAX_SCORE).contains(&result.score));
        assert!(serde_json::to_string(&result).is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig {
            fast_period: 30,
            ..Default::default()
        };
        assert!(MaScorer::with_config(config).is_err());
    }

    #[test]
    fn test_json_field_names() {
        let closes: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i)).collect();
        let result = MaScorer::new().analyze(&series_from(&closes));
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "score",
            "status",
            "reasons",
            "perfectOrder",
            "expansion",
            "convergence",
            "goldenCross",
            "deathCross",
            "momentum",
            "pricePosition",
            "signals",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["status"], "GOOD");
    }
}
