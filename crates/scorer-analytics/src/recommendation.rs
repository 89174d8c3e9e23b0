//! 추천 문구 생성 (선택 계층).
//!
//! 분석 코어는 사실 정보만 만듭니다. 이 모듈은 그 위에서 예측 시나리오를 먼저,
//! 점수 등급을 다음으로 참고해 사람이 읽을 추천 문구를 붙입니다.
//! 사실 정보 모드에서는 문구를 만들지 않습니다.

use serde::{Deserialize, Serialize};

use scorer_core::{RecommendationMode, ScoreStatus, TradeSignal};

use crate::ma::forecast::{ForecastResult, ForecastScenario};

/// 추천 문구.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub signal: TradeSignal,
    pub headline: String,
    pub detail: String,
}

fn status_detail(status: ScoreStatus) -> &'static str {
    match status {
        ScoreStatus::Excellent => "이동평균 구조가 매우 양호합니다.",
        ScoreStatus::Good => "이동평균 구조가 양호합니다.",
        ScoreStatus::Acceptable => "이동평균 구조가 보통 수준입니다.",
        ScoreStatus::Warning => "이동평균 구조가 약합니다.",
        ScoreStatus::Poor => "이동평균 구조가 매우 약합니다.",
        ScoreStatus::Na => "데이터가 부족합니다.",
    }
}

/// 추천 문구를 생성합니다.
///
/// # 반환
/// 사실 정보 모드이거나 등급이 NA이면 `None`
pub fn build_recommendation(
    forecast: &ForecastResult,
    status: ScoreStatus,
    signal: TradeSignal,
    mode: RecommendationMode,
) -> Option<Recommendation> {
    if mode == RecommendationMode::Factual || status == ScoreStatus::Na {
        return None;
    }

    let headline = match forecast.scenario {
        ForecastScenario::StrongUptrend => "상승 추세 지속, 보유 또는 추가 매수 고려",
        ForecastScenario::BreakoutSoon => "수렴 구간, 돌파 시 매수 고려",
        ForecastScenario::UptrendConsolidation => "상승 추세 내 조정, 분할 매수 고려",
        ForecastScenario::DowntrendWarning => "하락 전환 신호, 비중 축소 고려",
        ForecastScenario::StrongDowntrend => "하락 추세, 신규 매수 자제",
        ForecastScenario::Sideway if status.is_weak() => "방향성 부재, 관망 권장",
        ForecastScenario::Sideway => "횡보 구간, 추세 확인 후 대응",
    };

    Some(Recommendation {
        signal,
        headline: headline.to_string(),
        detail: format!("{} {}", forecast.message, status_detail(status)),
    })
}
