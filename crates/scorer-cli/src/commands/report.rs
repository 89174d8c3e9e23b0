//! 분석 결과 렌더링 (JSON, 텍스트).

use serde_json::{json, Value};

use scorer_analytics::ma::presentation::{self, Presentation};
use scorer_analytics::{MaSignal, ScoreResult};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

fn entry(p: Presentation) -> Value {
    json!({ "icon": p.icon, "color": p.color, "hex": p.color.hex() })
}

/// 결과의 열거형 값에 대한 아이콘/색상 매핑.
fn presentation_block(result: &ScoreResult) -> Value {
    json!({
        "status": entry(presentation::status(result.status)),
        "signal": entry(presentation::trade_signal(result.signal)),
        "convergence": entry(presentation::convergence_level(result.convergence.level)),
        "expansion": entry(presentation::expansion_quality(result.expansion.quality)),
        "momentum": entry(presentation::momentum_alignment(result.momentum.alignment)),
        "deathCross": entry(presentation::sell_warning(result.death_cross.severity)),
        "volume": entry(presentation::volume_trend(result.volume.volume.trend)),
        "forecast": entry(presentation::forecast(result.forecast.scenario)),
    })
}

fn signal_line(signal: &MaSignal) -> String {
    let severity = signal
        .severity
        .map(|s| format!(" [{:?}]", s))
        .unwrap_or_default();
    format!(
        "  {}. {}{}: {}",
        signal.priority, signal.title, severity, signal.description
    )
}

/// JSON으로 렌더링합니다.
///
/// `with_presentation`이면 `presentation` 필드에 아이콘/색상 매핑을 덧붙입니다.
pub fn render_json(result: &ScoreResult, with_presentation: bool) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(result)?;
    if with_presentation {
        if let Value::Object(map) = &mut value {
            map.insert("presentation".to_string(), presentation_block(result));
        }
    }
    serde_json::to_string_pretty(&value)
}

/// 사람이 읽을 텍스트 보고서로 렌더링합니다.
pub fn render_text(result: &ScoreResult) -> String {
    let mut lines = Vec::new();
    let symbol = result.symbol.as_deref().unwrap_or("-");

    lines.push(format!(
        "{}  점수 {:.2}/10  {}  신호 {}  ({}봉)",
        symbol, result.score, result.status, result.signal, result.bar_count
    ));
    lines.push(format!(
        "시나리오: {:?} ({:?}) {}",
        result.forecast.scenario, result.forecast.confidence, result.forecast.message
    ));

    if !result.reasons.is_empty() {
        lines.push(String::new());
        lines.push("근거:".to_string());
        lines.extend(result.reasons.iter().map(|r| format!("  - {}", r)));
    }

    let (notes, signals): (Vec<&MaSignal>, Vec<&MaSignal>) = result
        .signals
        .iter()
        .partition(|s| s.category.is_informational());

    if !signals.is_empty() {
        lines.push(String::new());
        lines.push("신호:".to_string());
        lines.extend(signals.into_iter().map(signal_line));
    }
    if !notes.is_empty() {
        lines.push(String::new());
        lines.push("참고:".to_string());
        lines.extend(notes.into_iter().map(signal_line));
    }

    if let Some(rec) = &result.recommendation {
        lines.push(String::new());
        lines.push(format!("추천: {}", rec.headline));
        lines.push(format!("  {}", rec.detail));
    }

    lines.join("\n")
}
