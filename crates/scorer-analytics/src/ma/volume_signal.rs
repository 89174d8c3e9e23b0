//! 거래량-수렴 상관 분석.
//!
//! 이동평균이 수렴하는 동안 거래량이 줄어들면 관망이 아니라 조용한 매집으로 봅니다.
//! 수렴 중이면서 거래량 감소일 때만 신호가 생성됩니다.

use serde::{Deserialize, Serialize};

use crate::indicators::{VolumeTrend, VolumeTrendResult};
use crate::ma::convergence::{ConvergenceLevel, ConvergenceResult};

/// 매우 낮은 거래량 비율 기준.
const VERY_LOW_RATIO: f64 = 0.5;

/// 신호 품질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeSignalQuality {
    Strong,
    Good,
    Weak,
}

/// 거래량-수렴 상관 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeConvergenceSignal {
    pub has_signal: bool,
    pub quality: Option<VolumeSignalQuality>,
    /// 기반 거래량 추세
    pub volume: VolumeTrendResult,
    pub message: String,
}

/// 수렴 결과와 거래량 추세를 교차 확인합니다.
///
/// - STRONG: SUPER_TIGHT 수렴 + 거래량 비율 < 0.5
/// - GOOD: SUPER_TIGHT 수렴, 또는 TIGHT 수렴 + 거래량 비율 < 0.5
/// - WEAK: 그 외 수렴 + 거래량 감소
pub fn correlate_volume(
    convergence: &ConvergenceResult,
    volume: &VolumeTrendResult,
) -> VolumeConvergenceSignal {
    if !convergence.is_converging || volume.trend != VolumeTrend::Decreasing {
        return VolumeConvergenceSignal {
            volume: volume.clone(),
            message: "거래량-수렴 신호 없음".to_string(),
            ..Default::default()
        };
    }

    let very_low = volume.volume_ratio < VERY_LOW_RATIO;
    let quality = match convergence.level {
        ConvergenceLevel::SuperTight if very_low => VolumeSignalQuality::Strong,
        ConvergenceLevel::SuperTight => VolumeSignalQuality::Good,
        ConvergenceLevel::Tight if very_low => VolumeSignalQuality::Good,
        _ => VolumeSignalQuality::Weak,
    };

    VolumeConvergenceSignal {
        has_signal: true,
        quality: Some(quality),
        volume: volume.clone(),
        message: format!(
            "수렴 구간 거래량 감소 (평균 대비 {:.0}%): 매집 가능성",
            volume.volume_ratio * 100.0
        ),
    }
}
