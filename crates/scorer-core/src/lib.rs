//! # Scorer Core
//!
//! 이동평균 신호 스코어러의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 엔진과 CLI가 공유하는 기본 타입을 제공합니다:
//! - 일봉 가격 데이터 (`PriceBar`, `PriceSeries`)
//! - 가격 이력 제공자 추상화 (`PriceHistoryProvider`)
//! - 점수 등급 및 매매 신호 열거형
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
