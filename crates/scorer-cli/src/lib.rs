//! 스코어러 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 파일 기반 가격 이력 제공자 (CSV, JSON)
//! - 분석 명령과 결과 렌더링 (JSON, 텍스트)

pub mod commands;
