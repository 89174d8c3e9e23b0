//! 스코어러 시스템의 에러 타입.
//!
//! 분석 코어는 에러를 반환하지 않습니다. 이 타입은 입력 검증, 설정 로드,
//! 가격 이력 조회 같은 I/O 경계에서만 사용됩니다.

use thiserror::Error;

/// 핵심 스코어러 에러.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 스코어러 작업을 위한 Result 타입.
pub type ScorerResult<T> = Result<T, ScorerError>;

impl ScorerError {
    /// 입력 데이터 문제로 발생한 에러인지 확인합니다.
    ///
    /// 호출자는 이 경우 재시도 대신 NA 결과로 처리할 수 있습니다.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScorerError::InvalidInput(_) | ScorerError::Data(_) | ScorerError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for ScorerError {
    fn from(err: serde_json::Error) -> Self {
        ScorerError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ScorerError {
    fn from(err: std::io::Error) -> Self {
        ScorerError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for ScorerError {
    fn from(err: config::ConfigError) -> Self {
        ScorerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        let invalid = ScorerError::InvalidInput("날짜 역순".to_string());
        assert!(invalid.is_input_error());

        let io = ScorerError::Io("disk".to_string());
        assert!(!io.is_input_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: ScorerError = err.into();
        assert!(matches!(converted, ScorerError::Serialization(_)));
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let converted: ScorerError = err.into();
        assert!(matches!(converted, ScorerError::Io(_)));
        assert!(converted.to_string().contains("missing"));
    }
}
