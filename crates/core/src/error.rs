//! 에러 타입: 도메인별 에러 정의

/// Pinscan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PinscanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 분석 처리 에러
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Package URL 생성 에러
    #[error("purl error: {0}")]
    Purl(#[from] PurlError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 분석 처리 에러
///
/// 개별 파일이나 좌표의 형식 오류는 에러가 아니라 조용한 건너뛰기로 처리됩니다.
/// 이 타입은 레코드 집합의 불변식이 깨지는 등 예상하지 못한 상황에만 사용합니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 제거 요청된 레코드가 집합에 없음
    #[error("dependency record not found: {file_path}")]
    RecordNotFound { file_path: String },

    /// 분석기 실행 실패
    #[error("analyzer '{analyzer}' failed: {reason}")]
    Failed { analyzer: String, reason: String },
}

/// Package URL 생성 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurlError {
    /// 구성 요소가 purl 문법에 맞지 않음
    #[error("malformed package url {component}: {reason}")]
    Malformed {
        component: &'static str,
        reason: String,
    },
}
