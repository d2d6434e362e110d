//! Maven install 분석기 에러 타입
//!
//! [`MavenInstallError`]는 분석기 구성과 후보 파일 읽기에서 발생하는 에러를 나타냅니다.
//! 문서 형식 불일치나 잘못된 좌표는 에러가 아니며, 각각
//! [`Rejected`](crate::document::Rejected)와 [`SkipReason`](crate::coordinate::SkipReason)으로
//! 표현되어 조용히 건너뜁니다.
//!
//! `From<MavenInstallError> for PinscanError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.

use pinscan_core::error::{AnalysisError, ConfigError, PinscanError};

/// Maven install 분석기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum MavenInstallError {
    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },
}

impl From<MavenInstallError> for PinscanError {
    fn from(err: MavenInstallError) -> Self {
        match err {
            MavenInstallError::Config { field, reason } => {
                PinscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            MavenInstallError::Io { path, source } => PinscanError::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
            MavenInstallError::FileTooBig { path, size, max } => {
                PinscanError::Analysis(AnalysisError::Failed {
                    analyzer: crate::analyzer::ANALYZER_NAME.to_owned(),
                    reason: format!("file too large: {path}: {size} bytes (max: {max})"),
                })
            }
        }
    }
}
