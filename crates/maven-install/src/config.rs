//! Maven install 분석기 설정
//!
//! [`MavenInstallConfig`]는 core의 `[analyzers.maven_install]` 섹션을
//! 확장하여 분석기 고유 설정(지원 형식 버전)을 추가합니다.
//!
//! # 사용 예시
//!
//! ```
//! use pinscan_maven_install::{MavenInstallConfig, MavenInstallConfigBuilder};
//!
//! // 기본값으로 생성
//! let config = MavenInstallConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = MavenInstallConfigBuilder::new()
//!     .max_file_size(1024 * 1024)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.supported_version, "0.1.0");
//! ```

use serde::{Deserialize, Serialize};

use pinscan_core::config::{MAX_FILE_SIZE_LIMIT, PinscanConfig};

use crate::document::SUPPORTED_VERSION;
use crate::error::MavenInstallError;

/// Maven install 분석기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MavenInstallConfig {
    /// 분석기 활성화 여부
    pub enabled: bool,
    /// 분석 대상 파일 최대 크기 (바이트)
    pub max_file_size: usize,

    // --- 분석기 고유 확장 ---
    /// 알려진 정상 형식 버전. 다른 버전은 경고만 남기고 계속 처리합니다.
    pub supported_version: String,
}

impl Default for MavenInstallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_file_size: 10 * 1024 * 1024, // 10 MB
            supported_version: SUPPORTED_VERSION.to_owned(),
        }
    }
}

impl MavenInstallConfig {
    /// core 설정에서 분석기 설정을 생성합니다.
    ///
    /// core 설정에 없는 확장 필드는 기본값을 사용합니다.
    pub fn from_core(core: &PinscanConfig) -> Self {
        let section = &core.analyzers.maven_install;
        Self {
            enabled: section.enabled,
            max_file_size: section.max_file_size,
            ..Self::default()
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_file_size`: 1-104857600 (100MB)
    /// - `supported_version`: 비어있으면 안 됨
    pub fn validate(&self) -> Result<(), MavenInstallError> {
        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(MavenInstallError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }

        if self.supported_version.trim().is_empty() {
            return Err(MavenInstallError::Config {
                field: "supported_version".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// [`MavenInstallConfig`] 빌더
#[derive(Default)]
pub struct MavenInstallConfigBuilder {
    config: MavenInstallConfig,
}

impl MavenInstallConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 활성화 여부를 설정합니다.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 지원 형식 버전을 설정합니다.
    pub fn supported_version(mut self, version: impl Into<String>) -> Self {
        self.config.supported_version = version.into();
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `MavenInstallError::Config` 반환
    pub fn build(self) -> Result<MavenInstallConfig, MavenInstallError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
