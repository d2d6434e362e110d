//! 설정 관리: pinscan.toml 파싱 및 런타임 설정
//!
//! [`PinscanConfig`]는 모든 분석기와 CLI의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PINSCAN_ANALYZERS_MAVEN_INSTALL_ENABLED=false` 형식)
//! 3. 설정 파일 (`pinscan.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), pinscan_core::error::PinscanError> {
//! use pinscan_core::config::PinscanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PinscanConfig::load("pinscan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PinscanConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PinscanError};

/// 분석 대상 파일 최대 크기 상한 (100 MB)
pub const MAX_FILE_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// 디렉토리 탐색 깊이 상한
pub const MAX_SCAN_DEPTH_LIMIT: usize = 256;

/// Pinscan 통합 설정
///
/// `pinscan.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinscanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 파일 탐색 설정
    #[serde(default)]
    pub scan: ScanConfig,
    /// 분석기별 설정
    #[serde(default)]
    pub analyzers: AnalyzersConfig,
}

impl PinscanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PinscanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PinscanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PinscanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PinscanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PinscanError> {
        toml::from_str(toml_str).map_err(|e| {
            PinscanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PINSCAN_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "PINSCAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PINSCAN_GENERAL_LOG_FORMAT");

        // Scan
        override_bool(&mut self.scan.recursive, "PINSCAN_SCAN_RECURSIVE");
        override_usize(&mut self.scan.max_depth, "PINSCAN_SCAN_MAX_DEPTH");

        // Maven install analyzer
        override_bool(
            &mut self.analyzers.maven_install.enabled,
            "PINSCAN_ANALYZERS_MAVEN_INSTALL_ENABLED",
        );
        override_usize(
            &mut self.analyzers.maven_install.max_file_size,
            "PINSCAN_ANALYZERS_MAVEN_INSTALL_MAX_FILE_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PinscanError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scan.max_depth == 0 || self.scan.max_depth > MAX_SCAN_DEPTH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_depth".to_owned(),
                reason: format!("must be 1-{MAX_SCAN_DEPTH_LIMIT}"),
            }
            .into());
        }

        let max_file_size = self.analyzers.maven_install.max_file_size;
        if max_file_size == 0 || max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "analyzers.maven_install.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }

    /// 점으로 구분된 활성화 설정 키를 조회합니다.
    ///
    /// 알 수 없는 키는 `None`을 반환합니다.
    pub fn is_enabled(&self, setting_key: &str) -> Option<bool> {
        match setting_key {
            "analyzers.maven_install.enabled" => Some(self.analyzers.maven_install.enabled),
            _ => None,
        }
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 파일 탐색 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 하위 디렉토리 재귀 탐색 여부
    pub recursive: bool,
    /// 재귀 탐색 최대 깊이
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 16,
        }
    }
}

/// 분석기별 설정 묶음
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzersConfig {
    /// 고정(pinned) Maven install 분석기
    pub maven_install: MavenInstallSection,
}

/// `[analyzers.maven_install]` 섹션
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MavenInstallSection {
    /// 활성화 여부
    pub enabled: bool,
    /// 분석 대상 파일 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for MavenInstallSection {
    fn default() -> Self {
        Self {
            enabled: true,
            max_file_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
