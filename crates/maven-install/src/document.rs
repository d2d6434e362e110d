//! 고정 의존성 문서 검증
//!
//! [`InstallFileReader`]는 후보 파일 바이트가 자동 생성된 고정(pinned) Maven
//! 의존성 문서인지 확인하고, 원시 좌표 목록을 꺼냅니다.
//!
//! # maven_install.json 형식 예시
//!
//! ```json
//! {
//!   "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY": "THERE_IS_NO_DATA_ONLY_ZUUL",
//!   "dependency_tree": {
//!     "version": "0.1.0",
//!     "dependencies": [ { "coord": "com.google.guava:guava:30.1-jre" } ]
//!   }
//! }
//! ```
//!
//! 알 수 없는 필드는 모든 수준에서 무시합니다. 문자열 필드에 숫자나 불리언이
//! 오면 문자열 표현으로 읽고, 그 밖의 값(배열, 객체)은 없는 것으로 봅니다.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// 자동 생성 문서임을 나타내는 센티널 값
pub const SENTINEL: &str = "THERE_IS_NO_DATA_ONLY_ZUUL";

/// 센티널이 담기는 필드 이름
pub const SENTINEL_FIELD: &str = "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY";

/// 알려진 정상 형식 버전
pub const SUPPORTED_VERSION: &str = "0.1.0";

/// 문서 최상위 구조 (파싱용)
#[derive(Debug, Deserialize)]
struct InstallFile {
    #[serde(
        default,
        rename = "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY",
        deserialize_with = "lenient_string"
    )]
    sentinel: Option<String>,
    #[serde(default)]
    dependency_tree: Option<DependencyTree>,
}

/// `dependency_tree` 객체 (파싱용)
#[derive(Debug, Deserialize)]
struct DependencyTree {
    #[serde(
        default,
        rename = "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY",
        deserialize_with = "lenient_string"
    )]
    sentinel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    version: Option<String>,
    #[serde(default)]
    dependencies: Option<Vec<Option<RawCoordinate>>>,
}

/// 파싱 전 좌표 항목
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCoordinate {
    /// 분해되지 않은 좌표 문자열 (예: `group:artifact:version`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub coord: Option<String>,
}

/// 스칼라 값을 문자열로 읽습니다. 항목 하나의 타입 오류로 문서 전체가 거부되지 않게 합니다.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl RawCoordinate {
    /// 좌표 문자열로 항목을 생성합니다.
    pub fn new(coord: impl Into<String>) -> Self {
        Self {
            coord: Some(coord.into()),
        }
    }
}

/// 수락된 문서
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedDocument {
    /// 문서에 기록된 형식 버전
    pub format_version: Option<String>,
    /// 문서 순서를 유지한 좌표 목록 (`dependencies: null`이면 비어 있음)
    pub coordinates: Vec<RawCoordinate>,
}

/// 문서 거부 사유
///
/// 거부는 에러가 아닙니다. 후보 파일은 일반 파일 레코드로 남습니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// JSON 구문 오류 또는 최상위 구조 불일치
    #[error("not a maven install document: {0}")]
    ParseFailure(String),

    /// `dependency_tree` 없음
    #[error("no dependency_tree")]
    NoTree,

    /// 센티널 불일치
    #[error("sentinel mismatch: found {found:?}")]
    SentinelMismatch {
        /// 문서에서 찾은 값 (없으면 `None`)
        found: Option<String>,
    },
}

impl Rejected {
    /// 메트릭 레이블 값
    pub fn label(&self) -> &'static str {
        match self {
            Self::ParseFailure(_) => "parse_failure",
            Self::NoTree => "no_tree",
            Self::SentinelMismatch { .. } => "sentinel_mismatch",
        }
    }
}

/// 고정 의존성 문서 리더
///
/// 분석기 생성 시 한 번 만들어지고, 이후 파일마다 공유 참조로 사용됩니다.
/// 내부 상태를 변경하지 않으므로 여러 스레드에서 동시에 사용할 수 있습니다.
#[derive(Debug, Clone)]
pub struct InstallFileReader {
    supported_version: String,
}

impl Default for InstallFileReader {
    fn default() -> Self {
        Self::new(SUPPORTED_VERSION)
    }
}

impl InstallFileReader {
    /// 지원 형식 버전을 지정하여 리더를 생성합니다.
    pub fn new(supported_version: impl Into<String>) -> Self {
        Self {
            supported_version: supported_version.into(),
        }
    }

    /// 지원 형식 버전
    pub fn supported_version(&self) -> &str {
        &self.supported_version
    }

    /// 바이트를 검증하고 좌표 목록을 반환합니다.
    ///
    /// 센티널은 `dependency_tree` 안의 값을 우선하며, 없으면 최상위 값을 사용합니다.
    /// 형식 버전이 지원 버전과 다르면 경고만 남기고 계속 처리합니다.
    pub fn validate(&self, bytes: &[u8]) -> Result<AcceptedDocument, Rejected> {
        let document: InstallFile =
            serde_json::from_slice(bytes).map_err(|e| Rejected::ParseFailure(e.to_string()))?;

        let tree = document.dependency_tree.ok_or(Rejected::NoTree)?;

        let sentinel = tree.sentinel.or(document.sentinel);
        if sentinel.as_deref() != Some(SENTINEL) {
            return Err(Rejected::SentinelMismatch { found: sentinel });
        }

        if let Some(version) = tree.version.as_deref().filter(|v| *v != self.supported_version) {
            warn!(
                version = version,
                supported = %self.supported_version,
                "unsupported maven_install format version; results may be inaccurate"
            );
        }

        let coordinates = tree
            .dependencies
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        Ok(AcceptedDocument {
            format_version: tree.version,
            coordinates,
        })
    }
}
