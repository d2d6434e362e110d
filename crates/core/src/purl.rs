//! Package URL (purl) -- 취약점 조회용 구조화된 패키지 식별자
//!
//! [`PackageUrl`]은 검증을 통과한 purl 구성 요소를 담으며,
//! [`Display`](fmt::Display) 구현이 정규화된 문자열을 생성합니다.
//!
//! # 형식
//!
//! ```text
//! pkg:<type>/<namespace>/<name>@<version>?<key>=<value>&...
//! ```
//!
//! # 사용 예시
//!
//! ```
//! use pinscan_core::purl::PackageUrl;
//!
//! let purl = PackageUrl::builder()
//!     .package_type("maven")
//!     .namespace("com.google.guava")
//!     .name("guava")
//!     .version("30.1-jre")
//!     .build()
//!     .unwrap();
//! assert_eq!(purl.to_string(), "pkg:maven/com.google.guava/guava@30.1-jre");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PurlError;

/// 검증된 Package URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUrl {
    package_type: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    /// 키 기준 정렬 (정규화 문자열 순서)
    qualifiers: BTreeMap<String, String>,
}

impl PackageUrl {
    /// 새 빌더를 생성합니다.
    pub fn builder() -> PackageUrlBuilder {
        PackageUrlBuilder::default()
    }

    /// 패키지 타입 (소문자)
    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    /// 네임스페이스 (Maven의 경우 groupId)
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// 패키지 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 버전
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// qualifier 값을 조회합니다.
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers.get(key).map(String::as_str)
    }

    /// 전체 qualifier 목록
    pub fn qualifiers(&self) -> &BTreeMap<String, String> {
        &self.qualifiers
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}/", self.package_type)?;

        if let Some(ref namespace) = self.namespace {
            for segment in namespace.split('/').filter(|s| !s.is_empty()) {
                write!(f, "{}/", percent_encode(segment))?;
            }
        }

        write!(f, "{}", percent_encode(&self.name))?;

        if let Some(ref version) = self.version {
            write!(f, "@{}", percent_encode(version))?;
        }

        let mut separator = '?';
        for (key, value) in &self.qualifiers {
            write!(f, "{separator}{key}={}", percent_encode(value))?;
            separator = '&';
        }

        Ok(())
    }
}

/// [`PackageUrl`] 빌더
///
/// `build()` 시점에 모든 구성 요소를 검증합니다.
#[derive(Debug, Default, Clone)]
pub struct PackageUrlBuilder {
    package_type: Option<String>,
    namespace: Option<String>,
    name: Option<String>,
    version: Option<String>,
    qualifiers: Vec<(String, String)>,
}

impl PackageUrlBuilder {
    /// 패키지 타입을 설정합니다 (예: "maven").
    pub fn package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// 네임스페이스를 설정합니다.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// 이름을 설정합니다.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 버전을 설정합니다.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// qualifier를 추가합니다. 같은 키는 마지막 값이 유지됩니다.
    pub fn qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers.push((key.into(), value.into()));
        self
    }

    /// 구성 요소를 검증하고 [`PackageUrl`]을 생성합니다.
    ///
    /// # Errors
    ///
    /// 타입/이름 누락, 허용되지 않는 문자, 빈 qualifier 값 등은
    /// `PurlError::Malformed`를 반환합니다.
    pub fn build(self) -> Result<PackageUrl, PurlError> {
        let package_type = validate_type(self.package_type.as_deref())?;

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(PurlError::Malformed {
                    component: "name",
                    reason: "name is required and must not be empty".to_owned(),
                });
            }
        };

        let namespace = self
            .namespace
            .filter(|ns| ns.split('/').any(|segment| !segment.is_empty()));
        let version = self.version.filter(|v| !v.is_empty());

        let mut qualifiers = BTreeMap::new();
        for (key, value) in self.qualifiers {
            let key = validate_qualifier_key(&key)?;
            if value.is_empty() {
                return Err(PurlError::Malformed {
                    component: "qualifier",
                    reason: format!("qualifier '{key}' has an empty value"),
                });
            }
            qualifiers.insert(key, value);
        }

        Ok(PackageUrl {
            package_type,
            namespace,
            name,
            version,
            qualifiers,
        })
    }
}

fn validate_type(package_type: Option<&str>) -> Result<String, PurlError> {
    let package_type = package_type.unwrap_or_default();
    let mut chars = package_type.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => {
            return Err(PurlError::Malformed {
                component: "type",
                reason: format!("'{package_type}' must start with an ASCII letter"),
            });
        }
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-') {
        return Err(PurlError::Malformed {
            component: "type",
            reason: format!("'{package_type}' contains characters outside [A-Za-z0-9.+-]"),
        });
    }

    Ok(package_type.to_ascii_lowercase())
}

fn validate_qualifier_key(key: &str) -> Result<String, PurlError> {
    let valid = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');

    if !valid {
        return Err(PurlError::Malformed {
            component: "qualifier",
            reason: format!("invalid qualifier key '{key}'"),
        });
    }

    Ok(key.to_ascii_lowercase())
}

/// RFC 3986 unreserved 문자를 제외한 모든 바이트를 퍼센트 인코딩합니다.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
