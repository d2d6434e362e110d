//! 도메인 타입: 시스템 전역에서 사용되는 공통 타입
//!
//! 의존성 레코드, 증거(evidence), 식별자 등 분석기와 집계기가 공유하는
//! 데이터 구조를 정의합니다.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::purl::PackageUrl;

/// 패키지 생태계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// JVM (Maven 좌표)
    Maven,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven => write!(f, "maven"),
        }
    }
}

impl Ecosystem {
    /// 생태계에 대응하는 Package URL 타입을 반환합니다.
    pub fn purl_type(&self) -> &str {
        match self {
            Self::Maven => "maven",
        }
    }

    /// 문자열에서 생태계를 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maven" | "java" | "jvm" => Some(Self::Maven),
            _ => None,
        }
    }
}

/// 신뢰도 수준
///
/// 외부 매칭 엔진이 식별 결과의 확실성을 가중치로 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// 낮음
    Low,
    /// 중간
    Medium,
    /// 높음
    High,
    /// 최고
    Highest,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Highest => write!(f, "highest"),
        }
    }
}

/// 증거 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    /// 공급자 (Maven groupId)
    Vendor,
    /// 제품 (Maven artifactId)
    Product,
    /// 버전
    Version,
}

/// 레코드에 첨부되는 단일 증거
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// 증거 종류
    pub kind: EvidenceType,
    /// 출처 (예: "project")
    pub source: String,
    /// 이름 (예: "groupid")
    pub name: String,
    /// 값
    pub value: String,
    /// 신뢰도
    pub confidence: Confidence,
}

/// 소프트웨어 식별자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identifier {
    /// 구조화된 Package URL
    Purl {
        purl: PackageUrl,
        confidence: Confidence,
    },
    /// purl을 만들 수 없을 때 사용하는 자유 형식 식별자
    Generic { value: String, confidence: Confidence },
}

impl Identifier {
    /// 식별자의 신뢰도를 반환합니다.
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Purl { confidence, .. } | Self::Generic { confidence, .. } => *confidence,
        }
    }

    /// 구조화된 purl이면 참조를 반환합니다.
    pub fn as_purl(&self) -> Option<&PackageUrl> {
        match self {
            Self::Purl { purl, .. } => Some(purl),
            Self::Generic { .. } => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purl { purl, .. } => write!(f, "{purl}"),
            Self::Generic { value, .. } => write!(f, "{value}"),
        }
    }
}

/// 의존성 레코드
///
/// 파일 선택기가 만든 파일 단위 레코드와, 분석기가 파일 내용을 분해해 만든
/// 가상(virtual) 레코드를 모두 표현합니다. 집계기는 `file_path`를 키로 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// 디스크상의 실제 파일 경로
    pub actual_file_path: PathBuf,
    /// 레코드 고유 경로 (가상 레코드는 `<파일>>><좌표>` 형식)
    pub file_path: String,
    /// 표시용 파일명
    pub file_name: String,
    /// 파일 내용에서 파생된 레코드 여부
    pub is_virtual: bool,
    /// 생태계
    pub ecosystem: Option<Ecosystem>,
    /// 패키지 이름
    pub name: Option<String>,
    /// 패키지 버전
    pub version: Option<String>,
    /// 수집된 증거 목록
    pub evidence: Vec<Evidence>,
    /// 소프트웨어 식별자 목록
    pub identifiers: Vec<Identifier>,
}

impl Dependency {
    /// 디스크 파일 하나에 대응하는 레코드를 생성합니다.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            actual_file_path: path.to_path_buf(),
            file_path: path.display().to_string(),
            file_name: file_name_of(path),
            is_virtual: false,
            ecosystem: None,
            name: None,
            version: None,
            evidence: Vec::new(),
            identifiers: Vec::new(),
        }
    }

    /// 실제 파일에서 파생된 가상 레코드를 생성합니다.
    ///
    /// `file_path`와 `file_name`은 호출자가 고유하게 설정해야 합니다.
    pub fn new_virtual(actual_file: impl AsRef<Path>) -> Self {
        Self {
            is_virtual: true,
            ..Self::from_file(actual_file)
        }
    }

    /// 증거를 추가합니다.
    pub fn add_evidence(
        &mut self,
        kind: EvidenceType,
        source: &str,
        name: &str,
        value: &str,
        confidence: Confidence,
    ) {
        self.evidence.push(Evidence {
            kind,
            source: source.to_owned(),
            name: name.to_owned(),
            value: value.to_owned(),
            confidence,
        });
    }

    /// 소프트웨어 식별자를 추가합니다.
    pub fn add_identifier(&mut self, identifier: Identifier) {
        self.identifiers.push(identifier);
    }

    /// 특정 종류의 증거 목록을 반환합니다.
    pub fn evidence_of(&self, kind: EvidenceType) -> impl Iterator<Item = &Evidence> {
        self.evidence.iter().filter(move |e| e.kind == kind)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({})",
            self.name.as_deref().unwrap_or(&self.file_name),
            self.version.as_deref().unwrap_or("-"),
            self.file_path,
        )
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecosystem_display_and_purl_type() {
        assert_eq!(Ecosystem::Maven.to_string(), "maven");
        assert_eq!(Ecosystem::Maven.purl_type(), "maven");
    }

    #[test]
    fn ecosystem_from_str_loose() {
        assert_eq!(Ecosystem::from_str_loose("Maven"), Some(Ecosystem::Maven));
        assert_eq!(Ecosystem::from_str_loose("JAVA"), Some(Ecosystem::Maven));
        assert_eq!(Ecosystem::from_str_loose("npm"), None);
    }

    #[test]
    fn confidence_ordering() {
        assert!(Confidence::Highest > Confidence::High);
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
    }

    #[test]
    fn from_file_sets_paths() {
        let dep = Dependency::from_file("/repo/third_party/maven_install.json");
        assert_eq!(dep.file_path, "/repo/third_party/maven_install.json");
        assert_eq!(dep.file_name, "maven_install.json");
        assert!(!dep.is_virtual);
        assert!(dep.name.is_none());
    }

    #[test]
    fn new_virtual_marks_record() {
        let dep = Dependency::new_virtual("/repo/maven_install.json");
        assert!(dep.is_virtual);
        assert_eq!(dep.actual_file_path, PathBuf::from("/repo/maven_install.json"));
    }

    #[test]
    fn evidence_of_filters_by_kind() {
        let mut dep = Dependency::from_file("x.json");
        dep.add_evidence(EvidenceType::Vendor, "project", "groupid", "g", Confidence::Highest);
        dep.add_evidence(EvidenceType::Product, "project", "artifactid", "a", Confidence::Highest);
        let vendors: Vec<_> = dep.evidence_of(EvidenceType::Vendor).collect();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].value, "g");
    }

    #[test]
    fn identifier_display_and_confidence() {
        let generic = Identifier::Generic {
            value: "maven_install JSON coord a:b".to_owned(),
            confidence: Confidence::High,
        };
        assert_eq!(generic.to_string(), "maven_install JSON coord a:b");
        assert_eq!(generic.confidence(), Confidence::High);
        assert!(generic.as_purl().is_none());
    }

    #[test]
    fn dependency_display() {
        let mut dep = Dependency::new_virtual("/r/maven_install.json");
        dep.file_path = "/r/maven_install.json>>g:a:1".to_owned();
        dep.name = Some("g:a".to_owned());
        dep.version = Some("1".to_owned());
        assert_eq!(dep.to_string(), "g:a@1 (/r/maven_install.json>>g:a:1)");
    }

    #[test]
    fn identifier_serializes_with_kind_tag() {
        let id = Identifier::Generic {
            value: "v".to_owned(),
            confidence: Confidence::High,
        };
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["kind"], "generic");
        assert_eq!(json["confidence"], "high");
    }
}
