//! 추출된 패키지 레코드

use std::path::Path;

use pinscan_core::{Confidence, Dependency, Ecosystem, EvidenceType, Identifier};

/// 가상 레코드 경로에서 파일 경로와 좌표를 잇는 구분자
pub const VIRTUAL_PATH_SEPARATOR: &str = ">>";

/// 증거 출처
const EVIDENCE_SOURCE: &str = "project";

/// 좌표 하나에서 추출된 패키지 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// 분해 전 원본 좌표 문자열
    pub coord: String,
    /// groupId
    pub group: String,
    /// artifactId
    pub artifact: String,
    /// 버전
    pub version: String,
    /// classifier
    pub classifier: Option<String>,
    /// purl 또는 대체 식별자
    pub identifier: Identifier,
}

impl PackageRecord {
    /// 생태계 태그
    pub fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    /// `group:artifact` 표시 이름
    pub fn name(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// `<파일 경로>>><좌표>` 형식의 가상 경로
    pub fn virtual_path(&self, actual_file: &Path) -> String {
        format!(
            "{}{VIRTUAL_PATH_SEPARATOR}{}",
            actual_file.display(),
            self.coord
        )
    }

    /// 집계기에 넘길 가상 의존성 레코드로 변환합니다.
    ///
    /// vendor/product/version 증거를 최고 신뢰도로 붙입니다.
    pub fn into_dependency(self, actual_file: &Path) -> Dependency {
        let mut dependency = Dependency::new_virtual(actual_file);
        dependency.file_path = self.virtual_path(actual_file);
        dependency.file_name = self.coord.clone();
        dependency.ecosystem = Some(self.ecosystem());
        dependency.name = Some(self.name());
        dependency.version = Some(self.version.clone());

        dependency.add_evidence(
            EvidenceType::Vendor,
            EVIDENCE_SOURCE,
            "groupid",
            &self.group,
            Confidence::Highest,
        );
        dependency.add_evidence(
            EvidenceType::Product,
            EVIDENCE_SOURCE,
            "artifactid",
            &self.artifact,
            Confidence::Highest,
        );
        dependency.add_evidence(
            EvidenceType::Version,
            EVIDENCE_SOURCE,
            "version",
            &self.version,
            Confidence::Highest,
        );
        dependency.add_identifier(self.identifier);

        dependency
    }
}
