//! 후보 파일 선택
//!
//! 파일명에 `install`이 포함되고 `.json`으로 끝나는 파일만 분석 대상입니다.
//! 다만 basename이 정확히 `install.json`인 파일은 다른 도구의 설치 마커이므로 제외합니다.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// basename 전체와 일치해야 하는 파일명 패턴
///
/// `^...$` 앵커로 부분 일치가 아닌 전체 문자열 일치를 강제합니다.
pub const INSTALL_FILE_PATTERN: &str = r"^(?:.+install.*|.*install.+)\.json$";

static INSTALL_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INSTALL_FILE_PATTERN).expect("valid regex"));

/// `*install*.json` 파일 필터
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallFileFilter;

impl InstallFileFilter {
    /// 경로의 basename이 후보 파일명 패턴과 일치하는지 확인합니다.
    ///
    /// 대소문자를 구분하며, basename이 UTF-8이 아니면 일치하지 않습니다.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| INSTALL_FILE_REGEX.is_match(name))
    }
}
