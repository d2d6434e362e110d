//! 고정 Maven install 분석기
//!
//! [`PinnedMavenInstallAnalyzer`]는 후보 파일을 한 번 읽고, 문서 검증과 좌표 추출을
//! 거쳐 레코드 집합 변경 의도를 반환합니다.
//!
//! 수락된 파일은 원본 제거 의도 하나와 좌표별 추가 의도를 만듭니다.
//! 거부된 파일은 아무 의도도 만들지 않으므로 일반 파일 레코드로 남습니다.

use std::io::ErrorKind;
use std::path::Path;

use metrics::counter;
use tracing::{debug, warn};

use pinscan_core::analyzer::{AnalysisPhase, FileTypeAnalyzer};
use pinscan_core::config::PinscanConfig;
use pinscan_core::engine::RecordIntent;
use pinscan_core::error::PinscanError;
use pinscan_core::metrics as m;
use pinscan_core::types::Dependency;

use crate::config::MavenInstallConfig;
use crate::coordinate;
use crate::document::InstallFileReader;
use crate::error::MavenInstallError;
use crate::filter::InstallFileFilter;

/// 분석기 이름
pub const ANALYZER_NAME: &str = "Pinned Maven install Analyzer";

/// 활성화 설정 키
pub const ENABLED_SETTING_KEY: &str = "analyzers.maven_install.enabled";

/// 고정 Maven install 분석기
///
/// 문서 리더는 생성 시 한 번 만들어지고 모든 파일 분석에서 공유됩니다.
/// 분석 중 내부 상태를 변경하지 않으므로 여러 스레드에서 동시에 호출할 수 있습니다.
///
/// # 사용 예시
///
/// ```
/// use pinscan_core::{Dependency, DependencySet};
/// use pinscan_maven_install::{MavenInstallConfig, PinnedMavenInstallAnalyzer};
///
/// let analyzer = PinnedMavenInstallAnalyzer::new(MavenInstallConfig::default()).unwrap();
/// let original = Dependency::from_file("maven_install.json");
///
/// let json = br#"{
///   "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY": "THERE_IS_NO_DATA_ONLY_ZUUL",
///   "dependency_tree": { "dependencies": [ { "coord": "junit:junit:4.13.2" } ] }
/// }"#;
/// let intents = analyzer.analyze_bytes(&original, json);
///
/// let mut set: DependencySet = vec![original].into_iter().collect();
/// set.apply(intents).unwrap();
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.iter().next().unwrap().name.as_deref(), Some("junit:junit"));
/// ```
#[derive(Debug, Clone)]
pub struct PinnedMavenInstallAnalyzer {
    config: MavenInstallConfig,
    filter: InstallFileFilter,
    reader: InstallFileReader,
}

impl PinnedMavenInstallAnalyzer {
    /// 설정을 검증하고 분석기를 생성합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 시 `MavenInstallError::Config`
    pub fn new(config: MavenInstallConfig) -> Result<Self, MavenInstallError> {
        config.validate()?;
        let reader = InstallFileReader::new(config.supported_version.clone());
        Ok(Self {
            config,
            filter: InstallFileFilter,
            reader,
        })
    }

    /// core 설정에서 분석기를 생성합니다.
    pub fn from_core(core: &PinscanConfig) -> Result<Self, MavenInstallError> {
        Self::new(MavenInstallConfig::from_core(core))
    }

    /// 분석기 설정
    pub fn config(&self) -> &MavenInstallConfig {
        &self.config
    }

    /// 공유 문서 리더
    pub fn reader(&self) -> &InstallFileReader {
        &self.reader
    }

    /// 후보 파일 바이트를 읽습니다.
    ///
    /// 없는 파일, 일반 파일이 아닌 경로, 빈 파일은 `Ok(None)`입니다.
    ///
    /// # Errors
    ///
    /// - 최대 크기 초과 시 `MavenInstallError::FileTooBig`
    /// - 읽기 실패 시 `MavenInstallError::Io`
    pub fn read_candidate(&self, path: &Path) -> Result<Option<Vec<u8>>, MavenInstallError> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(MavenInstallError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        if !metadata.is_file() || metadata.len() == 0 {
            return Ok(None);
        }

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.config.max_file_size {
            return Err(MavenInstallError::FileTooBig {
                path: path.display().to_string(),
                size,
                max: self.config.max_file_size,
            });
        }

        std::fs::read(path)
            .map(Some)
            .map_err(|e| MavenInstallError::Io {
                path: path.display().to_string(),
                source: e,
            })
    }

    /// 이미 읽은 바이트를 분석합니다.
    ///
    /// 수락 시 `[Remove(원본), Add(레코드)...]`, 거부 시 빈 목록을 반환합니다.
    pub fn analyze_bytes(&self, dependency: &Dependency, bytes: &[u8]) -> Vec<RecordIntent> {
        let path = &dependency.actual_file_path;

        let document = match self.reader.validate(bytes) {
            Ok(document) => document,
            Err(rejected) => {
                debug!(path = %path.display(), reason = %rejected, "not a pinned maven_install file");
                counter!(m::MAVEN_INSTALL_FILES_REJECTED_TOTAL, m::LABEL_REASON => rejected.label())
                    .increment(1);
                return Vec::new();
            }
        };

        counter!(m::MAVEN_INSTALL_FILES_ACCEPTED_TOTAL).increment(1);
        debug!(
            path = %path.display(),
            coordinates = document.coordinates.len(),
            "accepted pinned maven_install file"
        );

        let mut intents = Vec::with_capacity(document.coordinates.len() + 1);
        intents.push(RecordIntent::remove(dependency));
        intents.extend(
            document
                .coordinates
                .iter()
                .filter_map(|raw| coordinate::extract(raw.coord.as_deref()).ok())
                .map(|record| RecordIntent::Add(record.into_dependency(path))),
        );

        intents
    }
}

impl FileTypeAnalyzer for PinnedMavenInstallAnalyzer {
    fn name(&self) -> &str {
        ANALYZER_NAME
    }

    fn analysis_phase(&self) -> AnalysisPhase {
        AnalysisPhase::InformationCollection
    }

    fn enabled_setting_key(&self) -> &str {
        ENABLED_SETTING_KEY
    }

    fn accepts(&self, path: &Path) -> bool {
        self.filter.matches(path)
    }

    fn analyze(&self, dependency: &Dependency) -> Result<Vec<RecordIntent>, PinscanError> {
        let path = &dependency.actual_file_path;

        match self.read_candidate(path) {
            Ok(Some(bytes)) => Ok(self.analyze_bytes(dependency, &bytes)),
            Ok(None) => {
                debug!(path = %path.display(), "missing, empty or non-regular file, skipping");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unable to read maven_install file, skipping");
                Ok(Vec::new())
            }
        }
    }
}
