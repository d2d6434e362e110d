//! 분석기 trait: 파일 형식별 분석기 확장 포인트 정의

use std::fmt;
use std::path::Path;

use crate::config::PinscanConfig;
use crate::engine::RecordIntent;
use crate::error::PinscanError;
use crate::types::Dependency;

/// 분석 단계
///
/// 집계 엔진은 단계 순서대로 분석기를 실행합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnalysisPhase {
    /// 초기 단계
    Initial,
    /// 파일 내용에서 식별 정보 수집
    InformationCollection,
    /// 수집된 정보 후처리
    PostInformationCollection,
    /// 최종 단계
    Final,
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::InformationCollection => write!(f, "information_collection"),
            Self::PostInformationCollection => write!(f, "post_information_collection"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// 파일 형식 분석기 trait
///
/// 새로운 의존성 파일 형식을 지원하려면 이 trait을 구현합니다.
/// 분석기는 레코드 집합을 직접 수정하지 않고 [`RecordIntent`] 목록을 반환합니다.
pub trait FileTypeAnalyzer: Send + Sync {
    /// 분석기 이름
    fn name(&self) -> &str;

    /// 실행 단계
    fn analysis_phase(&self) -> AnalysisPhase;

    /// 활성화 여부를 담은 설정 키 (예: `analyzers.maven_install.enabled`)
    fn enabled_setting_key(&self) -> &str;

    /// 파일 이름 패턴으로 분석 대상인지 판별합니다.
    fn accepts(&self, path: &Path) -> bool;

    /// 설정에서 활성화 여부를 확인합니다. 알 수 없는 키는 활성으로 간주합니다.
    fn is_enabled(&self, config: &PinscanConfig) -> bool {
        config
            .is_enabled(self.enabled_setting_key())
            .unwrap_or(true)
    }

    /// 파일 레코드를 분석하여 레코드 집합 변경 의도를 반환합니다.
    ///
    /// 형식이 맞지 않는 파일은 에러가 아니라 빈 목록으로 처리해야 합니다.
    fn analyze(&self, dependency: &Dependency) -> Result<Vec<RecordIntent>, PinscanError>;
}
