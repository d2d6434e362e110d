//! 의존성 집계기: 레코드 집합과 변경 의도(intent)
//!
//! 분석기는 공유 컬렉션을 직접 수정하지 않고 [`RecordIntent`] 목록을 반환합니다.
//! 파일 하나가 분해될 때는 원본 제거 의도가 먼저, 추가 의도가 그 뒤에 옵니다.
//! [`DependencySet::apply`]가 이 목록을 순서대로 반영합니다.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AnalysisError, PinscanError};
use crate::types::Dependency;

/// 레코드 집합 변경 의도
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIntent {
    /// 원본 파일 레코드 제거 (내용이 개별 레코드로 재표현됨)
    Remove { file_path: String },
    /// 추출된 레코드 추가
    Add(Dependency),
}

impl RecordIntent {
    /// 제거 의도를 생성합니다.
    pub fn remove(dependency: &Dependency) -> Self {
        Self::Remove {
            file_path: dependency.file_path.clone(),
        }
    }
}

/// 의도 반영 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    /// 제거된 레코드 수
    pub removed: usize,
    /// 추가된 레코드 수
    pub added: usize,
}

/// 순서가 유지되는 의존성 레코드 집합
///
/// `file_path`가 같은 레코드를 다시 추가하면 기존 레코드를 교체합니다.
/// 제거된 슬롯은 묘비(`None`)로 남기고, 묘비가 살아 있는 레코드보다 많아지면 압축합니다.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    slots: Vec<Option<Dependency>>,
    index: HashMap<String, usize>,
}

/// 압축을 시작하는 최소 슬롯 수
const COMPACT_THRESHOLD: usize = 64;

impl DependencySet {
    /// 빈 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드를 추가합니다.
    ///
    /// 새로 삽입되면 `true`, 같은 `file_path`의 기존 레코드를 교체하면 `false`를 반환합니다.
    pub fn add(&mut self, dependency: Dependency) -> bool {
        if let Some(&pos) = self.index.get(&dependency.file_path) {
            self.slots[pos] = Some(dependency);
            return false;
        }

        self.index.insert(dependency.file_path.clone(), self.slots.len());
        self.slots.push(Some(dependency));
        true
    }

    /// `file_path`로 레코드를 제거합니다.
    pub fn remove(&mut self, file_path: &str) -> Option<Dependency> {
        let pos = self.index.remove(file_path)?;
        let removed = self.slots.get_mut(pos)?.take();
        self.compact_if_sparse();
        removed
    }

    /// `file_path`로 레코드를 조회합니다.
    pub fn get(&self, file_path: &str) -> Option<&Dependency> {
        let pos = *self.index.get(file_path)?;
        self.slots.get(pos)?.as_ref()
    }

    /// 레코드 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// 레코드를 삽입 순서대로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.slots.iter().flatten()
    }

    /// 의도 목록을 순서대로 반영합니다.
    ///
    /// 교체된 레코드는 `added`에 포함되지 않습니다.
    ///
    /// # Errors
    ///
    /// 존재하지 않는 레코드의 제거 요청은 `AnalysisError::RecordNotFound`를 반환합니다.
    /// 그 이전까지의 의도는 이미 반영된 상태입니다.
    pub fn apply(
        &mut self,
        intents: impl IntoIterator<Item = RecordIntent>,
    ) -> Result<ApplyStats, PinscanError> {
        let mut stats = ApplyStats::default();

        for intent in intents {
            match intent {
                RecordIntent::Remove { file_path } => {
                    if self.remove(&file_path).is_none() {
                        return Err(AnalysisError::RecordNotFound { file_path }.into());
                    }
                    stats.removed += 1;
                }
                RecordIntent::Add(dependency) => {
                    if self.add(dependency) {
                        stats.added += 1;
                    }
                }
            }
        }

        Ok(stats)
    }

    fn compact_if_sparse(&mut self) {
        let live = self.index.len();
        if self.slots.len() < COMPACT_THRESHOLD || self.slots.len() - live <= live {
            return;
        }

        self.slots.retain(Option::is_some);
        for (pos, slot) in self.slots.iter().enumerate() {
            if let Some(dependency) = slot {
                self.index.insert(dependency.file_path.clone(), pos);
            }
        }
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<T: IntoIterator<Item = Dependency>>(iter: T) -> Self {
        let mut set = Self::new();
        for dependency in iter {
            set.add(dependency);
        }
        set
    }
}
