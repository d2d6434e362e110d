//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 분석기는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 전역 레코더가 설치되지 않은 경우 카운터 호출은 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `pinscan_`
//! - 분석기명: `maven_install_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(pinscan_core::metrics::MAVEN_INSTALL_FILES_ACCEPTED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 건너뛴 사유 레이블 키
pub const LABEL_REASON: &str = "reason";

// ─── Maven install 분석기 메트릭 ────────────────────────────────────

/// Maven install: 고정 의존성 문서로 수락된 파일 수 (counter)
pub const MAVEN_INSTALL_FILES_ACCEPTED_TOTAL: &str = "pinscan_maven_install_files_accepted_total";

/// Maven install: 거부된 후보 파일 수 (counter, label: reason)
pub const MAVEN_INSTALL_FILES_REJECTED_TOTAL: &str = "pinscan_maven_install_files_rejected_total";

/// Maven install: 추출된 패키지 레코드 수 (counter)
pub const MAVEN_INSTALL_COORDINATES_EXTRACTED_TOTAL: &str =
    "pinscan_maven_install_coordinates_extracted_total";

/// Maven install: 건너뛴 좌표 수 (counter, label: reason)
pub const MAVEN_INSTALL_COORDINATES_SKIPPED_TOTAL: &str =
    "pinscan_maven_install_coordinates_skipped_total";

/// Maven install: purl 생성 실패로 대체 식별자를 사용한 수 (counter)
pub const MAVEN_INSTALL_PURL_FALLBACKS_TOTAL: &str = "pinscan_maven_install_purl_fallbacks_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        MAVEN_INSTALL_FILES_ACCEPTED_TOTAL,
        "Total number of candidate files accepted as pinned maven_install documents"
    );
    describe_counter!(
        MAVEN_INSTALL_FILES_REJECTED_TOTAL,
        "Total number of candidate files rejected (parse failure, no tree, sentinel mismatch)"
    );
    describe_counter!(
        MAVEN_INSTALL_COORDINATES_EXTRACTED_TOTAL,
        "Total number of package records extracted from Maven coordinates"
    );
    describe_counter!(
        MAVEN_INSTALL_COORDINATES_SKIPPED_TOTAL,
        "Total number of coordinates skipped (null, invalid, sources/javadoc)"
    );
    describe_counter!(
        MAVEN_INSTALL_PURL_FALLBACKS_TOTAL,
        "Total number of records that fell back to a generic identifier"
    );
}
