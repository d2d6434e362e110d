//! Maven 좌표 추출
//!
//! 좌표 문자열 하나를 필드로 분해하고, 보조 아티팩트(sources/javadoc)를 걸러낸 뒤
//! 패키지 식별자를 만듭니다.
//!
//! # 필드 수에 따른 역할
//!
//! | 필드 수 | group | artifact | classifier | version |
//! |---|---|---|---|---|
//! | 3 | 0 | 1 | 없음 | 2 |
//! | 4 | 0 | 1 | 2 | 3 |
//! | 5 | 0 | 1 | 3 | 4 (2번 packaging은 버림) |
//!
//! 4필드 형식은 `group:artifact:classifier:version`으로 해석합니다.
//! 일반적인 Maven 좌표 문법과 다르므로 이 표를 그대로 따라야 합니다.

use metrics::counter;
use tracing::{debug, warn};

use pinscan_core::metrics as m;
use pinscan_core::{Confidence, Identifier, PackageUrl};

use crate::record::PackageRecord;

/// 좌표 구분자
pub const FIELD_SEPARATOR: char = ':';

/// purl 생성 실패 시 대체 식별자 접두어
pub const FALLBACK_IDENTIFIER_PREFIX: &str = "maven_install JSON coord ";

/// 스캔 대상이 아닌 보조 아티팩트 classifier
pub const AUXILIARY_CLASSIFIERS: [&str; 2] = ["sources", "javadoc"];

/// 좌표 파싱 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// 좌표 값이 null
    #[error("coordinate is null")]
    Null,

    /// 필드 수가 3, 4, 5가 아님
    #[error("invalid coordinate '{coord}': expected 3-5 fields, got {count}")]
    InvalidFieldCount {
        /// 원본 좌표 문자열
        coord: String,
        /// 분해된 필드 수
        count: usize,
    },
}

/// 좌표를 건너뛴 사유
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// 파싱할 수 없는 좌표
    #[error(transparent)]
    Invalid(#[from] CoordinateError),

    /// sources/javadoc 보조 아티팩트
    #[error("auxiliary artifact '{coord}' (classifier: {classifier})")]
    Auxiliary {
        /// 원본 좌표 문자열
        coord: String,
        /// 걸러진 classifier
        classifier: String,
    },
}

impl SkipReason {
    /// 메트릭 레이블 값
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invalid(CoordinateError::Null) => "null_coordinate",
            Self::Invalid(CoordinateError::InvalidFieldCount { .. }) => "invalid_field_count",
            Self::Auxiliary { .. } => "auxiliary_artifact",
        }
    }
}

/// 분해된 좌표
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCoordinate {
    /// groupId
    pub group: String,
    /// artifactId
    pub artifact: String,
    /// 버전
    pub version: String,
    /// classifier (4, 5필드 형식에서만 존재)
    pub classifier: Option<String>,
}

impl ParsedCoordinate {
    /// 좌표 문자열을 필드 수 규칙에 따라 분해합니다.
    ///
    /// # Errors
    ///
    /// 필드 수가 3, 4, 5가 아니면 `CoordinateError::InvalidFieldCount`
    pub fn parse(coord: &str) -> Result<Self, CoordinateError> {
        let fields = split_fields(coord);

        let (group, artifact, classifier, version) = match fields.as_slice() {
            [group, artifact, version] => (group, artifact, None, version),
            [group, artifact, classifier, version] => (group, artifact, Some(classifier), version),
            [group, artifact, _packaging, classifier, version] => {
                (group, artifact, Some(classifier), version)
            }
            _ => {
                return Err(CoordinateError::InvalidFieldCount {
                    coord: coord.to_owned(),
                    count: fields.len(),
                });
            }
        };

        Ok(Self {
            group: (*group).to_owned(),
            artifact: (*artifact).to_owned(),
            version: (*version).to_owned(),
            classifier: classifier.map(|c| (*c).to_owned()),
        })
    }

    /// sources/javadoc 보조 아티팩트인지 확인합니다. (대소문자 구분)
    pub fn is_auxiliary(&self) -> bool {
        self.classifier
            .as_deref()
            .is_some_and(|c| AUXILIARY_CLASSIFIERS.contains(&c))
    }

    /// `pkg:maven/...` 형식의 Package URL을 생성합니다.
    pub fn package_url(&self) -> Result<PackageUrl, pinscan_core::PurlError> {
        let mut builder = PackageUrl::builder()
            .package_type("maven")
            .namespace(&self.group)
            .name(&self.artifact)
            .version(&self.version);
        if let Some(classifier) = &self.classifier {
            builder = builder.qualifier("classifier", classifier);
        }
        builder.build()
    }
}

/// 좌표 문자열을 `:`로 분해합니다.
///
/// 끝에 오는 빈 필드는 버리고, 중간의 빈 필드는 유지합니다.
/// (`"g:a:1.0:"`은 3필드, `"g::1.0"`은 3필드)
pub fn split_fields(coord: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = coord.split(FIELD_SEPARATOR).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// 원시 좌표 하나에서 패키지 레코드를 추출합니다.
///
/// 잘못된 항목은 진단 로그를 남기고 건너뜁니다. 배치 처리는 항상 계속됩니다.
pub fn extract(raw: Option<&str>) -> Result<PackageRecord, SkipReason> {
    let result = extract_inner(raw);

    match &result {
        Ok(_) => counter!(m::MAVEN_INSTALL_COORDINATES_EXTRACTED_TOTAL).increment(1),
        Err(reason) => {
            counter!(m::MAVEN_INSTALL_COORDINATES_SKIPPED_TOTAL, m::LABEL_REASON => reason.label())
                .increment(1);
        }
    }

    result
}

fn extract_inner(raw: Option<&str>) -> Result<PackageRecord, SkipReason> {
    let Some(coord) = raw else {
        warn!("null coordinate in maven_install dependencies, skipping");
        return Err(CoordinateError::Null.into());
    };

    let parsed = ParsedCoordinate::parse(coord).inspect_err(|e| {
        warn!(coord = %coord, error = %e, "invalid maven_install coordinate, skipping");
    })?;

    if parsed.is_auxiliary() {
        let classifier = parsed.classifier.unwrap_or_default();
        debug!(coord = %coord, classifier = %classifier, "skipping auxiliary artifact");
        return Err(SkipReason::Auxiliary {
            coord: coord.to_owned(),
            classifier,
        });
    }

    let identifier = match parsed.package_url() {
        Ok(purl) => Identifier::Purl {
            purl,
            confidence: Confidence::Highest,
        },
        Err(e) => {
            warn!(coord = %coord, error = %e, "unable to build package url, using fallback identifier");
            counter!(m::MAVEN_INSTALL_PURL_FALLBACKS_TOTAL).increment(1);
            Identifier::Generic {
                value: format!("{FALLBACK_IDENTIFIER_PREFIX}{coord}"),
                confidence: Confidence::High,
            }
        }
    };

    debug!(coord = %coord, identifier = %identifier, "extracted maven coordinate");

    Ok(PackageRecord {
        coord: coord.to_owned(),
        group: parsed.group,
        artifact: parsed.artifact,
        version: parsed.version,
        classifier: parsed.classifier,
        identifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_interior_empty_fields() {
        assert_eq!(split_fields("g::1.0"), vec!["g", "", "1.0"]);
        assert_eq!(split_fields("g:a::1.0"), vec!["g", "a", "", "1.0"]);
    }

    #[test]
    fn split_drops_trailing_empty_fields() {
        assert_eq!(split_fields("g:a:1.0:"), vec!["g", "a", "1.0"]);
        assert_eq!(split_fields("g:a:::"), vec!["g", "a"]);
        assert!(split_fields("").is_empty());
        assert!(split_fields(":::").is_empty());
    }

    #[test]
    fn parse_three_fields() {
        let parsed = ParsedCoordinate::parse("com.google.guava:guava:30.1-jre").unwrap();
        assert_eq!(parsed.group, "com.google.guava");
        assert_eq!(parsed.artifact, "guava");
        assert_eq!(parsed.version, "30.1-jre");
        assert!(parsed.classifier.is_none());
    }

    #[test]
    fn parse_four_fields_uses_classifier_slot() {
        let parsed = ParsedCoordinate::parse("io.netty:netty-tcnative:linux-x86_64:2.0.46").unwrap();
        assert_eq!(parsed.classifier.as_deref(), Some("linux-x86_64"));
        assert_eq!(parsed.version, "2.0.46");
    }

    #[test]
    fn parse_five_fields_discards_packaging() {
        let parsed = ParsedCoordinate::parse("org.foo:bar:jar:jdk15:1.0").unwrap();
        assert_eq!(parsed.group, "org.foo");
        assert_eq!(parsed.artifact, "bar");
        assert_eq!(parsed.classifier.as_deref(), Some("jdk15"));
        assert_eq!(parsed.version, "1.0");
    }

    #[test]
    fn parse_rejects_other_field_counts() {
        for coord in ["a", "a:b", "a:b:c:d:e:f", "g:a:"] {
            let err = ParsedCoordinate::parse(coord).unwrap_err();
            assert!(
                matches!(err, CoordinateError::InvalidFieldCount { .. }),
                "{coord}"
            );
        }
        assert_eq!(
            ParsedCoordinate::parse("a:b:c:d:e:f").unwrap_err(),
            CoordinateError::InvalidFieldCount {
                coord: "a:b:c:d:e:f".to_owned(),
                count: 6
            }
        );
    }

    #[test]
    fn guava_example() {
        let record = extract(Some("com.google.guava:guava:30.1-jre")).unwrap();
        assert_eq!(record.name(), "com.google.guava:guava");
        assert_eq!(record.version, "30.1-jre");

        let purl = record.identifier.as_purl().unwrap();
        assert_eq!(purl.package_type(), "maven");
        assert_eq!(purl.namespace(), Some("com.google.guava"));
        assert_eq!(purl.name(), "guava");
        assert_eq!(purl.version(), Some("30.1-jre"));
        assert!(purl.qualifiers().is_empty());
        assert_eq!(record.identifier.confidence(), Confidence::Highest);
        assert_eq!(
            record.identifier.to_string(),
            "pkg:maven/com.google.guava/guava@30.1-jre"
        );
    }

    #[test]
    fn classifier_becomes_qualifier() {
        let record = extract(Some("io.netty:netty-tcnative:linux-x86_64:2.0.46")).unwrap();
        let purl = record.identifier.as_purl().unwrap();
        assert_eq!(purl.qualifier("classifier"), Some("linux-x86_64"));
        assert_eq!(
            purl.to_string(),
            "pkg:maven/io.netty/netty-tcnative@2.0.46?classifier=linux-x86_64"
        );
    }

    #[test]
    fn five_field_sources_is_filtered() {
        let err = extract(Some("org.foo:bar:jdk15:sources:1.0")).unwrap_err();
        assert_eq!(
            err,
            SkipReason::Auxiliary {
                coord: "org.foo:bar:jdk15:sources:1.0".to_owned(),
                classifier: "sources".to_owned()
            }
        );
        assert_eq!(err.label(), "auxiliary_artifact");
    }

    #[test]
    fn four_field_javadoc_is_filtered() {
        assert!(matches!(
            extract(Some("org.foo:bar:javadoc:1.0")),
            Err(SkipReason::Auxiliary { .. })
        ));
    }

    #[test]
    fn auxiliary_filter_is_case_sensitive() {
        assert!(extract(Some("org.foo:bar:Sources:1.0")).is_ok());
        assert!(extract(Some("org.foo:bar:JAVADOC:1.0")).is_ok());
    }

    #[test]
    fn packaging_slot_is_not_filtered() {
        let record = extract(Some("org.foo:bar:sources:jdk15:1.0")).unwrap();
        assert_eq!(record.classifier.as_deref(), Some("jdk15"));
    }

    #[test]
    fn null_coordinate_is_skipped() {
        let err = extract(None).unwrap_err();
        assert_eq!(err, SkipReason::Invalid(CoordinateError::Null));
        assert_eq!(err.label(), "null_coordinate");
    }

    #[test]
    fn invalid_coordinate_is_skipped() {
        let err = extract(Some("a:b")).unwrap_err();
        assert_eq!(err.label(), "invalid_field_count");
        assert!(err.to_string().contains("got 2"));
    }

    #[test]
    fn empty_classifier_falls_back_to_raw_coordinate() {
        let record = extract(Some("g:a::1.0")).unwrap();
        match &record.identifier {
            Identifier::Generic { value, confidence } => {
                assert_eq!(value, "maven_install JSON coord g:a::1.0");
                assert_eq!(*confidence, Confidence::High);
            }
            other => panic!("expected fallback identifier, got {other:?}"),
        }
        assert_eq!(record.version, "1.0");
    }

    #[test]
    fn empty_artifact_falls_back() {
        let record = extract(Some("g::1.0")).unwrap();
        assert!(record.identifier.as_purl().is_none());
        assert_eq!(
            record.identifier.to_string(),
            format!("{FALLBACK_IDENTIFIER_PREFIX}g::1.0")
        );
    }

    #[test]
    fn unusual_characters_are_percent_encoded_not_fallback() {
        let record = extract(Some("org.example:weird name:1.0+build")).unwrap();
        assert_eq!(
            record.identifier.to_string(),
            "pkg:maven/org.example/weird%20name@1.0%2Bbuild"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn field() -> impl Strategy<Value = String> {
            "[A-Za-z0-9._-]{1,16}"
        }

        fn classifier() -> impl Strategy<Value = String> {
            field().prop_filter("non-auxiliary classifier", |c| {
                !AUXILIARY_CLASSIFIERS.contains(&c.as_str())
            })
        }

        proptest! {
            #[test]
            fn three_fields_yield_one_record(g in field(), a in field(), v in field()) {
                let coord = format!("{g}:{a}:{v}");
                let record = extract(Some(&coord)).unwrap();
                prop_assert_eq!(&record.group, &g);
                prop_assert_eq!(&record.artifact, &a);
                prop_assert_eq!(&record.version, &v);
                prop_assert!(record.classifier.is_none());
            }

            #[test]
            fn four_fields_keep_classifier(g in field(), a in field(), c in classifier(), v in field()) {
                let coord = format!("{g}:{a}:{c}:{v}");
                let record = extract(Some(&coord)).unwrap();
                prop_assert_eq!(record.classifier.as_deref(), Some(c.as_str()));
                prop_assert_eq!(&record.version, &v);
            }

            #[test]
            fn five_fields_discard_packaging(
                g in field(), a in field(), p in field(), c in classifier(), v in field()
            ) {
                let coord = format!("{g}:{a}:{p}:{c}:{v}");
                let record = extract(Some(&coord)).unwrap();
                prop_assert_eq!(&record.group, &g);
                prop_assert_eq!(&record.artifact, &a);
                prop_assert_eq!(record.classifier.as_deref(), Some(c.as_str()));
                prop_assert_eq!(&record.version, &v);
            }

            #[test]
            fn auxiliary_classifiers_yield_none(
                g in field(),
                a in field(),
                p in field(),
                v in field(),
                aux in prop::sample::select(AUXILIARY_CLASSIFIERS.to_vec()),
                five in any::<bool>(),
            ) {
                let coord = if five {
                    format!("{g}:{a}:{p}:{aux}:{v}")
                } else {
                    format!("{g}:{a}:{aux}:{v}")
                };
                let is_auxiliary = matches!(extract(Some(&coord)), Err(SkipReason::Auxiliary { .. }));
                prop_assert!(is_auxiliary);
            }

            #[test]
            fn other_field_counts_yield_none(fields in prop::collection::vec(field(), 1..10)) {
                prop_assume!(!(3..=5).contains(&fields.len()));
                let coord = fields.join(":");
                let is_invalid = matches!(
                    extract(Some(&coord)),
                    Err(SkipReason::Invalid(CoordinateError::InvalidFieldCount { .. }))
                );
                prop_assert!(is_invalid);
            }

            #[test]
            fn fallback_embeds_original_coordinate(g in field(), v in field()) {
                let coord = format!("{g}::{v}");
                let record = extract(Some(&coord)).unwrap();
                let rendered = record.identifier.to_string();
                prop_assert_eq!(rendered.strip_prefix(FALLBACK_IDENTIFIER_PREFIX), Some(coord.as_str()));
            }
        }
    }
}
