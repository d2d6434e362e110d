#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinscan_core::Identifier;
use pinscan_maven_install::coordinate::{FALLBACK_IDENTIFIER_PREFIX, extract};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 좌표 필드 (`:`로 연결)
    fields: Vec<String>,
    /// null 좌표 여부
    null: bool,
}

fuzz_target!(|input: FuzzInput| {
    if input.null {
        assert!(extract(None).is_err());
        return;
    }

    let coord = input.fields.join(":");
    if let Ok(record) = extract(Some(&coord)) {
        assert_eq!(record.coord, coord);
        if let Identifier::Generic { value, .. } = &record.identifier {
            assert_eq!(value.strip_prefix(FALLBACK_IDENTIFIER_PREFIX), Some(coord.as_str()));
        }
    }
});
