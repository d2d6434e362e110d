#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinscan_core::PackageUrl;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    namespace: String,
    name: String,
    version: String,
    classifier: Option<String>,
}

fuzz_target!(|input: FuzzInput| {
    let mut builder = PackageUrl::builder()
        .package_type("maven")
        .namespace(input.namespace)
        .name(input.name)
        .version(input.version);
    if let Some(classifier) = input.classifier {
        builder = builder.qualifier("classifier", classifier);
    }

    if let Ok(purl) = builder.build() {
        let rendered = purl.to_string();
        assert!(rendered.starts_with("pkg:maven/"));
        // 퍼센트 인코딩 후에는 구분자 외의 공백이나 제어 문자가 남지 않음
        assert!(rendered.bytes().all(|b| b.is_ascii_graphic()));
    }
});
