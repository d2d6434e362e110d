#![no_main]

use libfuzzer_sys::fuzz_target;
use pinscan_core::{Dependency, RecordIntent};
use pinscan_maven_install::{MavenInstallConfig, PinnedMavenInstallAnalyzer};

fuzz_target!(|data: &[u8]| {
    let Ok(analyzer) = PinnedMavenInstallAnalyzer::new(MavenInstallConfig::default()) else {
        return;
    };
    let original = Dependency::from_file("fuzz/maven_install.json");
    let intents = analyzer.analyze_bytes(&original, data);

    // 수락 시 Remove 하나가 맨 앞, 나머지는 모두 Add
    if let Some((first, rest)) = intents.split_first() {
        assert!(matches!(first, RecordIntent::Remove { .. }));
        assert!(rest.iter().all(|i| matches!(i, RecordIntent::Add(_))));
    }
});
