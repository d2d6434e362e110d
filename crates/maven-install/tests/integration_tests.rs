//! Integration tests for the pinned maven_install analyzer
//!
//! Tests the full path: candidate file on disk -> analyzer -> intents -> DependencySet

use std::path::{Path, PathBuf};

use pinscan_core::{
    Confidence, Dependency, DependencySet, Ecosystem, FileTypeAnalyzer, PinscanConfig,
    RecordIntent,
};
use pinscan_maven_install::{MavenInstallConfig, PinnedMavenInstallAnalyzer};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn analyzer() -> PinnedMavenInstallAnalyzer {
    PinnedMavenInstallAnalyzer::new(MavenInstallConfig::default()).unwrap()
}

/// Runs the analyzer against a single fixture seeded into a fresh set.
fn scan_fixture(name: &str) -> (DependencySet, Vec<RecordIntent>) {
    let path = fixture_path(name);
    let original = Dependency::from_file(&path);
    let mut set: DependencySet = vec![original.clone()].into_iter().collect();

    let intents = analyzer().analyze(&original).unwrap();
    set.apply(intents.clone()).unwrap();
    (set, intents)
}

fn names(set: &DependencySet) -> Vec<String> {
    set.iter().filter_map(|d| d.name.clone()).collect()
}

#[test]
fn test_fixture_names_pass_filter() {
    let analyzer = analyzer();
    for name in [
        "maven_install.json",
        "wrong_sentinel_install.json",
        "null_deps_install.json",
        "future_version_install.json",
        "malformed_install.json",
        "npm_install.json",
    ] {
        assert!(analyzer.accepts(&fixture_path(name)), "{name}");
    }
}

#[test]
fn test_real_world_document_is_exploded() {
    let (set, intents) = scan_fixture("maven_install.json");

    // one Remove followed only by Adds
    assert!(matches!(intents[0], RecordIntent::Remove { .. }));
    assert!(intents[1..].iter().all(|i| matches!(i, RecordIntent::Add(_))));

    // sources, javadoc, broken and null entries are skipped
    assert_eq!(
        names(&set),
        vec![
            "com.google.code.findbugs:jsr305",
            "com.google.guava:guava",
            "io.netty:netty-tcnative-boringssl-static",
            "org.bouncycastle:bcprov-jdk15on",
        ]
    );

    let original_path = fixture_path("maven_install.json").display().to_string();
    assert!(set.get(&original_path).is_none(), "original must be consumed");
}

#[test]
fn test_records_carry_identifiers_and_paths() {
    let (set, _) = scan_fixture("maven_install.json");
    let file = fixture_path("maven_install.json");

    let guava = set
        .get(&format!("{}>>com.google.guava:guava:30.1-jre", file.display()))
        .expect("guava record");
    assert!(guava.is_virtual);
    assert_eq!(guava.actual_file_path, file);
    assert_eq!(guava.ecosystem, Some(Ecosystem::Maven));
    assert_eq!(guava.version.as_deref(), Some("30.1-jre"));
    assert_eq!(guava.file_name, "com.google.guava:guava:30.1-jre");
    assert_eq!(
        guava.identifiers[0].to_string(),
        "pkg:maven/com.google.guava/guava@30.1-jre"
    );
    assert_eq!(guava.identifiers[0].confidence(), Confidence::Highest);

    let bcprov = set
        .iter()
        .find(|d| d.name.as_deref() == Some("org.bouncycastle:bcprov-jdk15on"))
        .expect("bcprov record");
    assert_eq!(
        bcprov.identifiers[0].to_string(),
        "pkg:maven/org.bouncycastle/bcprov-jdk15on@1.68?classifier=jdk15"
    );
}

#[test]
fn test_wrong_sentinel_leaves_original_untouched() {
    let (set, intents) = scan_fixture("wrong_sentinel_install.json");
    assert!(intents.is_empty());
    assert_eq!(set.len(), 1);
    assert!(!set.iter().next().unwrap().is_virtual);
}

#[test]
fn test_malformed_and_foreign_json_are_ignored() {
    for name in ["malformed_install.json", "npm_install.json"] {
        let (set, intents) = scan_fixture(name);
        assert!(intents.is_empty(), "{name}");
        assert_eq!(set.len(), 1, "{name}");
    }
}

#[test]
fn test_null_dependencies_consume_original() {
    let (set, intents) = scan_fixture("null_deps_install.json");
    assert_eq!(intents.len(), 1);
    assert!(set.is_empty());
}

#[test]
fn test_unsupported_version_still_extracts() {
    let (set, _) = scan_fixture("future_version_install.json");
    assert_eq!(
        names(&set),
        vec!["junit:junit", "org.hamcrest:hamcrest-core"]
    );
}

#[test]
fn test_analyzer_from_core_config() {
    let mut core = PinscanConfig::default();
    core.analyzers.maven_install.max_file_size = 64;

    let analyzer = PinnedMavenInstallAnalyzer::from_core(&core).unwrap();
    assert_eq!(analyzer.config().max_file_size, 64);

    // fixture is larger than 64 bytes: skipped with a warning, no intents
    let original = Dependency::from_file(fixture_path("maven_install.json"));
    assert!(analyzer.analyze(&original).unwrap().is_empty());
}

#[test]
fn test_analyzer_is_shareable_across_threads() {
    let analyzer = std::sync::Arc::new(analyzer());
    let fixtures = ["maven_install.json", "future_version_install.json"];

    let handles: Vec<_> = fixtures
        .iter()
        .map(|name| {
            let analyzer = std::sync::Arc::clone(&analyzer);
            let path = fixture_path(name);
            std::thread::spawn(move || {
                let original = Dependency::from_file(&path);
                analyzer.analyze(&original).unwrap().len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![5, 3]);
}

#[test]
fn test_directory_named_like_candidate_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("maven_install.json");
    std::fs::create_dir(&fake).unwrap();

    let original = Dependency::from_file(Path::new(&fake));
    assert!(analyzer().analyze(&original).unwrap().is_empty());
}
