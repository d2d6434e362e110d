//! `pinscan scan` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use pinscan_core::config::{PinscanConfig, ScanConfig};
use pinscan_core::engine::RecordIntent;
use pinscan_core::error::PinscanError;
use pinscan_core::{Dependency, DependencySet, FileTypeAnalyzer};
use pinscan_maven_install::PinnedMavenInstallAnalyzer;

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
pub async fn execute(
    args: ScanArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_config(config_path).await?;

    if !args.path.exists() {
        return Err(CliError::Command(format!(
            "scan path does not exist: {}",
            args.path.display()
        )));
    }

    let analyzers = build_analyzers(&config)?;
    let scan_id = uuid::Uuid::new_v4().to_string();
    info!(
        scan_id = %scan_id,
        path = %args.path.display(),
        analyzers = analyzers.len(),
        "starting scan"
    );

    // 탐색과 분석은 모두 동기 I/O
    let root = args.path.clone();
    let scan_config = config.scan.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let files = discover_files(&root, &scan_config);
        run_analyzers(files, &analyzers)
    })
    .await
    .map_err(|e| CliError::Command(format!("scan task failed: {e}")))??;

    let report = ScanReport::new(scan_id, args.path.display().to_string(), outcome);
    info!(
        scan_id = %report.scan_id,
        files_scanned = report.files_scanned,
        files_consumed = report.files_consumed,
        packages = report.packages_extracted,
        "scan complete"
    );

    writer.render(&report)?;
    Ok(())
}

/// Build every enabled analyzer, ordered by analysis phase.
pub fn build_analyzers(config: &PinscanConfig) -> Result<Vec<Box<dyn FileTypeAnalyzer>>, CliError> {
    let candidates: Vec<Box<dyn FileTypeAnalyzer>> =
        vec![Box::new(PinnedMavenInstallAnalyzer::from_core(config)?)];

    let mut analyzers: Vec<Box<dyn FileTypeAnalyzer>> = candidates
        .into_iter()
        .filter(|analyzer| {
            let enabled = analyzer.is_enabled(config);
            if !enabled {
                info!(analyzer = analyzer.name(), "analyzer disabled by configuration");
            }
            enabled
        })
        .collect();
    analyzers.sort_by_key(|analyzer| analyzer.analysis_phase());
    Ok(analyzers)
}

/// Collect regular files under `root` (or `root` itself when it is a file).
///
/// Symlinks are not followed. Unreadable entries are logged and skipped.
pub fn discover_files(root: &Path, scan: &ScanConfig) -> Vec<PathBuf> {
    let max_depth = if scan.recursive { scan.max_depth } else { 1 };

    WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "failed to read directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Aggregated result of one scan run.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Number of files seeded into the record set.
    pub files_scanned: usize,
    /// Number of files whose record was replaced by extracted packages.
    pub files_consumed: usize,
    /// Final record set.
    pub dependencies: DependencySet,
}

/// Seed a record set with one record per file and run each analyzer over the
/// records its filter accepts, applying the returned intents.
pub fn run_analyzers(
    files: Vec<PathBuf>,
    analyzers: &[Box<dyn FileTypeAnalyzer>],
) -> Result<ScanOutcome, PinscanError> {
    let files_scanned = files.len();
    let mut dependencies: DependencySet = files.iter().map(Dependency::from_file).collect();
    let mut files_consumed = 0;

    for analyzer in analyzers {
        let candidates: Vec<Dependency> = dependencies
            .iter()
            .filter(|dep| !dep.is_virtual && analyzer.accepts(&dep.actual_file_path))
            .cloned()
            .collect();

        debug!(
            analyzer = analyzer.name(),
            phase = %analyzer.analysis_phase(),
            candidates = candidates.len(),
            "running analyzer"
        );

        for candidate in &candidates {
            let intents = analyzer.analyze(candidate)?;
            if intents
                .iter()
                .any(|intent| matches!(intent, RecordIntent::Remove { .. }))
            {
                files_consumed += 1;
            }
            dependencies.apply(intents)?;
        }
    }

    Ok(ScanOutcome {
        files_scanned,
        files_consumed,
        dependencies,
    })
}

#[derive(Serialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub path: String,
    pub files_scanned: usize,
    pub files_consumed: usize,
    pub packages_extracted: usize,
    pub packages: Vec<PackageEntry>,
}

#[derive(Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    pub identifier: String,
    pub confidence: String,
    pub source: String,
}

impl ScanReport {
    fn new(scan_id: String, path: String, outcome: ScanOutcome) -> Self {
        let packages: Vec<PackageEntry> = outcome
            .dependencies
            .iter()
            .filter(|dep| dep.is_virtual)
            .map(PackageEntry::from_dependency)
            .collect();

        Self {
            scan_id,
            path,
            files_scanned: outcome.files_scanned,
            files_consumed: outcome.files_consumed,
            packages_extracted: packages.len(),
            packages,
        }
    }
}

impl PackageEntry {
    fn from_dependency(dep: &Dependency) -> Self {
        let identifier = dep.identifiers.first();
        Self {
            name: dep.name.clone().unwrap_or_else(|| dep.file_name.clone()),
            version: dep.version.clone().unwrap_or_default(),
            identifier: identifier.map(ToString::to_string).unwrap_or_default(),
            confidence: identifier
                .map(|id| id.confidence().to_string())
                .unwrap_or_default(),
            source: dep.actual_file_path.display().to_string(),
        }
    }
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scan: {}", self.path.bold())?;
        writeln!(w, "Files scanned: {}", self.files_scanned)?;
        writeln!(w, "Files consumed: {}", self.files_consumed)?;
        writeln!(w, "Packages extracted: {}", self.packages_extracted)?;
        writeln!(w)?;

        if self.packages.is_empty() {
            writeln!(w, "{}", "No pinned Maven packages found.".yellow())?;
            return Ok(());
        }

        writeln!(
            w,
            "{:<45} {:<18} {:<10} {:<60} Source",
            "Name", "Version", "Confidence", "Identifier"
        )?;
        writeln!(w, "{}", "-".repeat(140))?;

        for p in &self.packages {
            let confidence = match p.confidence.as_str() {
                "highest" => p.confidence.green(),
                "high" => p.confidence.yellow(),
                _ => p.confidence.normal(),
            };

            writeln!(
                w,
                "{:<45} {:<18} {:<10} {:<60} {}",
                p.name, p.version, confidence, p.identifier, p.source
            )?;
        }

        Ok(())
    }
}
