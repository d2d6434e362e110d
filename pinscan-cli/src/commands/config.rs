//! `pinscan config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use pinscan_core::config::PinscanConfig;
use pinscan_maven_install::MavenInstallConfig;

use crate::cli::{ConfigAction, ConfigArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
const SECTIONS: [&str; 3] = ["general", "scan", "analyzers"];

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// Unlike `scan`, a missing file is reported as invalid here.
/// Analyzer-level settings are validated too.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let errors = match PinscanConfig::load(config_path).await {
        Ok(config) => match MavenInstallConfig::from_core(&config).validate() {
            Ok(()) => Vec::new(),
            Err(e) => vec![e.to_string()],
        },
        Err(e) => vec![e.to_string()],
    };

    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = super::load_config(config_path).await?;
    let report = build_config_report(
        &config,
        config_path.display().to_string(),
        section,
        writer.format(),
    )?;

    writer.render(&report)?;
    Ok(())
}

fn build_config_report(
    config: &PinscanConfig,
    source: String,
    section: Option<String>,
    format: OutputFormat,
) -> Result<ConfigReport, CliError> {
    let value = match section.as_deref() {
        None => serde_json::to_value(config)?,
        Some("general") => serde_json::to_value(&config.general)?,
        Some("scan") => serde_json::to_value(&config.scan)?,
        Some("analyzers") => serde_json::to_value(&config.analyzers)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };

    // TOML text is only rendered for the text format
    let config_toml = match format {
        OutputFormat::Text => toml::to_string_pretty(&value)
            .unwrap_or_else(|e| format!("(serialization error: {})", e)),
        OutputFormat::Json => String::new(),
    };

    Ok(ConfigReport {
        source,
        section,
        config: value,
        config_toml,
    })
}

/// Configuration display report.
///
/// `config` is serialized for JSON output; `config_toml` is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective configuration values
    pub config: serde_json::Value,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &impl Render) -> String {
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_config_report_full_config_as_toml() {
        let report = build_config_report(
            &PinscanConfig::default(),
            "pinscan.toml".to_owned(),
            None,
            OutputFormat::Text,
        )
        .expect("report builds");

        let output = render(&report);
        assert!(output.contains("pinscan.toml"));
        assert!(output.contains("log_level = \"info\""));
        assert!(output.contains("max_file_size = 10485760"));
    }

    #[test]
    fn test_config_report_specific_section() {
        let report = build_config_report(
            &PinscanConfig::default(),
            "pinscan.toml".to_owned(),
            Some("scan".to_owned()),
            OutputFormat::Text,
        )
        .expect("report builds");

        let output = render(&report);
        assert!(output.contains("[scan]"));
        assert!(output.contains("max_depth = 16"));
        assert!(!output.contains("log_level"));
    }

    #[test]
    fn test_config_report_json_contains_values() {
        let report = build_config_report(
            &PinscanConfig::default(),
            "pinscan.toml".to_owned(),
            Some("analyzers".to_owned()),
            OutputFormat::Json,
        )
        .expect("report builds");

        let json = serde_json::to_value(&report).expect("serializes");
        assert_eq!(json["section"], "analyzers");
        assert_eq!(json["config"]["maven_install"]["enabled"], true);
        assert!(json.get("config_toml").is_none());
    }

    #[test]
    fn test_config_report_unknown_section() {
        let result = build_config_report(
            &PinscanConfig::default(),
            "pinscan.toml".to_owned(),
            Some("reporting".to_owned()),
            OutputFormat::Text,
        );
        match result {
            Err(CliError::Command(msg)) => assert!(msg.contains("unknown section")),
            _ => panic!("expected Command error"),
        }
    }

    #[test]
    fn test_validation_report_render_invalid() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["config file not found: bad.toml".to_owned()],
        };
        let output = render(&report);
        assert!(output.contains("INVALID"));
        assert!(output.contains("config file not found"));
    }

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let writer = OutputWriter::new(OutputFormat::Json);
        let err = execute_validate(&dir.path().join("absent.toml"), &writer)
            .await
            .expect_err("missing file is invalid");
        assert_eq!(err.exit_code(), 2);
    }
}
