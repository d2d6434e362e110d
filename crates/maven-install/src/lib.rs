#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`MavenInstallError`)
//! - [`config`]: Analyzer configuration (`MavenInstallConfig`, builder)
//! - [`filter`]: Candidate file name filter (`InstallFileFilter`)
//! - [`document`]: Pinned document validation (`InstallFileReader`, `Rejected`)
//! - [`coordinate`]: Coordinate parsing and identifier construction (`ParsedCoordinate`, `extract`)
//! - [`record`]: Extracted package records (`PackageRecord`)
//! - [`analyzer`]: File-level driver (`PinnedMavenInstallAnalyzer`, `FileTypeAnalyzer` impl)
//!
//! # Architecture
//!
//! ```text
//! candidate path --> InstallFileFilter --> read bytes --> InstallFileReader::validate
//!                                                              |
//!                                              Rejected <------+------> AcceptedDocument
//!                                           (no intents)                     |
//!                                                              coordinate::extract (per coord)
//!                                                                            |
//!                                              [Remove(original), Add(PackageRecord)...]
//!                                                                            |
//!                                                                  DependencySet::apply
//! ```

pub mod analyzer;
pub mod config;
pub mod coordinate;
pub mod document;
pub mod error;
pub mod filter;
pub mod record;

// --- Public API Re-exports ---

// Analyzer
pub use analyzer::PinnedMavenInstallAnalyzer;

// Configuration
pub use config::{MavenInstallConfig, MavenInstallConfigBuilder};

// Error
pub use error::MavenInstallError;

// Document / coordinates
pub use coordinate::{CoordinateError, ParsedCoordinate, SkipReason};
pub use document::{AcceptedDocument, InstallFileReader, RawCoordinate, Rejected};
pub use filter::InstallFileFilter;
pub use record::PackageRecord;
