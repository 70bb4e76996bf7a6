//! # planvis-input
//!
//! Loading plans for planvis from TOML or JSON documents.
//!
//! This crate provides:
//! - `PlotSettings`: plot geometry in centimetres
//! - `StyleTable`: named formats, always with a `"Default"`
//! - `normalize_activities`: plan rows to complete activities, defaulting what is missing
//! - `parse_plan` / `load_plan`: whole documents
//!
//! ## Example
//!
//! ```rust
//! use planvis_core::NullObserver;
//! use planvis_input::{parse_plan, FileFormat};
//!
//! let input = r#"
//! [plot]
//! today = "2021-02-01"
//!
//! [[activities]]
//! task_name = "Design"
//! start = "2021-01-04"
//! finish = "2021-02-26"
//! "#;
//!
//! let plan = parse_plan(input, FileFormat::Toml, &mut NullObserver).unwrap();
//! assert_eq!(plan.activities.len(), 1);
//! assert_eq!(plan.activities[0].swimlane, "Default");
//! ```

pub mod document;
pub mod records;
pub mod settings;
pub mod styles;

pub use document::{Plan, PlanDocument};
pub use records::{normalize_activities, RawActivity};
pub use settings::PlotSettings;
pub use styles::{StyleRecord, StyleTable, DEFAULT_FORMAT};

use planvis_core::{LayoutError, LayoutObserver};
use std::path::Path;
use thiserror::Error;

/// Input error
#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format '{format}' for [{activity}]")]
    UnknownFormat { activity: String, format: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

/// Detect document format from extension
pub fn detect_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => FileFormat::Json,
        _ => FileFormat::Toml,
    }
}

/// Parse a document without resolving it
pub fn parse_document(input: &str, format: FileFormat) -> Result<PlanDocument, InputError> {
    match format {
        FileFormat::Toml => Ok(toml::from_str(input)?),
        FileFormat::Json => Ok(serde_json::from_str(input)?),
    }
}

/// Parse and resolve a plan
pub fn parse_plan(
    input: &str,
    format: FileFormat,
    observer: &mut dyn LayoutObserver,
) -> Result<Plan, InputError> {
    parse_document(input, format)?.resolve(observer)
}

/// Load a plan file from a path (auto-detects format)
pub fn load_plan(path: &Path, observer: &mut dyn LayoutObserver) -> Result<Plan, InputError> {
    tracing::debug!(path = %path.display(), "loading plan");
    let content = std::fs::read_to_string(path)?;
    parse_plan(&content, detect_format(path), observer)
}
