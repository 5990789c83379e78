//! Layout files on disk
//!
//! The format is picked from the file extension: `.yaml`/`.yml` are YAML,
//! anything else is JSON.

use std::path::Path;

use anyhow::{Context, Result};

use super::document::LayoutDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Json,
    Yaml,
}

impl LayoutFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                LayoutFormat::Yaml
            }
            _ => LayoutFormat::Json,
        }
    }
}

pub fn to_string(doc: &LayoutDocument, format: LayoutFormat) -> Result<String> {
    match format {
        LayoutFormat::Json => serde_json::to_string_pretty(doc).context("Failed to serialize layout as JSON"),
        LayoutFormat::Yaml => serde_yaml::to_string(doc).context("Failed to serialize layout as YAML"),
    }
}

pub fn from_str(text: &str, format: LayoutFormat) -> Result<LayoutDocument> {
    match format {
        LayoutFormat::Json => serde_json::from_str(text).context("Failed to parse layout JSON"),
        LayoutFormat::Yaml => serde_yaml::from_str(text).context("Failed to parse layout YAML"),
    }
}

/// Write `doc` to `path`, creating parent directories
pub fn write_layout_file(path: &Path, doc: &LayoutDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let text = to_string(doc, LayoutFormat::from_path(path))?;
    std::fs::write(path, text).with_context(|| format!("Failed to write layout to {}", path.display()))?;
    tracing::info!("Saved layout to {}", path.display());
    Ok(())
}

pub fn read_layout_file(path: &Path) -> Result<LayoutDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout from {}", path.display()))?;
    from_str(&text, LayoutFormat::from_path(path))
        .with_context(|| format!("Invalid layout file {}", path.display()))
}
