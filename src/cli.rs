//! Command-line argument parsing for the layout inspector
//!
//! `dockspace [LAYOUT] [--width W] [--height H] [--validate] [--save PATH]`

use clap::Parser;
use std::path::PathBuf;

use crate::model::Rect;

/// Restore a saved dock layout and print where every pane lands
#[derive(Parser, Debug)]
#[command(name = "dockspace", version, about = "Inspect a saved dock layout")]
pub struct CliArgs {
    /// Layout file (.json, .yaml or .yml). Defaults to the saved layout in
    /// the config directory.
    #[arg(value_name = "LAYOUT")]
    pub layout: Option<PathBuf>,

    /// Width of the main window in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Height of the main window in pixels
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,

    /// Check tree invariants and exit non-zero if any are broken
    #[arg(long)]
    pub validate: bool,

    /// Write the restored layout back out to this path
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub layout_path: PathBuf,
    pub bounds: Rect,
    pub validate: bool,
    pub save_path: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(format!(
                "Window size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        let layout_path = match self.layout {
            Some(path) => path,
            None => crate::config_paths::layout_file()
                .ok_or_else(|| "No layout file given and no config directory found".to_string())?,
        };
        Ok(StartupConfig {
            layout_path,
            bounds: Rect::new(0.0, 0.0, self.width, self.height),
            validate: self.validate,
            save_path: self.save,
        })
    }
}
