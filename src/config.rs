//! Dock engine configuration persistence
//!
//! Stores user preferences in `~/.config/dockspace/config.yaml`

use serde::{Deserialize, Serialize};

use crate::model::Size;

/// Geometry used when resolving drag targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragMetrics {
    /// Height of a pane's title bar (top edge)
    pub title_bar_height: f32,
    /// Height of a pane's tab strip (bottom edge)
    pub tab_strip_height: f32,
    /// Width of one tab in the strip
    pub tab_width: f32,
    /// Side length of one indicator button
    pub indicator_size: f32,
    /// Panes at least this big on both axes get the outer (branch-level) cross arms
    pub large_cross_min: f32,
}

impl Default for DragMetrics {
    fn default() -> Self {
        Self {
            title_bar_height: 20.0,
            tab_strip_height: 22.0,
            tab_width: 100.0,
            indicator_size: 32.0,
            large_cross_min: 160.0,
        }
    }
}

/// Dock configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    /// Minimum size kept for the Centre region of every branch
    #[serde(default = "default_centre_min_size")]
    pub centre_min_size: Size,

    /// Longest placement address accepted
    #[serde(default = "default_max_address_depth")]
    pub max_address_depth: usize,

    /// Size of a newly created floating window
    #[serde(default = "default_floating_size")]
    pub floating_size: Size,

    /// Thickness of a popped-out auto-hide panel (fraction or pixels)
    #[serde(default = "default_auto_hide_size")]
    pub auto_hide_size: f32,

    #[serde(default)]
    pub drag: DragMetrics,
}

fn default_centre_min_size() -> Size {
    Size::new(20.0, 20.0)
}

fn default_max_address_depth() -> usize {
    crate::model::DEFAULT_MAX_ADDRESS_DEPTH
}

fn default_floating_size() -> Size {
    Size::new(400.0, 300.0)
}

fn default_auto_hide_size() -> f32 {
    0.25
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            centre_min_size: default_centre_min_size(),
            max_address_depth: default_max_address_depth(),
            floating_size: default_floating_size(),
            auto_hide_size: default_auto_hide_size(),
            drag: DragMetrics::default(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Minimum Centre size, clamped to non-negative values
    pub fn centre_min(&self) -> Size {
        Size::new(
            self.centre_min_size.width.max(0.0),
            self.centre_min_size.height.max(0.0),
        )
    }
}
