//! Debug tracing infrastructure for development diagnostics
//!
//! Structured logging with scoped filtering for following how the dock
//! tree changes shape.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=tree=debug,message=debug` - scoped filtering
//! - `RUST_LOG=dockspace::model::tree=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockspace/logs/dockspace.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{ContentId, DockContainer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "dockspace.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of tree shape for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    pub pane_count: usize,
    pub branch_count: usize,
    pub floating_count: usize,
    pub active_content: Option<ContentId>,
}

impl TreeSnapshot {
    pub fn from_container(container: &DockContainer) -> Self {
        Self {
            pane_count: container.tree().pane_count(),
            branch_count: container.tree().branch_count(),
            floating_count: container.floating_hosts().count(),
            active_content: container.active_content(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TreeSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.pane_count != other.pane_count {
            changes.push(format!("panes: {} → {}", self.pane_count, other.pane_count));
        }
        if self.branch_count != other.branch_count {
            changes.push(format!(
                "branches: {} → {}",
                self.branch_count, other.branch_count
            ));
        }
        if self.floating_count != other.floating_count {
            changes.push(format!(
                "floating: {} → {}",
                self.floating_count, other.floating_count
            ));
        }
        if self.active_content != other.active_content {
            changes.push(format!(
                "active: {:?} → {:?}",
                self.active_content, other.active_content
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
