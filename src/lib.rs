//! Dockspace - a dockable-pane layout engine
//!
//! Tabbed panes arranged in a recursive five-slot tree, docked to edges,
//! floated in windows or tucked into auto-hide panels. The engine computes
//! geometry and resolves drag-and-drop targets; drawing is left to the host.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod drag;
pub mod error;
pub mod events;
pub mod messages;
pub mod model;
pub mod persist;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use error::{DockError, DockResult};
pub use events::DockEvent;
pub use messages::Msg;
pub use model::{DockContainer, DockModel};
