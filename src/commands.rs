//! Commands for side effects
//!
//! The update layer never draws. It returns a `Cmd` telling the host what
//! to do next.

use crate::model::Rect;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Layout changed, redraw everything
    Redraw,
    /// Show (or clear, for `None`) the drop preview rectangle
    DropPreview(Option<Rect>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // The overlay is drawn on top of the layout
            Cmd::DropPreview(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// The preview rectangle carried by this command, if any
    pub fn drop_preview(&self) -> Option<Option<Rect>> {
        match self {
            Cmd::DropPreview(rect) => Some(*rect),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(|c| c.drop_preview()),
            _ => None,
        }
    }
}
