//! Notifications raised by the dock container
//!
//! Events are queued synchronously during the mutating call that causes
//! them. The host application drains them with
//! `DockContainer::drain_events()` after each call.

use crate::model::{ContentId, FloatingId, HostId, PaneId};

/// Whether content entered or left a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    /// A host's active pane changed
    ActivePaneChanged {
        host: HostId,
        old: Option<PaneId>,
        new: Option<PaneId>,
    },
    /// A host's active content changed
    ActiveContentChanged {
        host: HostId,
        old: Option<ContentId>,
        new: Option<ContentId>,
    },
    /// Content was placed into or taken out of a pane
    ContentMoved {
        kind: MoveKind,
        content: ContentId,
        pane: PaneId,
    },
    /// The shape of a host's tree changed
    TreeChanged { host: HostId },
    /// A floating window was created, shown, hidden or destroyed
    FloatingWindowChanged { id: FloatingId, visible: bool },
}

impl DockEvent {
    /// The host this event concerns, if it is host-scoped
    pub fn host(&self) -> Option<HostId> {
        match self {
            DockEvent::ActivePaneChanged { host, .. }
            | DockEvent::ActiveContentChanged { host, .. }
            | DockEvent::TreeChanged { host } => Some(*host),
            DockEvent::ContentMoved { .. } | DockEvent::FloatingWindowChanged { .. } => None,
        }
    }
}
