//! Message types for the Elm-style architecture
//!
//! All layout changes driven by the host UI flow through these messages.

use crate::drag::DragItem;
use crate::model::{ContentId, DockAddress, DockSite, FloatingId, HostId, PaneId, Point, Rect};

/// Layout operations on the container
#[derive(Debug, Clone, PartialEq)]
pub enum DockMsg {
    // === Placement ===
    /// Place content at an address of the main container
    Add {
        content: ContentId,
        index: Option<usize>,
        address: DockAddress,
    },
    /// Place content at an address of a specific host
    AddTo {
        host: HostId,
        content: ContentId,
        index: Option<usize>,
        address: DockAddress,
    },
    /// Detach and unregister content
    Remove(ContentId),
    /// Unplace content, keeping it registered
    Detach(ContentId),
    /// Place if needed, reveal and activate
    FindAndShow(ContentId),

    // === Toggles ===
    /// Return content to the main container
    Dock(ContentId),
    /// Move content into a floating window
    Float(ContentId),
    /// Move content into the auto-hide panel of an edge
    AutoHide { content: ContentId, site: DockSite },
    /// Show or hide an auto-hide panel
    PopOut { site: DockSite, popped_out: bool },

    // === Activation ===
    ActivateContent(Option<ContentId>),
    ActivatePane { host: HostId, pane: Option<PaneId> },
    ActivatePrevious(HostId),
    /// Select the tab showing this content in its pane
    SetVisibleContent(ContentId),

    // === Floating windows ===
    MoveFloating { id: FloatingId, bounds: Rect },
    ShowFloating { id: FloatingId, visible: bool },
    PurgeFloatingWindows,

    // === Geometry ===
    /// The main window was resized
    Resize(Rect),
    /// Drag a splitter: new thickness for an edge of the branch at `branch`
    ResizeEdge {
        host: HostId,
        branch: DockAddress,
        site: DockSite,
        pixels: f32,
    },
}

/// Drag gesture messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMsg {
    Begin(DragItem),
    Move(Point),
    Drop,
    Cancel,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Dock(DockMsg),
    Drag(DragMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn add(content: ContentId, address: impl Into<DockAddress>) -> Self {
        Msg::Dock(DockMsg::Add {
            content,
            index: None,
            address: address.into(),
        })
    }

    pub fn activate(content: ContentId) -> Self {
        Msg::Dock(DockMsg::ActivateContent(Some(content)))
    }

    pub fn begin_drag(item: DragItem) -> Self {
        Msg::Drag(DragMsg::Begin(item))
    }

    pub fn drag_to(x: f32, y: f32) -> Self {
        Msg::Drag(DragMsg::Move(Point::new(x, y)))
    }
}
