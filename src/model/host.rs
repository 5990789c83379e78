//! Tree hosts - the surfaces that own a root branch
//!
//! Three kinds exist: the main container (always exactly one), floating
//! windows (created on demand) and one auto-hide panel per window edge.

use serde::{Deserialize, Serialize};

use super::content::{ContentId, HostRef};
use super::rect::Rect;
use super::site::DockSite;
use super::tree::{BranchId, PaneId};

/// Unique identifier for a tree host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostId(pub u64);

/// Identifier of a floating window, ascending in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatingId(pub u32);

/// What kind of surface a host is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Main,
    Floating(FloatingId),
    AutoHide(DockSite),
}

impl HostKind {
    /// The persisted form of this host kind
    pub fn host_ref(&self) -> HostRef {
        match self {
            HostKind::Main => HostRef::Main,
            HostKind::Floating(id) => HostRef::Floating(*id),
            HostKind::AutoHide(site) => HostRef::AutoHide(*site),
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, HostKind::Floating(_))
    }

    pub fn is_auto_hide(&self) -> bool {
        matches!(self, HostKind::AutoHide(_))
    }
}

/// A surface owning one root branch and one active pane/content pair
#[derive(Debug, Clone)]
pub struct TreeHost {
    pub id: HostId,
    pub kind: HostKind,
    pub root: BranchId,
    pub active_pane: Option<PaneId>,
    /// Visible content of `active_pane` as last published
    pub active_content: Option<ContentId>,
    /// Pane that was active before `active_pane`; may no longer exist
    pub previous_pane: Option<PaneId>,
    /// Screen bounds (main window, floating window or auto-hide strip)
    pub bounds: Rect,
    pub visible: bool,
    /// Auto-hide panels only: whether the panel is slid out
    pub popped_out: bool,
}

impl TreeHost {
    pub fn new(id: HostId, kind: HostKind, root: BranchId) -> Self {
        Self {
            id,
            kind,
            root,
            active_pane: None,
            active_content: None,
            previous_pane: None,
            bounds: Rect::default(),
            visible: !kind.is_auto_hide(),
            popped_out: false,
        }
    }

    pub fn floating_id(&self) -> Option<FloatingId> {
        match self.kind {
            HostKind::Floating(id) => Some(id),
            _ => None,
        }
    }

    pub fn auto_hide_site(&self) -> Option<DockSite> {
        match self.kind {
            HostKind::AutoHide(site) => Some(site),
            _ => None,
        }
    }

    /// Whether the host currently takes part in hit testing
    pub fn is_shown(&self) -> bool {
        match self.kind {
            HostKind::Main => true,
            HostKind::Floating(_) => self.visible,
            HostKind::AutoHide(_) => self.popped_out,
        }
    }
}

/// Strip of `main` occupied by a popped-out auto-hide panel on `site`
pub fn auto_hide_strip(main: Rect, site: DockSite, size: f32) -> Rect {
    let thickness = |dimension: f32| {
        if size >= 1.0 {
            size.min(dimension)
        } else {
            (size * dimension).max(0.0)
        }
    };
    match site {
        DockSite::Left => Rect::new(main.x, main.y, thickness(main.width), main.height),
        DockSite::Right => {
            let w = thickness(main.width);
            Rect::new(main.right() - w, main.y, w, main.height)
        }
        DockSite::Top => Rect::new(main.x, main.y, main.width, thickness(main.height)),
        DockSite::Bottom => {
            let h = thickness(main.height);
            Rect::new(main.x, main.bottom() - h, main.width, h)
        }
        DockSite::Centre | DockSite::None => Rect::new(main.x, main.y, 0.0, 0.0),
    }
}
