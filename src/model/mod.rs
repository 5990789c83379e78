//! Dock model - the complete state of a docking layout
//!
//! Leaf types first (sites, rectangles, sizes), then the tree arena, the
//! hosts built on it and the container that ties them together.

pub mod active;
pub mod container;
pub mod content;
pub mod host;
pub mod rect;
pub mod site;
pub mod sizes;
pub mod tree;

pub use active::FocusHandler;
pub use container::DockContainer;
pub use content::{Content, ContentId, ContentSpec, DockLocation, HostRef, RememberedPlacement};
pub use host::{auto_hide_strip, FloatingId, HostId, HostKind, TreeHost};
pub use rect::{Point, Rect, Size};
pub use site::{DockAddress, DockMask, DockSite};
pub use sizes::{DockSizeData, EdgeSizes, DEFAULT_CENTRE_MIN};
pub use tree::{
    Branch, BranchId, DockPane, DockTree, InvariantCode, InvariantIssue, InvariantReport,
    PaneId, PaneIter, PruneReport, Slot, DEFAULT_MAX_ADDRESS_DEPTH,
};

use crate::config::DockConfig;
use crate::drag::DragResolver;

/// The complete state driven by `update`
#[derive(Debug)]
pub struct DockModel {
    pub container: DockContainer,
    /// The drag gesture in progress, if any
    pub drag: Option<DragResolver>,
    pub config: DockConfig,
}

impl DockModel {
    pub fn new(config: DockConfig) -> Self {
        Self {
            container: DockContainer::with_config(&config),
            drag: None,
            config,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Default for DockModel {
    fn default() -> Self {
        Self::new(DockConfig::default())
    }
}
