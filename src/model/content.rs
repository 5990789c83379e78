//! Dockable content handles
//!
//! The engine never owns the application's content. It only tracks where each
//! item is placed, keyed by a `ContentId`, together with the metadata needed
//! to restore that placement later.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::host::FloatingId;
use super::site::{DockAddress, DockSite};
use super::tree::{BranchId, PaneId};

/// Unique identifier for a registered content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(pub u64);

/// Which kind of host a location refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostRef {
    /// The main dock container
    #[default]
    Main,
    /// A floating window, by its persisted id
    Floating(FloatingId),
    /// The auto-hide panel on the given edge
    AutoHide(DockSite),
}

/// Where a content item lives (or should live)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DockLocation {
    pub address: DockAddress,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub host: HostRef,
}

impl DockLocation {
    /// A location in the main container
    pub fn main(address: impl Into<DockAddress>) -> Self {
        Self {
            address: address.into(),
            index: None,
            host: HostRef::Main,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_host(mut self, host: HostRef) -> Self {
        self.host = host;
        self
    }

    /// A location whose first site is `None` means "not placed"
    pub fn is_detached(&self) -> bool {
        self.address.first() == Some(DockSite::None)
    }
}

/// Everything needed to register a content item
#[derive(Debug, Clone)]
pub struct ContentSpec {
    /// Stable identity across save/load
    pub persist_name: String,
    /// Application-defined kind, passed back to the content factory on load
    pub type_tag: String,
    /// Where `find_and_show`/`dock` place the item when nothing is remembered
    pub default_location: DockLocation,
    /// Opaque application data stored with the layout
    pub user_data: Option<serde_json::Value>,
}

impl ContentSpec {
    pub fn new(persist_name: impl Into<String>) -> Self {
        Self {
            persist_name: persist_name.into(),
            type_tag: String::new(),
            default_location: DockLocation::main([DockSite::Centre]),
            user_data: None,
        }
    }

    pub fn type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = tag.into();
        self
    }

    pub fn default_location(mut self, location: DockLocation) -> Self {
        self.default_location = location;
        self
    }

    pub fn user_data(mut self, data: serde_json::Value) -> Self {
        self.user_data = Some(data);
        self
    }
}

/// Remembered placement within one tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedPlacement {
    pub address: DockAddress,
    pub index: usize,
}

/// A registered content item
#[derive(Debug, Clone)]
pub struct Content {
    pub id: ContentId,
    pub persist_name: String,
    pub type_tag: String,
    pub default_location: DockLocation,
    pub user_data: Option<serde_json::Value>,
    /// The pane currently showing this item
    pub pane: Option<PaneId>,
    /// Last placement per tree, keyed by the tree's root branch
    pub remembered: HashMap<BranchId, RememberedPlacement>,
    /// Floating window this item was last shown in
    pub last_floating: Option<FloatingId>,
    /// Opaque focus token saved when this item's pane was deactivated
    pub focus_memory: Option<String>,
}

impl Content {
    pub fn new(id: ContentId, spec: ContentSpec) -> Self {
        Self {
            id,
            persist_name: spec.persist_name,
            type_tag: spec.type_tag,
            default_location: spec.default_location,
            user_data: spec.user_data,
            pane: None,
            remembered: HashMap::new(),
            last_floating: None,
            focus_memory: None,
        }
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.pane.is_some()
    }

    /// Placement remembered for the tree rooted at `root`
    pub fn remembered_in(&self, root: BranchId) -> Option<&RememberedPlacement> {
        self.remembered.get(&root)
    }
}
