//! Persisted layout document
//!
//! A format-agnostic tree: content entries with their locations, the main
//! tree, floating windows and auto-hide panels. Content is referred to by
//! persist name only, never by runtime id.

use serde::{Deserialize, Serialize};

use crate::model::{DockLocation, DockSite, DockSizeData, FloatingId, Rect};

/// Newest layout version this crate reads and writes
pub const LAYOUT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Schema version for forward compatibility
    pub version: u32,
    #[serde(default)]
    pub contents: Vec<ContentRecord>,
    /// Persist name of the active content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_content: Option<String>,
    pub main: TreeRecord,
    #[serde(default)]
    pub floating: Vec<FloatingRecord>,
    #[serde(default)]
    pub auto_hide: Vec<AutoHideRecord>,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            version: LAYOUT_VERSION,
            contents: Vec::new(),
            active_content: None,
            main: TreeRecord::default(),
            floating: Vec::new(),
            auto_hide: Vec::new(),
        }
    }
}

impl LayoutDocument {
    pub fn content(&self, name: &str) -> Option<&ContentRecord> {
        self.contents.iter().find(|c| c.name == name)
    }
}

/// One content item and where it lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub name: String,
    #[serde(default)]
    pub type_tag: String,
    /// Current location. A first site of `None` means "not placed".
    pub location: DockLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Value>,
}

/// A branch: its edge sizes and occupied slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub sizes: DockSizeData,
    #[serde(default)]
    pub children: Vec<ChildRecord>,
}

impl TreeRecord {
    pub fn child(&self, site: DockSite) -> Option<&NodeRecord> {
        self.children.iter().find(|c| c.site == site).map(|c| &c.node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub site: DockSite,
    pub node: NodeRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRecord {
    Tree(TreeRecord),
    Pane(PaneRecord),
}

/// A pane: persist names of its content, in tab order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaneRecord {
    #[serde(default)]
    pub contents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingRecord {
    pub id: FloatingId,
    pub bounds: Rect,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub tree: TreeRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoHideRecord {
    pub site: DockSite,
    #[serde(default)]
    pub popped_out: bool,
    pub tree: TreeRecord,
}

fn default_true() -> bool {
    true
}
