//! Layout persistence
//!
//! `save_layout` snapshots a container into a `LayoutDocument`;
//! `load_layout` reconciles a document against live content by persist
//! name. `file` reads and writes documents as JSON or YAML.

pub mod document;
pub mod file;
pub mod load;
pub mod save;

pub use document::{
    AutoHideRecord, ChildRecord, ContentRecord, FloatingRecord, LayoutDocument, NodeRecord,
    PaneRecord, TreeRecord, LAYOUT_VERSION,
};
pub use file::{read_layout_file, write_layout_file, LayoutFormat};
pub use load::{load_layout, ContentFactory, LoadReport};
pub use save::save_layout;
