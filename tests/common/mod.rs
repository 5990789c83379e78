//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockspace::config::DockConfig;
use dockspace::model::{
    ContentId, ContentSpec, DockAddress, DockContainer, DockModel, DockSite, PaneId, Rect,
};

pub const MAIN_BOUNDS: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1000.0,
    height: 800.0,
};

/// Empty container with a 1000x800 main window
pub fn test_container() -> DockContainer {
    let mut container = DockContainer::with_config(&DockConfig::default());
    container.set_bounds(MAIN_BOUNDS);
    container
}

/// Model wrapping `test_container`
pub fn test_model() -> DockModel {
    let mut model = DockModel::new(DockConfig::default());
    model.container.set_bounds(MAIN_BOUNDS);
    model
}

/// Register content named `name`
pub fn content(container: &mut DockContainer, name: &str) -> ContentId {
    container
        .register(ContentSpec::new(name).type_tag("tool"))
        .expect("register content")
}

/// Register and place content at `sites` in the main container
pub fn placed(container: &mut DockContainer, name: &str, sites: &[DockSite]) -> (ContentId, PaneId) {
    let id = content(container, name);
    let pane = container
        .add(id, None, &addr(sites))
        .expect("place content");
    (id, pane)
}

pub fn addr(sites: &[DockSite]) -> DockAddress {
    DockAddress::new(sites.to_vec())
}

/// Content ids shown in `pane`, in tab order
pub fn pane_content(container: &DockContainer, pane: PaneId) -> Vec<ContentId> {
    container
        .pane(pane)
        .map(|p| p.content.clone())
        .unwrap_or_default()
}

/// Assert the full container invariants hold
pub fn assert_valid(container: &DockContainer) {
    let report = container.validate();
    assert!(report.is_clean(), "invariants violated:\n{}", report);
    let pruned = container.tree().validate_pruned();
    assert!(pruned.is_clean(), "tree not minimal:\n{}", pruned);
}

pub fn approx_eq(a: Rect, b: Rect) -> bool {
    (a.x - b.x).abs() < 1e-3
        && (a.y - b.y).abs() < 1e-3
        && (a.width - b.width).abs() < 1e-3
        && (a.height - b.height).abs() < 1e-3
}
