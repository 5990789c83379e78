//! Shared helpers for benchmarks

use dockspace::model::{ContentId, ContentSpec, DockAddress, DockContainer, DockSite, Rect};

/// A container whose main window is 1920x1080
#[allow(dead_code)]
pub fn make_container() -> DockContainer {
    let mut container = DockContainer::new();
    container.set_bounds(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    container
}

/// Cycle through the edges, nesting one level deeper each time round
#[allow(dead_code)]
pub fn address_for(i: usize) -> DockAddress {
    let mut sites = Vec::new();
    for level in 0..=(i / DockSite::EDGES.len()) {
        sites.push(DockSite::EDGES[(i + level) % DockSite::EDGES.len()]);
    }
    DockAddress::new(sites)
}

/// A container holding `items` content items spread across nested panes
#[allow(dead_code)]
pub fn make_layout(items: usize) -> (DockContainer, Vec<ContentId>) {
    let mut container = make_container();
    let mut ids = Vec::with_capacity(items);
    for i in 0..items {
        let id = container
            .register(ContentSpec::new(format!("item{i}")))
            .expect("register");
        container
            .add(id, None, &address_for(i))
            .expect("place");
        ids.push(id);
    }
    (container, ids)
}
