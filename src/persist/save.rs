//! Snapshot a container into a `LayoutDocument`

use std::collections::HashMap;

use super::document::{
    AutoHideRecord, ChildRecord, ContentRecord, FloatingRecord, LayoutDocument, NodeRecord,
    PaneRecord, TreeRecord, LAYOUT_VERSION,
};
use crate::model::{
    BranchId, ContentId, DockAddress, DockContainer, DockLocation, DockSite, FloatingId, HostRef,
    Slot,
};

/// Capture the whole layout.
///
/// Floating windows holding content are renumbered 1..N in id order; empty
/// floating windows are left out.
pub fn save_layout(container: &DockContainer) -> LayoutDocument {
    let mut renumbered: HashMap<FloatingId, FloatingId> = HashMap::new();
    let mut floating = Vec::new();
    let mut kept: Vec<_> = container
        .floating_hosts()
        .filter(|h| !container.tree().is_tree_empty(h.root))
        .collect();
    kept.sort_by_key(|h| h.floating_id());

    for (n, host) in kept.into_iter().enumerate() {
        let Some(old) = host.floating_id() else {
            continue;
        };
        let id = FloatingId(n as u32 + 1);
        renumbered.insert(old, id);
        floating.push(FloatingRecord {
            id,
            bounds: host.bounds,
            visible: host.visible,
            tree: tree_record(container, host.root),
        });
    }

    let contents = container
        .contents()
        .map(|c| {
            let location = match container.content_location(c.id) {
                Some(mut location) => {
                    if let HostRef::Floating(old) = location.host {
                        location.host = HostRef::Floating(renumbered.get(&old).copied().unwrap_or(old));
                    }
                    location
                }
                None => DockLocation::main(DockAddress::from([DockSite::None])),
            };
            ContentRecord {
                name: c.persist_name.clone(),
                type_tag: c.type_tag.clone(),
                location,
                user_data: c.user_data.clone(),
            }
        })
        .collect();

    let auto_hide = container
        .hosts()
        .filter_map(|h| {
            h.auto_hide_site().map(|site| AutoHideRecord {
                site,
                popped_out: h.popped_out,
                tree: tree_record(container, h.root),
            })
        })
        .collect();

    let main = container
        .host(container.main_host())
        .map(|h| tree_record(container, h.root))
        .unwrap_or_default();

    let active_content = container
        .active_content()
        .and_then(|id| container.content(id))
        .map(|c| c.persist_name.clone());

    LayoutDocument {
        version: LAYOUT_VERSION,
        contents,
        active_content,
        main,
        floating,
        auto_hide,
    }
}

/// Sizes and children of `branch`, recursively
fn tree_record(container: &DockContainer, branch: BranchId) -> TreeRecord {
    let tree = container.tree();
    let Some(b) = tree.branch(branch) else {
        return TreeRecord::default();
    };

    let name_of = |id: ContentId| container.content(id).map(|c| c.persist_name.clone());
    let children = b
        .children()
        .filter_map(|(site, slot)| {
            let node = match slot {
                Slot::Branch(child) => NodeRecord::Tree(tree_record(container, child)),
                Slot::Pane(pane) => {
                    let p = tree.pane(pane)?;
                    NodeRecord::Pane(PaneRecord {
                        contents: p.content.iter().filter_map(|c| name_of(*c)).collect(),
                        visible: p.visible.and_then(name_of),
                    })
                }
                Slot::Empty => return None,
            };
            Some(ChildRecord { site, node })
        })
        .collect();

    TreeRecord {
        sizes: b.sizes,
        children,
    }
}
