//! Restore a `LayoutDocument` into a container
//!
//! Loading is best-effort. Content that no longer exists and that the
//! factory cannot recreate is skipped, and tree records that no longer match
//! the live tree are ignored. Only a document from a newer version or a
//! container locked by a drag gesture aborts the load.

use std::collections::HashMap;

use super::document::{ContentRecord, LayoutDocument, NodeRecord, PaneRecord, TreeRecord, LAYOUT_VERSION};
use crate::error::{DockError, DockResult};
use crate::model::{
    BranchId, ContentId, ContentSpec, DockAddress, DockContainer, DockSite, HostId, HostRef, Rect, Slot,
};

/// Creates content the container does not know yet, from its saved record
pub type ContentFactory<'a> = dyn FnMut(&ContentRecord) -> Option<ContentSpec> + 'a;

/// What a load did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Content placed at its saved location
    pub placed: Vec<ContentId>,
    /// Content registered through the factory
    pub created: Vec<ContentId>,
    /// Content explicitly detached by the layout
    pub detached: Vec<ContentId>,
    /// Persist names that could not be resolved or placed
    pub skipped: Vec<String>,
}

/// Apply `doc` to `container`
pub fn load_layout(
    container: &mut DockContainer,
    doc: &LayoutDocument,
    mut factory: Option<&mut ContentFactory<'_>>,
) -> DockResult<LoadReport> {
    if doc.version > LAYOUT_VERSION {
        return Err(DockError::UnsupportedLayoutVersion {
            found: doc.version,
            supported: LAYOUT_VERSION,
        });
    }
    if let Some(host) = container.locked_host() {
        return Err(DockError::GestureInProgress(host));
    }

    let mut report = LoadReport::default();

    for record in &doc.floating {
        let host = container.get_or_create_floating(record.id, record.bounds);
        if let Some(h) = container.hosts.get_mut(&host) {
            h.bounds = record.bounds;
        }
    }

    // Resolve in document order so recreated content keeps its saved order
    let mut resolved = Vec::with_capacity(doc.contents.len());
    for record in &doc.contents {
        match resolve_content(container, record, factory.as_deref_mut(), &mut report) {
            Some(content) => resolved.push((record, content)),
            None => {
                tracing::warn!(name = %record.name, "skipping unknown content in layout");
                report.skipped.push(record.name.clone());
            }
        }
    }

    // Rebuild each saved tree pane by pane, pruning only once it is whole
    let mut restored: Vec<ContentId> = Vec::new();
    let mut touched = Vec::new();
    let by_name: HashMap<&str, ContentId> = resolved
        .iter()
        .filter(|(r, _)| !r.location.is_detached())
        .map(|(r, id)| (r.name.as_str(), *id))
        .collect();

    let main = container.main_host();
    touched.push(Some(main));
    rebuild_tree(container, main, &doc.main, &by_name, &mut restored, &mut touched)?;
    for record in &doc.floating {
        if let Some(host) = container.host_for_floating(record.id) {
            touched.push(Some(host));
            rebuild_tree(container, host, &record.tree, &by_name, &mut restored, &mut touched)?;
        }
    }
    for record in &doc.auto_hide {
        if let Some(host) = container.auto_hide_host(record.site) {
            touched.push(Some(host));
            rebuild_tree(container, host, &record.tree, &by_name, &mut restored, &mut touched)?;
        }
    }
    container.finish_mutation(&touched);
    for content in &restored {
        container.remember_placement(*content);
    }
    report.placed.extend(restored.iter().copied());

    // Whatever the trees did not hold goes by its own location, in index
    // order so each item lands at its saved tab position
    let mut leftover: Vec<_> = resolved
        .into_iter()
        .filter(|(_, id)| !restored.contains(id))
        .collect();
    leftover.sort_by_key(|(r, _)| r.location.index.unwrap_or(usize::MAX));

    for (record, content) in leftover {
        if record.location.is_detached() {
            container.detach(content)?;
            report.detached.push(content);
            continue;
        }

        let host = match record.location.host {
            HostRef::Main => Some(container.main_host()),
            HostRef::Floating(id) => Some(container.get_or_create_floating(id, Rect::default())),
            HostRef::AutoHide(site) => container.auto_hide_host(site),
        };
        let Some(host) = host else {
            tracing::warn!(name = %record.name, host = ?record.location.host, "skipping content for missing host");
            report.skipped.push(record.name.clone());
            continue;
        };

        match container.add_to(host, content, record.location.index, &record.location.address) {
            Ok(_) => report.placed.push(content),
            Err(e) => {
                tracing::warn!(name = %record.name, error = %e, "skipping unplaceable content");
                report.skipped.push(record.name.clone());
            }
        }
    }

    // Tree state: sizes and visible tabs
    if let Some(root) = container.host(container.main_host()).map(|h| h.root) {
        apply_tree(container, root, &doc.main);
    }
    for record in &doc.floating {
        let Some(host) = container.host_for_floating(record.id) else {
            continue;
        };
        if let Some(root) = container.host(host).map(|h| h.root) {
            apply_tree(container, root, &record.tree);
        }
        let has_content = container.all_content_in(host).next().is_some();
        if has_content {
            container.set_floating_visible(record.id, record.visible)?;
        }
    }
    for record in &doc.auto_hide {
        let Some(host) = container.auto_hide_host(record.site) else {
            continue;
        };
        if let Some(root) = container.host(host).map(|h| h.root) {
            apply_tree(container, root, &record.tree);
        }
        container.set_popped_out(record.site, record.popped_out)?;
    }

    // Windows whose content was all skipped stay hidden
    container.hide_empty_floating_windows();

    if let Some(name) = &doc.active_content {
        match container.find_by_name(name) {
            Some(id) if container.content(id).is_some_and(|c| c.is_placed()) => {
                container.set_active_content(Some(id))?;
            }
            _ => tracing::debug!(%name, "saved active content is not placed"),
        }
    }

    tracing::info!(
        placed = report.placed.len(),
        created = report.created.len(),
        skipped = report.skipped.len(),
        "layout loaded"
    );
    Ok(report)
}

/// Existing content by persist name, or a new registration from the factory
fn resolve_content(
    container: &mut DockContainer,
    record: &ContentRecord,
    factory: Option<&mut ContentFactory<'_>>,
    report: &mut LoadReport,
) -> Option<ContentId> {
    if let Some(id) = container.find_by_name(&record.name) {
        return Some(id);
    }
    let mut spec = factory.and_then(|f| f(record))?;
    spec.persist_name = record.name.clone();
    if spec.user_data.is_none() {
        spec.user_data = record.user_data.clone();
    }
    let id = container.register(spec).ok()?;
    report.created.push(id);
    Some(id)
}

/// Grow the pane of every `PaneRecord` under `record` and move its content
/// in, in tab order. Nothing is pruned here, so half-built branches keep
/// their shape until the caller finishes the mutation.
fn rebuild_tree(
    container: &mut DockContainer,
    host: HostId,
    record: &TreeRecord,
    by_name: &HashMap<&str, ContentId>,
    restored: &mut Vec<ContentId>,
    touched: &mut Vec<Option<HostId>>,
) -> DockResult<()> {
    let root = container.host(host).ok_or(DockError::UnknownHost(host))?.root;
    let single_pane = container.host(host).is_some_and(|h| h.kind.is_auto_hide());

    let mut panes = Vec::new();
    collect_panes(record, &mut DockAddress::root(), &mut panes);

    for (address, pane_record) in panes {
        let contents: Vec<ContentId> = pane_record
            .contents
            .iter()
            .filter_map(|name| by_name.get(name.as_str()).copied())
            .filter(|id| !restored.contains(id))
            .collect();
        if contents.is_empty() {
            continue;
        }
        let address = if single_pane {
            DockAddress::from([DockSite::Centre])
        } else {
            address
        };
        let pane = match container.tree.grow(root, &address) {
            Ok(pane) => pane,
            Err(e) => {
                tracing::warn!(%address, error = %e, "skipping unrestorable pane");
                continue;
            }
        };
        for content in contents {
            let previous = container.move_to_pane(content, pane, None)?;
            touched.push(previous);
            restored.push(content);
        }
    }
    Ok(())
}

/// Every pane record under `record` with its address, depth first
fn collect_panes<'a>(
    record: &'a TreeRecord,
    prefix: &mut DockAddress,
    out: &mut Vec<(DockAddress, &'a PaneRecord)>,
) {
    for child in &record.children {
        prefix.push(child.site);
        match &child.node {
            NodeRecord::Pane(pane) => out.push((prefix.clone(), pane)),
            NodeRecord::Tree(tree) => collect_panes(tree, prefix, out),
        }
        prefix.pop();
    }
}

/// Apply saved sizes and visible tabs, matching children by site
fn apply_tree(container: &mut DockContainer, branch: BranchId, record: &TreeRecord) {
    if let Some(b) = container.tree.branch_mut(branch) {
        b.sizes = record.sizes;
    }

    for child in &record.children {
        let slot = container
            .tree
            .branch(branch)
            .map(|b| b.slot(child.site))
            .unwrap_or_default();
        match (slot, &child.node) {
            (Slot::Branch(id), NodeRecord::Tree(tree)) => apply_tree(container, id, tree),
            (Slot::Pane(pane), NodeRecord::Pane(saved)) => {
                let visible = saved
                    .visible
                    .as_deref()
                    .and_then(|name| container.find_by_name(name))
                    .filter(|id| container.pane(pane).is_some_and(|p| p.contains(*id)));
                if let Some(id) = visible {
                    if let Err(e) = container.set_visible_content(id) {
                        tracing::warn!(error = %e, "could not restore visible tab");
                    }
                }
            }
            (slot, _) => {
                tracing::debug!(site = %child.site, ?slot, "layout drift: skipping child record");
            }
        }
    }
}
