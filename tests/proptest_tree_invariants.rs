//! Property-based invariant tests for the dock tree.
//!
//! Random sequences of placement operations are applied to a container and
//! after every step:
//!
//! 1. The registry, hosts and tree agree with each other.
//! 2. The tree is minimal: no non-root branch is left with only a Centre.
//! 3. Every branch has a populated Centre.
//! 4. The address of every pane resolves back to that pane.
//! 5. Pane rectangles partition their host without overlap.

mod common;

use common::{test_container, MAIN_BOUNDS};
use dockspace::model::{ContentId, ContentSpec, DockAddress, DockContainer, DockSite, Rect};
use proptest::prelude::*;

const CONTENT_COUNT: usize = 6;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add(usize, Vec<DockSite>),
    Detach(usize),
    Float(usize),
    Dock(usize),
    AutoHide(usize, DockSite),
    ResizeEdge(DockSite, f32),
}

fn slot_strategy() -> impl Strategy<Value = DockSite> {
    prop::sample::select(DockSite::SLOTS.to_vec())
}

fn edge_strategy() -> impl Strategy<Value = DockSite> {
    prop::sample::select(DockSite::EDGES.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let item = 0..CONTENT_COUNT;
    prop_oneof![
        4 => (item.clone(), prop::collection::vec(slot_strategy(), 0..=4))
            .prop_map(|(i, sites)| Op::Add(i, sites)),
        2 => item.clone().prop_map(Op::Detach),
        1 => item.clone().prop_map(Op::Float),
        1 => item.clone().prop_map(Op::Dock),
        1 => (item, edge_strategy()).prop_map(|(i, site)| Op::AutoHide(i, site)),
        1 => (edge_strategy(), 0.0f32..900.0).prop_map(|(site, px)| Op::ResizeEdge(site, px)),
    ]
}

fn populated() -> (DockContainer, Vec<ContentId>) {
    let mut container = test_container();
    let ids = (0..CONTENT_COUNT)
        .map(|i| container.register(ContentSpec::new(format!("item{i}"))).unwrap())
        .collect();
    (container, ids)
}

/// Rejected operations are fine; only the resulting state matters
fn apply(container: &mut DockContainer, ids: &[ContentId], op: &Op) {
    let _ = match op {
        Op::Add(i, sites) => container
            .add(ids[*i], None, &DockAddress::new(sites.clone()))
            .map(|_| ()),
        Op::Detach(i) => container.detach(ids[*i]),
        Op::Float(i) => container.float(ids[*i]).map(|_| ()),
        Op::Dock(i) => container.dock(ids[*i]).map(|_| ()),
        Op::AutoHide(i, site) => container.auto_hide(ids[*i], *site).map(|_| ()),
        Op::ResizeEdge(site, pixels) => {
            let host = container.main_host();
            container.resize_edge(host, &DockAddress::root(), *site, *pixels, MAIN_BOUNDS)
        }
    };
}

fn check_structure(container: &DockContainer) -> Result<(), TestCaseError> {
    let report = container.validate();
    prop_assert!(report.is_clean(), "container invalid: {:?}", report);
    let report = container.tree().validate_pruned();
    prop_assert!(report.is_clean(), "tree not pruned: {:?}", report);

    let tree = container.tree();
    for host in container.hosts() {
        for branch_id in tree.branches_under(host.root) {
            let branch = tree.branch(branch_id).unwrap();
            prop_assert!(
                !branch.slot(DockSite::Centre).is_empty(),
                "branch {:?} has an empty Centre",
                branch_id
            );
            if branch_id != host.root {
                prop_assert!(
                    branch.occupant_count() >= 2,
                    "non-root branch {:?} should have been collapsed",
                    branch_id
                );
            }
        }
    }
    Ok(())
}

fn check_addresses(container: &DockContainer) -> Result<(), TestCaseError> {
    for pane in container.all_panes() {
        let host = container.host_of_pane(pane).unwrap();
        let address = container.pane_address(pane).unwrap();
        prop_assert_eq!(
            container.get_pane_in(host, &address),
            Some(pane),
            "address {} does not resolve back",
            address
        );
    }
    Ok(())
}

fn check_partition(container: &DockContainer) -> Result<(), TestCaseError> {
    let host = container.main_host();
    let bounds = container.host_bounds(host).unwrap();
    let rects: Vec<Rect> = container.pane_rects(host).into_iter().map(|(_, r)| r).collect();

    let total: f32 = rects.iter().map(Rect::area).sum();
    prop_assert!(
        (total - bounds.area()).abs() < 1.0,
        "pane areas {} do not cover host area {}",
        total,
        bounds.area()
    );
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            prop_assert!(
                a.intersection(b).area() < 1.0,
                "panes overlap: {:?} and {:?}",
                a,
                b
            );
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// Structure survives arbitrary operation sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tree_stays_minimal_and_consistent(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut container, ids) = populated();
        for op in &ops {
            apply(&mut container, &ids, op);
            check_structure(&container)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Pane addresses round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pane_addresses_resolve(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut container, ids) = populated();
        for op in &ops {
            apply(&mut container, &ids, op);
        }
        check_addresses(&container)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Geometry partitions the host
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pane_rects_partition_host(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut container, ids) = populated();
        for op in &ops {
            apply(&mut container, &ids, op);
        }
        check_partition(&container)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Detaching everything restores the initial shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn detaching_everything_collapses_tree(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let (mut container, ids) = populated();
        for op in &ops {
            apply(&mut container, &ids, op);
        }
        for id in &ids {
            container.detach(*id).unwrap();
        }
        container.purge_floating_windows();

        let tree = container.tree();
        for host in container.hosts() {
            prop_assert_eq!(tree.branches_under(host.root), vec![host.root]);
        }
        prop_assert_eq!(container.all_content().count(), 0);
    }
}
