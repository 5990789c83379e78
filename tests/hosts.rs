//! Tests for floating windows, auto-hide panels and the dock/float toggles

mod common;

use common::{addr, assert_valid, content, pane_content, placed, test_container};
use dockspace::events::DockEvent;
use dockspace::model::{ContentSpec, DockLocation, DockSite, FloatingId, HostKind, HostRef, Rect};

use DockSite::{Bottom, Centre, Left, Right, Top};

// ============================================================================
// Floating windows
// ============================================================================

#[test]
fn test_float_creates_centred_window() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Left]);

    let id = container.float(a).unwrap();
    assert_eq!(id, FloatingId(1));
    let host = container.host_for_floating(id).unwrap();
    let h = container.host(host).unwrap();
    assert!(h.visible);
    // 400x300 centred on the 1000x800 main window
    assert_eq!(h.bounds, Rect::new(300.0, 250.0, 400.0, 300.0));
    assert_eq!(container.host_of_content(a), Some(host));
    // The Left pane in main was pruned
    assert_eq!(container.get_pane(&addr(&[Left])), None);
    assert_valid(&container);
}

#[test]
fn test_float_twice_is_a_no_op() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    let first = container.float(a).unwrap();
    let second = container.float(a).unwrap();
    assert_eq!(first, second);
    assert_eq!(container.floating_hosts().count(), 1);
}

#[test]
fn test_dock_returns_to_remembered_place() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Bottom]);
    let id = container.float(a).unwrap();

    let pane = container.dock(a).unwrap();
    assert_eq!(container.pane_address(pane), Some(addr(&[Bottom])));

    // The floating window emptied and was hidden, not destroyed
    let host = container.host_for_floating(id).unwrap();
    assert!(!container.host(host).unwrap().visible);
    assert_valid(&container);
}

#[test]
fn test_float_reuses_last_window() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Bottom]);
    let id = container.float(a).unwrap();
    container.dock(a).unwrap();

    assert_eq!(container.float(a).unwrap(), id);
    let host = container.host_for_floating(id).unwrap();
    assert!(container.host(host).unwrap().visible);
    assert_eq!(container.floating_hosts().count(), 1);
}

#[test]
fn test_dock_uses_default_location_when_nothing_remembered() {
    let mut container = test_container();
    let a = container
        .register(ContentSpec::new("a").default_location(DockLocation::main([Right, Top])))
        .unwrap();
    let pane = container.dock(a).unwrap();
    assert_eq!(container.pane_address(pane), Some(addr(&[Right, Top])));
}

#[test]
fn test_purge_destroys_only_empty_windows() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    let (b, _) = placed(&mut container, "b", &[Left]);
    let id_a = container.float(a).unwrap();
    let host_b = container.create_floating(Rect::new(0.0, 0.0, 100.0, 100.0));
    container
        .add_to(host_b, b, None, &addr(&[Centre]))
        .unwrap();
    container.dock(a).unwrap();

    let purged = container.purge_floating_windows();
    assert_eq!(purged, vec![id_a]);
    assert!(container.host_for_floating(id_a).is_none());
    assert_eq!(container.floating_hosts().count(), 1);
    assert_valid(&container);
}

#[test]
fn test_floating_ids_ascend() {
    let mut container = test_container();
    let first = container.create_floating(Rect::default());
    let second = container.create_floating(Rect::default());
    let ids: Vec<_> = [first, second]
        .iter()
        .filter_map(|h| container.host(*h).and_then(|h| h.floating_id()))
        .collect();
    assert_eq!(ids, vec![FloatingId(1), FloatingId(2)]);
}

#[test]
fn test_floating_visibility_events() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    let id = container.float(a).unwrap();
    container.drain_events();

    container.set_floating_visible(id, false).unwrap();
    container.set_floating_visible(id, false).unwrap();
    let events = container.drain_events();
    assert_eq!(events, vec![DockEvent::FloatingWindowChanged { id, visible: false }]);
    assert!(container.set_floating_visible(FloatingId(42), true).is_err());
}

// ============================================================================
// Auto-hide panels
// ============================================================================

#[test]
fn test_auto_hide_host_per_edge() {
    let container = test_container();
    for site in [Left, Right, Top, Bottom] {
        let host = container.auto_hide_host(site).unwrap();
        let h = container.host(host).unwrap();
        assert_eq!(h.kind, HostKind::AutoHide(site));
        assert_eq!(h.auto_hide_site(), Some(site));
    }
    assert!(container.auto_hide_host(Centre).is_none());
    let main = container.host(container.main_host()).unwrap();
    assert_eq!(main.auto_hide_site(), None);
}

#[test]
fn test_auto_hide_address_is_coerced_to_centre() {
    let mut container = test_container();
    let a = content(&mut container, "a");
    let b = content(&mut container, "b");
    let host = container.auto_hide_host(Top).unwrap();

    let pane_a = container.add_to(host, a, None, &addr(&[Left, Bottom])).unwrap();
    let pane_b = container.auto_hide(b, Top).unwrap();
    assert_eq!(pane_a, pane_b);
    assert_eq!(container.pane_address(pane_a), Some(addr(&[Centre])));
    assert_eq!(pane_content(&container, pane_a), vec![a, b]);
    assert_eq!(
        container.content_location(b),
        Some(
            DockLocation::main([Centre])
                .with_index(1)
                .with_host(HostRef::AutoHide(Top))
        )
    );
    assert_valid(&container);
}

#[test]
fn test_auto_hide_rejects_centre() {
    let mut container = test_container();
    let a = content(&mut container, "a");
    assert!(container.auto_hide(a, Centre).is_err());
}

// ============================================================================
// find_and_show
// ============================================================================

#[test]
fn test_find_and_show_places_and_activates() {
    let mut container = test_container();
    let a = container
        .register(ContentSpec::new("a").default_location(DockLocation::main([Right])))
        .unwrap();

    let pane = container.find_and_show(a).unwrap();
    assert_eq!(container.pane_address(pane), Some(addr(&[Right])));
    assert_eq!(container.active_content(), Some(a));
    assert_eq!(container.active_pane(container.main_host()), Some(pane));
}

#[test]
fn test_find_and_show_pops_out_auto_hide() {
    let mut container = test_container();
    let a = content(&mut container, "a");
    container.auto_hide(a, Left).unwrap();
    let host = container.auto_hide_host(Left).unwrap();
    assert!(!container.host(host).unwrap().popped_out);

    container.find_and_show(a).unwrap();
    assert!(container.host(host).unwrap().popped_out);
    assert_eq!(container.active_host(), Some(host));
}

#[test]
fn test_find_and_show_reveals_hidden_floating() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    let id = container.float(a).unwrap();
    container.set_floating_visible(id, false).unwrap();

    container.find_and_show(a).unwrap();
    let host = container.host_for_floating(id).unwrap();
    assert!(container.host(host).unwrap().visible);
}

#[test]
fn test_find_and_show_selects_hidden_tab() {
    let mut container = test_container();
    let (a, pane) = placed(&mut container, "a", &[Centre]);
    placed(&mut container, "b", &[Centre]);
    assert_eq!(container.pane(pane).unwrap().visible.map(|v| v == a), Some(false));

    container.find_and_show(a).unwrap();
    assert_eq!(container.pane(pane).unwrap().visible, Some(a));
}
