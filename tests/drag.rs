//! Tests for drag-and-drop target resolution and drop application
//!
//! Layout used by most tests (main window 1000x800):
//! - `a` in the root Centre pane at (250,0,750,800)
//! - `b` in a Left pane at (0,0,250,800)

mod common;

use common::{addr, assert_valid, pane_content, placed, test_container};
use dockspace::config::DragMetrics;
use dockspace::drag::{DragItem, DragResolver, DropOutcome, DropSite};
use dockspace::error::DockError;
use dockspace::model::{ContentId, DockContainer, DockSite, FloatingId, PaneId, Point, Rect};

use DockSite::{Centre, Left, Right};

struct Layout {
    container: DockContainer,
    a: ContentId,
    b: ContentId,
    centre: PaneId,
    left: PaneId,
}

fn layout() -> Layout {
    let mut container = test_container();
    let (a, centre) = placed(&mut container, "a", &[Centre]);
    let (b, left) = placed(&mut container, "b", &[Left]);
    Layout {
        container,
        a,
        b,
        centre,
        left,
    }
}

fn begin(container: &mut DockContainer, item: DragItem) -> DragResolver {
    DragResolver::begin(container, item, DragMetrics::default()).unwrap()
}

// The cross over the Centre pane is centred at (625, 400) with 32px buttons
const CROSS: Point = Point { x: 625.0, y: 400.0 };

fn offset(dx: f32, dy: f32) -> Point {
    Point::new(CROSS.x + dx, CROSS.y + dy)
}

// ============================================================================
// Target resolution
// ============================================================================

#[test]
fn test_cross_centre_tabs_into_pane() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, CROSS).clone();

    assert_eq!(target.site, DropSite::PaneCentre);
    assert_eq!(target.pane, Some(l.centre));
    assert_eq!(target.address, addr(&[Centre]));

    let outcome = drag.drop(&mut l.container).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Docked {
            host: l.container.main_host(),
            pane: l.centre
        }
    );
    assert_eq!(pane_content(&l.container, l.centre), vec![l.a, l.b]);
    assert!(l.container.pane(l.left).is_none());
    assert_valid(&l.container);
}

#[test]
fn test_inner_arm_splits_pane() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, offset(-32.0, 0.0)).clone();

    assert_eq!(target.site, DropSite::PaneEdge(Left));
    assert_eq!(target.address, addr(&[Centre, Left]));

    let DropOutcome::Docked { pane, .. } = drag.drop(&mut l.container).unwrap() else {
        panic!("expected a docked drop");
    };
    // The old Left pane emptied, so the root adopted the new split
    assert_eq!(pane_content(&l.container, pane), vec![l.b]);
    assert_eq!(l.container.pane_address(pane), Some(addr(&[Left])));
    assert_eq!(l.container.pane_address(l.centre), Some(addr(&[Centre])));
    assert_valid(&l.container);
}

#[test]
fn test_outer_arm_docks_at_branch_edge() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.a));
    let target = drag.update(&l.container, offset(-64.0, 0.0)).clone();

    assert_eq!(target.site, DropSite::BranchEdge(Left));
    assert_eq!(target.address, addr(&[Left]));

    drag.drop(&mut l.container).unwrap();
    assert_eq!(pane_content(&l.container, l.left), vec![l.b, l.a]);
    assert_valid(&l.container);
}

#[test]
fn test_root_edge_button() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    // Right button: 8px margin plus half a button from the right edge
    let target = drag.update(&l.container, Point::new(976.0, 400.0)).clone();

    assert_eq!(target.site, DropSite::RootEdge(Right));
    assert_eq!(target.address, addr(&[Right]));

    let DropOutcome::Docked { pane, .. } = drag.drop(&mut l.container).unwrap() else {
        panic!("expected a docked drop");
    };
    assert_eq!(l.container.pane_address(pane), Some(addr(&[Right])));
    assert_eq!(l.container.get_pane(&addr(&[Left])), None);
    assert_valid(&l.container);
}

#[test]
fn test_tab_strip_inserts_at_hovered_index() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, Point::new(260.0, 790.0)).clone();

    assert_eq!(target.site, DropSite::PaneCentre);
    assert_eq!(target.index, Some(0));

    drag.drop(&mut l.container).unwrap();
    assert_eq!(pane_content(&l.container, l.centre), vec![l.b, l.a]);
}

#[test]
fn test_title_bar_appends() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, Point::new(900.0, 10.0)).clone();

    assert_eq!(target.site, DropSite::PaneCentre);
    assert_eq!(target.index, None);
    assert_eq!(target.pane, Some(l.centre));
}

#[test]
fn test_pane_body_floats() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, Point::new(900.0, 400.0)).clone();
    assert!(target.is_float());

    let outcome = drag.drop(&mut l.container).unwrap();
    let DropOutcome::Floated { id, pane } = outcome else {
        panic!("expected a floating drop");
    };
    assert_eq!(id, FloatingId(1));
    let host = l.container.host_for_floating(id).unwrap();
    assert_eq!(l.container.host(host).unwrap().bounds, Rect::new(900.0, 400.0, 400.0, 300.0));
    assert_eq!(pane_content(&l.container, pane), vec![l.b]);
    assert_valid(&l.container);
}

#[test]
fn test_outside_every_host_floats() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    assert!(drag.update(&l.container, Point::new(-50.0, -50.0)).is_float());
    drag.cancel(&mut l.container);
}

#[test]
fn test_floating_window_is_hit_first() {
    let mut l = layout();
    let id = l.container.float(l.a).unwrap();
    let host = l.container.host_for_floating(id).unwrap();
    let a_pane = l.container.content(l.a).unwrap().pane.unwrap();

    // The floating window sits at (300,250,400,300) over the main window
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, Point::new(500.0, 400.0)).clone();
    assert_eq!(target.host, Some(host));
    assert_eq!(target.pane, Some(a_pane));
    assert_eq!(target.site, DropSite::PaneCentre);
    drag.cancel(&mut l.container);
}

#[test]
fn test_auto_hide_target_is_always_centre() {
    let mut l = layout();
    l.container.auto_hide(l.a, Right).unwrap();
    l.container.set_popped_out(Right, true).unwrap();
    let host = l.container.auto_hide_host(Right).unwrap();

    // Popped-out Right strip is (750,0,250,800); its cross is centred at (875,400)
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    let target = drag.update(&l.container, Point::new(875.0 - 32.0, 400.0)).clone();
    assert_eq!(target.host, Some(host));
    assert_eq!(target.site, DropSite::PaneCentre);
    assert_eq!(target.address, addr(&[Centre]));
    drag.cancel(&mut l.container);
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_preview_for_pane_edge_is_half_the_pane() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    drag.update(&l.container, offset(-32.0, 0.0));
    assert_eq!(drag.preview(&l.container), Some(Rect::new(250.0, 0.0, 375.0, 800.0)));
}

#[test]
fn test_preview_for_centre_is_the_pane() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    drag.update(&l.container, CROSS);
    assert_eq!(drag.preview(&l.container), Some(Rect::new(250.0, 0.0, 750.0, 800.0)));
}

#[test]
fn test_preview_for_float_is_at_pointer() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    drag.update(&l.container, Point::new(900.0, 400.0));
    assert_eq!(drag.preview(&l.container), Some(Rect::new(900.0, 400.0, 400.0, 300.0)));
}

// ============================================================================
// Gesture lifecycle
// ============================================================================

#[test]
fn test_origin_host_is_locked_during_gesture() {
    let mut l = layout();
    let c = common::content(&mut l.container, "c");
    let drag = begin(&mut l.container, DragItem::Content(l.b));
    let main = l.container.main_host();

    assert_eq!(
        l.container.add(c, None, &addr(&[Right])).unwrap_err(),
        DockError::GestureInProgress(main)
    );
    assert!(DragResolver::begin(&mut l.container, DragItem::Content(l.a), DragMetrics::default()).is_err());

    drag.cancel(&mut l.container);
    assert!(l.container.add(c, None, &addr(&[Right])).is_ok());
}

#[test]
fn test_discarded_resolver_releases_lock() {
    let mut l = layout();
    let c = common::content(&mut l.container, "c");
    let drag = begin(&mut l.container, DragItem::Content(l.b));
    let copy = drag.clone();

    drop(drag);
    assert_eq!(l.container.locked_host(), Some(l.container.main_host()));

    drop(copy);
    assert_eq!(l.container.locked_host(), None);
    assert!(l.container.add(c, None, &addr(&[Right])).is_ok());
    assert!(DragResolver::begin(&mut l.container, DragItem::Content(l.a), DragMetrics::default()).is_ok());
}

#[test]
fn test_cancel_leaves_layout_untouched() {
    let mut l = layout();
    let before = l.container.pane_rects(l.container.main_host());
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    drag.update(&l.container, CROSS);
    drag.cancel(&mut l.container);

    assert_eq!(l.container.pane_rects(l.container.main_host()), before);
    assert_eq!(pane_content(&l.container, l.left), vec![l.b]);
    assert_eq!(l.container.locked_host(), None);
}

#[test]
fn test_pane_dropped_on_itself_is_unchanged() {
    let mut l = layout();
    let mut drag = begin(&mut l.container, DragItem::Pane(l.centre));
    drag.update(&l.container, CROSS);
    assert_eq!(drag.drop(&mut l.container).unwrap(), DropOutcome::Unchanged);
    assert_eq!(pane_content(&l.container, l.centre), vec![l.a]);
}

#[test]
fn test_dragging_whole_pane_moves_all_tabs() {
    let mut l = layout();
    let (c, _) = placed(&mut l.container, "c", &[Left]);
    let mut drag = begin(&mut l.container, DragItem::Pane(l.left));
    drag.update(&l.container, CROSS);
    drag.drop(&mut l.container).unwrap();

    assert_eq!(pane_content(&l.container, l.centre), vec![l.a, l.b, c]);
    assert_valid(&l.container);
}

#[test]
fn test_drop_restores_previous_active_content() {
    let mut l = layout();
    l.container.set_active_content(Some(l.a)).unwrap();
    let mut drag = begin(&mut l.container, DragItem::Content(l.b));
    drag.update(&l.container, Point::new(976.0, 400.0));
    drag.drop(&mut l.container).unwrap();
    assert_eq!(l.container.active_content(), Some(l.a));
}

#[test]
fn test_begin_requires_placed_content() {
    let mut l = layout();
    let c = common::content(&mut l.container, "c");
    let err = DragResolver::begin(&mut l.container, DragItem::Content(c), DragMetrics::default()).unwrap_err();
    assert_eq!(err, DockError::ContentNotPlaced(c));
}
