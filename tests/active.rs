//! Tests for active pane / active content tracking

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{placed, test_container};
use dockspace::error::DockError;
use dockspace::events::DockEvent;
use dockspace::model::{ContentId, DockSite, FocusHandler};

use DockSite::{Centre, Left, Right, Top};

#[test]
fn test_activate_content_sets_pane_and_host() {
    let mut container = test_container();
    let (a, pane) = placed(&mut container, "a", &[Left]);
    let main = container.main_host();
    container.drain_events();

    container.set_active_content(Some(a)).unwrap();
    assert_eq!(container.active_host(), Some(main));
    assert_eq!(container.active_pane(main), Some(pane));
    assert_eq!(container.active_content(), Some(a));

    let events = container.drain_events();
    assert_eq!(
        events,
        vec![
            DockEvent::ActivePaneChanged {
                host: main,
                old: None,
                new: Some(pane),
            },
            DockEvent::ActiveContentChanged {
                host: main,
                old: None,
                new: Some(a),
            },
        ]
    );
}

#[test]
fn test_activating_hidden_tab_makes_it_visible() {
    let mut container = test_container();
    let (a, pane) = placed(&mut container, "a", &[Centre]);
    placed(&mut container, "b", &[Centre]);

    container.set_active_content(Some(a)).unwrap();
    assert_eq!(container.pane(pane).unwrap().visible, Some(a));
}

#[test]
fn test_active_content_follows_visible_tab() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    let (b, _) = placed(&mut container, "b", &[Centre]);
    container.set_active_content(Some(a)).unwrap();

    assert!(container.set_visible_content(b).unwrap());
    assert_eq!(container.active_content(), Some(b));
    // Already visible
    assert!(!container.set_visible_content(b).unwrap());
}

#[test]
fn test_activate_previous_pane() {
    let mut container = test_container();
    let (a, pane_a) = placed(&mut container, "a", &[Left]);
    let (b, pane_b) = placed(&mut container, "b", &[Right]);
    let main = container.main_host();

    container.set_active_content(Some(a)).unwrap();
    container.set_active_content(Some(b)).unwrap();
    assert_eq!(container.previous_pane(main), Some(pane_a));

    assert!(container.activate_previous(main).unwrap());
    assert_eq!(container.active_pane(main), Some(pane_a));
    assert_eq!(container.previous_pane(main), Some(pane_b));
}

#[test]
fn test_activate_previous_skips_destroyed_pane() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Left]);
    let (b, _) = placed(&mut container, "b", &[Right]);
    let main = container.main_host();

    container.set_active_content(Some(a)).unwrap();
    container.set_active_content(Some(b)).unwrap();
    container.detach(a).unwrap();

    assert!(!container.activate_previous(main).unwrap());
    assert_eq!(container.active_content(), Some(b));
}

#[test]
fn test_destroyed_active_pane_clears_active_state() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Left]);
    let main = container.main_host();
    container.set_active_content(Some(a)).unwrap();

    container.detach(a).unwrap();
    assert_eq!(container.active_pane(main), None);
    assert_eq!(container.active_content(), None);
}

#[test]
fn test_removing_active_tab_activates_neighbour() {
    let mut container = test_container();
    let (a, pane) = placed(&mut container, "a", &[Centre]);
    let (b, _) = placed(&mut container, "b", &[Centre]);
    container.set_active_content(Some(a)).unwrap();

    container.detach(a).unwrap();
    assert_eq!(container.active_pane(container.main_host()), Some(pane));
    assert_eq!(container.active_content(), Some(b));
}

#[test]
fn test_wrapped_pane_stays_active() {
    let mut container = test_container();
    let (a, pane) = placed(&mut container, "a", &[Left]);
    container.set_active_content(Some(a)).unwrap();

    placed(&mut container, "b", &[Left, Top]);
    assert_eq!(container.active_pane(container.main_host()), Some(pane));
    assert_eq!(container.active_content(), Some(a));
}

#[test]
fn test_hosts_track_their_own_active_pane() {
    let mut container = test_container();
    let (a, pane_a) = placed(&mut container, "a", &[Centre]);
    let (b, _) = placed(&mut container, "b", &[Left]);
    container.float(b).unwrap();
    let floating = container.host_of_content(b).unwrap();
    let main = container.main_host();

    container.set_active_content(Some(a)).unwrap();
    container.set_active_content(Some(b)).unwrap();

    assert_eq!(container.active_host(), Some(floating));
    assert_eq!(container.active_content(), Some(b));
    // Main keeps its own active pane
    assert_eq!(container.active_pane(main), Some(pane_a));
    assert_eq!(container.active_content_in(main), Some(a));
}

#[test]
fn test_set_active_pane_rejects_foreign_pane() {
    let mut container = test_container();
    let (_, pane) = placed(&mut container, "a", &[Left]);
    let other = container.auto_hide_host(DockSite::Bottom).unwrap();

    let err = container.set_active_pane(other, Some(pane)).unwrap_err();
    assert_eq!(err, DockError::PaneNotInHost { pane, host: other });
}

#[test]
fn test_activate_unplaced_content_fails() {
    let mut container = test_container();
    let a = common::content(&mut container, "a");
    assert_eq!(
        container.set_active_content(Some(a)).unwrap_err(),
        DockError::ContentNotPlaced(a)
    );
}

#[test]
fn test_clear_active_content() {
    let mut container = test_container();
    let (a, _) = placed(&mut container, "a", &[Centre]);
    container.set_active_content(Some(a)).unwrap();
    container.set_active_content(None).unwrap();
    assert_eq!(container.active_content(), None);
    assert_eq!(container.active_pane(container.main_host()), None);
}

// ============================================================================
// Focus memory
// ============================================================================

#[derive(Default)]
struct FocusLog {
    saved: Vec<ContentId>,
    restored: Vec<(ContentId, Option<String>)>,
}

struct RecordingFocus(Rc<RefCell<FocusLog>>);

impl FocusHandler for RecordingFocus {
    fn save_focus(&mut self, content: ContentId) -> Option<String> {
        self.0.borrow_mut().saved.push(content);
        Some(format!("caret:{}", content.0))
    }

    fn restore_focus(&mut self, content: ContentId, memory: Option<&str>) {
        self.0
            .borrow_mut()
            .restored
            .push((content, memory.map(str::to_string)));
    }
}

#[test]
fn test_focus_memory_round_trip() {
    let log = Rc::new(RefCell::new(FocusLog::default()));
    let mut container = test_container();
    container.set_focus_handler(Box::new(RecordingFocus(log.clone())));
    let (a, _) = placed(&mut container, "a", &[Left]);
    let (b, _) = placed(&mut container, "b", &[Right]);

    container.set_active_content(Some(a)).unwrap();
    container.set_active_content(Some(b)).unwrap();
    container.set_active_content(Some(a)).unwrap();

    let log = log.borrow();
    assert_eq!(log.saved, vec![a, b]);
    assert_eq!(
        log.restored.last(),
        Some(&(a, Some(format!("caret:{}", a.0))))
    );
    assert_eq!(log.restored.first(), Some(&(a, None)));
}
