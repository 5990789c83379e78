//! Update functions for the Elm-style architecture
//!
//! All layout changes driven by messages flow through these functions.

mod dock;
mod drag;

use crate::commands::Cmd;
use crate::error::DockResult;
use crate::messages::Msg;
use crate::model::DockModel;

#[cfg(debug_assertions)]
use crate::tracing::TreeSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use dock::update_dock;
pub use drag::update_drag;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut DockModel, msg: Msg) -> DockResult<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut DockModel, msg: Msg) -> DockResult<Option<Cmd>> {
    let result = match msg {
        Msg::Dock(m) => dock::update_dock(model, m),
        Msg::Drag(m) => drag::update_drag(model, m),
    };
    if let Err(e) = &result {
        tracing::warn!(error = %e, "message rejected");
    }
    result
}

/// Traced update wrapper (debug builds only)
///
/// Captures tree shape before and after and logs the diff. Pointer moves
/// during a drag are too frequent to log.
#[cfg(debug_assertions)]
fn update_traced(model: &mut DockModel, msg: Msg) -> DockResult<Option<Cmd>> {
    use crate::messages::DragMsg;

    let is_noisy = matches!(&msg, Msg::Drag(DragMsg::Move(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = TreeSnapshot::from_container(&model.container);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = TreeSnapshot::from_container(&model.container);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "tree", %diff, "state changed");
    }

    model.container.tree().assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Dock::Float(ContentId(3))`
/// - `Drag::Begin(Pane(PaneId(2)))`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Dock(m) => format!("Dock::{:?}", m),
        Msg::Drag(m) => format!("Drag::{:?}", m),
    }
}
