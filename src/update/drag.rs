//! Drag gesture handlers
//!
//! The resolver for the gesture in progress lives in `DockModel::drag`.

use crate::commands::Cmd;
use crate::drag::{DragResolver, DropOutcome};
use crate::error::{DockError, DockResult};
use crate::messages::DragMsg;
use crate::model::DockModel;

pub fn update_drag(model: &mut DockModel, msg: DragMsg) -> DockResult<Option<Cmd>> {
    match msg {
        DragMsg::Begin(item) => {
            if let Some(resolver) = &model.drag {
                return Err(DockError::GestureInProgress(resolver.origin()));
            }
            let resolver = DragResolver::begin(&mut model.container, item, model.config.drag)?;
            model.drag = Some(resolver);
            Ok(None)
        }

        DragMsg::Move(pointer) => {
            let resolver = model.drag.as_mut().ok_or(DockError::NoGesture)?;
            resolver.update(&model.container, pointer);
            let preview = resolver.preview(&model.container);
            Ok(Some(Cmd::DropPreview(preview)))
        }

        DragMsg::Drop => {
            let resolver = model.drag.take().ok_or(DockError::NoGesture)?;
            let outcome = resolver.drop(&mut model.container)?;
            let cmd = match outcome {
                DropOutcome::Unchanged => Cmd::DropPreview(None),
                _ => Cmd::batch(vec![Cmd::DropPreview(None), Cmd::Redraw]),
            };
            Ok(Some(cmd))
        }

        DragMsg::Cancel => {
            let resolver = model.drag.take().ok_or(DockError::NoGesture)?;
            resolver.cancel(&mut model.container);
            Ok(Some(Cmd::DropPreview(None)))
        }
    }
}
