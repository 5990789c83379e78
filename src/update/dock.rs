//! Dock message handlers (placement, toggles, activation, geometry)

use crate::commands::Cmd;
use crate::error::{DockError, DockResult};
use crate::messages::DockMsg;
use crate::model::DockModel;

/// Handle layout messages against the model's container
pub fn update_dock(model: &mut DockModel, msg: DockMsg) -> DockResult<Option<Cmd>> {
    let container = &mut model.container;
    match msg {
        DockMsg::Add {
            content,
            index,
            address,
        } => {
            container.add(content, index, &address)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::AddTo {
            host,
            content,
            index,
            address,
        } => {
            container.add_to(host, content, index, &address)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::Remove(content) => {
            let removed = container.remove(content)?;
            tracing::debug!(name = %removed.persist_name, "content removed");
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::Detach(content) => {
            container.detach(content)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::FindAndShow(content) => {
            container.find_and_show(content)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::Dock(content) => {
            container.dock(content)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::Float(content) => {
            container.float(content)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::AutoHide { content, site } => {
            container.auto_hide(content, site)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::PopOut { site, popped_out } => {
            container.set_popped_out(site, popped_out)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::ActivateContent(content) => {
            let before = container.active_content();
            container.set_active_content(content)?;
            Ok(redraw_if(container.active_content() != before))
        }

        DockMsg::ActivatePane { host, pane } => {
            let before = container.active_pane(host);
            container.set_active_pane(host, pane)?;
            Ok(redraw_if(container.active_pane(host) != before))
        }

        DockMsg::ActivatePrevious(host) => {
            let switched = container.activate_previous(host)?;
            Ok(redraw_if(switched))
        }

        DockMsg::SetVisibleContent(content) => {
            let changed = container.set_visible_content(content)?;
            Ok(redraw_if(changed))
        }

        DockMsg::MoveFloating { id, bounds } => {
            container.set_floating_bounds(id, bounds)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::ShowFloating { id, visible } => {
            container.set_floating_visible(id, visible)?;
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::PurgeFloatingWindows => {
            let purged = container.purge_floating_windows();
            Ok(redraw_if(!purged.is_empty()))
        }

        DockMsg::Resize(bounds) => {
            container.set_bounds(bounds);
            Ok(Some(Cmd::Redraw))
        }

        DockMsg::ResizeEdge {
            host,
            branch,
            site,
            pixels,
        } => {
            let available = container
                .branch_bounds(host, &branch)
                .ok_or_else(|| DockError::InvalidAddress {
                    address: branch.clone(),
                    reason: "address does not resolve to a branch",
                })?;
            container.resize_edge(host, &branch, site, pixels, available)?;
            Ok(Some(Cmd::Redraw))
        }
    }
}

fn redraw_if(changed: bool) -> Option<Cmd> {
    changed.then_some(Cmd::Redraw)
}
