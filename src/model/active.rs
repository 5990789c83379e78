//! Active pane / active content tracking
//!
//! Every host tracks one active pane, and its active content is always that
//! pane's visible item. The container additionally remembers which host was
//! activated last; that host's active content is the global active content.

use super::container::DockContainer;
use super::content::ContentId;
use super::host::HostId;
use super::tree::PaneId;
use crate::error::{DockError, DockResult};
use crate::events::DockEvent;

/// Keyboard focus bookkeeping supplied by the application.
///
/// When a pane is deactivated the container asks for an opaque token
/// describing where focus was inside its visible content, and hands it back
/// when that content's pane is activated again.
pub trait FocusHandler {
    fn save_focus(&mut self, content: ContentId) -> Option<String>;
    fn restore_focus(&mut self, content: ContentId, memory: Option<&str>);
}

impl DockContainer {
    /// Host that was activated last
    pub fn active_host(&self) -> Option<HostId> {
        self.active_host
    }

    pub fn active_pane(&self, host: HostId) -> Option<PaneId> {
        self.hosts.get(&host)?.active_pane
    }

    pub fn previous_pane(&self, host: HostId) -> Option<PaneId> {
        self.hosts.get(&host)?.previous_pane
    }

    /// Active content of the last activated host
    pub fn active_content(&self) -> Option<ContentId> {
        self.hosts.get(&self.active_host?)?.active_content
    }

    pub fn active_content_in(&self, host: HostId) -> Option<ContentId> {
        self.hosts.get(&host)?.active_content
    }

    /// Make `pane` the active pane of `host` (`None` clears it)
    pub fn set_active_pane(&mut self, host: HostId, pane: Option<PaneId>) -> DockResult<()> {
        let current = self
            .hosts
            .get(&host)
            .ok_or(DockError::UnknownHost(host))?
            .active_pane;
        if let Some(p) = pane {
            if !self.tree.contains_pane(p) {
                return Err(DockError::UnknownPane(p));
            }
            if self.host_of_pane(p) != Some(host) {
                return Err(DockError::PaneNotInHost { pane: p, host });
            }
            self.active_host = Some(host);
        }
        if current == pane {
            return Ok(());
        }
        self.switch_active_pane(host, pane);
        Ok(())
    }

    fn switch_active_pane(&mut self, host: HostId, pane: Option<PaneId>) {
        let new_content = pane.and_then(|p| self.tree.pane(p)).and_then(|p| p.visible);
        let Some(h) = self.hosts.get_mut(&host) else {
            return;
        };
        let old_pane = h.active_pane;
        let old_content = h.active_content;
        if old_pane.is_some() {
            h.previous_pane = old_pane;
        }
        h.active_pane = pane;
        h.active_content = new_content;

        if let Some(focus) = self.focus.as_mut() {
            if let Some(outgoing) = old_content {
                let memory = focus.save_focus(outgoing);
                if let Some(c) = self.contents.get_mut(&outgoing) {
                    c.focus_memory = memory;
                }
            }
            if let Some(incoming) = new_content {
                let memory = self
                    .contents
                    .get(&incoming)
                    .and_then(|c| c.focus_memory.as_deref());
                focus.restore_focus(incoming, memory);
            }
        }

        tracing::debug!(?host, ?old_pane, new_pane = ?pane, "active pane changed");
        self.events.push(DockEvent::ActivePaneChanged {
            host,
            old: old_pane,
            new: pane,
        });
        if old_content != new_content {
            self.events.push(DockEvent::ActiveContentChanged {
                host,
                old: old_content,
                new: new_content,
            });
        }
    }

    /// Make `content` visible in its pane and activate that pane.
    /// `None` clears the active pane of the active host.
    pub fn set_active_content(&mut self, content: Option<ContentId>) -> DockResult<()> {
        let Some(content) = content else {
            if let Some(host) = self.active_host {
                self.set_active_pane(host, None)?;
            }
            return Ok(());
        };

        let pane = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?
            .pane
            .ok_or(DockError::ContentNotPlaced(content))?;
        let host = self
            .host_of_pane(pane)
            .ok_or(DockError::ContentNotPlaced(content))?;

        self.set_visible_content(content)?;
        self.set_active_pane(host, Some(pane))
    }

    /// Make `content` the visible item of its pane. If that pane is its
    /// host's active pane, the host's active content follows.
    pub fn set_visible_content(&mut self, content: ContentId) -> DockResult<bool> {
        let pane = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?
            .pane
            .ok_or(DockError::ContentNotPlaced(content))?;

        let changed = self.tree.set_visible(pane, Some(content))?;
        if changed {
            if let Some(host) = self.host_of_pane(pane) {
                self.with_visible_guard(pane, |this| this.sync_active(host));
            }
        }
        Ok(changed)
    }

    /// Run `f` with `pane`'s visible-change guard held; nested visible
    /// changes on that pane are ignored until `f` returns
    pub(crate) fn with_visible_guard<R>(&mut self, pane: PaneId, f: impl FnOnce(&mut Self) -> R) -> R {
        let was_set = self.tree.set_visible_guard(pane, true);
        let result = f(self);
        self.tree.set_visible_guard(pane, was_set);
        result
    }

    /// Re-activate the pane that was active before the current one, if it
    /// still exists and is still attached to a live host
    pub fn activate_previous(&mut self, host: HostId) -> DockResult<bool> {
        let previous = self
            .hosts
            .get(&host)
            .ok_or(DockError::UnknownHost(host))?
            .previous_pane;
        let Some(pane) = previous else {
            return Ok(false);
        };
        let Some(owner) = self.host_of_pane(pane) else {
            tracing::debug!(?host, ?pane, "previous pane no longer attached");
            return Ok(false);
        };
        self.set_active_pane(owner, Some(pane))?;
        Ok(true)
    }

    /// Bring a host's published active state in line with its tree: a
    /// destroyed active pane is cleared and the active content follows the
    /// active pane's visible item
    pub(crate) fn sync_active(&mut self, host: HostId) {
        let Some(h) = self.hosts.get(&host) else {
            return;
        };
        let active_pane = h.active_pane;
        let attached = active_pane.filter(|p| self.host_of_pane(*p) == Some(host));
        if attached != active_pane {
            self.switch_active_pane(host, None);
            return;
        }

        let visible = attached.and_then(|p| self.tree.pane(p)).and_then(|p| p.visible);
        let Some(h) = self.hosts.get_mut(&host) else {
            return;
        };
        if h.active_content != visible {
            let old = std::mem::replace(&mut h.active_content, visible);
            self.events.push(DockEvent::ActiveContentChanged {
                host,
                old,
                new: visible,
            });
        }
    }

    pub(crate) fn sync_all_active(&mut self) {
        if self.active_host.is_some_and(|h| !self.hosts.contains_key(&h)) {
            self.active_host = None;
        }
        let hosts: Vec<HostId> = self.hosts.keys().copied().collect();
        for host in hosts {
            self.sync_active(host);
        }
    }
}
