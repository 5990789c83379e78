//! Dock container - content registry, tree hosts and placement operations
//!
//! The container owns the tree arena and every host built on it: the main
//! window, floating windows and the four auto-hide panels. All placement
//! goes through here so that pruning, remembered addresses, active-state
//! sync and event emission happen in one place.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use super::active::FocusHandler;
use super::content::{Content, ContentId, ContentSpec, DockLocation, HostRef, RememberedPlacement};
use super::host::{auto_hide_strip, FloatingId, HostId, HostKind, TreeHost};
use super::rect::{Rect, Size};
use super::sizes::DockSizeData;
use super::site::{DockAddress, DockSite};
use super::tree::{DockPane, DockTree, InvariantCode, InvariantReport, PaneId, Slot};
use crate::config::DockConfig;
use crate::error::{DockError, DockResult};
use crate::events::{DockEvent, MoveKind};

/// Where a content item was before it was detached
#[derive(Debug, Clone, Copy)]
pub(crate) struct Detached {
    pub host: Option<HostId>,
}

/// Lock taken by a drag gesture. It lapses once every handle to `token`
/// has been dropped.
#[derive(Debug, Clone)]
struct GestureLock {
    host: HostId,
    token: Weak<()>,
}

pub struct DockContainer {
    pub(crate) tree: DockTree,
    pub(crate) contents: BTreeMap<ContentId, Content>,
    pub(crate) hosts: BTreeMap<HostId, TreeHost>,
    main_host: HostId,
    auto_hide_hosts: HashMap<DockSite, HostId>,
    pub(crate) active_host: Option<HostId>,
    pub(crate) events: Vec<DockEvent>,
    pub(crate) focus: Option<Box<dyn FocusHandler>>,
    /// Host locked by an in-progress drag gesture
    gesture: Option<GestureLock>,
    centre_min: Size,
    floating_size: Size,
    auto_hide_size: f32,
    next_content_id: u64,
    next_host_id: u64,
    next_floating_id: u32,
}

impl fmt::Debug for DockContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockContainer")
            .field("contents", &self.contents.len())
            .field("hosts", &self.hosts.len())
            .field("panes", &self.tree.pane_count())
            .field("branches", &self.tree.branch_count())
            .field("active_host", &self.active_host)
            .field("gesture_host", &self.locked_host())
            .finish()
    }
}

impl Default for DockContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl DockContainer {
    pub fn new() -> Self {
        Self::with_config(&DockConfig::default())
    }

    /// Create a container with a main host and four auto-hide panels
    pub fn with_config(config: &DockConfig) -> Self {
        let mut tree = DockTree::new();
        tree.set_max_address_depth(config.max_address_depth);

        let mut container = Self {
            tree,
            contents: BTreeMap::new(),
            hosts: BTreeMap::new(),
            main_host: HostId(1),
            auto_hide_hosts: HashMap::new(),
            active_host: None,
            events: Vec::new(),
            focus: None,
            gesture: None,
            centre_min: config.centre_min(),
            floating_size: config.floating_size,
            auto_hide_size: config.auto_hide_size,
            next_content_id: 1,
            next_host_id: 1,
            next_floating_id: 1,
        };

        container.main_host = container.create_host(HostKind::Main);
        for site in DockSite::EDGES {
            let id = container.create_host(HostKind::AutoHide(site));
            container.auto_hide_hosts.insert(site, id);
        }
        container
    }

    fn create_host(&mut self, kind: HostKind) -> HostId {
        let id = HostId(self.next_host_id);
        self.next_host_id += 1;
        let root = self.tree.new_root(id, DockSizeData::default());
        self.hosts.insert(id, TreeHost::new(id, kind, root));
        id
    }

    pub fn set_focus_handler(&mut self, handler: Box<dyn FocusHandler>) {
        self.focus = Some(handler);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn main_host(&self) -> HostId {
        self.main_host
    }

    pub fn auto_hide_host(&self, site: DockSite) -> Option<HostId> {
        self.auto_hide_hosts.get(&site).copied()
    }

    pub fn host(&self, id: HostId) -> Option<&TreeHost> {
        self.hosts.get(&id)
    }

    pub(crate) fn host_mut(&mut self, id: HostId) -> DockResult<&mut TreeHost> {
        self.hosts.get_mut(&id).ok_or(DockError::UnknownHost(id))
    }

    pub fn hosts(&self) -> impl Iterator<Item = &TreeHost> + '_ {
        self.hosts.values()
    }

    pub fn floating_hosts(&self) -> impl Iterator<Item = &TreeHost> + '_ {
        self.hosts.values().filter(|h| h.kind.is_floating())
    }

    pub fn host_for_floating(&self, id: FloatingId) -> Option<HostId> {
        self.floating_hosts()
            .find(|h| h.floating_id() == Some(id))
            .map(|h| h.id)
    }

    /// Host that owns the tree holding `pane`
    pub fn host_of_pane(&self, pane: PaneId) -> Option<HostId> {
        self.tree
            .host_of_pane(pane)
            .filter(|host| self.hosts.contains_key(host))
    }

    pub fn host_of_content(&self, content: ContentId) -> Option<HostId> {
        self.host_of_pane(self.contents.get(&content)?.pane?)
    }

    pub fn content(&self, id: ContentId) -> Option<&Content> {
        self.contents.get(&id)
    }

    /// Registered content, in registration order
    pub fn contents(&self) -> impl Iterator<Item = &Content> + '_ {
        self.contents.values()
    }

    pub fn find_by_name(&self, persist_name: &str) -> Option<ContentId> {
        self.contents
            .values()
            .find(|c| c.persist_name == persist_name)
            .map(|c| c.id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&DockPane> {
        self.tree.pane(id)
    }

    pub fn centre_min(&self) -> Size {
        self.centre_min
    }

    pub fn floating_size(&self) -> Size {
        self.floating_size
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register a content item. Persist names must be unique.
    pub fn register(&mut self, spec: ContentSpec) -> DockResult<ContentId> {
        if self.find_by_name(&spec.persist_name).is_some() {
            tracing::warn!(name = %spec.persist_name, "rejected duplicate persist name");
            return Err(DockError::DuplicatePersistName(spec.persist_name));
        }
        let id = ContentId(self.next_content_id);
        self.next_content_id += 1;
        self.contents.insert(id, Content::new(id, spec));
        Ok(id)
    }

    /// Detach and unregister `content`, handing it back to the caller
    pub fn remove(&mut self, content: ContentId) -> DockResult<Content> {
        self.detach(content)?;
        self.contents
            .remove(&content)
            .ok_or(DockError::UnknownContent(content))
    }

    /// Take `content` out of its pane, keeping it registered
    pub fn detach(&mut self, content: ContentId) -> DockResult<()> {
        let c = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?;
        let Some(pane) = c.pane else {
            return Ok(());
        };
        if let Some(host) = self.host_of_pane(pane) {
            self.ensure_unlocked(host)?;
        }
        let detached = self.detach_inner(content);
        self.finish_mutation(&[detached.host]);
        Ok(())
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Place `content` in the main container at `address`
    pub fn add(
        &mut self,
        content: ContentId,
        index: Option<usize>,
        address: &DockAddress,
    ) -> DockResult<PaneId> {
        self.add_to(self.main_host, content, index, address)
    }

    /// Place `content` in `host` at `address`, inserting it at `index`
    /// (clamped; `None` appends) and making it the pane's visible item.
    ///
    /// Content already placed elsewhere is detached first. Addresses aimed
    /// at an auto-hide panel always resolve to its Centre pane.
    pub fn add_to(
        &mut self,
        host: HostId,
        content: ContentId,
        index: Option<usize>,
        address: &DockAddress,
    ) -> DockResult<PaneId> {
        self.ensure_unlocked(host)?;
        if let Some(current) = self.host_of_content(content) {
            self.ensure_unlocked(current)?;
        }
        self.place(host, content, index, address)
    }

    /// Placement without the gesture lock check
    pub(crate) fn place(
        &mut self,
        host: HostId,
        content: ContentId,
        index: Option<usize>,
        address: &DockAddress,
    ) -> DockResult<PaneId> {
        let address = self.resolve_address(host, address)?;
        let root = self.hosts.get(&host).ok_or(DockError::UnknownHost(host))?.root;
        if !self.contents.contains_key(&content) {
            tracing::warn!(?content, "rejected placement of unregistered content");
            return Err(DockError::UnknownContent(content));
        }

        // Detach without pruning so an identical re-add lands on the same pane
        let detached = self.detach_inner(content);
        let pane = match self.tree.grow(root, &address) {
            Ok(pane) => pane,
            Err(e) => {
                self.finish_mutation(&[detached.host]);
                return Err(e);
            }
        };
        self.insert_into(pane, content, index)?;

        self.reveal_floating(host);
        self.finish_mutation(&[Some(host), detached.host]);
        self.remember_placement(content);
        Ok(pane)
    }

    /// Move `content` into an existing pane without pruning. Callers run
    /// `finish_mutation` once all moves are done.
    pub(crate) fn move_to_pane(
        &mut self,
        content: ContentId,
        pane: PaneId,
        index: Option<usize>,
    ) -> DockResult<Option<HostId>> {
        if !self.tree.contains_pane(pane) {
            return Err(DockError::UnknownPane(pane));
        }
        let detached = self.detach_inner(content);
        self.insert_into(pane, content, index)?;
        Ok(detached.host)
    }

    fn insert_into(&mut self, pane: PaneId, content: ContentId, index: Option<usize>) -> DockResult<usize> {
        let index = self.tree.insert_content(pane, content, index)?;
        let floating = self
            .host_of_pane(pane)
            .and_then(|h| self.hosts.get(&h))
            .and_then(|h| h.floating_id());
        if let Some(c) = self.contents.get_mut(&content) {
            c.pane = Some(pane);
            if floating.is_some() {
                c.last_floating = floating;
            }
        }
        self.events.push(DockEvent::ContentMoved {
            kind: MoveKind::Added,
            content,
            pane,
        });
        Ok(index)
    }

    /// Remove `content` from its pane (no pruning). Its placement is
    /// remembered for the tree it leaves.
    pub(crate) fn detach_inner(&mut self, content: ContentId) -> Detached {
        let Some(pane) = self.contents.get(&content).and_then(|c| c.pane) else {
            return Detached { host: None };
        };
        let host = self.host_of_pane(pane);
        let root = self.tree.root_of_pane(pane);
        let address = self.tree.address_of_pane(pane);
        let index = self.tree.remove_content(pane, content);

        if let Some(c) = self.contents.get_mut(&content) {
            c.pane = None;
            if let (Some(root), Some(address), Some(index)) = (root, address, index) {
                c.remembered.insert(root, RememberedPlacement { address, index });
            }
        }
        self.events.push(DockEvent::ContentMoved {
            kind: MoveKind::Removed,
            content,
            pane,
        });
        Detached { host }
    }

    /// Show `host` if it is a hidden floating window
    pub(crate) fn reveal_floating(&mut self, host: HostId) {
        if let Some(h) = self.hosts.get_mut(&host) {
            if h.kind.is_floating() && !h.visible {
                h.visible = true;
                if let Some(id) = h.floating_id() {
                    self.events.push(DockEvent::FloatingWindowChanged { id, visible: true });
                }
            }
        }
    }

    /// Record where `content` now lives, keyed by its tree's root
    pub(crate) fn remember_placement(&mut self, content: ContentId) {
        let Some(pane) = self.contents.get(&content).and_then(|c| c.pane) else {
            return;
        };
        let root = self.tree.root_of_pane(pane);
        let address = self.tree.address_of_pane(pane);
        let index = self.tree.pane(pane).and_then(|p| p.index_of(content));
        if let (Some(root), Some(address), Some(index), Some(c)) =
            (root, address, index, self.contents.get_mut(&content))
        {
            c.remembered.insert(root, RememberedPlacement { address, index });
        }
    }

    /// Validate an address for placement in `host`
    fn resolve_address(&self, host: HostId, address: &DockAddress) -> DockResult<DockAddress> {
        let h = self.hosts.get(&host).ok_or(DockError::UnknownHost(host))?;
        if h.kind.is_auto_hide() {
            return Ok(DockAddress::from([DockSite::Centre]));
        }
        if address.sites().contains(&DockSite::None) {
            tracing::warn!(%address, "rejected address containing DockSite::None");
            return Err(DockError::InvalidAddress {
                address: address.clone(),
                reason: "placement addresses cannot contain DockSite::None",
            });
        }
        let max = self.tree.max_address_depth();
        if address.len() > max {
            tracing::warn!(%address, max, "rejected over-deep address");
            return Err(DockError::AddressTooDeep {
                address: address.clone(),
                depth: address.len(),
                max,
            });
        }
        Ok(address.clone())
    }

    /// Prune the touched hosts, hide emptied floating windows, resync the
    /// active state and check invariants
    pub(crate) fn finish_mutation(&mut self, touched: &[Option<HostId>]) {
        let mut seen: Vec<HostId> = Vec::new();
        for host in touched.iter().flatten() {
            if seen.contains(host) {
                continue;
            }
            seen.push(*host);
            if let Some(root) = self.hosts.get(host).map(|h| h.root) {
                let report = self.tree.prune(root);
                if !report.is_empty() {
                    tracing::debug!(?host, ?report, "pruned tree");
                }
                self.events.push(DockEvent::TreeChanged { host: *host });
            }
        }

        self.hide_empty_floating_windows();
        self.sync_all_active();
        self.tree.assert_invariants();
        #[cfg(debug_assertions)]
        {
            let report = self.validate();
            debug_assert!(report.is_clean(), "dock container invariants violated:\n{}", report);
        }
    }

    pub(crate) fn hide_empty_floating_windows(&mut self) {
        let empty: Vec<HostId> = self
            .floating_hosts()
            .filter(|h| h.visible && self.tree.is_tree_empty(h.root))
            .map(|h| h.id)
            .collect();
        for id in empty {
            if let Some(h) = self.hosts.get_mut(&id) {
                h.visible = false;
                if let Some(fid) = h.floating_id() {
                    self.events.push(DockEvent::FloatingWindowChanged { id: fid, visible: false });
                }
            }
        }
    }

    pub(crate) fn ensure_unlocked(&self, host: HostId) -> DockResult<()> {
        if self.locked_host() == Some(host) {
            tracing::warn!(?host, "rejected mutation during drag gesture");
            return Err(DockError::GestureInProgress(host));
        }
        Ok(())
    }

    /// Lock `host` for a gesture. The lock holds while the returned handle
    /// (or a clone of it) is alive, or until `unlock_host`.
    pub(crate) fn lock_host(&mut self, host: HostId) -> Rc<()> {
        let token = Rc::new(());
        self.gesture = Some(GestureLock {
            host,
            token: Rc::downgrade(&token),
        });
        token
    }

    pub(crate) fn unlock_host(&mut self) {
        self.gesture = None;
    }

    pub fn locked_host(&self) -> Option<HostId> {
        self.gesture
            .as_ref()
            .filter(|lock| lock.token.strong_count() > 0)
            .map(|lock| lock.host)
    }

    // =========================================================================
    // Dock / float / auto-hide
    // =========================================================================

    /// Return `content` to the main container, at its remembered location
    /// or else its default location
    pub fn dock(&mut self, content: ContentId) -> DockResult<PaneId> {
        let c = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?;
        let main_root = self.hosts.get(&self.main_host).map(|h| h.root);
        let (address, index) = match main_root.and_then(|root| c.remembered_in(root)) {
            Some(placement) => (placement.address.clone(), Some(placement.index)),
            None if c.default_location.host == HostRef::Main && !c.default_location.is_detached() => {
                (c.default_location.address.clone(), c.default_location.index)
            }
            None => (DockAddress::from([DockSite::Centre]), None),
        };
        self.add_to(self.main_host, content, index, &address)
    }

    /// Move `content` into the floating window it last occupied, or a new one
    pub fn float(&mut self, content: ContentId) -> DockResult<FloatingId> {
        let last_floating = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?
            .last_floating;

        if let Some(current) = self.host_of_content(content) {
            if let Some(id) = self.hosts.get(&current).and_then(|h| h.floating_id()) {
                return Ok(id);
            }
        }

        let reuse = last_floating.and_then(|id| self.host_for_floating(id));
        let host = match reuse {
            Some(host) => host,
            None => {
                let main = self.host_bounds(self.main_host).unwrap_or_default();
                let bounds = Rect::centred_at(main.centre(), self.floating_size);
                self.create_floating(bounds)
            }
        };

        let root = self.hosts.get(&host).ok_or(DockError::UnknownHost(host))?.root;
        let remembered = self.contents.get(&content).and_then(|c| c.remembered_in(root));
        let (address, index) = match remembered {
            Some(placement) => (placement.address.clone(), Some(placement.index)),
            None => (DockAddress::from([DockSite::Centre]), None),
        };
        self.add_to(host, content, index, &address)?;
        self.hosts
            .get(&host)
            .and_then(|h| h.floating_id())
            .ok_or(DockError::UnknownHost(host))
    }

    /// Move `content` into the auto-hide panel on `site`
    pub fn auto_hide(&mut self, content: ContentId, site: DockSite) -> DockResult<PaneId> {
        let host = self.auto_hide_host(site).ok_or(DockError::InvalidAddress {
            address: DockAddress::from([site]),
            reason: "auto-hide panels exist only on edge sites",
        })?;
        let index = self.hosts.get(&host).and_then(|h| {
            self.contents
                .get(&content)
                .and_then(|c| c.remembered_in(h.root))
                .map(|p| p.index)
        });
        self.add_to(host, content, index, &DockAddress::from([DockSite::Centre]))
    }

    /// Place `content` if it is not placed, bring its host forward and make
    /// it the active content
    pub fn find_and_show(&mut self, content: ContentId) -> DockResult<PaneId> {
        let c = self
            .contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))?;

        if c.pane.is_none() {
            let location = c.default_location.clone();
            let host = match location.host {
                HostRef::Main => self.main_host,
                HostRef::Floating(id) => match self.host_for_floating(id) {
                    Some(host) => host,
                    None => {
                        let main = self.host_bounds(self.main_host).unwrap_or_default();
                        let bounds = Rect::centred_at(main.centre(), self.floating_size);
                        self.get_or_create_floating(id, bounds)
                    }
                },
                HostRef::AutoHide(site) => self.auto_hide_host(site).unwrap_or(self.main_host),
            };
            let address = if location.is_detached() {
                DockAddress::from([DockSite::Centre])
            } else {
                location.address.clone()
            };
            self.add_to(host, content, location.index, &address)?;
        }

        let pane = self
            .contents
            .get(&content)
            .and_then(|c| c.pane)
            .ok_or(DockError::ContentNotPlaced(content))?;
        if let Some(h) = self.host_of_pane(pane).and_then(|host| self.hosts.get_mut(&host)) {
            match h.kind {
                HostKind::Main => {}
                HostKind::Floating(id) => {
                    if !h.visible {
                        h.visible = true;
                        self.events.push(DockEvent::FloatingWindowChanged { id, visible: true });
                    }
                }
                HostKind::AutoHide(_) => h.popped_out = true,
            }
        }
        self.set_active_content(Some(content))?;
        Ok(pane)
    }

    pub fn set_popped_out(&mut self, site: DockSite, popped_out: bool) -> DockResult<()> {
        let host = self.auto_hide_host(site).ok_or(DockError::InvalidAddress {
            address: DockAddress::from([site]),
            reason: "auto-hide panels exist only on edge sites",
        })?;
        self.host_mut(host)?.popped_out = popped_out;
        Ok(())
    }

    // =========================================================================
    // Floating windows
    // =========================================================================

    /// Create an empty floating window with the next free id
    pub fn create_floating(&mut self, bounds: Rect) -> HostId {
        let id = FloatingId(self.next_floating_id);
        self.get_or_create_floating(id, bounds)
    }

    /// Floating window with `id`, created with `bounds` if it does not exist
    pub fn get_or_create_floating(&mut self, id: FloatingId, bounds: Rect) -> HostId {
        if let Some(host) = self.host_for_floating(id) {
            return host;
        }
        self.next_floating_id = self.next_floating_id.max(id.0.saturating_add(1));
        let host = self.create_host(HostKind::Floating(id));
        if let Some(h) = self.hosts.get_mut(&host) {
            h.bounds = bounds;
        }
        tracing::debug!(?id, ?host, "created floating window");
        self.events.push(DockEvent::FloatingWindowChanged { id, visible: true });
        host
    }

    pub fn set_floating_bounds(&mut self, id: FloatingId, bounds: Rect) -> DockResult<()> {
        let host = self
            .host_for_floating(id)
            .ok_or(DockError::UnknownFloating(id))?;
        self.host_mut(host)?.bounds = bounds;
        Ok(())
    }

    pub fn set_floating_visible(&mut self, id: FloatingId, visible: bool) -> DockResult<()> {
        let host = self
            .host_for_floating(id)
            .ok_or(DockError::UnknownFloating(id))?;
        let h = self.hosts.get_mut(&host).ok_or(DockError::UnknownHost(host))?;
        if h.visible != visible {
            h.visible = visible;
            self.events.push(DockEvent::FloatingWindowChanged { id, visible });
        }
        Ok(())
    }

    /// Destroy floating windows whose trees hold no content
    pub fn purge_floating_windows(&mut self) -> Vec<FloatingId> {
        let empty: Vec<(HostId, FloatingId)> = self
            .floating_hosts()
            .filter(|h| self.tree.is_tree_empty(h.root))
            .filter_map(|h| h.floating_id().map(|id| (h.id, id)))
            .collect();

        let mut purged = Vec::new();
        for (host, id) in empty {
            let Some(h) = self.hosts.remove(&host) else {
                continue;
            };
            self.tree.remove_tree(h.root);
            if self.active_host == Some(host) {
                self.active_host = None;
            }
            self.events.push(DockEvent::FloatingWindowChanged { id, visible: false });
            tracing::debug!(?id, "purged floating window");
            purged.push(id);
        }
        if !purged.is_empty() {
            self.sync_all_active();
        }
        purged
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Set the bounds of the main window
    pub fn set_bounds(&mut self, bounds: Rect) {
        if let Some(h) = self.hosts.get_mut(&self.main_host) {
            h.bounds = bounds;
        }
    }

    /// Screen bounds of a host. Auto-hide panels have empty bounds unless
    /// popped out.
    pub fn host_bounds(&self, host: HostId) -> Option<Rect> {
        let h = self.hosts.get(&host)?;
        match h.kind {
            HostKind::Main | HostKind::Floating(_) => Some(h.bounds),
            HostKind::AutoHide(site) => {
                let main = self.hosts.get(&self.main_host)?.bounds;
                if h.popped_out {
                    Some(auto_hide_strip(main, site, self.auto_hide_size))
                } else {
                    Some(Rect::new(main.x, main.y, 0.0, 0.0))
                }
            }
        }
    }

    /// Bounds of every pane in `host`
    pub fn pane_rects(&self, host: HostId) -> Vec<(PaneId, Rect)> {
        let (Some(h), Some(bounds)) = (self.hosts.get(&host), self.host_bounds(host)) else {
            return Vec::new();
        };
        self.tree.pane_rects(h.root, bounds, Some(self.centre_min))
    }

    pub fn pane_bounds(&self, pane: PaneId) -> Option<Rect> {
        let host = self.host_of_pane(pane)?;
        self.pane_rects(host)
            .into_iter()
            .find(|(id, _)| *id == pane)
            .map(|(_, rect)| rect)
    }

    /// Bounds of the branch at `address` in `host`
    pub fn branch_bounds(&self, host: HostId, address: &DockAddress) -> Option<Rect> {
        let h = self.hosts.get(&host)?;
        let branch = self.tree.descendant_at(h.root, address)?.as_branch()?;
        self.tree
            .branch_rects(h.root, self.host_bounds(host)?, Some(self.centre_min))
            .into_iter()
            .find(|(id, _)| *id == branch)
            .map(|(_, rect)| rect)
    }

    /// Store a new thickness for the `site` edge of the branch at
    /// `branch_address`, keeping the edge's unit
    pub fn resize_edge(
        &mut self,
        host: HostId,
        branch_address: &DockAddress,
        site: DockSite,
        pixels: f32,
        available: Rect,
    ) -> DockResult<()> {
        self.ensure_unlocked(host)?;
        if !site.is_edge() {
            return Err(DockError::InvalidAddress {
                address: branch_address.child(site),
                reason: "only edge sites can be resized",
            });
        }
        let root = self.hosts.get(&host).ok_or(DockError::UnknownHost(host))?.root;
        let branch = self
            .tree
            .descendant_at(root, branch_address)
            .and_then(|slot| slot.as_branch())
            .ok_or_else(|| DockError::InvalidAddress {
                address: branch_address.clone(),
                reason: "address does not resolve to a branch",
            })?;
        if let Some(b) = self.tree.branch_mut(branch) {
            b.sizes.set_pixels(site, pixels, available);
        }
        self.events.push(DockEvent::TreeChanged { host });
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Pane that `address` resolves to in the main container
    pub fn get_pane(&self, address: &DockAddress) -> Option<PaneId> {
        self.get_pane_in(self.main_host, address)
    }

    pub fn get_pane_in(&self, host: HostId, address: &DockAddress) -> Option<PaneId> {
        let root = self.hosts.get(&host)?.root;
        self.tree.pane_at(root, address)
    }

    /// Edge sizes of the branch at `address` in the main container
    pub fn get_dock_sizes(&self, address: &DockAddress) -> Option<DockSizeData> {
        self.get_dock_sizes_in(self.main_host, address)
    }

    pub fn get_dock_sizes_in(&self, host: HostId, address: &DockAddress) -> Option<DockSizeData> {
        let root = self.hosts.get(&host)?.root;
        self.tree.dock_sizes(root, address).copied()
    }

    /// Every pane of every host, host by host
    pub fn all_panes(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.hosts
            .values()
            .flat_map(move |h| self.tree.panes_under(h.root))
    }

    /// Every placed content item, in pane order
    pub fn all_content(&self) -> impl Iterator<Item = ContentId> + '_ {
        self.all_panes()
            .filter_map(move |p| self.tree.pane(p))
            .flat_map(|p| p.content.iter().copied())
    }

    /// Every content item placed in `host`
    pub fn all_content_in(&self, host: HostId) -> impl Iterator<Item = ContentId> + '_ {
        self.hosts
            .get(&host)
            .into_iter()
            .flat_map(move |h| self.tree.panes_under(h.root))
            .filter_map(move |p| self.tree.pane(p))
            .flat_map(|p| p.content.iter().copied())
    }

    pub fn pane_address(&self, pane: PaneId) -> Option<DockAddress> {
        self.tree.address_of_pane(pane)
    }

    /// Where `content` currently lives, or `None` if it is not placed
    pub fn content_location(&self, content: ContentId) -> Option<DockLocation> {
        let pane = self.contents.get(&content)?.pane?;
        let host = self.hosts.get(&self.host_of_pane(pane)?)?;
        let index = self.tree.pane(pane)?.index_of(content)?;
        Some(
            DockLocation::main(self.tree.address_of_pane(pane)?)
                .with_index(index)
                .with_host(host.kind.host_ref()),
        )
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Tree invariants plus agreement between content handles and panes
    pub fn validate(&self) -> InvariantReport {
        let mut report = self.tree.validate_pruned();

        for c in self.contents.values() {
            if let Some(pane) = c.pane {
                if !self.tree.pane(pane).is_some_and(|p| p.contains(c.id)) {
                    report.push(
                        InvariantCode::ContentMismatch,
                        format!("content {:?} claims pane {:?} which does not hold it", c.id, pane),
                    );
                }
            }
        }
        for pane in self.all_panes() {
            let Some(p) = self.tree.pane(pane) else {
                continue;
            };
            for content in &p.content {
                if self.contents.get(content).and_then(|c| c.pane) != Some(pane) {
                    report.push(
                        InvariantCode::ContentMismatch,
                        format!("pane {:?} holds {:?} which does not point back", pane, content),
                    );
                }
            }
        }
        for h in self.hosts.values() {
            if self.tree.branch(h.root).and_then(|b| b.owner) != Some(h.id) {
                report.push(
                    InvariantCode::RootWithoutOwner,
                    format!("host {:?} root {:?} is not owned by it", h.id, h.root),
                );
            }
            if h.kind.is_auto_hide() {
                let root = self.tree.branch(h.root);
                let single_centre = root.is_some_and(|b| {
                    b.occupant_count() == 1 && matches!(b.slot(DockSite::Centre), Slot::Pane(_))
                });
                if !single_centre {
                    report.push(
                        InvariantCode::NotMinimal,
                        format!("auto-hide host {:?} has more than a Centre pane", h.id),
                    );
                }
            }
        }
        report
    }
}
