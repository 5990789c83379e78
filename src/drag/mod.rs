//! Drag-and-drop target resolution
//!
//! A `DragResolver` lives for one drag gesture. It locks the host the drag
//! started from, re-resolves the drop target on every pointer move and
//! applies the whole move atomically on drop. Cancelling leaves the layout
//! untouched.
//!
//! Resolution order per move (first match wins):
//! 1. indicator hot-zones of the current candidate pane and its host
//! 2. hit test of panes across floating windows, auto-hide panels and main
//! 3. the hovered pane's tab strip (tab into it at the hovered index) or
//!    title bar (tab into it)
//!
//! Anything else floats the dragged item.

pub mod indicators;

pub use hit_test::{classify, pane_at_point, PaneHit, PaneRegion};
pub use indicators::{cross_zones, root_zones, DropSite, HotZone};

use std::rc::Rc;

use crate::config::DragMetrics;
use crate::error::{DockError, DockResult};
use crate::model::{
    ContentId, DockAddress, DockContainer, DockMask, DockSite, DockSizeData, FloatingId, HostId,
    PaneId, Point, Rect, Slot,
};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragItem {
    /// A whole pane and all of its content
    Pane(PaneId),
    /// A single tab
    Content(ContentId),
}

/// The resolved drop target. An empty address with `DropSite::Float` means
/// "float in a window".
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub site: DropSite,
    pub host: Option<HostId>,
    pub pane: Option<PaneId>,
    pub address: DockAddress,
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn float() -> Self {
        Self {
            site: DropSite::Float,
            host: None,
            pane: None,
            address: DockAddress::root(),
            index: None,
        }
    }

    pub fn is_float(&self) -> bool {
        self.site == DropSite::Float
    }
}

/// Result of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Docked { host: HostId, pane: PaneId },
    Floated { id: FloatingId, pane: PaneId },
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct DragResolver {
    item: DragItem,
    origin: HostId,
    previous_active: Option<ContentId>,
    candidate: Option<PaneHit>,
    target: DropTarget,
    pointer: Point,
    metrics: DragMetrics,
    /// Keeps the origin host locked; discarding the resolver releases it
    _lock: Rc<()>,
}

impl DragResolver {
    /// Start a gesture. The host the item comes from is locked against
    /// other mutations until `drop` or `cancel`, or until the resolver is
    /// discarded.
    pub fn begin(container: &mut DockContainer, item: DragItem, metrics: DragMetrics) -> DockResult<Self> {
        if let Some(locked) = container.locked_host() {
            return Err(DockError::GestureInProgress(locked));
        }
        let origin = match item {
            DragItem::Pane(pane) => container
                .host_of_pane(pane)
                .ok_or(DockError::UnknownPane(pane))?,
            DragItem::Content(content) => {
                if container.content(content).is_none() {
                    return Err(DockError::UnknownContent(content));
                }
                container
                    .host_of_content(content)
                    .ok_or(DockError::ContentNotPlaced(content))?
            }
        };
        let lock = container.lock_host(origin);
        tracing::debug!(?item, ?origin, "drag started");

        Ok(Self {
            item,
            origin,
            previous_active: container.active_content(),
            candidate: None,
            target: DropTarget::float(),
            pointer: Point::default(),
            metrics,
            _lock: lock,
        })
    }

    pub fn item(&self) -> DragItem {
        self.item
    }

    pub fn origin(&self) -> HostId {
        self.origin
    }

    pub fn target(&self) -> &DropTarget {
        &self.target
    }

    pub fn candidate(&self) -> Option<&PaneHit> {
        self.candidate.as_ref()
    }

    /// Re-resolve the drop target for a pointer position
    pub fn update(&mut self, container: &DockContainer, pointer: Point) -> &DropTarget {
        self.pointer = pointer;
        self.target = self.resolve(container, pointer);
        &self.target
    }

    fn resolve(&mut self, container: &DockContainer, pointer: Point) -> DropTarget {
        // Keep the candidate only while it is still on screen
        let previous = self
            .candidate
            .filter(|c| container.pane_bounds(c.pane).is_some());
        if let Some(target) = previous.and_then(|c| self.zone_target(container, &c, pointer)) {
            return target;
        }

        let Some(hit) = pane_at_point(container, pointer) else {
            self.candidate = None;
            return DropTarget::float();
        };
        self.candidate = Some(hit);
        if let Some(target) = self.zone_target(container, &hit, pointer) {
            return target;
        }

        let tabs = container.pane(hit.pane).map_or(0, |p| p.len());
        match classify(hit.rect, tabs, pointer, &self.metrics) {
            PaneRegion::TabStrip { index } => {
                target_for(container, hit.host, hit.pane, DropSite::PaneCentre, Some(index))
            }
            PaneRegion::TitleBar => target_for(container, hit.host, hit.pane, DropSite::PaneCentre, None),
            PaneRegion::Body => DropTarget::float(),
        }
    }

    fn zone_target(&self, container: &DockContainer, hit: &PaneHit, pointer: Point) -> Option<DropTarget> {
        let mut zones = cross_zones(hit.rect, &self.metrics);
        if let Some(bounds) = container.host_bounds(hit.host) {
            zones.extend(root_zones(bounds, &self.metrics));
        }
        let site = indicators::hit(&zones, pointer)?;
        Some(target_for(container, hit.host, hit.pane, site, None))
    }

    /// Rectangle the dragged content would occupy if dropped now
    pub fn preview(&self, container: &DockContainer) -> Option<Rect> {
        let min = Some(container.centre_min());
        let target = &self.target;
        match target.site {
            DropSite::Float => Some(Rect::new(
                self.pointer.x,
                self.pointer.y,
                container.floating_size().width,
                container.floating_size().height,
            )),
            DropSite::PaneCentre => container.pane_bounds(target.pane?),
            DropSite::PaneEdge(site) => {
                let rect = container.pane_bounds(target.pane?)?;
                DockSizeData::HALVES
                    .child_bounds(site, rect, DockMask::CENTRE | site.mask(), min)
                    .ok()
            }
            DropSite::BranchEdge(site) | DropSite::RootEdge(site) => {
                let host = target.host?;
                let prefix = target.address.parent()?;
                let rect = container.branch_bounds(host, &prefix)?;
                let root = container.host(host)?.root;
                let branch = container.tree().descendant_at(root, &prefix)?.as_branch()?;
                let b = container.tree().branch(branch)?;
                b.sizes
                    .child_bounds(site, rect, b.occupied() | DockMask::CENTRE | site.mask(), min)
                    .ok()
            }
        }
    }

    /// End the gesture without touching the layout
    pub fn cancel(self, container: &mut DockContainer) {
        container.unlock_host();
        tracing::debug!(item = ?self.item, "drag cancelled");
    }

    /// End the gesture, applying the move to the resolved target
    pub fn drop(self, container: &mut DockContainer) -> DockResult<DropOutcome> {
        container.unlock_host();

        let contents: Vec<ContentId> = match self.item {
            DragItem::Pane(pane) => container
                .pane(pane)
                .map(|p| p.content.clone())
                .unwrap_or_default(),
            DragItem::Content(content) => vec![content],
        };
        if contents.is_empty() {
            return Ok(DropOutcome::Unchanged);
        }

        let outcome = if self.target.is_float() {
            self.drop_floating(container, &contents)?
        } else {
            self.drop_docked(container, &contents)?
        };

        if let Some(previous) = self.previous_active {
            if container.content(previous).is_some_and(|c| c.is_placed()) {
                container.set_active_content(Some(previous))?;
            }
        }
        tracing::debug!(item = ?self.item, ?outcome, "drag dropped");
        Ok(outcome)
    }

    fn drop_docked(&self, container: &mut DockContainer, contents: &[ContentId]) -> DockResult<DropOutcome> {
        let target = &self.target;
        let host = target.host.ok_or(DockError::NoGesture)?;

        // A pane dropped onto itself stays where it is
        if let (DragItem::Pane(dragged), Some(over)) = (self.item, target.pane) {
            if dragged == over && matches!(target.site, DropSite::PaneCentre | DropSite::PaneEdge(_)) {
                return Ok(DropOutcome::Unchanged);
            }
        }

        let root = container.host(host).ok_or(DockError::UnknownHost(host))?.root;
        let pane = container.tree.grow(root, &target.address)?;
        self.move_all(container, host, pane, contents, target.index)?;
        Ok(DropOutcome::Docked { host, pane })
    }

    fn drop_floating(&self, container: &mut DockContainer, contents: &[ContentId]) -> DockResult<DropOutcome> {
        let first = contents[0];
        let reuse = container
            .content(first)
            .and_then(|c| c.last_floating)
            .and_then(|id| container.host_for_floating(id));

        // Already alone in that floating window: nothing to do
        if let Some(host) = reuse {
            let whole_tree = container.host_of_content(first) == Some(host)
                && container.all_content_in(host).count() == contents.len();
            if whole_tree {
                if let Some(id) = container.host(host).and_then(|h| h.floating_id()) {
                    let pane = container.content(first).and_then(|c| c.pane);
                    if let Some(pane) = pane {
                        return Ok(DropOutcome::Floated { id, pane });
                    }
                }
            }
        }

        let host = match reuse {
            Some(host) => host,
            None => {
                let size = container.floating_size();
                container.create_floating(Rect::new(self.pointer.x, self.pointer.y, size.width, size.height))
            }
        };
        let root = container.host(host).ok_or(DockError::UnknownHost(host))?.root;
        let address = container
            .content(first)
            .and_then(|c| c.remembered_in(root))
            .map(|p| p.address.clone())
            .unwrap_or_else(|| DockAddress::from([DockSite::Centre]));
        let address = match container.tree.descendant_at(root, &address) {
            Some(Slot::Pane(_)) | Some(Slot::Branch(_)) => address,
            _ => DockAddress::from([DockSite::Centre]),
        };

        let pane = container.tree.grow(root, &address)?;
        self.move_all(container, host, pane, contents, None)?;
        let id = container
            .host(host)
            .and_then(|h| h.floating_id())
            .ok_or(DockError::UnknownHost(host))?;
        Ok(DropOutcome::Floated { id, pane })
    }

    fn move_all(
        &self,
        container: &mut DockContainer,
        host: HostId,
        pane: PaneId,
        contents: &[ContentId],
        index: Option<usize>,
    ) -> DockResult<()> {
        let mut touched = vec![Some(host), Some(self.origin)];
        for (offset, content) in contents.iter().enumerate() {
            let old = container.move_to_pane(*content, pane, index.map(|i| i + offset))?;
            touched.push(old);
        }
        container.reveal_floating(host);
        container.finish_mutation(&touched);
        for content in contents {
            container.remember_placement(*content);
        }
        Ok(())
    }
}

/// Build the drop target for `site` relative to `pane` in `host`
pub fn target_for(
    container: &DockContainer,
    host: HostId,
    pane: PaneId,
    site: DropSite,
    index: Option<usize>,
) -> DropTarget {
    let tree = container.tree();
    let auto_hide = container.host(host).is_some_and(|h| h.kind.is_auto_hide());

    // Auto-hide panels only ever hold their Centre pane
    let site = if auto_hide { DropSite::PaneCentre } else { site };

    let pane_address = tree.address_of_pane(pane).unwrap_or_default();
    let address = match site {
        DropSite::Float => return DropTarget::float(),
        DropSite::PaneCentre => pane_address,
        DropSite::PaneEdge(edge) => pane_address.child(edge),
        DropSite::BranchEdge(edge) => {
            let parent = tree.pane(pane).map(|p| p.parent);
            let mut address = parent
                .and_then(|b| tree.address_of_branch(b))
                .unwrap_or_default();
            let mut current = parent;
            while let Some(next) = current
                .and_then(|b| tree.branch(b))
                .and_then(|b| b.slot(DockSite::Centre).as_branch())
            {
                address.push(DockSite::Centre);
                current = Some(next);
            }
            address.child(edge)
        }
        DropSite::RootEdge(edge) => DockAddress::from([edge]),
    };

    DropTarget {
        site,
        host: Some(host),
        pane: Some(pane),
        address,
        index: if site == DropSite::PaneCentre { index } else { None },
    }
}
