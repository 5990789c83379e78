//! Dock tree - branches with five child slots and tabbed panes at the leaves
//!
//! All trees of a container live in one arena. Nodes refer to each other by
//! id, so parent links never form reference cycles and a stale id simply
//! fails to resolve.
//!
//! Shape rules:
//! - `grow` walks an address from a root, creating branches and panes as
//!   needed. An address that runs out of sites keeps descending through
//!   branches sitting in Centre slots.
//! - `prune` runs after every mutation. It collapses single-occupant
//!   branches, drops empty edge panes, moves a lone occupant to Centre and
//!   guarantees every branch has something in its Centre slot.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::content::ContentId;
use super::host::HostId;
use super::rect::{Rect, Size};
use super::sizes::DockSizeData;
use super::site::{DockAddress, DockMask, DockSite};
use crate::error::{DockError, DockResult};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a branch node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchId(pub u64);

/// Unique identifier for a dock pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(pub u64);

/// Default limit on the number of sites in a placement address
pub const DEFAULT_MAX_ADDRESS_DEPTH: usize = 32;

// ============================================================================
// Nodes
// ============================================================================

/// Occupant of a branch slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    #[default]
    Empty,
    Branch(BranchId),
    Pane(PaneId),
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn as_pane(&self) -> Option<PaneId> {
        match self {
            Slot::Pane(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_branch(&self) -> Option<BranchId> {
        match self {
            Slot::Branch(id) => Some(*id),
            _ => None,
        }
    }
}

/// Interior node with one slot per site (Centre, Left, Right, Top, Bottom)
#[derive(Debug, Clone)]
pub struct Branch {
    pub id: BranchId,
    /// Parent branch, `None` for a tree root
    pub parent: Option<BranchId>,
    /// Host that owns this tree (roots only)
    pub owner: Option<HostId>,
    pub sizes: DockSizeData,
    slots: [Slot; 5],
}

impl Branch {
    fn new(id: BranchId, parent: Option<BranchId>, sizes: DockSizeData) -> Self {
        Self {
            id,
            parent,
            owner: None,
            sizes,
            slots: [Slot::Empty; 5],
        }
    }

    /// Occupant of the slot at `site` (`Empty` for `DockSite::None`)
    pub fn slot(&self, site: DockSite) -> Slot {
        self.slots.get(site.ordinal()).copied().unwrap_or_default()
    }

    /// Sites whose slots are occupied
    pub fn occupied(&self) -> DockMask {
        DockSite::SLOTS
            .into_iter()
            .filter(|site| !self.slot(*site).is_empty())
            .fold(DockMask::empty(), |mask, site| mask | site.mask())
    }

    pub fn occupant_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Site holding `slot`, if any
    pub fn site_of(&self, slot: Slot) -> Option<DockSite> {
        DockSite::SLOTS.into_iter().find(|site| self.slot(*site) == slot)
    }

    /// Occupied (site, slot) pairs in ordinal order
    pub fn children(&self) -> impl Iterator<Item = (DockSite, Slot)> + '_ {
        DockSite::SLOTS
            .into_iter()
            .map(|site| (site, self.slot(site)))
            .filter(|(_, slot)| !slot.is_empty())
    }
}

/// Leaf node: an ordered list of content with one visible item
#[derive(Debug, Clone)]
pub struct DockPane {
    pub id: PaneId,
    pub parent: BranchId,
    pub content: Vec<ContentId>,
    pub visible: Option<ContentId>,
    /// Set while the visible item is being changed; nested changes are ignored
    changing_visible: bool,
}

impl DockPane {
    fn new(id: PaneId, parent: BranchId) -> Self {
        Self {
            id,
            parent,
            content: Vec::new(),
            visible: None,
            changing_visible: false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn index_of(&self, content: ContentId) -> Option<usize> {
        self.content.iter().position(|c| *c == content)
    }

    pub fn contains(&self, content: ContentId) -> bool {
        self.content.contains(&content)
    }

    /// True while a visible-content change on this pane is in progress
    pub fn is_changing_visible(&self) -> bool {
        self.changing_visible
    }
}

/// Nodes removed or created by a prune pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed_panes: Vec<PaneId>,
    pub removed_branches: Vec<BranchId>,
    pub created_panes: Vec<PaneId>,
}

impl PruneReport {
    pub fn is_empty(&self) -> bool {
        self.removed_panes.is_empty()
            && self.removed_branches.is_empty()
            && self.created_panes.is_empty()
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Arena holding every branch and pane of a container
#[derive(Debug, Clone)]
pub struct DockTree {
    branches: HashMap<BranchId, Branch>,
    panes: HashMap<PaneId, DockPane>,
    next_branch_id: u64,
    next_pane_id: u64,
    max_address_depth: usize,
}

impl Default for DockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DockTree {
    pub fn new() -> Self {
        Self {
            branches: HashMap::new(),
            panes: HashMap::new(),
            next_branch_id: 1,
            next_pane_id: 1,
            max_address_depth: DEFAULT_MAX_ADDRESS_DEPTH,
        }
    }

    pub fn set_max_address_depth(&mut self, depth: usize) {
        self.max_address_depth = depth.max(1);
    }

    pub fn max_address_depth(&self) -> usize {
        self.max_address_depth
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(&id)
    }

    pub(crate) fn branch_mut(&mut self, id: BranchId) -> Option<&mut Branch> {
        self.branches.get_mut(&id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&DockPane> {
        self.panes.get(&id)
    }

    pub fn contains_pane(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    pub fn contains_branch(&self, id: BranchId) -> bool {
        self.branches.contains_key(&id)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    fn next_branch_id(&mut self) -> BranchId {
        let id = BranchId(self.next_branch_id);
        self.next_branch_id += 1;
        id
    }

    fn next_pane_id(&mut self) -> PaneId {
        let id = PaneId(self.next_pane_id);
        self.next_pane_id += 1;
        id
    }

    // =========================================================================
    // Construction / teardown
    // =========================================================================

    /// Create a new tree root owned by `owner`, with an empty Centre pane
    pub fn new_root(&mut self, owner: HostId, sizes: DockSizeData) -> BranchId {
        let id = self.next_branch_id();
        let mut branch = Branch::new(id, None, sizes);
        branch.owner = Some(owner);
        self.branches.insert(id, branch);
        self.create_pane(id, DockSite::Centre);
        id
    }

    /// Destroy a whole tree. Returns the content that was shown in it.
    pub fn remove_tree(&mut self, root: BranchId) -> Vec<ContentId> {
        let mut released = Vec::new();
        let mut stack = vec![Slot::Branch(root)];
        while let Some(slot) = stack.pop() {
            match slot {
                Slot::Empty => {}
                Slot::Pane(id) => {
                    if let Some(pane) = self.panes.remove(&id) {
                        released.extend(pane.content);
                    }
                }
                Slot::Branch(id) => {
                    if let Some(branch) = self.branches.remove(&id) {
                        stack.extend(branch.slots);
                    }
                }
            }
        }
        released
    }

    /// Put `slot` into `branch` at `site`, fixing up the occupant's parent link
    fn set_slot(&mut self, branch: BranchId, site: DockSite, slot: Slot) {
        if let Some(b) = self.branches.get_mut(&branch) {
            if let Some(entry) = b.slots.get_mut(site.ordinal()) {
                *entry = slot;
            }
        }
        match slot {
            Slot::Empty => {}
            Slot::Branch(child) => {
                if let Some(c) = self.branches.get_mut(&child) {
                    c.parent = Some(branch);
                    c.owner = None;
                }
            }
            Slot::Pane(child) => {
                if let Some(p) = self.panes.get_mut(&child) {
                    p.parent = branch;
                }
            }
        }
    }

    fn create_pane(&mut self, parent: BranchId, site: DockSite) -> PaneId {
        let id = self.next_pane_id();
        self.panes.insert(id, DockPane::new(id, parent));
        self.set_slot(parent, site, Slot::Pane(id));
        id
    }

    fn create_branch(&mut self, parent: BranchId, site: DockSite) -> BranchId {
        let id = self.next_branch_id();
        self.branches
            .insert(id, Branch::new(id, Some(parent), DockSizeData::for_growth(site)));
        self.set_slot(parent, site, Slot::Branch(id));
        id
    }

    // =========================================================================
    // Growth
    // =========================================================================

    /// Walk `address` from `root`, growing branches as needed, and return the
    /// pane at the end of it.
    ///
    /// - An empty slot on the path gets a new branch (quartered if grown from
    ///   a Centre slot, halved otherwise) holding an empty Centre pane.
    /// - A pane on the path is wrapped: a new branch takes its slot and the
    ///   pane moves to that branch's Centre.
    /// - Once the address is exhausted, branches in the final slot are
    ///   descended through their Centre slots until a pane or empty slot.
    pub fn grow(&mut self, root: BranchId, address: &DockAddress) -> DockResult<PaneId> {
        if !self.branches.contains_key(&root) {
            return Err(DockError::UnknownBranch(root));
        }
        if address.sites().contains(&DockSite::None) {
            return Err(DockError::InvalidAddress {
                address: address.clone(),
                reason: "placement addresses cannot contain DockSite::None",
            });
        }
        if address.len() > self.max_address_depth {
            return Err(DockError::AddressTooDeep {
                address: address.clone(),
                depth: address.len(),
                max: self.max_address_depth,
            });
        }

        let (mut site, mut rest) = match address.sites().split_first() {
            Some((first, rest)) => (*first, rest),
            None => (DockSite::Centre, &[][..]),
        };
        let mut branch = root;

        loop {
            let slot = self
                .branches
                .get(&branch)
                .map(|b| b.slot(site))
                .ok_or(DockError::UnknownBranch(branch))?;

            if rest.is_empty() {
                match slot {
                    Slot::Pane(pane) => return Ok(pane),
                    Slot::Branch(child) => {
                        branch = child;
                        site = DockSite::Centre;
                        continue;
                    }
                    Slot::Empty => {
                        let pane = self.create_pane(branch, site);
                        tracing::debug!(?branch, %site, ?pane, "created pane");
                        return Ok(pane);
                    }
                }
            }

            let next = match slot {
                Slot::Branch(child) => child,
                Slot::Empty => {
                    let child = self.create_branch(branch, site);
                    self.create_pane(child, DockSite::Centre);
                    tracing::debug!(parent = ?branch, %site, ?child, "grew branch");
                    child
                }
                Slot::Pane(pane) => {
                    let child = self.create_branch(branch, site);
                    self.set_slot(child, DockSite::Centre, Slot::Pane(pane));
                    tracing::debug!(parent = ?branch, %site, ?child, ?pane, "wrapped pane in branch");
                    child
                }
            };

            branch = next;
            site = rest[0];
            rest = &rest[1..];
        }
    }

    // =========================================================================
    // Pruning
    // =========================================================================

    /// Restore the minimal shape of the tree rooted at `root`
    pub fn prune(&mut self, root: BranchId) -> PruneReport {
        let mut report = PruneReport::default();
        if !self.branches.contains_key(&root) {
            return report;
        }
        self.prune_branch(root, &mut report);

        // A root left holding a single branch adopts that branch's children
        let only_child = self.branches.get(&root).and_then(|b| {
            if b.occupant_count() == 1 {
                b.slot(DockSite::Centre).as_branch()
            } else {
                None
            }
        });
        if let Some(child) = only_child {
            if let Some(adopted) = self.branches.remove(&child) {
                if let Some(r) = self.branches.get_mut(&root) {
                    r.sizes = adopted.sizes;
                }
                for site in DockSite::SLOTS {
                    self.set_slot(root, site, adopted.slot(site));
                }
                report.removed_branches.push(child);
                tracing::debug!(?root, ?child, "root adopted its only branch");
            }
        }

        report
    }

    fn prune_branch(&mut self, id: BranchId, report: &mut PruneReport) {
        let Some(branch) = self.branches.get(&id) else {
            return;
        };

        // Children first
        let child_branches: Vec<BranchId> = branch
            .children()
            .filter_map(|(_, slot)| slot.as_branch())
            .collect();
        for child in child_branches {
            self.prune_branch(child, report);
        }

        // Hoist the occupant of any single-occupant child branch
        for site in DockSite::SLOTS {
            let Some(child) = self.branches.get(&id).and_then(|b| b.slot(site).as_branch()) else {
                continue;
            };
            let only = match self.branches.get(&child) {
                Some(c) if c.occupant_count() == 1 => c.children().next().map(|(_, slot)| slot),
                _ => None,
            };
            if let Some(only) = only {
                self.branches.remove(&child);
                self.set_slot(id, site, only);
                report.removed_branches.push(child);
                tracing::debug!(parent = ?id, %site, ?child, "collapsed branch");
            }
        }

        // Empty edge panes go away; an empty Centre pane stays as a drop target
        for site in DockSite::EDGES {
            let Some(pane) = self.branches.get(&id).and_then(|b| b.slot(site).as_pane()) else {
                continue;
            };
            if self.panes.get(&pane).is_some_and(|p| p.is_empty()) {
                self.panes.remove(&pane);
                self.set_slot(id, site, Slot::Empty);
                report.removed_panes.push(pane);
                tracing::debug!(branch = ?id, %site, ?pane, "pruned empty pane");
            }
        }

        // A lone occupant belongs in Centre
        let lone = self.branches.get(&id).and_then(|b| {
            if b.occupant_count() == 1 {
                b.children().next()
            } else {
                None
            }
        });
        if let Some((site, slot)) = lone {
            if site != DockSite::Centre {
                self.set_slot(id, site, Slot::Empty);
                self.set_slot(id, DockSite::Centre, slot);
            }
        }

        let centre_empty = self
            .branches
            .get(&id)
            .is_some_and(|b| b.slot(DockSite::Centre).is_empty());
        if centre_empty {
            let pane = self.create_pane(id, DockSite::Centre);
            report.created_panes.push(pane);
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Node at `address` relative to `branch`. The empty address is `branch`
    /// itself. `None` if the walk hits an empty slot or passes through a pane.
    pub fn descendant_at(&self, branch: BranchId, address: &DockAddress) -> Option<Slot> {
        let mut current = Slot::Branch(branch);
        self.branches.get(&branch)?;
        for site in address.sites() {
            let id = current.as_branch()?;
            let slot = self.branches.get(&id)?.slot(*site);
            if slot.is_empty() {
                return None;
            }
            current = slot;
        }
        Some(current)
    }

    /// Read-only counterpart of `grow`: the pane `address` lands on, without
    /// creating anything
    pub fn pane_at(&self, root: BranchId, address: &DockAddress) -> Option<PaneId> {
        let mut current = self.descendant_at(root, address)?;
        loop {
            match current {
                Slot::Pane(id) => return Some(id),
                Slot::Branch(id) => current = self.branches.get(&id)?.slot(DockSite::Centre),
                Slot::Empty => return None,
            }
        }
    }

    /// Edge sizes of the branch at `address`
    pub fn dock_sizes(&self, root: BranchId, address: &DockAddress) -> Option<&DockSizeData> {
        let id = self.descendant_at(root, address)?.as_branch()?;
        self.branches.get(&id).map(|b| &b.sizes)
    }

    /// Site of `pane` within its parent branch
    pub fn site_of_pane(&self, pane: PaneId) -> Option<DockSite> {
        let parent = self.panes.get(&pane)?.parent;
        self.branches.get(&parent)?.site_of(Slot::Pane(pane))
    }

    /// Path from the tree root to `pane`
    pub fn address_of_pane(&self, pane: PaneId) -> Option<DockAddress> {
        let parent = self.panes.get(&pane)?.parent;
        let site = self.branches.get(&parent)?.site_of(Slot::Pane(pane))?;
        let mut address = self.address_of_branch(parent)?;
        address.push(site);
        Some(address)
    }

    /// Path from the tree root to `branch` (empty for a root)
    pub fn address_of_branch(&self, branch: BranchId) -> Option<DockAddress> {
        let mut sites = Vec::new();
        let mut current = branch;
        let mut guard = 0usize;
        while let Some(parent) = self.branches.get(&current)?.parent {
            let site = self.branches.get(&parent)?.site_of(Slot::Branch(current))?;
            sites.push(site);
            current = parent;
            guard += 1;
            if guard > self.branches.len() {
                return None;
            }
        }
        sites.reverse();
        Some(DockAddress(sites))
    }

    /// Root of the tree containing `branch`
    pub fn root_of_branch(&self, branch: BranchId) -> Option<BranchId> {
        let mut current = branch;
        let mut guard = 0usize;
        while let Some(parent) = self.branches.get(&current)?.parent {
            current = parent;
            guard += 1;
            if guard > self.branches.len() {
                return None;
            }
        }
        Some(current)
    }

    pub fn root_of_pane(&self, pane: PaneId) -> Option<BranchId> {
        self.root_of_branch(self.panes.get(&pane)?.parent)
    }

    /// The host a pane's changes bubble up to: the owner of its tree root
    pub fn host_of_pane(&self, pane: PaneId) -> Option<HostId> {
        let root = self.root_of_pane(pane)?;
        self.branches.get(&root)?.owner
    }

    pub fn host_of_branch(&self, branch: BranchId) -> Option<HostId> {
        let root = self.root_of_branch(branch)?;
        self.branches.get(&root)?.owner
    }

    /// Lazy depth-first walk of the panes under `branch`, in slot order
    pub fn panes_under(&self, branch: BranchId) -> PaneIter<'_> {
        PaneIter::new(self, Slot::Branch(branch))
    }

    /// Every branch under (and including) `branch`
    pub fn branches_under(&self, branch: BranchId) -> Vec<BranchId> {
        let mut out = Vec::new();
        let mut stack = vec![branch];
        while let Some(id) = stack.pop() {
            let Some(b) = self.branches.get(&id) else {
                continue;
            };
            out.push(id);
            for (_, slot) in b.children().collect::<Vec<_>>().into_iter().rev() {
                if let Slot::Branch(child) = slot {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// True if no pane under `root` holds content
    pub fn is_tree_empty(&self, root: BranchId) -> bool {
        self.panes_under(root)
            .all(|id| !self.panes.get(&id).is_some_and(|p| !p.is_empty()))
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Bounds of the child at `site` of `branch`, given the branch's bounds
    pub fn child_bounds(
        &self,
        branch: BranchId,
        site: DockSite,
        rect: Rect,
        centre_min: Option<Size>,
    ) -> Option<Rect> {
        let b = self.branches.get(&branch)?;
        b.sizes
            .child_bounds(site, rect, b.occupied(), centre_min)
            .ok()
    }

    /// Bounds of every pane under `root` when the root fills `rect`
    pub fn pane_rects(&self, root: BranchId, rect: Rect, centre_min: Option<Size>) -> Vec<(PaneId, Rect)> {
        let mut out = Vec::new();
        self.collect_rects(root, rect, centre_min, &mut out, &mut Vec::new());
        out
    }

    /// Bounds of every branch under `root` when the root fills `rect`
    pub fn branch_rects(
        &self,
        root: BranchId,
        rect: Rect,
        centre_min: Option<Size>,
    ) -> Vec<(BranchId, Rect)> {
        let mut out = Vec::new();
        self.collect_rects(root, rect, centre_min, &mut Vec::new(), &mut out);
        out
    }

    fn collect_rects(
        &self,
        branch: BranchId,
        rect: Rect,
        centre_min: Option<Size>,
        panes: &mut Vec<(PaneId, Rect)>,
        branches: &mut Vec<(BranchId, Rect)>,
    ) {
        let Some(b) = self.branches.get(&branch) else {
            return;
        };
        branches.push((branch, rect));
        let docked = b.occupied();
        for (site, slot) in b.children() {
            let Ok(child_rect) = b.sizes.child_bounds(site, rect, docked, centre_min) else {
                continue;
            };
            match slot {
                Slot::Pane(id) => panes.push((id, child_rect)),
                Slot::Branch(id) => self.collect_rects(id, child_rect, centre_min, panes, branches),
                Slot::Empty => {}
            }
        }
    }

    // =========================================================================
    // Pane content
    // =========================================================================

    /// Insert `content` into `pane` at `index` (clamped; `None` appends) and
    /// make it the visible item. Returns the index used.
    pub fn insert_content(
        &mut self,
        pane: PaneId,
        content: ContentId,
        index: Option<usize>,
    ) -> DockResult<usize> {
        let p = self.panes.get_mut(&pane).ok_or(DockError::UnknownPane(pane))?;
        p.content.retain(|c| *c != content);
        let index = index.unwrap_or(p.content.len()).min(p.content.len());
        p.content.insert(index, content);
        p.visible = Some(content);
        Ok(index)
    }

    /// Remove `content` from `pane`. If it was visible, the item now at its
    /// index (or the last item) becomes visible. Returns the old index.
    pub fn remove_content(&mut self, pane: PaneId, content: ContentId) -> Option<usize> {
        let p = self.panes.get_mut(&pane)?;
        let index = p.index_of(content)?;
        p.content.remove(index);
        if p.visible == Some(content) {
            p.visible = if p.content.is_empty() {
                None
            } else {
                p.content.get(index.min(p.content.len() - 1)).copied()
            };
        }
        Some(index)
    }

    /// Make `content` the visible item of `pane`.
    ///
    /// Returns `Ok(true)` if the visible item changed. Re-entrant calls made
    /// while a change on the same pane is in progress are ignored.
    pub fn set_visible(&mut self, pane: PaneId, content: Option<ContentId>) -> DockResult<bool> {
        let p = self.panes.get_mut(&pane).ok_or(DockError::UnknownPane(pane))?;
        if p.changing_visible {
            return Ok(false);
        }
        if let Some(c) = content {
            if !p.contains(c) {
                return Err(DockError::ContentNotPlaced(c));
            }
        }
        if p.visible == content {
            return Ok(false);
        }
        p.visible = content;
        Ok(true)
    }

    /// Set or clear the pane's visible-change guard, returning its previous
    /// state. Callers restore the previous state when their change is done.
    pub(crate) fn set_visible_guard(&mut self, pane: PaneId, on: bool) -> bool {
        match self.panes.get_mut(&pane) {
            Some(p) => std::mem::replace(&mut p.changing_visible, on),
            None => false,
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check structural consistency of every tree in the arena
    pub fn validate(&self) -> InvariantReport {
        let mut report = InvariantReport::default();
        let mut seen_branches = HashSet::new();
        let mut seen_panes = HashSet::new();
        let mut seen_content = HashSet::new();

        let mut roots: Vec<BranchId> = self
            .branches
            .values()
            .filter(|b| b.parent.is_none())
            .map(|b| b.id)
            .collect();
        roots.sort();

        for root in roots {
            if self.branches.get(&root).is_some_and(|b| b.owner.is_none()) {
                report.push(InvariantCode::RootWithoutOwner, format!("root {:?} has no owner", root));
            }
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                if !seen_branches.insert(id) {
                    report.push(
                        InvariantCode::DuplicateOccupant,
                        format!("branch {:?} reachable twice", id),
                    );
                    continue;
                }
                let Some(branch) = self.branches.get(&id) else {
                    continue;
                };
                for (site, slot) in branch.children() {
                    match slot {
                        Slot::Empty => {}
                        Slot::Branch(child) => match self.branches.get(&child) {
                            None => report.push(
                                InvariantCode::DanglingNode,
                                format!("{:?}.{} -> missing branch {:?}", id, site, child),
                            ),
                            Some(c) => {
                                if c.parent != Some(id) {
                                    report.push(
                                        InvariantCode::ParentMismatch,
                                        format!("branch {:?} in {:?}.{} has parent {:?}", child, id, site, c.parent),
                                    );
                                }
                                stack.push(child);
                            }
                        },
                        Slot::Pane(pane) => {
                            if !seen_panes.insert(pane) {
                                report.push(
                                    InvariantCode::DuplicateOccupant,
                                    format!("pane {:?} occupies more than one slot", pane),
                                );
                                continue;
                            }
                            match self.panes.get(&pane) {
                                None => report.push(
                                    InvariantCode::DanglingNode,
                                    format!("{:?}.{} -> missing pane {:?}", id, site, pane),
                                ),
                                Some(p) => {
                                    if p.parent != id {
                                        report.push(
                                            InvariantCode::ParentMismatch,
                                            format!("pane {:?} in {:?}.{} has parent {:?}", pane, id, site, p.parent),
                                        );
                                    }
                                    if let Some(v) = p.visible {
                                        if !p.contains(v) {
                                            report.push(
                                                InvariantCode::VisibleNotInPane,
                                                format!("pane {:?} shows {:?} which it does not hold", pane, v),
                                            );
                                        }
                                    } else if !p.is_empty() {
                                        report.push(
                                            InvariantCode::VisibleNotInPane,
                                            format!("pane {:?} holds content but shows nothing", pane),
                                        );
                                    }
                                    for c in &p.content {
                                        if !seen_content.insert(*c) {
                                            report.push(
                                                InvariantCode::DuplicateContent,
                                                format!("content {:?} appears in more than one place", c),
                                            );
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        for id in self.branches.keys() {
            if !seen_branches.contains(id) {
                report.push(InvariantCode::Orphan, format!("branch {:?} is unreachable", id));
            }
        }
        for id in self.panes.keys() {
            if !seen_panes.contains(id) {
                report.push(InvariantCode::Orphan, format!("pane {:?} is unreachable", id));
            }
        }
        report
    }

    /// Structural checks plus the shape guarantees a prune pass establishes
    pub fn validate_pruned(&self) -> InvariantReport {
        let mut report = self.validate();
        for branch in self.branches.values() {
            if branch.slot(DockSite::Centre).is_empty() {
                report.push(
                    InvariantCode::EmptyCentre,
                    format!("branch {:?} has an empty Centre slot", branch.id),
                );
            }
            let count = branch.occupant_count();
            if branch.parent.is_some() && count < 2 {
                report.push(
                    InvariantCode::NotMinimal,
                    format!("branch {:?} has {} occupant(s)", branch.id, count),
                );
            }
            for site in DockSite::EDGES {
                if let Slot::Pane(p) = branch.slot(site) {
                    if self.panes.get(&p).is_some_and(|p| p.is_empty()) {
                        report.push(
                            InvariantCode::EmptyEdgePane,
                            format!("empty pane {:?} in {:?}.{}", p, branch.id, site),
                        );
                    }
                }
            }
        }
        report
    }

    /// Panic if the arena is inconsistent (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let report = self.validate_pruned();
        assert!(report.is_clean(), "dock tree invariants violated:\n{}", report);
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

// ============================================================================
// Iteration
// ============================================================================

/// Depth-first iterator over pane ids, Centre before edges
pub struct PaneIter<'a> {
    tree: &'a DockTree,
    stack: Vec<Slot>,
}

impl<'a> PaneIter<'a> {
    fn new(tree: &'a DockTree, start: Slot) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl Iterator for PaneIter<'_> {
    type Item = PaneId;

    fn next(&mut self) -> Option<PaneId> {
        while let Some(slot) = self.stack.pop() {
            match slot {
                Slot::Empty => {}
                Slot::Pane(id) => return Some(id),
                Slot::Branch(id) => {
                    if let Some(b) = self.tree.branches.get(&id) {
                        self.stack.extend(b.slots.iter().rev().copied());
                    }
                }
            }
        }
        None
    }
}

// ============================================================================
// Invariant report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvariantCode {
    DanglingNode,
    ParentMismatch,
    DuplicateOccupant,
    DuplicateContent,
    VisibleNotInPane,
    Orphan,
    RootWithoutOwner,
    EmptyCentre,
    NotMinimal,
    EmptyEdgePane,
    ContentMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantIssue {
    pub code: InvariantCode,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantReport {
    pub issues: Vec<InvariantIssue>,
}

impl InvariantReport {
    pub(crate) fn push(&mut self, code: InvariantCode, message: String) {
        self.issues.push(InvariantIssue { code, message });
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has(&self, code: InvariantCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for InvariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "  {:?}: {}", issue.code, issue.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_root() -> (DockTree, BranchId) {
        let mut tree = DockTree::new();
        let root = tree.new_root(HostId(1), DockSizeData::QUARTERS);
        (tree, root)
    }

    #[test]
    fn test_new_root_has_centre_pane() {
        let (tree, root) = tree_with_root();
        let branch = tree.branch(root).unwrap();
        assert!(branch.slot(DockSite::Centre).as_pane().is_some());
        assert_eq!(branch.occupant_count(), 1);
        assert!(tree.validate_pruned().is_clean());
    }

    #[test]
    fn test_grow_short_address_descends_centre_chain() {
        let (mut tree, root) = tree_with_root();
        let centre = tree.grow(root, &DockAddress::root()).unwrap();
        assert_eq!(Some(centre), tree.branch(root).unwrap().slot(DockSite::Centre).as_pane());

        // Wrap the centre pane, then ask for [Centre] again: lands on the
        // demoted pane through the Centre chain
        let left = tree
            .grow(root, &DockAddress::from([DockSite::Centre, DockSite::Left]))
            .unwrap();
        assert_ne!(left, centre);
        let again = tree.grow(root, &DockAddress::from([DockSite::Centre])).unwrap();
        assert_eq!(again, centre);
    }

    #[test]
    fn test_grow_rejects_none_site() {
        let (mut tree, root) = tree_with_root();
        let err = tree
            .grow(root, &DockAddress::from([DockSite::Left, DockSite::None]))
            .unwrap_err();
        assert!(matches!(err, DockError::InvalidAddress { .. }));
    }

    #[test]
    fn test_prune_removes_empty_edge_pane() {
        let (mut tree, root) = tree_with_root();
        let left = tree.grow(root, &DockAddress::from([DockSite::Left])).unwrap();
        let report = tree.prune(root);
        assert_eq!(report.removed_panes, vec![left]);
        assert!(tree.branch(root).unwrap().slot(DockSite::Left).is_empty());
    }

    #[test]
    fn test_visible_guard_ignores_nested_change() {
        let (mut tree, root) = tree_with_root();
        let pane = tree.grow(root, &DockAddress::root()).unwrap();
        tree.insert_content(pane, ContentId(1), None).unwrap();
        tree.insert_content(pane, ContentId(2), None).unwrap();

        assert!(!tree.set_visible_guard(pane, true));
        assert_eq!(tree.set_visible(pane, Some(ContentId(1))), Ok(false));
        assert_eq!(tree.pane(pane).unwrap().visible, Some(ContentId(2)));
        tree.set_visible_guard(pane, false);
        assert!(!tree.pane(pane).unwrap().is_changing_visible());

        assert_eq!(tree.set_visible(pane, Some(ContentId(1))), Ok(true));
    }

    #[test]
    fn test_remove_visible_content_picks_neighbour() {
        let (mut tree, root) = tree_with_root();
        let pane = tree.grow(root, &DockAddress::root()).unwrap();
        for i in 1..=3 {
            tree.insert_content(pane, ContentId(i), None).unwrap();
        }
        tree.set_visible(pane, Some(ContentId(2))).unwrap();
        assert_eq!(tree.remove_content(pane, ContentId(2)), Some(1));
        assert_eq!(tree.pane(pane).unwrap().visible, Some(ContentId(3)));
        assert_eq!(tree.remove_content(pane, ContentId(3)), Some(1));
        assert_eq!(tree.pane(pane).unwrap().visible, Some(ContentId(1)));
        assert_eq!(tree.remove_content(pane, ContentId(1)), Some(0));
        assert_eq!(tree.pane(pane).unwrap().visible, None);
    }

    #[test]
    fn test_validate_flags_not_minimal_branch() {
        let (mut tree, root) = tree_with_root();
        // [Left, Centre] grows a branch whose only content lives in its Centre
        let pane = tree
            .grow(root, &DockAddress::from([DockSite::Left, DockSite::Centre]))
            .unwrap();
        tree.insert_content(pane, ContentId(7), None).unwrap();
        assert!(tree.validate_pruned().has(InvariantCode::NotMinimal));

        tree.prune(root);
        assert!(tree.validate_pruned().is_clean());
        assert_eq!(tree.address_of_pane(pane), Some(DockAddress::from([DockSite::Left])));
    }
}
