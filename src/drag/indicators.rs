//! Drop indicator hot-zones
//!
//! Two kinds of indicator are shown during a drag:
//! - a cross centred on the hovered pane. Its middle square tabs into the
//!   pane, the inner arms split the pane, and on large panes a second ring
//!   of arms docks against the edge of the pane's branch.
//! - four buttons at the mid-points of the host's edges, docking against
//!   the edge of the whole host surface.

use crate::config::DragMetrics;
use crate::model::{DockSite, Point, Rect, Size};

/// Where a drop lands, relative to the hovered pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSite {
    /// Tab into the hovered pane
    PaneCentre,
    /// Split the hovered pane
    PaneEdge(DockSite),
    /// Dock at the edge of the hovered pane's branch
    BranchEdge(DockSite),
    /// Dock at the edge of the host's root
    RootEdge(DockSite),
    /// Nothing matched: float in a window
    Float,
}

/// One clickable indicator region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotZone {
    pub rect: Rect,
    pub site: DropSite,
}

/// Inset of the root edge buttons from the host edges
const ROOT_MARGIN: f32 = 8.0;

/// Offset of the arm at `ring` steps from the centre, towards `site`
fn arm(centre: Point, size: f32, site: DockSite, ring: f32) -> Rect {
    let offset = size * ring;
    let at = match site {
        DockSite::Left => Point::new(centre.x - offset, centre.y),
        DockSite::Right => Point::new(centre.x + offset, centre.y),
        DockSite::Top => Point::new(centre.x, centre.y - offset),
        DockSite::Bottom => Point::new(centre.x, centre.y + offset),
        DockSite::Centre | DockSite::None => centre,
    };
    Rect::centred_at(at, Size::new(size, size))
}

/// True if `pane` is big enough on both axes for the outer arms
pub fn is_large(pane: Rect, metrics: &DragMetrics) -> bool {
    pane.width >= metrics.large_cross_min && pane.height >= metrics.large_cross_min
}

/// Cross indicator zones for a pane
pub fn cross_zones(pane: Rect, metrics: &DragMetrics) -> Vec<HotZone> {
    let size = metrics.indicator_size;
    let centre = pane.centre();

    let mut zones = vec![HotZone {
        rect: Rect::centred_at(centre, Size::new(size, size)),
        site: DropSite::PaneCentre,
    }];
    zones.extend(DockSite::EDGES.into_iter().map(|site| HotZone {
        rect: arm(centre, size, site, 1.0),
        site: DropSite::PaneEdge(site),
    }));
    if is_large(pane, metrics) {
        zones.extend(DockSite::EDGES.into_iter().map(|site| HotZone {
            rect: arm(centre, size, site, 2.0),
            site: DropSite::BranchEdge(site),
        }));
    }
    zones
}

/// Edge buttons for a host surface
pub fn root_zones(host: Rect, metrics: &DragMetrics) -> Vec<HotZone> {
    if host.is_empty() {
        return Vec::new();
    }
    let size = metrics.indicator_size;
    let centre = host.centre();
    let inset = ROOT_MARGIN + size / 2.0;
    DockSite::EDGES
        .into_iter()
        .map(|site| {
            let at = match site {
                DockSite::Left => Point::new(host.left() + inset, centre.y),
                DockSite::Right => Point::new(host.right() - inset, centre.y),
                DockSite::Top => Point::new(centre.x, host.top() + inset),
                _ => Point::new(centre.x, host.bottom() - inset),
            };
            HotZone {
                rect: Rect::centred_at(at, Size::new(size, size)),
                site: DropSite::RootEdge(site),
            }
        })
        .collect()
}

/// First zone under `point`
pub fn hit(zones: &[HotZone], point: Point) -> Option<DropSite> {
    zones
        .iter()
        .find(|z| z.rect.contains_point(point))
        .map(|z| z.site)
}
