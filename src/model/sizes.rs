//! Edge sizes for a branch and the rectangle subdivision algorithm
//!
//! Each branch stores one magnitude per edge. Values `>= 1` are pixels,
//! values `< 1` are fractions of the available width/height. The Centre
//! slot always receives whatever is left over, but never less than a
//! minimum size; the edges shrink to make room for it.

use serde::{Deserialize, Serialize};

use super::rect::{Rect, Size};
use super::site::{DockMask, DockSite};
use crate::error::DockResult;

/// Default minimum size reserved for the Centre region on each axis
pub const DEFAULT_CENTRE_MIN: f32 = 20.0;

/// Per-branch edge magnitudes (pixels if `>= 1`, fraction otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockSizeData {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Resolved edge thicknesses in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for DockSizeData {
    fn default() -> Self {
        Self::QUARTERS
    }
}

impl DockSizeData {
    /// Every edge takes a quarter of the available size
    pub const QUARTERS: DockSizeData = DockSizeData::uniform(0.25);

    /// Every edge takes half of the available size
    pub const HALVES: DockSizeData = DockSizeData::uniform(0.5);

    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Sizing used for a branch grown into `site`
    pub fn for_growth(site: DockSite) -> Self {
        if site == DockSite::Centre {
            Self::QUARTERS
        } else {
            Self::HALVES
        }
    }

    /// Stored magnitude for an edge site (0 for Centre/None)
    pub fn get(&self, site: DockSite) -> f32 {
        match site {
            DockSite::Left => self.left,
            DockSite::Top => self.top,
            DockSite::Right => self.right,
            DockSite::Bottom => self.bottom,
            DockSite::Centre | DockSite::None => 0.0,
        }
    }

    /// Set the magnitude for an edge site. Negative values are clamped to 0.
    pub fn set(&mut self, site: DockSite, value: f32) {
        let value = value.max(0.0);
        match site {
            DockSite::Left => self.left = value,
            DockSite::Top => self.top = value,
            DockSite::Right => self.right = value,
            DockSite::Bottom => self.bottom = value,
            DockSite::Centre | DockSite::None => {}
        }
    }

    /// Store a new pixel thickness for `site`, keeping the edge in its
    /// current unit: fractional edges stay fractional relative to `available`.
    pub fn set_pixels(&mut self, site: DockSite, pixels: f32, available: Rect) {
        let pixels = pixels.max(0.0);
        let current = self.get(site);
        if current >= 1.0 {
            self.set(site, pixels.max(1.0));
            return;
        }
        let dimension = match site {
            DockSite::Left | DockSite::Right => available.width,
            DockSite::Top | DockSite::Bottom => available.height,
            DockSite::Centre | DockSite::None => return,
        };
        if dimension <= 0.0 {
            return;
        }
        // Keep the value strictly below 1 so it is still read as a fraction
        self.set(site, (pixels / dimension).min(0.999));
    }

    /// Resolve the edge thicknesses for `rect`, given which edges are
    /// populated. The Centre keeps at least `centre_min` (or the default
    /// minimum) on each axis; overage is taken from the edges, split evenly
    /// when both edges on an axis are populated.
    pub fn edge_sizes(&self, rect: Rect, docked: DockMask, centre_min: Option<Size>) -> EdgeSizes {
        let min = centre_min.unwrap_or(Size::new(DEFAULT_CENTRE_MIN, DEFAULT_CENTRE_MIN));

        let resolve = |site: DockSite, value: f32, dimension: f32| -> f32 {
            if !docked.has(site) {
                0.0
            } else if value >= 1.0 {
                value
            } else {
                value * dimension
            }
        };

        let (left, right) = fit_axis(
            resolve(DockSite::Left, self.left, rect.width),
            resolve(DockSite::Right, self.right, rect.width),
            rect.width - min.width,
        );
        let (top, bottom) = fit_axis(
            resolve(DockSite::Top, self.top, rect.height),
            resolve(DockSite::Bottom, self.bottom, rect.height),
            rect.height - min.height,
        );

        EdgeSizes {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Bounds of the child at `site` within `rect`.
    ///
    /// Each edge gets a full-span strip of its thickness; the strips of every
    /// populated site with a higher ordinal are then subtracted, highest
    /// first. Bottom/Top therefore win over Left/Right, which win over Centre,
    /// and no two populated sites overlap.
    pub fn child_bounds(
        &self,
        site: DockSite,
        rect: Rect,
        docked: DockMask,
        centre_min: Option<Size>,
    ) -> DockResult<Rect> {
        let sizes = self.edge_sizes(rect, docked, centre_min);
        let mut bounds = strip(site, rect, &sizes);

        for higher in DockSite::SLOTS.iter().rev() {
            if *higher <= site {
                break;
            }
            if docked.has(*higher) {
                bounds = bounds.subtract(&strip(*higher, rect, &sizes))?;
            }
        }
        Ok(bounds)
    }
}

/// Shrink a pair of opposite edges so that `near + far <= available`
fn fit_axis(near: f32, far: f32, available: f32) -> (f32, f32) {
    let remaining = available - near - far;
    if remaining >= 0.0 {
        return (near, far);
    }
    if near != 0.0 && far != 0.0 {
        (near + remaining / 2.0, far + remaining / 2.0)
    } else if near != 0.0 {
        (near + remaining, far)
    } else {
        (near, far + remaining)
    }
}

/// The unclipped strip for `site`
fn strip(site: DockSite, rect: Rect, sizes: &EdgeSizes) -> Rect {
    match site {
        DockSite::Centre | DockSite::None => rect,
        DockSite::Left => Rect::new(rect.x, rect.y, sizes.left, rect.height),
        DockSite::Right => Rect::new(rect.right() - sizes.right, rect.y, sizes.right, rect.height),
        DockSite::Top => Rect::new(rect.x, rect.y, rect.width, sizes.top),
        DockSite::Bottom => Rect::new(rect.x, rect.bottom() - sizes.bottom, rect.width, sizes.bottom),
    }
}
