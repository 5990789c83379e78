//! Dock sites and addresses
//!
//! A `DockSite` names one of the five child slots of a branch. The ordinal
//! order of the variants is load-bearing: higher ordinals take precedence when
//! a branch's area is subdivided (see `DockSizeData::child_bounds`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a child within a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DockSite {
    Centre = 0,
    Left = 1,
    Right = 2,
    Top = 3,
    Bottom = 4,
    None = 5,
}

impl DockSite {
    /// The five real slots, in ordinal order
    pub const SLOTS: [DockSite; 5] = [
        DockSite::Centre,
        DockSite::Left,
        DockSite::Right,
        DockSite::Top,
        DockSite::Bottom,
    ];

    /// The four edge slots, in ordinal order
    pub const EDGES: [DockSite; 4] = [
        DockSite::Left,
        DockSite::Right,
        DockSite::Top,
        DockSite::Bottom,
    ];

    /// Ordinal value (Centre=0 .. None=5)
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Site for a slot index, `None` for anything out of range
    pub fn from_ordinal(index: usize) -> DockSite {
        match index {
            0 => DockSite::Centre,
            1 => DockSite::Left,
            2 => DockSite::Right,
            3 => DockSite::Top,
            4 => DockSite::Bottom,
            _ => DockSite::None,
        }
    }

    /// True for Left/Right/Top/Bottom
    #[inline]
    pub fn is_edge(self) -> bool {
        !matches!(self, DockSite::Centre | DockSite::None)
    }

    /// The site on the other side of the branch
    pub fn opposite(self) -> DockSite {
        match self {
            DockSite::Left => DockSite::Right,
            DockSite::Right => DockSite::Left,
            DockSite::Top => DockSite::Bottom,
            DockSite::Bottom => DockSite::Top,
            other => other,
        }
    }

    /// Mask bit for this site
    pub fn mask(self) -> DockMask {
        match self {
            DockSite::Centre => DockMask::CENTRE,
            DockSite::Left => DockMask::LEFT,
            DockSite::Right => DockMask::RIGHT,
            DockSite::Top => DockMask::TOP,
            DockSite::Bottom => DockMask::BOTTOM,
            DockSite::None => DockMask::empty(),
        }
    }
}

impl fmt::Display for DockSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DockSite::Centre => "Centre",
            DockSite::Left => "Left",
            DockSite::Right => "Right",
            DockSite::Top => "Top",
            DockSite::Bottom => "Bottom",
            DockSite::None => "None",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// Set of populated slots in a branch
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DockMask: u8 {
        const CENTRE = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const BOTTOM = 1 << 4;
    }
}

impl DockMask {
    /// True if the slot for `site` is in the mask
    #[inline]
    pub fn has(self, site: DockSite) -> bool {
        site != DockSite::None && self.contains(site.mask())
    }
}

/// Path of sites from a tree root to a node
///
/// The empty address refers to the root branch itself. When used for
/// placement, the walk continues down any chain of branches in Centre slots
/// once the explicit sites run out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DockAddress(pub Vec<DockSite>);

impl DockAddress {
    pub fn new(sites: impl Into<Vec<DockSite>>) -> Self {
        Self(sites.into())
    }

    /// The root address
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn sites(&self) -> &[DockSite] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<DockSite> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<DockSite> {
        self.0.last().copied()
    }

    /// A copy of this address extended by one site
    pub fn child(&self, site: DockSite) -> Self {
        let mut sites = self.0.clone();
        sites.push(site);
        Self(sites)
    }

    pub fn push(&mut self, site: DockSite) {
        self.0.push(site);
    }

    pub fn pop(&mut self) -> Option<DockSite> {
        self.0.pop()
    }

    /// The address with its last site removed
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// True if `other` starts with this address
    pub fn is_prefix_of(&self, other: &DockAddress) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<DockSite>> for DockAddress {
    fn from(sites: Vec<DockSite>) -> Self {
        Self(sites)
    }
}

impl<const N: usize> From<[DockSite; N]> for DockAddress {
    fn from(sites: [DockSite; N]) -> Self {
        Self(sites.to_vec())
    }
}

impl fmt::Display for DockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, site) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", site)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_order() {
        assert!(DockSite::Centre < DockSite::Left);
        assert!(DockSite::Left < DockSite::Right);
        assert!(DockSite::Right < DockSite::Top);
        assert!(DockSite::Top < DockSite::Bottom);
        assert!(DockSite::Bottom < DockSite::None);
        for (i, site) in DockSite::SLOTS.iter().enumerate() {
            assert_eq!(site.ordinal(), i);
            assert_eq!(DockSite::from_ordinal(i), *site);
        }
        assert_eq!(DockSite::from_ordinal(9), DockSite::None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(DockSite::Left.opposite(), DockSite::Right);
        assert_eq!(DockSite::Top.opposite(), DockSite::Bottom);
        assert_eq!(DockSite::Centre.opposite(), DockSite::Centre);
    }

    #[test]
    fn test_mask_has() {
        let mask = DockSite::Left.mask() | DockSite::Bottom.mask();
        assert!(mask.has(DockSite::Left));
        assert!(mask.has(DockSite::Bottom));
        assert!(!mask.has(DockSite::Top));
        assert!(!mask.has(DockSite::None));
    }

    #[test]
    fn test_address_display_and_prefix() {
        let addr = DockAddress::from([DockSite::Left, DockSite::Top]);
        assert_eq!(addr.to_string(), "Left/Top");
        assert_eq!(DockAddress::root().to_string(), "<root>");
        assert!(DockAddress::from([DockSite::Left]).is_prefix_of(&addr));
        assert!(!DockAddress::from([DockSite::Right]).is_prefix_of(&addr));
        assert_eq!(addr.child(DockSite::Centre).len(), 3);
    }

    #[test]
    fn test_address_serializes_as_list() {
        let addr = DockAddress::from([DockSite::Centre, DockSite::Bottom]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, r#"["Centre","Bottom"]"#);
    }
}
