//! Error types for dock operations
//!
//! Precondition violations are reported to the caller as `DockError`.
//! Lookups that simply find nothing return `Option` instead.

use thiserror::Error;

use crate::model::{BranchId, ContentId, DockAddress, FloatingId, HostId, PaneId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DockError {
    #[error("content {0:?} is not registered with this container")]
    UnknownContent(ContentId),

    #[error("content {0:?} is not placed in any pane")]
    ContentNotPlaced(ContentId),

    #[error("pane {0:?} does not exist")]
    UnknownPane(PaneId),

    #[error("branch {0:?} does not exist")]
    UnknownBranch(BranchId),

    #[error("host {0:?} does not exist")]
    UnknownHost(HostId),

    #[error("floating window {0:?} does not exist")]
    UnknownFloating(FloatingId),

    #[error("pane {pane:?} does not belong to host {host:?}")]
    PaneNotInHost { pane: PaneId, host: HostId },

    #[error("invalid dock address {address}: {reason}")]
    InvalidAddress {
        address: DockAddress,
        reason: &'static str,
    },

    #[error("dock address {address} has {depth} sites, limit is {max}")]
    AddressTooDeep {
        address: DockAddress,
        depth: usize,
        max: usize,
    },

    #[error("a content item named {0:?} is already registered")]
    DuplicatePersistName(String),

    #[error("host {0:?} is locked by a drag gesture")]
    GestureInProgress(HostId),

    #[error("no drag gesture is in progress")]
    NoGesture,

    #[error("rectangle difference is not a rectangle")]
    NonRectangularSubtraction,

    #[error("layout version {found} is newer than supported version {supported}")]
    UnsupportedLayoutVersion { found: u32, supported: u32 },
}

pub type DockResult<T> = Result<T, DockError>;
