//! Per-user tracking state.

use std::fmt;

/// Where a user's location-sharing session is in its lifecycle.
///
/// ```text
/// Disabled ──enable──▶ RequestingPermission ──granted──▶ Tracking
///    ▲                        │                             │
///    │                        ├─denied──▶ PermissionDenied ─┤
///    └────────────────────────┴──────────── disable / fatal ┘
/// ```
///
/// `RequestingPermission` and `PermissionDenied` are transient: they are
/// reported to observers during `enable_tracking`, and the session settles
/// in `Tracking` or `Disabled` before the call returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TrackerState {
    #[default]
    Disabled,
    RequestingPermission,
    Tracking,
    PermissionDenied,
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackerState::Disabled             => "disabled",
            TrackerState::RequestingPermission => "requesting-permission",
            TrackerState::Tracking             => "tracking",
            TrackerState::PermissionDenied     => "permission-denied",
        };
        f.write_str(s)
    }
}
