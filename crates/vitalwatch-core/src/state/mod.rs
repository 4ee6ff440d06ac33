// ── Per-view state containers ──
//
// Every list or detail view owns one container. Containers publish
// snapshots through `watch` channels and share the same load machine:
// Idle → Loading → Loaded | Failed. Results that arrive after the view
// is unmounted are dropped on the floor.

mod alerts;
mod filter;
mod list;
mod page;
mod resource;

use serde::Serialize;
use tokio_util::sync::{CancellationToken, DropGuard};

pub use alerts::AlertBoard;
pub use filter::{AlertFilter, DeviceFilter, Filter, UserFilter};
pub use list::{ListView, Pager};
pub use page::{ListPage, ListSnapshot, PageFuture, PageLoader};
pub use resource::{Resource, ResourceSnapshot, UserDetailPage};

/// Fetch lifecycle of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the view shows an empty dataset.
    Failed { message: String },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed { .. })
    }
}

/// "Is this view still mounted?"
///
/// Cloning shares the underlying token, so a detail view can hand the
/// same guard to each of its containers.
#[derive(Debug, Clone, Default)]
pub struct Mount(CancellationToken);

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.0.is_cancelled()
    }

    /// Mark the view as gone. In-flight fetches still complete, but
    /// their results are discarded.
    pub fn unmount(&self) {
        self.0.cancel();
    }

    /// Unmount automatically when the returned guard is dropped.
    pub fn unmount_on_drop(&self) -> DropGuard {
        self.0.clone().drop_guard()
    }

    /// Resolves once the view is unmounted.
    pub async fn unmounted(&self) {
        self.0.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_clones_share_state() {
        let mount = Mount::new();
        let other = mount.clone();
        assert!(other.is_mounted());
        mount.unmount();
        assert!(!other.is_mounted());
    }

    #[test]
    fn drop_guard_unmounts() {
        let mount = Mount::new();
        {
            let _guard = mount.unmount_on_drop();
            assert!(mount.is_mounted());
        }
        assert!(!mount.is_mounted());
    }
}
