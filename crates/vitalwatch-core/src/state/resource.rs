// ── Single-resource containers ──

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{LoadState, Mount};
use crate::console::Console;
use crate::error::CoreError;
use crate::model::{DeviceUuid, HealthSeries, TimeRange, UserDetail, UserId};

#[derive(Debug, Clone)]
pub struct ResourceSnapshot<T> {
    pub state: LoadState,
    /// Last successfully loaded value; cleared when a fetch fails.
    pub value: Option<T>,
}

/// One fetched value behind the Idle → Loading → Loaded | Failed machine.
pub struct Resource<T> {
    state: watch::Sender<ResourceSnapshot<T>>,
    mount: Mount,
    generation: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> Default for Resource<T> {
    fn default() -> Self {
        Self::with_mount(Mount::new())
    }
}

impl<T: Clone + Send + Sync + 'static> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a mount guard with sibling containers of the same view.
    pub fn with_mount(mount: Mount) -> Self {
        let (state, _) = watch::channel(ResourceSnapshot {
            state: LoadState::Idle,
            value: None,
        });
        Self {
            state,
            mount,
            generation: AtomicU64::new(0),
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceSnapshot<T>> {
        self.state.subscribe()
    }

    pub fn value(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    /// Drive `fetch` and publish its outcome, unless the view was
    /// unmounted or a newer load started meanwhile.
    pub async fn load<Fut>(&self, fetch: Fut)
    where
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if !self.mount.is_mounted() {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|snap| snap.state = LoadState::Loading);

        let result = fetch.await;

        if !self.mount.is_mounted() {
            debug!("view unmounted, discarding result");
            return;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("newer load in flight, discarding result");
            return;
        }

        match result {
            Ok(value) => self.state.send_modify(|snap| {
                snap.value = Some(value);
                snap.state = LoadState::Loaded;
            }),
            Err(e) => {
                warn!(error = %e, "failed to load resource");
                self.state.send_modify(|snap| {
                    snap.value = None;
                    snap.state = LoadState::Failed {
                        message: e.to_string(),
                    };
                });
            }
        }
    }
}

// ── User detail view ────────────────────────────────────────────────

/// Profile + devices and a health series for one user.
///
/// The two halves load independently and in no particular order; both
/// share one mount guard.
pub struct UserDetailPage {
    console: Console,
    user_id: UserId,
    pub profile: Resource<Option<UserDetail>>,
    pub health: Resource<HealthSeries>,
}

impl UserDetailPage {
    pub fn new(console: Console, user_id: UserId) -> Self {
        let mount = Mount::new();
        Self {
            console,
            user_id,
            profile: Resource::with_mount(mount.clone()),
            health: Resource::with_mount(mount),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn mount(&self) -> &Mount {
        self.profile.mount()
    }

    pub async fn load_profile(&self) {
        self.profile
            .load(self.console.user_detail(self.user_id))
            .await;
    }

    /// Reload the series for `range`, e.g. after the range selector changes.
    pub async fn load_health(&self, device: &DeviceUuid, range: TimeRange, now: DateTime<Utc>) {
        self.health
            .load(self.console.user_health(self.user_id, device, range, now))
            .await;
    }

    /// Run both loads concurrently.
    pub async fn load(&self, device: Option<&DeviceUuid>, range: TimeRange, now: DateTime<Utc>) {
        match device {
            Some(device) => {
                tokio::join!(self.load_profile(), self.load_health(device, range, now));
            }
            None => self.load_profile().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resource_settles_loaded_or_failed() {
        let res: Resource<u32> = Resource::new();
        assert_eq!(res.snapshot().state, LoadState::Idle);

        res.load(async { Ok(7) }).await;
        assert_eq!(res.value(), Some(7));
        assert_eq!(res.snapshot().state, LoadState::Loaded);

        res.load(async { Err(CoreError::Timeout) }).await;
        let snap = res.snapshot();
        assert_eq!(snap.value, None);
        assert!(matches!(snap.state, LoadState::Failed { .. }));
    }

    #[tokio::test]
    async fn unmounted_resource_ignores_loads() {
        let res: Resource<u32> = Resource::new();
        res.mount().unmount();
        res.load(async { Ok(1) }).await;
        assert_eq!(res.snapshot().state, LoadState::Idle);
        assert_eq!(res.value(), None);
    }

    #[tokio::test]
    async fn sibling_resources_share_a_mount() {
        let mount = Mount::new();
        let a: Resource<u32> = Resource::with_mount(mount.clone());
        let b: Resource<String> = Resource::with_mount(mount);
        a.mount().unmount();
        b.load(async { Ok("late".to_owned()) }).await;
        assert_eq!(b.value(), None);
    }
}
