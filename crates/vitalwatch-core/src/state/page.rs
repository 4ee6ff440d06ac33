// ── Server-paged list container ──

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};
use vitalwatch_api::types::{Page, PageRequest};

use super::filter::Filter;
use super::list::{ListView, Pager};
use super::{LoadState, Mount};
use crate::error::CoreError;

/// Boxed future returned by a [`PageLoader`].
pub type PageFuture<T> = Pin<Box<dyn Future<Output = Result<Page<T>, CoreError>> + Send>>;

/// Fetches one page of rows.
pub type PageLoader<T> = Arc<dyn Fn(PageRequest) -> PageFuture<T> + Send + Sync>;

/// What a list view renders at a point in time.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T, F> {
    pub state: LoadState,
    pub view: ListView<T, F>,
    /// `None` until the first page lands.
    pub pager: Option<Pager>,
    /// The request behind the current (or in-flight) page.
    pub request: PageRequest,
}

/// A list page: server-driven pagination with page-local filters.
///
/// Changing the page refetches; changing the filter only recomputes the
/// visible rows. A failed fetch settles in [`LoadState::Failed`] with an
/// empty dataset. When two loads overlap, only the most recent one is
/// applied.
pub struct ListPage<T, F> {
    loader: PageLoader<T>,
    state: watch::Sender<ListSnapshot<T, F>>,
    mount: Mount,
    generation: AtomicU64,
}

impl<T, F> ListPage<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: Filter<T> + Clone + Send + Sync + 'static,
{
    pub fn new(loader: PageLoader<T>, request: PageRequest, filter: F) -> Self {
        let (state, _) = watch::channel(ListSnapshot {
            state: LoadState::Idle,
            view: ListView::new(Vec::new(), filter),
            pager: None,
            request,
        });
        Self {
            loader,
            state,
            mount: Mount::new(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Current snapshot (cloned).
    pub fn snapshot(&self) -> ListSnapshot<T, F> {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T, F>> {
        self.state.subscribe()
    }

    /// Fetch the page named by the current request.
    pub async fn load(&self) {
        let request = self.state.borrow().request.clone();
        self.fetch(request).await;
    }

    /// Jump to `page` (zero-based) and refetch.
    pub async fn go_to_page(&self, page: u32) {
        let request = self.state.borrow().request.at(page);
        self.fetch(request).await;
    }

    /// Advance one page. Returns `false` without fetching on the last page.
    pub async fn next_page(&self) -> bool {
        let next = self.state.borrow().pager.and_then(|p| p.next());
        match next {
            Some(page) => {
                self.go_to_page(page).await;
                true
            }
            None => false,
        }
    }

    /// Go back one page. Returns `false` without fetching on page 0.
    pub async fn previous_page(&self) -> bool {
        let previous = self.state.borrow().pager.and_then(|p| p.previous());
        match previous {
            Some(page) => {
                self.go_to_page(page).await;
                true
            }
            None => false,
        }
    }

    /// Replace the filter. Never refetches.
    pub fn set_filter(&self, filter: F) {
        if !self.mount.is_mounted() {
            return;
        }
        self.state.send_modify(|snap| snap.view.set_filter(filter));
    }

    /// Mutate the fetched rows in place (optimistic local edits).
    pub(crate) fn update_items(&self, f: impl FnOnce(&mut [T])) {
        if !self.mount.is_mounted() {
            return;
        }
        self.state.send_modify(|snap| snap.view.update_items(f));
    }

    async fn fetch(&self, request: PageRequest) {
        if !self.mount.is_mounted() {
            debug!("list view unmounted, skipping fetch");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|snap| {
            snap.state = LoadState::Loading;
            snap.request = request.clone();
        });

        let result = (self.loader)(request.clone()).await;

        if !self.mount.is_mounted() {
            debug!(page = request.page, "list view unmounted, discarding result");
            return;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(page = request.page, "newer page request in flight, discarding result");
            return;
        }

        match result {
            Ok(page) => {
                let pager = Pager::from_page(&page);
                self.state.send_modify(|snap| {
                    snap.view.set_items(page.content);
                    snap.pager = Some(pager);
                    snap.state = LoadState::Loaded;
                });
            }
            Err(e) => {
                warn!(page = request.page, error = %e, "failed to load list page");
                self.state.send_modify(|snap| {
                    snap.view.set_items(Vec::new());
                    // Keep the known totals but point at the page that failed.
                    snap.pager = snap.pager.map(|p| Pager {
                        page: request.page,
                        ..p
                    });
                    snap.state = LoadState::Failed {
                        message: e.to_string(),
                    };
                });
            }
        }
    }
}
