//! Debounced, paginated listing controller.
//!
//! # Design
//! - `set_filter` edits the live filter state immediately; the debounce stage
//!   forwards it to the debounced signal once input has been quiet.
//! - A driver task watches the debounced signal and issues one fetch per change.
//!   Each fetch task is mapped to a sequence number and only the latest issued
//!   request may update the view; older responses and older task failures are
//!   dropped when they arrive.
//! - The previous page stays visible while a new one loads.
//! - Dropping the controller aborts the driver, every in-flight fetch and the
//!   pending debounce timer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use atelier_core::{
    CoreError, CoreResult, FetchRequest, FilterPatch, FilterState, ResultFetcher, ResultPage,
};
use atelier_telemetry::{Metrics, with_view_context};
use tokio::sync::{Notify, watch};
use tokio::task::{self, JoinHandle, JoinSet};
use tracing::{debug, warn};

use crate::core::debounce::Debouncer;
use crate::core::signal::Signal;

/// Default quiet window before filter edits are fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
/// Default page size.
pub const DEFAULT_LIMIT: u32 = 60;

/// Tuning for one listing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Surface name used in logs and metrics (e.g. `vault`).
    pub surface: &'static str,
    /// Debounce window.
    pub debounce: Duration,
    /// Page size sent with every fetch.
    pub limit: u32,
}

impl ListingOptions {
    /// Defaults for `surface`.
    #[must_use]
    pub const fn new(surface: &'static str) -> Self {
        Self {
            surface,
            debounce: DEFAULT_DEBOUNCE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override the debounce window.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// What a listing surface renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<T> {
    /// Latest page, kept while a newer one loads.
    pub page: Option<ResultPage<T>>,
    /// Whether the latest issued fetch is outstanding.
    pub is_loading: bool,
    /// Failure message from the latest fetch.
    pub error: Option<String>,
}

impl<T> Default for ResultView<T> {
    fn default() -> Self {
        Self {
            page: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> ResultView<T> {
    /// Items of the current page, empty before the first response.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.page
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    /// Whether the first page is still loading.
    #[must_use]
    pub const fn is_initial_load(&self) -> bool {
        self.is_loading && self.page.is_none()
    }
}

type Filters<F> = FilterState<<F as ResultFetcher>::Sort, <F as ResultFetcher>::Kind>;
type FetchOutcome<T> = CoreResult<ResultPage<T>>;

/// Controller owning the filter state, debounce stage and fetch driver of one view.
pub struct ListingController<F: ResultFetcher> {
    options: ListingOptions,
    filters: Signal<Filters<F>>,
    debouncer: Debouncer<Filters<F>>,
    view: Signal<ResultView<F::Item>>,
    refresh: Arc<Notify>,
    driver: JoinHandle<()>,
}

impl<F: ResultFetcher> ListingController<F> {
    /// Mount a controller and issue the initial fetch for `initial`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount(
        fetcher: Arc<F>,
        initial: Filters<F>,
        options: ListingOptions,
        metrics: Metrics,
    ) -> Self {
        let filters = Signal::new(initial.clone());
        let debounced = Signal::new(initial);
        let view = Signal::new(ResultView::default());
        let refresh = Arc::new(Notify::new());

        let driver = FetchDriver {
            fetcher,
            surface: options.surface,
            limit: options.limit,
            view: view.clone(),
            metrics,
            issued: 0,
            in_flight: HashMap::new(),
        };
        let driver = tokio::spawn(driver.run(debounced.watch(), Arc::clone(&refresh)));
        debug!(surface = options.surface, "listing controller mounted");

        Self {
            options,
            filters,
            debouncer: Debouncer::new(options.debounce, debounced),
            view,
            refresh,
            driver,
        }
    }

    /// Merge `patch` into the live filters and schedule a debounced fetch.
    ///
    /// Returns `true` when the live filters changed.
    #[must_use]
    pub fn set_filter(&self, patch: FilterPatch<F::Sort, F::Kind>) -> bool {
        let changed = self.filters.update(|state| state.apply(patch));
        let current = self.filters.get();
        if self.debouncer.target().with(|debounced| *debounced == current) {
            self.debouncer.cancel();
        } else {
            self.debouncer.push(current.clone());
        }
        if changed {
            debug!(
                surface = self.options.surface,
                page = current.page,
                query = ?current.query,
                sort = ?current.sort,
                "listing filters changed"
            );
        }
        changed
    }

    /// Navigate to `page`.
    #[must_use]
    pub fn set_page(&self, page: u32) -> bool {
        self.set_filter(FilterPatch::new().page(page))
    }

    /// Re-fetch the current debounced filters.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Live filter state.
    #[must_use]
    pub fn filters(&self) -> Filters<F> {
        self.filters.get()
    }

    /// Filter state the latest fetch was issued for.
    #[must_use]
    pub fn debounced_filters(&self) -> Filters<F> {
        self.debouncer.target().get()
    }

    /// Current result view.
    #[must_use]
    pub fn view(&self) -> ResultView<F::Item> {
        self.view.get()
    }

    /// Observable live filters.
    #[must_use]
    pub const fn filters_signal(&self) -> &Signal<Filters<F>> {
        &self.filters
    }

    /// Observable debounced filters.
    #[must_use]
    pub const fn debounced_signal(&self) -> &Signal<Filters<F>> {
        self.debouncer.target()
    }

    /// Observable result view.
    #[must_use]
    pub const fn view_signal(&self) -> &Signal<ResultView<F::Item>> {
        &self.view
    }

    /// Whether a debounced update is waiting for its quiet window.
    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Surface options.
    #[must_use]
    pub const fn options(&self) -> &ListingOptions {
        &self.options
    }

    /// Tear the controller down; equivalent to dropping it.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<F: ResultFetcher> Drop for ListingController<F> {
    fn drop(&mut self) {
        self.debouncer.cancel();
        self.driver.abort();
        debug!(surface = self.options.surface, "listing controller disposed");
    }
}

struct FetchDriver<F: ResultFetcher> {
    fetcher: Arc<F>,
    surface: &'static str,
    limit: u32,
    view: Signal<ResultView<F::Item>>,
    metrics: Metrics,
    issued: u64,
    in_flight: HashMap<task::Id, u64>,
}

impl<F: ResultFetcher> FetchDriver<F> {
    async fn run(mut self, mut debounced: watch::Receiver<Filters<F>>, refresh: Arc<Notify>) {
        let mut fetches: JoinSet<FetchOutcome<F::Item>> = JoinSet::new();
        let initial = debounced.borrow_and_update().clone();
        self.issue(&mut fetches, initial);

        loop {
            tokio::select! {
                changed = debounced.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let filters = debounced.borrow_and_update().clone();
                    self.issue(&mut fetches, filters);
                }
                () = refresh.notified() => {
                    let filters = debounced.borrow().clone();
                    self.issue(&mut fetches, filters);
                }
                Some(joined) = fetches.join_next_with_id() => match joined {
                    Ok((id, result)) => {
                        let seq = self.finish(id);
                        self.apply(seq, result);
                    }
                    Err(err) => {
                        let seq = self.finish(err.id());
                        warn!(
                            surface = self.surface,
                            seq,
                            error = %err,
                            "listing fetch task ended abnormally"
                        );
                        let failure = CoreError::failed("listing.fetch", err.to_string());
                        self.apply(seq, Err(failure));
                    }
                },
            }
        }
    }

    fn issue(&mut self, fetches: &mut JoinSet<FetchOutcome<F::Item>>, filters: Filters<F>) {
        self.issued += 1;
        let seq = self.issued;
        self.view.modify(|view| !std::mem::replace(&mut view.is_loading, true));
        self.metrics.inc_listing_fetch(self.surface);
        debug!(
            surface = self.surface,
            seq,
            page = filters.page,
            query = ?filters.query,
            "listing fetch issued"
        );

        let fetcher = Arc::clone(&self.fetcher);
        let request = FetchRequest {
            filters,
            limit: self.limit,
        };
        let handle = fetches.spawn(with_view_context(self.surface, async move {
            fetcher.fetch(request).await
        }));
        self.in_flight.insert(handle.id(), seq);
    }

    /// Sequence number of a joined task. Unknown tasks count as stale.
    fn finish(&mut self, id: task::Id) -> u64 {
        self.in_flight.remove(&id).unwrap_or(0)
    }

    fn apply(&self, seq: u64, result: CoreResult<ResultPage<F::Item>>) {
        if seq < self.issued {
            self.metrics.inc_listing_stale(self.surface);
            debug!(
                surface = self.surface,
                seq,
                latest = self.issued,
                "stale listing response dropped"
            );
            return;
        }
        match result {
            Ok(page) => {
                debug!(
                    surface = self.surface,
                    seq,
                    items = page.items.len(),
                    total_items = page.total_items,
                    "listing page received"
                );
                self.view.set(ResultView {
                    page: Some(page),
                    is_loading: false,
                    error: None,
                });
            }
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&self, err: &CoreError) {
        self.metrics.inc_listing_failure(self.surface);
        warn!(
            surface = self.surface,
            operation = err.operation(),
            error = %err,
            "listing fetch failed"
        );
        let message = err.to_string();
        self.view.modify(|view| {
            view.is_loading = false;
            view.error = Some(message);
            true
        });
    }
}
