mod state;

pub use state::EngineSnapshot;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use castdex_model::{CatalogFilter, CatalogPage, PageNumber};

use crate::bridge::UrlStateBridge;
use crate::client::{CatalogClient, FetchError};
use crate::error::EngineError;
use crate::scroll::ScrollTrigger;
use crate::sink::ErrorSink;
use state::EngineState;

/// Tuning for the query engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet window for coalescing rapid filter edits, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

enum Command {
    SetFilter(CatalogFilter),
    AdvancePage,
    Reset,
    Settled {
        generation: u64,
        append: bool,
        result: Result<CatalogPage, FetchError>,
    },
}

/// Handle to the query-state engine.
///
/// The engine reconciles filter edits, page advances and externally
/// persisted state into one serialized stream of catalog fetches. All
/// operations enqueue onto a single worker task, so callers never block and
/// state mutation is race free. Must be created inside a tokio runtime.
///
/// Dropping the handle (or calling [`QueryEngine::shutdown`]) tears the
/// worker down and aborts whatever fetch is still in flight; no state
/// mutation happens afterwards.
pub struct QueryEngine {
    tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<EngineSnapshot>,
    cancel: CancellationToken,
}

impl QueryEngine {
    /// Spawn the worker with injected collaborators.
    ///
    /// The initial `(filter, page)` pair is read from `bridge` and the first
    /// fetch is issued immediately.
    pub fn spawn(
        client: Arc<dyn CatalogClient>,
        bridge: Arc<dyn UrlStateBridge>,
        sink: Arc<dyn ErrorSink>,
        config: EngineConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let (filter, page) = bridge.read_initial();
        let state = EngineState::new(filter.normalized(), page);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let worker = Worker {
            client,
            bridge,
            sink,
            state,
            rx,
            tx: tx.clone(),
            snapshot_tx,
            cancel: cancel.clone(),
            debounce: Duration::from_millis(config.debounce_ms),
            pending: None,
            fetch_cancel: cancel.child_token(),
        };
        tokio::spawn(worker.run());

        Self {
            tx,
            snapshot_rx,
            cancel,
        }
    }

    /// Request a filter change.
    ///
    /// Rapid successive calls within the debounce window collapse to the
    /// last value; applying a filter structurally equal to the effective one
    /// is a no-op.
    pub fn set_filter(&self, filter: CatalogFilter) -> Result<(), EngineError> {
        self.send(Command::SetFilter(filter))
    }

    /// Request the next page. Ignored while a load is in flight or when the
    /// catalog has no further pages for the current filter.
    pub fn advance_page(&self) -> Result<(), EngineError> {
        self.send(Command::AdvancePage)
    }

    /// Restore the canonical empty filter immediately, bypassing (and
    /// clearing) any pending debounced edit.
    pub fn reset(&self) -> Result<(), EngineError> {
        self.send(Command::Reset)
    }

    /// Current consumer-facing state.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch channel following every state change.
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Install a page-advance handler on a scroll trigger. Duplicate or
    /// bouncing signals are safe: the advance path is guarded.
    pub fn bind_scroll_trigger(&self, trigger: &mut dyn ScrollTrigger) {
        let tx = self.tx.clone();
        trigger.on_intersect(Box::new(move || {
            let _ = tx.send(Command::AdvancePage);
        }));
    }

    /// Tear the worker down. In-flight fetches are aborted and later handle
    /// calls return [`EngineError::Closed`].
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn send(&self, cmd: Command) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::Closed);
        }
        self.tx.send(cmd).map_err(|_| EngineError::Closed)
    }
}

impl Drop for QueryEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Worker {
    client: Arc<dyn CatalogClient>,
    bridge: Arc<dyn UrlStateBridge>,
    sink: Arc<dyn ErrorSink>,
    state: EngineState,
    rx: mpsc::UnboundedReceiver<Command>,
    tx: mpsc::UnboundedSender<Command>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
    cancel: CancellationToken,
    debounce: Duration,
    /// Debounced filter edit waiting for its quiet window to elapse.
    pending: Option<(CatalogFilter, Instant)>,
    /// Token of the in-flight fetch, cancelled when superseded.
    fetch_cancel: CancellationToken,
}

impl Worker {
    async fn run(mut self) {
        let cancel = self.cancel.clone();

        // Initial load from the persisted (filter, page) pair.
        let (filter, page) = (self.state.filter().clone(), self.state.page());
        self.refresh(filter, page);

        loop {
            let deadline = self.pending.as_ref().map(|(_, at)| *at);
            tokio::select! {
                _ = cancel.cancelled() => break,
                cmd = self.rx.recv() => match cmd {
                    Some(cmd) => self.handle(cmd),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((filter, _)) = self.pending.take() {
                        self.apply_filter(filter);
                    }
                }
            }
        }

        // Teardown: nothing past this point may mutate state.
        self.cancel.cancel();
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::SetFilter(filter) => {
                let filter = filter.normalized();
                self.pending = Some((filter, Instant::now() + self.debounce));
            }
            Command::Reset => {
                self.pending = None;
                let empty = CatalogFilter::empty();
                if *self.state.filter() == empty && self.state.page() == 1 {
                    debug!("already at canonical state, skipping reset fetch");
                } else {
                    self.refresh(empty, 1);
                }
            }
            Command::AdvancePage => self.advance(),
            Command::Settled {
                generation,
                append,
                result,
            } => self.settle(generation, append, result),
        }
    }

    /// Debounce window elapsed (or was bypassed): make `filter` effective.
    fn apply_filter(&mut self, filter: CatalogFilter) {
        if filter == *self.state.filter() {
            debug!("filter unchanged, skipping fetch");
            return;
        }
        self.refresh(filter, 1);
    }

    /// Replace-style load: supersedes whatever is in flight.
    #[instrument(level = "debug", skip(self, filter))]
    fn refresh(&mut self, filter: CatalogFilter, page: PageNumber) {
        let generation = self.state.begin_refresh(filter, page);
        self.fetch_cancel.cancel();
        self.publish();
        self.spawn_fetch(generation, page, false);
    }

    fn advance(&mut self) {
        if !self.state.can_advance() {
            debug!("page advance ignored (loading or exhausted)");
            return;
        }
        let (generation, page) = self.state.begin_advance();
        self.publish();
        self.spawn_fetch(generation, page, true);
    }

    #[instrument(level = "trace", skip(self, result))]
    fn settle(
        &mut self,
        generation: u64,
        append: bool,
        result: Result<CatalogPage, FetchError>,
    ) {
        if generation != self.state.generation() {
            debug!(generation, "discarding superseded fetch result");
            return;
        }
        match result {
            Ok(page) => {
                let items = self.state.filter().created_range().filter(page.items);
                self.state.complete(items, page.meta, append);
            }
            Err(err) => {
                self.state.fail(append);
                self.sink.report("catalog fetch failed", &err);
            }
        }
        self.publish();
        self.persist();
    }

    fn spawn_fetch(&mut self, generation: u64, page: PageNumber, append: bool) {
        let client = Arc::clone(&self.client);
        let filter = self.state.filter().clone();
        let tx = self.tx.clone();
        let token = self.cancel.child_token();
        self.fetch_cancel = token.clone();

        tokio::spawn(async move {
            let fetch = client.fetch_page(&filter, page);
            tokio::pin!(fetch);
            let result = tokio::select! {
                // A response that completed before the cancel is still
                // delivered; the generation tag decides whether it applies.
                biased;
                result = &mut fetch => result,
                _ = token.cancelled() => {
                    debug!(page, "fetch superseded, dropping transport call");
                    return;
                }
            };
            let _ = tx.send(Command::Settled {
                generation,
                append,
                result,
            });
        });
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }

    /// Push the settled (filter, page) pair out to the external store.
    fn persist(&self) {
        if let Err(err) = self.bridge.persist(self.state.filter(), self.state.page()) {
            warn!("query state not persisted: {err}");
        }
    }
}
