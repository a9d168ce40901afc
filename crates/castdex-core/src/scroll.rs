use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Callback installed by the engine; enqueues a page advance.
pub type IntersectHandler = Box<dyn Fn() + Send + Sync>;

/// Source of "near end of list" signals.
///
/// The handler is invoked at most once per intersection event. Duplicate or
/// bouncing invocations are harmless: the page-advance path is guarded by the
/// engine's has-more and in-flight checks.
pub trait ScrollTrigger {
    fn on_intersect(&mut self, handler: IntersectHandler);
}

/// Trigger fed by a `watch` channel of intersection state.
///
/// Invokes the handler whenever the observed value changes to `true`
/// (false → true edges; republished `true` values count as new events).
/// Dropping the trigger stops the watcher task.
pub struct WatchScrollTrigger {
    rx: watch::Receiver<bool>,
    cancel: CancellationToken,
}

impl WatchScrollTrigger {
    /// Returns the sender side for the host to publish intersection state
    /// into, and the trigger to hand to the engine.
    pub fn new() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (
            tx,
            Self {
                rx,
                cancel: CancellationToken::new(),
            },
        )
    }
}

impl ScrollTrigger for WatchScrollTrigger {
    fn on_intersect(&mut self, handler: IntersectHandler) {
        let mut rx = self.rx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if *rx.borrow_and_update() {
                            handler();
                        }
                    }
                }
            }
        });
    }
}

impl Drop for WatchScrollTrigger {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn drain() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn fires_on_rising_edge_only() {
        let (tx, mut trigger) = WatchScrollTrigger::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        trigger.on_intersect(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        drain().await;

        tx.send(true).unwrap();
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        tx.send(false).unwrap();
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        tx.send(true).unwrap();
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropping_the_trigger_stops_delivery() {
        let (tx, mut trigger) = WatchScrollTrigger::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        trigger.on_intersect(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        drain().await;

        drop(trigger);
        drain().await;

        // The watcher is gone, so the send may find no receivers at all.
        let _ = tx.send(true);
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
