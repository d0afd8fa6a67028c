use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Debounce a callback by a fixed duration, keyed by string.
///
/// Scheduling work for a key cancels whatever was already pending for that
/// key, so a burst of keystroke-frequency updates collapses into a single
/// store write once the caller goes quiet. Keys are per-field-per-tab
/// (e.g. `content-<tab-id>`), matching how the UI batches its saves.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<HashMap<String, Pending>>>,
}

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule `callback` to run after the delay, superseding any callback
    /// still pending under the same key.
    pub async fn schedule<F, Fut>(&self, key: &str, callback: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let mut pending = self.pending.lock().await;

        let generation = match pending.remove(key) {
            Some(prev) => {
                prev.handle.abort();
                prev.generation + 1
            }
            None => 0,
        };

        let delay = self.delay;
        let map = Arc::clone(&self.pending);
        let key_owned = key.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback().await;

            // Only clear our own entry; a newer schedule may have replaced it
            let mut map = map.lock().await;
            if map.get(&key_owned).is_some_and(|p| p.generation == generation) {
                map.remove(&key_owned);
            }
        });

        pending.insert(key.to_string(), Pending { generation, handle });
    }

    /// Drop any pending callback for a key without running it
    pub async fn cancel(&self, key: &str) {
        if let Some(prev) = self.pending.lock().await.remove(key) {
            prev.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        debouncer
            .schedule("k", move || async move {
                h.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_callback() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let value = Arc::new(Mutex::new(String::new()));

        for text in ["a", "ab", "abc"] {
            let v = Arc::clone(&value);
            debouncer
                .schedule("content-t1", move || async move {
                    *v.lock().await = text.to_string();
                })
                .await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*value.lock().await, "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_do_not_interfere() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let hits = Arc::new(AtomicUsize::new(0));

        for key in ["content-t1", "variables-t1"] {
            let h = Arc::clone(&hits);
            debouncer
                .schedule(key, move || async move {
                    h.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_work() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        debouncer
            .schedule("k", move || async move {
                h.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        debouncer.cancel("k").await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
