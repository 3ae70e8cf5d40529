//! Keyed, cancellable delayed tasks.
//!
//! Scheduling a task for a key aborts whatever was pending for that key, so
//! only the last task scheduled within a quiet period ever runs.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer<K> {
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash> Debouncer<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Run `task` after `delay` unless another task is scheduled for `key`
    /// (or the key is cancelled) first.
    pub fn schedule<F>(&mut self, key: K, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel(&key);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        self.pending.insert(key, handle);
    }

    /// Abort the task pending for `key`. Returns whether one was still pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending
            .get(key)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<K: Eq + Hash> Default for Debouncer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
