//! Expiry Timers Module
//!
//! Registry of the scheduled per-key expiry tasks. At most one timer is
//! pending per key; registering a new one aborts the previous.

use std::collections::HashMap;

use tokio::task::JoinHandle;

#[derive(Debug)]
struct PendingExpiry {
    token: u64,
    handle: JoinHandle<()>,
}

// == Expiry Timers ==
#[derive(Debug, Default)]
pub struct ExpiryTimers {
    pending: HashMap<String, PendingExpiry>,
    next_token: u64,
}

impl ExpiryTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a token that identifies the next timer to be registered.
    pub fn next_token(&mut self) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.next_token
    }

    // == Register ==
    /// Records `handle` as the pending expiry for `key`, aborting any prior one.
    pub fn register(&mut self, key: String, token: u64, handle: JoinHandle<()>) {
        if let Some(previous) = self.pending.insert(key, PendingExpiry { token, handle }) {
            previous.handle.abort();
        }
    }

    // == Cancel ==
    /// Aborts and forgets the pending expiry for `key`.
    pub fn cancel(&mut self, key: &str) -> bool {
        match self.pending.remove(key) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }

    // == Complete ==
    /// Called by a timer that has fired. Returns true (and forgets the timer)
    /// only if `token` is still the registered one for `key`; a timer that
    /// lost a race against a newer `set` gets false and must do nothing.
    pub fn complete(&mut self, key: &str, token: u64) -> bool {
        match self.pending.get(key) {
            Some(pending) if pending.token == token => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for ExpiryTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    fn idle_task() -> JoinHandle<()> {
        tokio::spawn(pending::<()>())
    }

    #[tokio::test]
    async fn test_register_replaces_and_aborts_previous() {
        let mut timers = ExpiryTimers::new();

        let first = timers.next_token();
        timers.register("k".into(), first, idle_task());
        let second = timers.next_token();
        timers.register("k".into(), second, idle_task());

        assert_eq!(timers.len(), 1);
        assert!(!timers.complete("k", first), "stale token must not complete");
        assert!(timers.complete("k", second));
        assert!(timers.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_aborts_task() {
        let mut timers = ExpiryTimers::new();
        let handle = idle_task();
        let token = timers.next_token();
        timers.register("k".into(), token, handle);

        assert!(timers.cancel("k"));
        assert!(!timers.cancel("k"));
        assert!(!timers.is_pending("k"));
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let mut timers = ExpiryTimers::new();
        for key in ["a", "b", "c"] {
            let token = timers.next_token();
            timers.register(key.into(), token, idle_task());
        }

        timers.cancel_all();
        assert!(timers.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut timers = ExpiryTimers::new();
        let a = timers.next_token();
        let b = timers.next_token();
        assert_ne!(a, b);
    }
}
