//! Optional token cache shared across invocations.
//!
//! Each credential set owns one slot. Refreshing a slot happens while its
//! async lock is held, so concurrent callers wait for a single
//! authentication round trip instead of each starting their own.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;

use crate::client::Token;
use crate::config::Credentials;

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: Token,
    pub response: Value,
    acquired_at: Instant,
}

impl CachedToken {
    pub fn new(token: Token, response: Value) -> Self {
        Self {
            token,
            response,
            acquired_at: Instant::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.acquired_at.elapsed() < ttl
    }
}

pub type TokenSlot = Arc<tokio::sync::Mutex<Option<CachedToken>>>;

#[derive(Debug)]
pub struct TokenCache {
    ttl: Duration,
    slots: Mutex<HashMap<u64, TokenSlot>>,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The slot for a credential set, created on first use.
    pub fn slot(&self, credentials: &Credentials) -> TokenSlot {
        self.slots
            .lock()
            .entry(fingerprint(credentials))
            .or_default()
            .clone()
    }

    /// Forget the token of a credential set. A refresh in flight is not
    /// interrupted; its result replaces the cleared entry.
    pub fn invalidate(&self, credentials: &Credentials) {
        self.slots.lock().remove(&fingerprint(credentials));
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fingerprint(credentials: &Credentials) -> u64 {
    let mut hasher = DefaultHasher::new();
    credentials.client_code.hash(&mut hasher);
    credentials.system_code.hash(&mut hasher);
    credentials.username.hash(&mut hasher);
    credentials.password.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let entry = CachedToken::new(Token::new("abc"), json!({}));
        assert!(entry.is_fresh(Duration::from_secs(10)));
        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(!entry.is_fresh(Duration::from_secs(10)));
    }

    #[test]
    fn slots_are_keyed_by_credentials() {
        let cache = TokenCache::new(Duration::from_secs(60));
        let first = Credentials::default();
        let second = Credentials {
            username: "other".into(),
            ..Credentials::default()
        };

        let a = cache.slot(&first);
        let b = cache.slot(&first);
        assert!(Arc::ptr_eq(&a, &b));
        cache.slot(&second);
        assert_eq!(cache.len(), 2);

        cache.invalidate(&first);
        assert_eq!(cache.len(), 1);
        assert!(!Arc::ptr_eq(&a, &cache.slot(&first)));
    }
}
