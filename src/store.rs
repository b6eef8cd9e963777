//! Ephemeral result store
//!
//! Holds analysis results under opaque ids for a fixed time so a result can
//! be produced in one step and picked up in another. Nothing is persisted.

use crate::error::{Result, SkillTopologyError};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Default lifetime of a stored result.
pub const DEFAULT_TTL_SECS: u64 = 60 * 60;

/// Longest accepted lifetime: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Time source, replaceable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct Entry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

pub struct ResultStore<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ResultStore<T> {
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000));
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry<T>>>> {
        self.entries
            .lock()
            .map_err(|_| SkillTopologyError::Processing("Result store lock poisoned".to_string()))
    }

    /// Store a value and return its id.
    pub fn put(&self, value: T) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let expires_at = self.clock.now().checked_add_signed(self.ttl).ok_or_else(|| {
            SkillTopologyError::Configuration(format!(
                "store.ttl_secs of {}s overflows the expiry time",
                self.ttl.num_seconds()
            ))
        })?;
        self.lock()?.insert(id.clone(), Entry { value, expires_at });
        info!("Stored result {} (expires {})", id, expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
        Ok(id)
    }

    /// Fetch a value; expired entries are evicted and reported as expired.
    pub fn get(&self, id: &str) -> Result<T> {
        let now = self.clock.now();
        let mut entries = self.lock()?;

        let expired = match entries.get(id) {
            None => return Err(SkillTopologyError::ResultNotFound(id.to_string())),
            Some(entry) => entry.expires_at <= now,
        };

        if expired {
            entries.remove(id);
            debug!("Evicted expired result {}", id);
            return Err(SkillTopologyError::ResultExpired(id.to_string()));
        }

        entries
            .get(id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| SkillTopologyError::ResultNotFound(id.to_string()))
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!("Purged {} expired results", removed);
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, secs: i64) {
            let mut now = self.0.lock().unwrap();
            *now = *now + Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn store() -> (ResultStore<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
        (ResultStore::with_clock(60, clock.clone()), clock)
    }

    #[test]
    fn test_put_then_get() {
        let (store, _) = store();
        let id = store.put("report".to_string()).unwrap();
        assert_eq!(store.get(&id).unwrap(), "report");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let (store, _) = store();
        let a = store.put("a".to_string()).unwrap();
        let b = store.put("b".to_string()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_oversized_ttl_is_an_error() {
        let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
        for ttl_secs in [10_000_000_000_000, u64::MAX] {
            let store: ResultStore<String> = ResultStore::with_clock(ttl_secs, clock.clone());
            assert!(matches!(store.put("x".to_string()), Err(SkillTopologyError::Configuration(_))));
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_unknown_id() {
        let (store, _) = store();
        assert!(matches!(store.get("nope"), Err(SkillTopologyError::ResultNotFound(_))));
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let (store, clock) = store();
        let id = store.put("report".to_string()).unwrap();
        clock.advance(61);
        assert!(matches!(store.get(&id), Err(SkillTopologyError::ResultExpired(_))));
        assert!(store.is_empty());
        assert!(matches!(store.get(&id), Err(SkillTopologyError::ResultNotFound(_))));
    }

    #[test]
    fn test_purge_expired() {
        let (store, clock) = store();
        store.put("old".to_string()).unwrap();
        clock.advance(30);
        let fresh = store.put("fresh".to_string()).unwrap();
        clock.advance(31);
        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.get(&fresh).unwrap(), "fresh");
    }
}
