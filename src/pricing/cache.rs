//! TTL cache for remote price lookups
//!
//! Plain `key -> (price, stored_at)` map. Staleness is checked at read time;
//! expired entries are dropped on access or overwritten on the next insert.
//! No eviction thread.

use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TtlPriceCache {
    entries: DashMap<String, (f64, Instant)>,
    ttl: Duration,
}

impl TtlPriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                let (price, stored_at) = *entry;
                if stored_at.elapsed() < self.ttl {
                    return Some(price);
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: impl Into<String>, price: f64) {
        self.entries.insert(key.into(), (price, Instant::now()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let cache = TtlPriceCache::new(Duration::from_secs(60));
        assert!(cache.get("AmazonEC2:t3.micro:us-east-1").is_none());
        cache.insert("AmazonEC2:t3.micro:us-east-1", 0.0104);
        assert_eq!(cache.get("AmazonEC2:t3.micro:us-east-1"), Some(0.0104));
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = TtlPriceCache::new(Duration::from_millis(10));
        cache.insert("key", 1.0);
        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get("key").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_stale_value() {
        let cache = TtlPriceCache::new(Duration::from_secs(60));
        cache.insert("key", 1.0);
        cache.insert("key", 2.0);
        assert_eq!(cache.get("key"), Some(2.0));
        assert_eq!(cache.len(), 1);
    }
}
