use crate::ranker::{KeywordExtractor, KeywordRanking};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

type CacheKey = (u64, String, usize);

#[derive(Default)]
struct Entries {
    map: HashMap<CacheKey, KeywordRanking>,
    order: VecDeque<CacheKey>,
}

/// Memoizes rankings by model fingerprint, literal input text and `n`.
/// Holds at most `capacity` rankings and evicts the oldest first; capacity 0 disables it.
pub struct CachedExtractor {
    inner: KeywordExtractor,
    capacity: usize,
    entries: Mutex<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedExtractor {
    pub fn new(inner: KeywordExtractor, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: Mutex::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn extractor(&self) -> &KeywordExtractor { &self.inner }

    pub fn extract(&self, text: &str, n: usize) -> KeywordRanking {
        if self.capacity == 0 {
            return self.inner.extract(text, n);
        }
        let key: CacheKey = (self.inner.model().fingerprint(), text.to_string(), n);
        if let Some(hit) = self.entries.lock().map.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        // scored outside the lock
        let ranking = self.inner.extract(text, n);

        let mut entries = self.entries.lock();
        if !entries.map.contains_key(&key) {
            while entries.order.len() >= self.capacity {
                match entries.order.pop_front() {
                    Some(old) => { entries.map.remove(&old); }
                    None => break,
                }
            }
            entries.order.push_back(key.clone());
            entries.map.insert(key, ranking.clone());
        }
        ranking
    }

    pub fn len(&self) -> usize { self.entries.lock().map.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn hits(&self) -> u64 { self.hits.load(Ordering::Relaxed) }

    pub fn misses(&self) -> u64 { self.misses.load(Ordering::Relaxed) }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.map.clear();
        entries.order.clear();
    }
}
