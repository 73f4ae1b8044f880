//! Keyed in-memory query cache.
//!
//! Each [`QueryKey`] owns one entry holding the last data, the last error,
//! when the data was fetched and the request currently in flight. Concurrent
//! fetches for the same key share one request. The cache lives for as long as
//! its owner and is never persisted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};

use super::{QueryError, QueryKey, QueryResult};

struct InFlight<V> {
    id: u64,
    request: Shared<BoxFuture<'static, QueryResult<V>>>,
    /// Callers currently awaiting `request`.
    waiters: usize,
}

struct CacheEntry<V> {
    data: Option<V>,
    /// Error of the most recent request, cleared by the next success.
    error: Option<QueryError>,
    /// When `data` was last replaced.
    updated_at: Option<Instant>,
    invalidated: bool,
    in_flight: Option<InFlight<V>>,
}

impl<V> CacheEntry<V> {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            in_flight: None,
        }
    }
}

impl<V: Clone> CacheEntry<V> {
    fn fresh_data(&self, stale_time: Duration) -> Option<V> {
        if self.invalidated {
            return None;
        }
        match (&self.data, self.updated_at) {
            (Some(data), Some(at)) if at.elapsed() < stale_time => Some(data.clone()),
            _ => None,
        }
    }
}

pub struct QueryCache<V> {
    entries: Mutex<HashMap<QueryKey, CacheEntry<V>>>,
    /// Data younger than this is served without a request.
    stale_time: Duration,
    next_request_id: AtomicU64,
}

/// Registered while a caller awaits a request. Dropping the last waiter of
/// an unfinished request abandons it, so the key stops reporting a fetch.
struct Waiter<'a, V> {
    cache: &'a QueryCache<V>,
    key: QueryKey,
    request_id: u64,
}

impl<V> Drop for Waiter<'_, V> {
    fn drop(&mut self) {
        self.cache.release(self.key, self.request_id);
    }
}

impl<V> QueryCache<V> {
    /// Lock the entries, recovering from poison.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Query cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn release(&self, key: QueryKey, request_id: u64) {
        let mut entries = self.lock_entries();
        let Some(entry) = entries.get_mut(&key) else {
            return;
        };
        let abandoned = match entry.in_flight.as_mut() {
            Some(in_flight) if in_flight.id == request_id => {
                in_flight.waiters = in_flight.waiters.saturating_sub(1);
                in_flight.waiters == 0
            }
            _ => false,
        };
        if abandoned {
            debug!("Request {} for '{}' abandoned by every caller", request_id, key);
            entry.in_flight = None;
        }
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time,
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Returns fresh cached data, joins the request in flight for `key`, or
    /// starts a new one with `fetcher`.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryResult<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = QueryResult<V>> + Send + 'static,
    {
        let (request_id, request) = {
            let mut entries = self.lock_entries();
            let entry = entries.entry(key).or_insert_with(CacheEntry::new);

            if let Some(data) = entry.fresh_data(self.stale_time) {
                debug!("Query cache hit for '{}'", key);
                return Ok(data);
            }

            if let Some(in_flight) = entry.in_flight.as_mut() {
                debug!("Joining in-flight request {} for '{}'", in_flight.id, key);
                in_flight.waiters += 1;
                (in_flight.id, in_flight.request.clone())
            } else {
                let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
                debug!("Query cache miss for '{}', starting request {}", key, id);
                let request = fetcher().boxed().shared();
                entry.in_flight = Some(InFlight {
                    id,
                    request: request.clone(),
                    waiters: 1,
                });
                (id, request)
            }
        };

        let _waiter = Waiter {
            cache: self,
            key,
            request_id,
        };
        let result = request.await;
        self.settle(key, request_id, &result);
        result
    }

    /// Records the outcome of a request, unless a newer request for the same
    /// key has replaced it since.
    fn settle(&self, key: QueryKey, request_id: u64, result: &QueryResult<V>) {
        let mut entries = self.lock_entries();
        let Some(entry) = entries.get_mut(&key) else {
            return;
        };
        match &entry.in_flight {
            Some(in_flight) if in_flight.id == request_id => {}
            _ => return,
        }

        entry.in_flight = None;
        match result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.error = None;
                entry.updated_at = Some(Instant::now());
                entry.invalidated = false;
            }
            Err(e) => {
                debug!("Query '{}' settled with error: {}", key, e);
                entry.error = Some(e.clone());
                entry.invalidated = true;
            }
        }
    }

    /// Last successful data for `key`, fresh or not.
    pub fn cached(&self, key: QueryKey) -> Option<V> {
        self.lock_entries().get(&key).and_then(|e| e.data.clone())
    }

    /// Error of the last settled request for `key`.
    pub fn error(&self, key: QueryKey) -> Option<QueryError> {
        self.lock_entries().get(&key).and_then(|e| e.error.clone())
    }

    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.lock_entries()
            .get(&key)
            .is_some_and(|e| e.in_flight.is_some())
    }

    /// Marks `key` stale so the next fetch goes to the network. A request
    /// already in flight is detached; its result will not be recorded.
    pub fn invalidate(&self, key: QueryKey) {
        if let Some(entry) = self.lock_entries().get_mut(&key) {
            entry.invalidated = true;
            entry.in_flight = None;
        }
    }

    pub fn invalidate_all(&self) {
        for entry in self.lock_entries().values_mut() {
            entry.invalidated = true;
            entry.in_flight = None;
        }
    }

    pub fn remove(&self, key: QueryKey) {
        self.lock_entries().remove(&key);
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }
}
