//! Cached cover-art resolution
//!
//! Two layers sit in front of the remote lookup: a per-key expiry map and a
//! bounded memo table. The first time any key is seen, or is read after its
//! expiry, the whole memo table is dropped and that key gets a fresh one-hour
//! bucket. Within a bucket, repeated lookups for the same pair are answered
//! from the memo, absence included.

use crate::traits::{Clock, CoverLookup, SystemClock};
use cached::{Cached, SizedCache};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Lifetime of a cache bucket
pub const COVER_TTL: Duration = Duration::from_secs(60 * 60);

/// Maximum number of memoized lookups
pub const COVER_MEMO_CAPACITY: usize = 256;

struct CoverCacheState {
    /// Lowercased "artist|track" -> bucket expiry (time since epoch)
    expiries: HashMap<String, Duration>,
    memo: SizedCache<(String, String), Option<String>>,
}

/// Cover-art resolver owning the expiry map and memo table
pub struct CoverResolver {
    lookup: Arc<dyn CoverLookup>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: Mutex<CoverCacheState>,
}

impl CoverResolver {
    /// Create a resolver using wall-clock time
    pub fn new(lookup: Arc<dyn CoverLookup>) -> Self {
        Self::with_clock(lookup, Arc::new(SystemClock))
    }

    /// Create a resolver with an explicit clock
    pub fn with_clock(lookup: Arc<dyn CoverLookup>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lookup,
            clock,
            ttl: COVER_TTL,
            state: Mutex::new(CoverCacheState {
                expiries: HashMap::new(),
                memo: SizedCache::with_size(COVER_MEMO_CAPACITY),
            }),
        }
    }

    /// Best-effort artwork URL for a track, `None` when the catalog has nothing
    pub async fn resolve_cover(&self, artist: &str, track: &str) -> Option<String> {
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        let key = format!("{}|{}", artist.to_lowercase(), track.to_lowercase());
        let expired = match state.expiries.get(&key) {
            Some(expires_at) => now > *expires_at,
            None => true,
        };
        if expired {
            debug!(
                "Cover bucket for '{}' expired, dropping {} memoized lookups",
                key,
                state.memo.cache_size()
            );
            state.memo.cache_clear();
            state.expiries.insert(key, now + self.ttl);
        }

        let memo_key = (artist.to_string(), track.to_string());
        if let Some(hit) = state.memo.cache_get(&memo_key) {
            debug!("Cover memo hit: {} - {}", artist, track);
            return hit.clone();
        }

        let cover = self.lookup.lookup(artist, track).await;
        state.memo.cache_set(memo_key, cover.clone());
        cover
    }
}
