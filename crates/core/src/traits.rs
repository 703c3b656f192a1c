use crate::models::TrackMeta;
use async_trait::async_trait;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Local media-control interface (playerctl, or a fake in tests)
///
/// Every method is total: a failed query shows up as empty output or `None`,
/// never as an error.
#[async_trait]
pub trait MediaControl: Send + Sync {
    /// Controllable players, already in poll order (preferred players first)
    async fn list_players(&self) -> Vec<String>;

    /// Raw playback status for a player ("Playing", "Paused", ... or empty)
    async fn status(&self, player: &str) -> String;

    /// Current track metadata, `None` when the player gave nothing usable
    async fn metadata(&self, player: &str) -> Option<TrackMeta>;
}

/// Remote artwork lookup by artist and track title
#[async_trait]
pub trait CoverLookup: Send + Sync {
    async fn lookup(&self, artist: &str, track: &str) -> Option<String>;
}

/// Source of the current time for cache expiry
pub trait Clock: Send + Sync {
    /// Time elapsed since the Unix epoch
    fn now(&self) -> Duration;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}
