use crate::cover_cache::CoverResolver;
use crate::models::{NowPlaying, PlaybackStatus, PlayingTrack, TrackMeta};
use crate::traits::MediaControl;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves what is playing right now across all local players
pub struct NowPlayingResolver {
    session: Arc<dyn MediaControl>,
    covers: CoverResolver,
}

impl NowPlayingResolver {
    pub fn new(session: Arc<dyn MediaControl>, covers: CoverResolver) -> Self {
        Self { session, covers }
    }

    /// Walk players in preference order and report the first one that is playing
    /// and has readable metadata. Never fails: anything unusable ends in `Stopped`.
    pub async fn resolve(&self) -> NowPlaying {
        let players = self.session.list_players().await;
        if players.is_empty() {
            debug!("No media players found");
            return NowPlaying::Stopped;
        }

        for player in &players {
            let status = PlaybackStatus::parse(&self.session.status(player).await);
            if !status.is_playing() {
                debug!("Skipping {}: {:?}", player, status);
                continue;
            }

            let Some(meta) = self.session.metadata(player).await else {
                debug!("Player {} is playing but has no readable metadata", player);
                continue;
            };

            let cover = self.resolve_cover_for(&meta).await;
            let source = if meta.player.is_empty() {
                player.clone()
            } else {
                meta.player
            };

            debug!("Now playing on {}: {} - {}", source, meta.artist, meta.title);

            return NowPlaying::Playing(PlayingTrack {
                title: meta.title,
                artist: meta.artist,
                album: meta.album,
                cover,
                source,
                position: meta.position_secs,
                length: meta.length_secs,
            });
        }

        NowPlaying::Stopped
    }

    /// Apply the artwork policy: use the catalog when the player gave nothing,
    /// or when its local file no longer exists; otherwise keep what the player said.
    async fn resolve_cover_for(&self, meta: &TrackMeta) -> String {
        if meta.cover_ref.is_empty() {
            if meta.is_identifiable() {
                return self.remote_cover(meta).await;
            }
            return String::new();
        }

        if let Some(path) = meta.local_cover_path() {
            if !Path::new(path).exists() && meta.is_identifiable() {
                warn!("Local cover file not found, trying catalog lookup: {}", path);
                return self.remote_cover(meta).await;
            }
        }

        meta.cover_ref.clone()
    }

    async fn remote_cover(&self, meta: &TrackMeta) -> String {
        self.covers
            .resolve_cover(&meta.artist, &meta.title)
            .await
            .unwrap_or_default()
    }
}
