use serde::{Deserialize, Serialize};

/// Scheme prefix players use for artwork stored on the local filesystem
pub const FILE_SCHEME: &str = "file://";

/// Track metadata polled from a single player
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackMeta {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Artwork reference as reported by the player (URL, file:// URI or empty)
    pub cover_ref: String,
    /// Player the metadata was read from
    pub player: String,
    pub position_secs: f64,
    pub length_secs: f64,
}

impl TrackMeta {
    /// Title and artist are both known, enough to ask the catalog for artwork
    pub fn is_identifiable(&self) -> bool {
        !self.title.is_empty() && !self.artist.is_empty()
    }

    /// Filesystem path of the artwork when it is a local file reference
    pub fn local_cover_path(&self) -> Option<&str> {
        self.cover_ref.strip_prefix(FILE_SCHEME)
    }
}

/// Playback state reported by a player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    Unknown,
}

impl PlaybackStatus {
    /// Interpret raw status output; anything unrecognised (including empty) is `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "playing" => PlaybackStatus::Playing,
            "paused" => PlaybackStatus::Paused,
            "stopped" => PlaybackStatus::Stopped,
            _ => PlaybackStatus::Unknown,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }
}

/// The track currently being played, as served to the front end
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayingTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Resolved artwork URL or reference, empty when nothing was found
    pub cover: String,
    /// Player the track was read from
    pub source: String,
    pub position: f64,
    pub length: f64,
}

/// Result of one now-playing resolution pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NowPlaying {
    Stopped,
    Playing(PlayingTrack),
}

impl NowPlaying {
    pub fn is_playing(&self) -> bool {
        matches!(self, NowPlaying::Playing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_status_parse() {
        assert_eq!(PlaybackStatus::parse("Playing"), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::parse("PLAYING\n"), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::parse("Paused"), PlaybackStatus::Paused);
        assert_eq!(PlaybackStatus::parse("Stopped"), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::parse(""), PlaybackStatus::Unknown);
        assert_eq!(PlaybackStatus::parse("No players found"), PlaybackStatus::Unknown);
        assert!(!PlaybackStatus::parse("").is_playing());
    }

    #[test]
    fn test_local_cover_path() {
        let mut meta = TrackMeta {
            cover_ref: "file:///home/me/.cache/art.png".to_string(),
            ..Default::default()
        };
        assert_eq!(meta.local_cover_path(), Some("/home/me/.cache/art.png"));

        meta.cover_ref = "https://i.scdn.co/image/abc".to_string();
        assert_eq!(meta.local_cover_path(), None);
    }

    #[test]
    fn test_stopped_wire_shape() {
        let json = serde_json::to_value(NowPlaying::Stopped).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "stopped" }));
    }

    #[test]
    fn test_playing_wire_shape() {
        let now = NowPlaying::Playing(PlayingTrack {
            title: "Time".to_string(),
            artist: "Pink Floyd".to_string(),
            album: "The Dark Side of the Moon".to_string(),
            cover: "http://img/x.jpg".to_string(),
            source: "spotify".to_string(),
            position: 12.5,
            length: 413.0,
        });

        let json = serde_json::to_value(&now).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "playing",
                "title": "Time",
                "artist": "Pink Floyd",
                "album": "The Dark Side of the Moon",
                "cover": "http://img/x.jpg",
                "source": "spotify",
                "position": 12.5,
                "length": 413.0,
            })
        );

        let back: NowPlaying = serde_json::from_value(json).unwrap();
        assert_eq!(back, now);
    }
}
