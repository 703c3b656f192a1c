//! MPRIS players via the `playerctl` command-line tool
//!
//! Player listing, playback status, formatted metadata and position are each one
//! short-lived `playerctl` invocation. Anything that fails degrades to empty data.

use crate::process::{split_command_line, ProcessRunner};
use async_trait::async_trait;
use nowplaying_core::{order_players, parse_player_list, MediaControl, TrackMeta, DEFAULT_PREFERRED_PLAYERS};
use tracing::debug;

/// Metadata template: title, artist, album, art reference and length in microseconds
pub const METADATA_FORMAT: &str = "{{title}}|{{artist}}|{{album}}|{{mpris:artUrl}}|{{mpris:length}}";

const FIELD_SEPARATOR: char = '|';

pub struct PlayerctlSession {
    runner: ProcessRunner,
    /// playerctl command line, possibly with leading arguments
    command: String,
    preferences: Vec<String>,
}

impl Default for PlayerctlSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerctlSession {
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner::default(),
            command: "playerctl".to_string(),
            preferences: DEFAULT_PREFERRED_PLAYERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Use a different playerctl command line, e.g. `flatpak-spawn --host playerctl`
    pub fn with_program(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Replace the player preference order
    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    /// Run playerctl with per-player arguments passed through untouched
    async fn playerctl(&self, args: &[&str]) -> String {
        let base = match split_command_line(&self.command) {
            Ok(base) => base,
            Err(e) => {
                debug!("Invalid playerctl command '{}': {}", self.command, e);
                return String::new();
            }
        };
        let mut argv: Vec<&str> = base[1..].iter().map(String::as_str).collect();
        argv.extend_from_slice(args);
        self.runner.run_args(&base[0], &argv).await
    }
}

#[async_trait]
impl MediaControl for PlayerctlSession {
    async fn list_players(&self) -> Vec<String> {
        let output = self.runner.run(&format!("{} -l", self.command)).await;
        if output.is_empty() {
            return Vec::new();
        }

        let players = order_players(parse_player_list(&output), &self.preferences);
        debug!("Players in poll order: {:?}", players);
        players
    }

    async fn status(&self, player: &str) -> String {
        self.playerctl(&["-p", player, "status"]).await
    }

    async fn metadata(&self, player: &str) -> Option<TrackMeta> {
        let raw = self
            .playerctl(&["-p", player, "metadata", "-f", METADATA_FORMAT])
            .await;
        let mut meta = parse_metadata(&raw, player)?;

        let position = self.playerctl(&["-p", player, "position"]).await;
        meta.position_secs = parse_position(&position);

        Some(meta)
    }
}

/// Parse one line of [`METADATA_FORMAT`] output.
///
/// Returns `None` only when the output is empty or has no separator at all.
/// Missing trailing fields are empty, an unreadable length is zero.
pub fn parse_metadata(raw: &str, player: &str) -> Option<TrackMeta> {
    if raw.is_empty() || !raw.contains(FIELD_SEPARATOR) {
        return None;
    }

    let mut fields = raw.split(FIELD_SEPARATOR).map(|field| field.trim().to_string());
    let mut next = || fields.next().unwrap_or_default();
    let (title, artist, album, cover_ref, length) = (next(), next(), next(), next(), next());

    Some(TrackMeta {
        title,
        artist,
        album,
        cover_ref,
        player: player.to_string(),
        position_secs: 0.0,
        length_secs: parse_length_micros(&length),
    })
}

/// Playback position in seconds, zero when unreadable
pub fn parse_position(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .unwrap_or(0.0)
}

/// Track length from microseconds to seconds, zero when unreadable
fn parse_length_micros(raw: &str) -> f64 {
    raw.parse::<i64>()
        .ok()
        .filter(|micros| *micros > 0)
        .map_or(0.0, |micros| micros as f64 / 1_000_000.0)
}
