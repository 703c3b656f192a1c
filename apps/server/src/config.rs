//! Command-line and environment configuration
use clap::Parser;
use nowplaying_core::DEFAULT_PREFERRED_PLAYERS;
use nowplaying_cover_art::LASTFM_ENDPOINT;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nowplaying", version, about = "Serve the currently playing track over HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "NOWPLAYING_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Directory holding the front end (index.html and assets)
    #[arg(long, env = "NOWPLAYING_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Last.fm API key; cover lookups are disabled without it
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub lastfm_api_key: Option<String>,

    /// Last.fm API endpoint
    #[arg(long, env = "LASTFM_ENDPOINT", default_value = LASTFM_ENDPOINT)]
    pub lastfm_endpoint: String,

    /// playerctl command, optionally with leading arguments
    #[arg(long, env = "NOWPLAYING_PLAYERCTL", default_value = "playerctl")]
    pub playerctl: String,

    /// Player preference order, matched as case-insensitive substrings
    #[arg(
        long,
        env = "NOWPLAYING_PREFER",
        value_delimiter = ',',
        default_values_t = DEFAULT_PREFERRED_PLAYERS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub prefer: Vec<String>,
}

impl Config {
    /// API key with blank values treated as missing
    pub fn lastfm_api_key(&self) -> Option<String> {
        self.lastfm_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    /// Preference list without blank entries
    pub fn preferences(&self) -> Vec<String> {
        self.prefer
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}
