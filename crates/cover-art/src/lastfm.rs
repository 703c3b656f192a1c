//! Last.fm `track.getInfo` artwork lookup
//!
//! Finds cover art by artist and track title. Without an API key the lookup is
//! disabled and answers `None` without touching the network.

use async_trait::async_trait;
use nowplaying_core::CoverLookup;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Public Last.fm API endpoint
pub const LASTFM_ENDPOINT: &str = "https://ws.audioscrobbler.com/2.0/";

/// Timeout for one catalog request
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Image sizes in order of preference
const PREFERRED_SIZES: [&str; 4] = ["extralarge", "mega", "large", "medium"];

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Last.fm returned status {0}")]
    Status(StatusCode),

    #[error("Invalid Last.fm response: {0}")]
    Json(#[from] serde_json::Error),
}

/// `track.getInfo` response, reduced to what artwork selection needs
#[derive(Debug, Default, Deserialize)]
pub struct TrackInfoResponse {
    #[serde(default)]
    pub track: Option<TrackInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackInfo {
    #[serde(default)]
    pub album: Option<AlbumInfo>,
    #[serde(default)]
    pub image: Option<Vec<Image>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub image: Option<Vec<Image>>,
}

/// One entry of a Last.fm image list: `{"#text": url, "size": name}`
///
/// Either field may be missing or null.
#[derive(Debug, Default, Deserialize)]
pub struct Image {
    #[serde(rename = "#text", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl Image {
    /// The URL when it is present and non-empty
    fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

impl TrackInfoResponse {
    /// Album images when the response has them, otherwise the track's own images
    pub fn images(&self) -> &[Image] {
        let Some(track) = &self.track else {
            return &[];
        };
        match track.album.as_ref().and_then(|album| album.image.as_ref()) {
            Some(images) => images,
            None => track.image.as_deref().unwrap_or_default(),
        }
    }

    /// Best cover URL: the largest preferred size with a URL, else the first URL at all
    pub fn cover_url(&self) -> Option<String> {
        select_image(self.images())
    }
}

/// Pick an image URL by size preference, falling back to the first non-empty URL
pub fn select_image(images: &[Image]) -> Option<String> {
    PREFERRED_SIZES
        .iter()
        .find_map(|size| {
            images
                .iter()
                .filter(|img| img.size.as_deref() == Some(*size))
                .find_map(Image::usable_url)
        })
        .or_else(|| images.iter().find_map(Image::usable_url))
        .map(str::to_string)
}

/// Last.fm catalog client
pub struct LastFmClient {
    api_key: Option<String>,
    endpoint: String,
    client: Client,
}

impl LastFmClient {
    /// Create a client; an empty or missing key disables lookups
    pub fn new(api_key: Option<String>) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;

        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint: LASTFM_ENDPOINT.to_string(),
            client,
        })
    }

    /// Point the client at a different API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch and decode `track.getInfo` for a track
    pub async fn track_info(
        &self,
        api_key: &str,
        artist: &str,
        track: &str,
    ) -> Result<TrackInfoResponse, LookupError> {
        debug!("Looking up cover via Last.fm: artist='{}', track='{}'", artist, track);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("method", "track.getInfo"),
                ("api_key", api_key),
                ("artist", artist),
                ("track", track),
                ("format", "json"),
                ("autocorrect", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CoverLookup for LastFmClient {
    async fn lookup(&self, artist: &str, track: &str) -> Option<String> {
        let api_key = self.api_key.as_deref()?;

        match self.track_info(api_key, artist, track).await {
            Ok(info) => {
                let cover = info.cover_url();
                match &cover {
                    Some(url) => debug!("Found cover: {}", url),
                    None => debug!("No cover found for: {} - {}", artist, track),
                }
                cover
            }
            Err(e) => {
                warn!("Last.fm lookup failed for {} - {}: {}", artist, track, e);
                None
            }
        }
    }
}
