use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod title;
pub mod youtube;

pub use title::HtmlTitleFetcher;
pub use youtube::YoutubeTranscriptFetcher;

use crate::transcript::Transcript;
use crate::Result;

/// Tried in order; the first pattern with a match wins.
static VIDEO_ID_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?:v=|/)([a-zA-Z0-9_-]{11})").unwrap(),
        Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})").unwrap(),
    ]
});

/// Hosts accepted as input
pub const SUPPORTED_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Check whether the input names a YouTube page
pub fn is_supported_url(url: &str) -> bool {
    SUPPORTED_HOSTS.iter().any(|host| url.contains(host))
}

/// Extract the 11-character video identifier from a YouTube URL.
///
/// Matches a token after `v=` or any `/` first, then after `youtu.be/`. Returns
/// `None` when neither pattern matches.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .map(|caps| caps[1].to_string())
}

/// Source of caption entries for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the full caption track for `video_id`
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript>;

    /// Get the name of this source
    fn source_name(&self) -> &'static str;
}

/// Source of a human-readable video title
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// Look up the raw title for the page at `url`; `None` on any failure
    async fn fetch_title(&self, url: &str) -> Option<String>;
}
