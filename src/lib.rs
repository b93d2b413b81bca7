//! YouTube Transcript Tool - save a video's captions as a timestamped text file
//!
//! This library extracts the video identifier from a YouTube URL, fetches the caption
//! track, renders it into plain or timestamped lines and stores it under a file named
//! after the video title, falling back to the identifier when no title is available.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod pipeline;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use extractors::{extract_video_id, TitleFetcher, TranscriptFetcher};
pub use output::naming::{sanitize_title, unique_path};
pub use pipeline::{NamingOutcome, TranscriptOutcome, TranscriptPipeline};
pub use transcript::{format_timestamp, render, Caption, RenderMode, Transcript, TranscriptEntry};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the transcript tool
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("Please enter a valid YouTube URL: {0}")]
    UnsupportedUrl(String),

    #[error("Could not extract video ID from URL: {0}")]
    MissingVideoId(String),

    #[error("Transcript fetch failed: {0}")]
    FetchFailed(String),
}

impl TranscriptError {
    /// Whether the failure came from the operator's input rather than the remote side
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TranscriptError::MissingUrl
                | TranscriptError::UnsupportedUrl(_)
                | TranscriptError::MissingVideoId(_)
        )
    }
}
