use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::extractors::{
    extract_video_id, is_supported_url, HtmlTitleFetcher, TitleFetcher, TranscriptFetcher,
    YoutubeTranscriptFetcher,
};
use crate::output::{self, sanitize_title};
use crate::transcript::{render, RenderMode, Transcript};
use crate::TranscriptError;

/// Per-run settings for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory holding the transcript files
    pub output_dir: PathBuf,

    /// Line rendering mode
    pub mode: RenderMode,

    /// Rename the identifier-named file after the video title
    pub rename_with_title: bool,

    /// Show a spinner while the transcript is fetched
    pub show_progress: bool,
}

/// What happened to the file name after the transcript was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingOutcome {
    /// Renamed after the sanitized title
    Renamed { title: String },

    /// Renaming was turned off
    RenameDisabled,

    /// No usable title came back
    TitleUnavailable,

    /// The identifier-named file was gone before it could be renamed
    WorkingFileMissing,

    /// The rename itself failed; the identifier-named file is kept
    RenameFailed { target: PathBuf, reason: String },
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct TranscriptOutcome {
    /// Video identifier taken from the URL
    pub video_id: String,

    /// Identifier-named file written first
    pub working_path: PathBuf,

    /// Absolute path of the transcript file after naming
    pub path: PathBuf,

    /// Number of lines written
    pub line_count: usize,

    /// How the final name was chosen
    pub naming: NamingOutcome,
}

/// Main transcript pipeline
pub struct TranscriptPipeline {
    transcripts: Box<dyn TranscriptFetcher>,
    titles: Box<dyn TitleFetcher>,
    options: PipelineOptions,
}

impl TranscriptPipeline {
    /// Create a pipeline backed by yt-dlp captions and the page title
    pub fn new(config: &Config, options: PipelineOptions) -> Result<Self> {
        Ok(Self::with_fetchers(
            Box::new(YoutubeTranscriptFetcher::from_config(&config.fetch)),
            Box::new(HtmlTitleFetcher::from_config(&config.fetch)?),
            options,
        ))
    }

    pub fn with_fetchers(
        transcripts: Box<dyn TranscriptFetcher>,
        titles: Box<dyn TitleFetcher>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            transcripts,
            titles,
            options,
        }
    }

    /// Check the input URL and extract its video identifier
    pub fn validate_input(url: &str) -> Result<String, TranscriptError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TranscriptError::MissingUrl);
        }

        if !is_supported_url(url) {
            return Err(TranscriptError::UnsupportedUrl(url.to_string()));
        }

        extract_video_id(url).ok_or_else(|| TranscriptError::MissingVideoId(url.to_string()))
    }

    /// Fetch, render and store the transcript for `url`
    pub async fn run(&self, url: &str) -> Result<TranscriptOutcome> {
        let url = url.trim();
        let video_id = Self::validate_input(url)?;

        tracing::info!("Processing video ID: {}", video_id);

        let transcript = self.fetch_transcript(&video_id).await?;
        let lines = render(&transcript, self.options.mode);

        let working_path = output::save_to_file(&self.options.output_dir, &video_id, &lines)?;
        tracing::info!("Transcript saved to {}", working_path.display());

        let (final_path, naming) = if self.options.rename_with_title {
            self.rename_with_title(url, &working_path).await
        } else {
            (working_path.clone(), NamingOutcome::RenameDisabled)
        };

        let path = std::path::absolute(&final_path).unwrap_or(final_path);

        Ok(TranscriptOutcome {
            video_id,
            working_path,
            path,
            line_count: lines.len(),
            naming,
        })
    }

    /// Fetch the caption track, classifying any failure as a fetch error
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript> {
        let progress = if self.options.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        progress.set_message(format!(
            "Downloading transcript via {}...",
            self.transcripts.source_name()
        ));

        tracing::info!("Fetching transcript via {}", self.transcripts.source_name());

        match self.transcripts.fetch_transcript(video_id).await {
            Ok(transcript) => {
                progress.finish_with_message("Download complete");
                Ok(transcript)
            }
            Err(e) => {
                progress.finish_and_clear();
                Err(TranscriptError::FetchFailed(format!("{:#}", e)).into())
            }
        }
    }

    /// Move the identifier-named file to a title-derived name when possible.
    ///
    /// Never fails: every problem leaves the identifier-named file in place.
    async fn rename_with_title(&self, url: &str, working_path: &Path) -> (PathBuf, NamingOutcome) {
        tracing::info!("Fetching video title...");

        let title = match self.titles.fetch_title(url).await {
            Some(raw) => sanitize_title(&raw),
            None => String::new(),
        };

        if title.is_empty() {
            tracing::warn!("Could not fetch video title, transcript not renamed");
            return (working_path.to_path_buf(), NamingOutcome::TitleUnavailable);
        }

        if !working_path.exists() {
            tracing::warn!("Transcript file {} not found", working_path.display());
            return (working_path.to_path_buf(), NamingOutcome::WorkingFileMissing);
        }

        let target = output::title_target(&self.options.output_dir, &title);

        match fs_err::rename(working_path, &target) {
            Ok(()) => {
                tracing::info!("Transcript file renamed to {}", target.display());
                (target, NamingOutcome::Renamed { title })
            }
            Err(e) => {
                tracing::warn!("Rename to {} failed ({}); keeping original filename", target.display(), e);
                (
                    working_path.to_path_buf(),
                    NamingOutcome::RenameFailed {
                        target,
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}
