use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;

use super::TranscriptFetcher;
use crate::config::FetchConfig;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::Result;

const CAPTION_EXTENSION: &str = "json3";

/// YouTube caption track in yt-dlp's `json3` subtitle format
#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: Option<f64>,
    #[serde(default)]
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: Option<String>,
}

/// YouTube caption fetcher using yt-dlp
pub struct YoutubeTranscriptFetcher {
    yt_dlp_path: String,
    languages: Vec<String>,
}

impl YoutubeTranscriptFetcher {
    pub fn new(yt_dlp_path: impl Into<String>, languages: Vec<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            languages,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.yt_dlp_path.clone(), config.languages.clone())
    }

    /// Canonical watch page for a video identifier
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", video_id)
    }

    /// Have yt-dlp write the caption files for `video_id` into `dir`
    async fn download_captions(&self, video_id: &str, dir: &Path) -> Result<()> {
        tracing::debug!("Downloading captions for {} into {}", video_id, dir.display());

        let languages = self.languages.join(",");
        let template = dir.join("%(id)s.%(ext)s");
        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-format",
                CAPTION_EXTENSION,
                "--sub-langs",
                languages.as_str(),
                "--no-playlist",
                "--no-warnings",
            ])
            .arg("--output")
            .arg(&template)
            .arg(Self::watch_url(video_id))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run {}: {}", self.yt_dlp_path, e))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp failed: {}", error.trim());
        }

        Ok(())
    }

    /// Pick the caption file for the most preferred language available
    fn pick_caption_file(&self, dir: &Path, video_id: &str) -> Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = fs_err::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension().and_then(|ext| ext.to_str()) == Some(CAPTION_EXTENSION)
            })
            .collect();
        candidates.sort();

        let preferred = self.languages.iter().find_map(|lang| {
            let name = format!("{}.{}.{}", video_id, lang, CAPTION_EXTENSION);
            candidates
                .iter()
                .find(|path| path.file_name().and_then(|n| n.to_str()) == Some(name.as_str()))
                .cloned()
        });

        Ok(preferred.or_else(|| candidates.into_iter().next()))
    }
}

/// Parse a `json3` caption document into transcript entries.
///
/// Events without text segments (window and pen definitions) carry no caption and
/// are skipped. Line breaks inside a caption become spaces so that every entry
/// renders to exactly one output line.
pub fn parse_json3(content: &str) -> Result<Transcript> {
    let captions: Json3Captions = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse caption JSON: {}", e))?;

    let entries = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text: String = segs
                .into_iter()
                .filter_map(|seg| seg.utf8)
                .collect::<String>()
                .replace('\n', " ");

            Some(TranscriptEntry {
                text: Some(text),
                start: event.start_ms.map(|ms| ms / 1000.0),
            })
        })
        .collect();

    Ok(entries)
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript> {
        let temp_dir = TempDir::new()
            .map_err(|e| anyhow::anyhow!("Failed to create temporary directory: {}", e))?;

        self.download_captions(video_id, temp_dir.path()).await?;

        let caption_file = self
            .pick_caption_file(temp_dir.path(), video_id)?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No captions available for {} in languages: {}",
                    video_id,
                    self.languages.join(", ")
                )
            })?;

        tracing::debug!("Using caption file {}", caption_file.display());

        let content = fs_err::read_to_string(&caption_file)?;
        let transcript = parse_json3(&content)?;

        tracing::info!("Fetched {} caption entries for {}", transcript.len(), video_id);
        Ok(transcript)
    }

    fn source_name(&self) -> &'static str {
        "yt-dlp"
    }
}
