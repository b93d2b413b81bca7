use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod render;

pub use render::{format_timestamp, render};

/// Read access to a single caption unit
pub trait Caption {
    /// Caption text, empty when the source had none
    fn text(&self) -> &str;

    /// Offset from the start of the video in seconds, never negative
    fn start(&self) -> f64;
}

/// Individual caption entry as delivered by a transcript source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Caption text
    #[serde(default)]
    pub text: Option<String>,

    /// Start time in seconds
    #[serde(default)]
    pub start: Option<f64>,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: Some(text.into()),
            start: Some(start),
        }
    }
}

impl Caption for TranscriptEntry {
    fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    fn start(&self) -> f64 {
        match self.start {
            Some(start) if start.is_finite() && start > 0.0 => start,
            _ => 0.0,
        }
    }
}

/// Ordered caption entries for one video, in display order
pub type Transcript = Vec<TranscriptEntry>;

/// How transcript lines are rendered
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Caption text only
    Plain,
    /// `[HH:MM:SS] text`
    #[default]
    Timestamped,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Plain => write!(f, "plain"),
            RenderMode::Timestamped => write!(f, "timestamped"),
        }
    }
}
