use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transcript::RenderMode;

/// Directory created next to the executable when no output directory is configured
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "Transcriptions";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how transcripts are written
    pub output: OutputConfig,

    /// Remote lookups
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (defaults to `Transcriptions/` next to the executable)
    pub directory: Option<PathBuf>,

    /// Line rendering mode
    pub mode: RenderMode,

    /// Rename the transcript after the video title once it is known
    pub rename_with_title: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// yt-dlp executable used for caption downloads
    pub yt_dlp_path: String,

    /// Caption languages in order of preference
    pub languages: Vec<String>,

    /// Timeout for the title lookup, in seconds
    pub title_timeout_secs: u64,

    /// User agent sent with the title lookup
    pub user_agent: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            mode: RenderMode::Timestamped,
            rename_with_title: true,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            languages: vec!["en".to_string()],
            title_timeout_secs: 10,
            user_agent: concat!("yt-transcript-tool/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-transcript-tool").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("fetch.yt_dlp_path must not be empty");
        }

        if self.fetch.languages.iter().all(|lang| lang.trim().is_empty()) {
            anyhow::bail!("fetch.languages must name at least one caption language");
        }

        if self.fetch.title_timeout_secs == 0 {
            anyhow::bail!("fetch.title_timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// Resolve the output directory: explicit override, then config, then the
    /// `Transcriptions` directory beside the running executable.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir.or(self.output.directory.as_deref()) {
            return Ok(dir.to_path_buf());
        }

        let exe = std::env::current_exe()
            .context("Could not determine executable location")?;
        let exe_dir = exe
            .parent()
            .context("Executable has no parent directory")?;

        Ok(exe_dir.join(DEFAULT_OUTPUT_DIR_NAME))
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        match self.output_dir(None) {
            Ok(dir) => println!("  Output Directory: {}", dir.display()),
            Err(e) => println!("  Output Directory: unavailable ({})", e),
        }
        println!("  Render Mode: {}", self.output.mode);
        println!("  Rename With Title: {}", self.output.rename_with_title);
        println!("  yt-dlp Path: {}", self.fetch.yt_dlp_path);
        println!("  Caption Languages: {}", self.fetch.languages.join(", "));
        println!("  Title Timeout: {}s", self.fetch.title_timeout_secs);
    }
}
