use anyhow::Result;
use clap::{Parser, Subcommand};
use console::Term;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "transcript-tool",
    about = "YouTube Transcript Tool - Save a video's captions as a timestamped text file",
    version,
    long_about = "Downloads the caption track of a YouTube video, writes it as one line per caption (optionally prefixed with [HH:MM:SS]) and names the file after the video title."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the transcript of a YouTube video
    Fetch {
        /// YouTube URL (prompted for when omitted)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Directory to save transcripts in (default: Transcriptions/ next to the executable)
        #[arg(short, long, value_name = "DIR", env = "TRANSCRIPT_TOOL_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Write caption text only, without [HH:MM:SS] prefixes
        #[arg(long)]
        plain: bool,

        /// Preferred caption language (repeatable, first match wins)
        #[arg(
            short,
            long = "lang",
            value_name = "LANG",
            value_parser = clap::builder::NonEmptyStringValueParser::new()
        )]
        languages: Vec<String>,

        /// Keep the <video_id>_transcript.txt name instead of renaming after the title
        #[arg(long)]
        keep_id_name: bool,
    },

    /// Show or initialise the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// List accepted URL shapes
    Platforms,
}

/// Ask the operator for a URL, reading the answer from stdin whether it is a
/// terminal or a pipe
pub fn prompt_for_url() -> Result<String> {
    let term = Term::stdout();
    term.write_str("Enter YouTube URL: ")?;

    read_url(std::io::stdin().lock())
}

/// Read one line of input as a URL
pub fn read_url(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
