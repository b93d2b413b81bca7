use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod naming;

pub use naming::*;

/// Join rendered lines into file content, one newline after every line
pub fn format_as_text(lines: &[String]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// Write rendered lines to `<output_dir>/<stem>_transcript.txt`, creating the
/// directory if needed. Returns the written path.
pub fn save_to_file(output_dir: &Path, stem: &str, lines: &[String]) -> Result<PathBuf> {
    fs_err::create_dir_all(output_dir).context("Failed to create output directory")?;

    let path = output_dir.join(transcript_file_name(stem));
    fs_err::write(&path, format_as_text(lines)).context("Failed to write transcript file")?;

    tracing::debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(path)
}

/// Collision-free destination for a transcript named after `sanitized_title`
pub fn title_target(output_dir: &Path, sanitized_title: &str) -> PathBuf {
    unique_path(&output_dir.join(transcript_file_name(sanitized_title)))
}
