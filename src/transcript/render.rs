use super::{Caption, RenderMode};

/// Format an offset in seconds as `HH:MM:SS`, truncating fractional seconds
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Render caption entries into output lines.
///
/// Entries whose text is empty after trimming are skipped. Every front end writes
/// the lines produced here, so the same transcript and mode always give the same
/// bytes on disk.
pub fn render<C: Caption>(entries: &[C], mode: RenderMode) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| {
            let text = entry.text().trim();
            if text.is_empty() {
                return None;
            }

            Some(match mode {
                RenderMode::Plain => text.to_string(),
                RenderMode::Timestamped => {
                    format!("[{}] {}", format_timestamp(entry.start()), text)
                }
            })
        })
        .collect()
}
