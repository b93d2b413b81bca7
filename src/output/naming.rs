use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Suffix shared by the identifier-named and the title-named transcript files
pub const TRANSCRIPT_SUFFIX: &str = "_transcript.txt";

/// Longest title kept in a file name, in characters
pub const MAX_TITLE_CHARS: usize = 100;

static RESERVED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Make a raw video title safe to use as a file name stem.
///
/// Reserved characters become `-`, surrounding whitespace is trimmed, dash runs are
/// collapsed and the result is cut to [`MAX_TITLE_CHARS`] characters. The cut may
/// land mid-word.
pub fn sanitize_title(raw: &str) -> String {
    let replaced = RESERVED_CHARS.replace_all(raw, "-");
    let collapsed = DASH_RUNS.replace_all(replaced.trim(), "-");

    collapsed.chars().take(MAX_TITLE_CHARS).collect()
}

/// File name for a transcript stored under `stem`
pub fn transcript_file_name(stem: &str) -> String {
    format!("{}{}", stem, TRANSCRIPT_SUFFIX)
}

/// Return `desired` if nothing exists there, otherwise the first free
/// `stem_N.ext` sibling counting up from 2.
///
/// Only checks the filesystem, never creates anything, so two calls without a
/// write in between return the same path.
pub fn unique_path(desired: &Path) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }

    let stem = desired
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = desired
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 2;
    loop {
        let candidate = desired.with_file_name(format!("{}_{}{}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title_reserved_chars() {
        let sanitized = sanitize_title("A/B: C??");
        assert!(!sanitized.contains(['/', ':', '?']));
        assert!(!sanitized.contains("--"));
        assert_eq!(sanitized, "A-B- C-");
    }

    #[test]
    fn test_sanitize_title_every_reserved_char() {
        assert_eq!(sanitize_title(r#"a<b>c:d"e/f\g|h?i*j"#), "a-b-c-d-e-f-g-h-i-j");
        assert_eq!(sanitize_title("<>:\"/\\|?*"), "-");
    }

    #[test]
    fn test_sanitize_title_trims_and_collapses() {
        assert_eq!(sanitize_title("  Rust -- Ownership  "), "Rust - Ownership");
        assert_eq!(sanitize_title("a---b"), "a-b");
        assert_eq!(sanitize_title("   "), "");
    }

    #[test]
    fn test_sanitize_title_truncates_to_100_chars() {
        let raw = "x".repeat(200);
        assert_eq!(sanitize_title(&raw).chars().count(), 100);

        let raw = "é".repeat(150);
        assert_eq!(sanitize_title(&raw).chars().count(), 100);
    }

    #[test]
    fn test_sanitize_title_keeps_case_and_unicode() {
        assert_eq!(sanitize_title("Ünïcode Title 日本"), "Ünïcode Title 日本");
    }

    #[test]
    fn test_transcript_file_name() {
        assert_eq!(transcript_file_name("dQw4w9WgXcQ"), "dQw4w9WgXcQ_transcript.txt");
    }

    #[test]
    fn test_unique_path_fresh_path_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("My Video_transcript.txt");
        assert_eq!(unique_path(&desired), desired);
    }

    #[test]
    fn test_unique_path_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("My Video_transcript.txt");

        let first = unique_path(&desired);
        std::fs::write(&first, "one").unwrap();
        let second = unique_path(&desired);
        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("My Video_transcript_2.txt"));

        std::fs::write(&second, "two").unwrap();
        assert_eq!(unique_path(&desired), dir.path().join("My Video_transcript_3.txt"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("notes");
        std::fs::write(&desired, "").unwrap();
        assert_eq!(unique_path(&desired), dir.path().join("notes_2"));
    }

    #[test]
    fn test_unique_path_dotted_stem() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("v1.2 release_transcript.txt");
        std::fs::write(&desired, "").unwrap();
        assert_eq!(
            unique_path(&desired),
            dir.path().join("v1.2 release_transcript_2.txt")
        );
    }
}
