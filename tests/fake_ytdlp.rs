#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Stand-in for yt-dlp: writes one English json3 caption file next to the
/// requested output template, or fails like a private video when asked to.
const FAKE_YT_DLP: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "2024.01.01"
    exit 0
fi
if [ -n "$FAKE_YT_DLP_FAIL" ]; then
    echo "ERROR: [youtube] dQw4w9WgXcQ: Private video" >&2
    exit 1
fi
out=""
while [ $# -gt 0 ]; do
    if [ "$1" = "--output" ]; then
        out="$2"
        shift
    fi
    shift
done
dir=$(dirname "$out")
cat > "$dir/dQw4w9WgXcQ.en.json3" <<'EOF'
{"events":[{"tStartMs":0,"dDurationMs":5000,"id":1},{"tStartMs":0,"segs":[{"utf8":"Hello"}]},{"tStartMs":2000,"segs":[{"utf8":"\n"}]},{"tStartMs":5000,"segs":[{"utf8":"world"}]}]}
EOF
"#;

fn install_fake_yt_dlp(dir: &Path) {
    let script = dir.join("fake-yt-dlp");
    std::fs::write(&script, FAKE_YT_DLP).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::write(
        dir.join("config.yaml"),
        format!("fetch:\n  yt_dlp_path: {}\n", script.display()),
    )
    .unwrap();
}

// Both scenarios share one test so the script is never written while another
// test thread is spawning processes.
#[test]
fn fetch_with_fake_yt_dlp() {
    let home = tempfile::tempdir().unwrap();
    install_fake_yt_dlp(home.path());
    let out = home.path().join("Transcriptions");

    Command::cargo_bin("transcript-tool")
        .unwrap()
        .current_dir(home.path())
        .env("HOME", home.path())
        .args(["-q", "fetch", "https://youtu.be/dQw4w9WgXcQ", "--keep-id-name", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing video ID: dQw4w9WgXcQ"))
        .stdout(predicate::str::contains("SUCCESS"));

    assert_eq!(
        std::fs::read_to_string(out.join("dQw4w9WgXcQ_transcript.txt")).unwrap(),
        "[00:00:00] Hello\n[00:00:05] world\n"
    );

    let failing_out = home.path().join("failing");
    Command::cargo_bin("transcript-tool")
        .unwrap()
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("FAKE_YT_DLP_FAIL", "1")
        .args(["-q", "fetch", "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "-o"])
        .arg(&failing_out)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Private video"))
        .stdout(predicate::str::contains("Possible issues"));

    assert!(!failing_out.exists());
}
