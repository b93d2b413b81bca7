use async_trait::async_trait;
use std::path::Path;

use yt_transcript_tool::pipeline::{NamingOutcome, PipelineOptions};
use yt_transcript_tool::{
    RenderMode, Result, TitleFetcher, Transcript, TranscriptEntry, TranscriptFetcher,
    TranscriptPipeline,
};

struct StaticTranscript(Transcript);

#[async_trait]
impl TranscriptFetcher for StaticTranscript {
    async fn fetch_transcript(&self, _video_id: &str) -> Result<Transcript> {
        Ok(self.0.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

struct StaticTitle(Option<&'static str>);

#[async_trait]
impl TitleFetcher for StaticTitle {
    async fn fetch_title(&self, _url: &str) -> Option<String> {
        self.0.map(String::from)
    }
}

fn pipeline(dir: &Path, title: Option<&'static str>) -> TranscriptPipeline {
    TranscriptPipeline::with_fetchers(
        Box::new(StaticTranscript(vec![
            TranscriptEntry::new("Hello", 0.0),
            TranscriptEntry::new("world", 5.0),
        ])),
        Box::new(StaticTitle(title)),
        PipelineOptions {
            output_dir: dir.to_path_buf(),
            mode: RenderMode::Timestamped,
            rename_with_title: true,
            show_progress: false,
        },
    )
}

const EXPECTED: &str = "[00:00:00] Hello\n[00:00:05] world\n";

#[tokio::test]
async fn titled_video_is_saved_under_its_title() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = pipeline(dir.path(), Some("My Video"))
        .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .await
        .unwrap();

    assert_eq!(outcome.path.file_name().unwrap(), "My Video_transcript.txt");
    assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), EXPECTED);
    assert!(!dir.path().join("dQw4w9WgXcQ_transcript.txt").exists());
}

#[tokio::test]
async fn untitled_video_keeps_identifier_name() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = pipeline(dir.path(), None)
        .run("https://youtu.be/dQw4w9WgXcQ")
        .await
        .unwrap();

    assert_eq!(outcome.naming, NamingOutcome::TitleUnavailable);
    assert_eq!(outcome.path.file_name().unwrap(), "dQw4w9WgXcQ_transcript.txt");
    assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), EXPECTED);
}

#[tokio::test]
async fn repeated_runs_never_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path(), Some("My Video"));
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    let first = pipeline.run(url).await.unwrap();
    let second = pipeline.run(url).await.unwrap();
    let third = pipeline.run(url).await.unwrap();

    assert_eq!(first.path.file_name().unwrap(), "My Video_transcript.txt");
    assert_eq!(second.path.file_name().unwrap(), "My Video_transcript_2.txt");
    assert_eq!(third.path.file_name().unwrap(), "My Video_transcript_3.txt");
    for outcome in [first, second, third] {
        assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), EXPECTED);
    }
}

#[tokio::test]
async fn output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("a").join("b").join("Transcriptions");

    let outcome = pipeline(&output_dir, Some("Nested"))
        .run("https://www.youtube.com/embed/dQw4w9WgXcQ")
        .await
        .unwrap();

    assert!(output_dir.is_dir());
    assert!(outcome.path.starts_with(std::path::absolute(&output_dir).unwrap()));
}
