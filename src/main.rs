use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript_tool::cli::{self, Cli, Commands};
use yt_transcript_tool::config::Config;
use yt_transcript_tool::extractors::SUPPORTED_HOSTS;
use yt_transcript_tool::pipeline::{NamingOutcome, PipelineOptions, TranscriptOutcome};
use yt_transcript_tool::transcript::RenderMode;
use yt_transcript_tool::{utils, TranscriptError, TranscriptPipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcript_tool=debug"
    } else {
        "yt_transcript_tool=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Fetch {
            url,
            output_dir,
            plain,
            languages,
            keep_id_name,
        } => {
            let mut config = Config::load().await?;
            if !languages.is_empty() {
                config.fetch.languages = languages;
                config.validate()?;
            }

            let options = PipelineOptions {
                output_dir: config.output_dir(output_dir.as_deref())?,
                mode: if plain { RenderMode::Plain } else { config.output.mode },
                rename_with_title: config.output.rename_with_title && !keep_id_name,
                show_progress: !cli.quiet,
            };

            if let Err(err) = fetch(&config, options, url).await {
                report_failure(&err);
                std::process::exit(1);
            }
        }
        Commands::Config { show } => {
            let config = Config::load().await?;
            if show {
                config.display();
            } else {
                let path = Config::config_path()?;
                if path.exists() {
                    println!("Configuration file already exists:");
                } else {
                    config.save().await?;
                    println!("Wrote default configuration to:");
                }
                println!("  {}", path.display());
            }
        }
        Commands::Platforms => {
            println!("Supported platforms:");
            for host in SUPPORTED_HOSTS {
                println!("  • {}", host);
            }
            println!("Accepted URL shapes:");
            println!("  • https://www.youtube.com/watch?v=<id>");
            println!("  • https://youtu.be/<id>");
            println!("  • https://www.youtube.com/<embed|shorts|live>/<id>");
        }
    }

    Ok(())
}

/// Interactive or argument-driven transcript download
async fn fetch(config: &Config, options: PipelineOptions, url: Option<String>) -> Result<()> {
    println!("=== YouTube Transcript Tool (CLI - {}) ===\n", mode_label(options.mode));

    let url = match url {
        Some(url) => url,
        None => cli::prompt_for_url()?,
    };

    let video_id = TranscriptPipeline::validate_input(&url)?;

    // Check for required external dependencies (non-fatal)
    let missing_deps = utils::check_dependencies(&config.fetch.yt_dlp_path).await;
    if !missing_deps.is_empty() {
        eprintln!("{} Dependency check warnings:", style("⚠").yellow());
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }

    println!("\nProcessing video ID: {}", video_id);
    println!("URL: {}", url.trim());
    println!("\nDownloading transcript...");

    let pipeline = TranscriptPipeline::new(config, options)?;
    let outcome = pipeline.run(&url).await?;

    report_success(&outcome);
    Ok(())
}

fn mode_label(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Plain => "Plain",
        RenderMode::Timestamped => "Timestamped",
    }
}

fn report_success(outcome: &TranscriptOutcome) {
    println!(
        "{} Transcript saved to {} ({} lines)",
        style("✓").green(),
        outcome.working_path.display(),
        outcome.line_count
    );

    match &outcome.naming {
        NamingOutcome::Renamed { .. } => {
            let name = outcome
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{} Transcript file renamed to: {}", style("✓").green(), name);
        }
        NamingOutcome::RenameDisabled => {}
        NamingOutcome::TitleUnavailable => {
            println!(
                "{} Could not fetch video title, transcript not renamed.",
                style("Warning:").yellow()
            );
        }
        NamingOutcome::WorkingFileMissing => {
            println!(
                "{} Transcript file {} not found.",
                style("Warning:").yellow(),
                outcome.working_path.display()
            );
        }
        NamingOutcome::RenameFailed { target, reason } => {
            println!(
                "{} Rename to {} failed ({}); keeping original filename.",
                style("Warning:").yellow(),
                target.display(),
                reason
            );
        }
    }

    println!("\n{} SUCCESS! Transcript saved at:", style("✓").green());
    println!("  {}", outcome.path.display());
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<TranscriptError>() {
        Some(input) if input.is_input_error() => {
            println!("{} {}", style("Error:").red(), input);
        }
        Some(TranscriptError::FetchFailed(reason)) => {
            println!("\n{} ERROR: {}", style("✗").red(), reason);
            println!("\nPossible issues:");
            println!("- Video has no captions/subtitles available");
            println!("- Video is private or restricted");
            println!("- Network connection issue");
            println!("- Invalid video URL");
        }
        _ => {
            println!("\n{} ERROR: {}", style("✗").red(), err);
            for cause in err.chain().skip(1) {
                println!("    {}", cause);
            }
        }
    }
}
