use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::parse_source_url, load_settings, render::render_text, HttpCourseSource,
    MissingTierDisplay, Settings, ViewHandle, ViewOptions, ViewSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Search the university course directory from a terminal.
#[derive(Parser, Debug)]
#[command(name = "course-finder")]
struct Args {
    /// Override the course document URL.
    #[arg(long)]
    source_url: Option<String>,
    /// Print the courses matching this text and exit.
    #[arg(long, conflicts_with = "interactive")]
    query: Option<String>,
    /// Read one search per line from stdin.
    #[arg(long)]
    interactive: bool,
    /// How cards without a recommendation tier show it: hide, blank or not_available.
    #[arg(long)]
    missing_tier: Option<MissingTierDisplay>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.source_url {
            settings.source_url = url.clone();
        }
        if let Some(display) = self.missing_tier {
            settings.missing_tier_display = display;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    args.apply(&mut settings);
    let url = parse_source_url(&settings.source_url)?;

    let view = ViewHandle::mount(
        Arc::new(HttpCourseSource::new(url)),
        ViewOptions::from(&settings),
    );
    if let Some(progress) = progress_text(&args, &view.snapshot(), settings.missing_tier_display) {
        print!("{progress}");
    }

    let loaded = view
        .wait_for(|s| !s.loading)
        .await
        .context("course directory stopped before loading")?;
    tracing::debug!(total = loaded.total, "course directory ready");

    if args.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            show_search(&view, &line, settings.missing_tier_display).await?;
        }
    } else {
        let query = args.query.unwrap_or_default();
        show_search(&view, &query, settings.missing_tier_display).await?;
    }

    view.unmount().await;
    Ok(())
}

/// What to show before the collection arrives. One-shot queries keep stdout
/// for the result alone.
fn progress_text(
    args: &Args,
    snapshot: &ViewSnapshot,
    missing_tier: MissingTierDisplay,
) -> Option<String> {
    args.interactive.then(|| render_text(snapshot, missing_tier))
}

async fn show_search(view: &ViewHandle, text: &str, missing_tier: MissingTierDisplay) -> Result<()> {
    let before = view.snapshot().recompute_count;
    view.on_search_input(text);
    let snapshot = view
        .wait_for(|s| s.recompute_count > before)
        .await
        .context("course directory stopped while searching")?;
    println!("{}", render_text(&snapshot, missing_tier));
    Ok(())
}
