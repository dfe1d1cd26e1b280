mod backend_bridge;
mod ui;

use clap::Parser;
use client_core::{load_settings, MissingTierDisplay};
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::{app::APP_TITLE, CourseFinderApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Override the course document URL.
    #[arg(long)]
    source_url: Option<String>,
    /// How cards without a recommendation tier show it: hide, blank or not_available.
    #[arg(long)]
    missing_tier: Option<MissingTierDisplay>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut startup = StartupConfig {
        settings: load_settings(),
    };
    if let Some(url) = args.source_url {
        startup.settings.source_url = url;
    }
    if let Some(display) = args.missing_tier {
        startup.settings.missing_tier_display = display;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("University course finder")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(
            move |_cc: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let app = CourseFinderApp::bootstrap(startup).map_err(|err| {
                    tracing::error!("failed to start course finder: {err:#}");
                    err
                })?;
                Ok(Box::new(app))
            },
        ),
    )
}
