use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

mod app;
mod layout;
mod toolbar;
mod window;

use app::SoloHostApp;

#[derive(Debug, Parser)]
#[command(author, version, about = "Minimal desktop shell hosting a single audio plugin")]
struct Cli {
    /// Plugin binary to load at startup
    plugin: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Cli::parse();

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SoloHost",
        native_options,
        Box::new(move |cc| Box::new(SoloHostApp::new(cc, args.plugin))),
    )
    .map_err(|err| anyhow!(err.to_string()))
}
