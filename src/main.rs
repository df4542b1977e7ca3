mod app;
mod color;
mod context;
/// Event dispatch between the widgets and the view models.
///
/// Widgets never touch the dataset directly. They emit an `Event` naming the
/// source widget and the kind of change; the controller looks the pair up in
/// its handler table and hands back the `Output`s the shell has to re-render.
mod controller;
mod data;
mod state;
mod ui;
/// View models: the minimal shapes the chart and the info panel render from.
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::CarDashApp;
use clap::Parser;
use eframe::egui;

use crate::context::AppContext;
use crate::state::AppState;

/// Interactive fuel efficiency vs. horsepower dashboard over car listings.
#[derive(Debug, Parser)]
#[command(name = "car-dash", version, about)]
struct Args {
    /// Listings table (.csv, or .tsv for tab separated)
    #[arg(default_value = "car-sales.csv")]
    path: PathBuf,

    /// Verbose logging (RUST_LOG still takes precedence)
    #[arg(long)]
    debug: bool,

    /// Clear the details panel when the pointer leaves all points
    #[arg(long)]
    clear_on_unhover: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let dataset = data::loader::load_file(&args.path)?;
    let context = AppContext::new(dataset, Some(args.path.clone()));
    let state = AppState::new(context, args.clear_on_unhover);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Car Dash – Fuel Efficiency Vs. Horsepower",
        options,
        Box::new(|_cc| Ok(Box::new(CarDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the UI event loop")
}
