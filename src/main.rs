mod app;
mod config;
mod data;
mod state;
mod ui;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use app::CardExplorerApp;
use clap::Parser;
use config::{Cli, Command, QueryArgs};
use data::filter::filter;
use data::loader::{load_dataset, DataPaths};
use data::model::Dataset;
use eframe::egui;
use serde::Serialize;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Build before anything else runs; a bad input file stops the process.
    let paths = cli.data.paths();
    let dataset = load_dataset(&paths)?;

    match cli.command.unwrap_or(Command::View) {
        Command::View => run_viewer(dataset, paths),
        Command::Query(args) => run_query(&dataset, &args),
        Command::Candidates => print_json(&dataset.candidates),
    }
}

fn run_viewer(dataset: Dataset, paths: DataPaths) -> Result<()> {
    let app = CardExplorerApp::new(AppState::new(Arc::new(dataset), paths));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Customer Transactions",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))
}

fn run_query(dataset: &Dataset, args: &QueryArgs) -> Result<()> {
    let mut rows = filter(&dataset.table, &args.selection());
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }
    print_json(&rows)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("writing JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}
