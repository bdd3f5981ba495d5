mod catalog;
mod chart;
mod data;
mod output;
mod pipeline;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use catalog::Catalogs;
use chart::render::PngRenderer;
use pipeline::Paths;

/// Holds `json/<platform>` inputs and `graph/<platform>` outputs.
const RESULT_ROOT: &str = "result";

#[derive(Parser, Debug)]
#[command(author, version, about = "Render benchmark results as per-action line charts", long_about = None)]
struct Cli {
    /// Platform name; selects result/json/<PLATFORM> and result/graph/<PLATFORM>
    platform: String,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let catalogs = Catalogs::builtin()?;
    let paths = Paths::for_platform(Path::new(RESULT_ROOT), &cli.platform);

    let report = pipeline::run(&paths, &catalogs, &PngRenderer::default())?;

    if !report.is_success() {
        let failed = report.failures().count();
        error!("{failed} of {} charts failed", report.outcomes.len());
        return Ok(ExitCode::FAILURE);
    }
    info!(
        "{} charts written to {}",
        report.written().count(),
        paths.output_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}
