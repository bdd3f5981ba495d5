use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Write synthetic benchmark results for bench-charts", long_about = None)]
struct Cli {
    /// Platform name; files go to result/json/<PLATFORM>
    platform: String,
}

#[derive(Serialize)]
struct ResultFile {
    results: Vec<ResultEntry>,
}

#[derive(Serialize)]
struct ResultEntry {
    command: String,
    mean: f64,
    stddev: f64,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    #[serde(rename = "SIZE")]
    size: u64,
}

/// Cost model per action: seconds for input size `n`.
fn action_cost(action: &str, n: f64) -> f64 {
    match action {
        "bubble" => 2.0e-9 * n * n,
        // map workloads: n inserts + n lookups
        _ => 4.0e-8 * n * n.log2().max(1.0),
    }
}

/// Deterministic wobble in [-1, 1] so lines are not perfectly smooth.
fn jitter(seed: u64) -> f64 {
    let x = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    ((x >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let dir = PathBuf::from("result").join("json").join(&cli.platform);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let actions = ["bubble", "dictionary", "intmap"];
    // (language id, slowdown factor)
    let languages = [("hs", 1.6), ("nt", 1.0)];
    let sizes: Vec<u64> = (1..=10).map(|i| i * 1000).collect();

    for (a, action) in actions.iter().enumerate() {
        for (l, &(language, factor)) in languages.iter().enumerate() {
            let results = sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| {
                    let base = action_cost(action, size as f64) * factor;
                    let seed = (a * 100 + l * 10 + i) as u64;
                    ResultEntry {
                        command: format!("./{action}-{language} {size}"),
                        mean: base * (1.0 + 0.03 * jitter(seed)),
                        stddev: base * 0.02,
                        parameters: Parameters { size },
                    }
                })
                .collect();

            let path = dir.join(format!("{action}-{language}.json"));
            let json = serde_json::to_string_pretty(&ResultFile { results })?;
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
    }

    Ok(())
}
