//! CLI tool for sheetgrid - replays a JSON command script and outputs the
//! resulting grid state as JSON
//!
//! Usage:
//!   sheetgrid_cli <script.json>              # Output JSON to stdout
//!   sheetgrid_cli <script.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=sheetgrid=debug` to trace every state transition on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::Serialize;
use sheetgrid::engine::{Script, Snapshot, Step};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report {
    steps: Vec<Step>,
    #[serde(flatten)]
    snapshot: Snapshot,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sheetgrid_cli <script.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let script = match Script::from_json(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing script: {}", e);
            std::process::exit(1);
        }
    };

    // Replay
    let (engine, steps) = match script.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error building grid: {}", e);
            std::process::exit(1);
        }
    };

    let failures = steps.iter().filter(|s| matches!(s, Step::Err(_))).count();
    if failures > 0 {
        eprintln!("{} of {} commands failed", failures, steps.len());
    }

    let report = Report {
        steps,
        snapshot: engine.snapshot(),
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
