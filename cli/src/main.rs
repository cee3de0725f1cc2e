use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use gridpath_core::{GridModel, RandomMoveSource, Status, TraversalEngine, TraversalReport};

mod render;

use render::AsciiRenderer;

/// Randomized depth-first maze traversal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Number of randomly placed blocking cells
    #[arg(long, default_value_t = 20)]
    obstacles: usize,

    /// Random seed; derived from the clock when omitted
    #[arg(long)]
    seed: Option<u32>,

    /// Print an ASCII frame after every step
    #[arg(long)]
    watch: bool,

    /// Save the final report as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(seed_from_clock);

    println!(
        "🔍 Exploration started on {}x{} grid ({} obstacles, seed {})",
        args.rows, args.cols, args.obstacles, seed
    );

    let mut moves = RandomMoveSource::new(seed);
    let grid = GridModel::generate(args.rows, args.cols, args.obstacles, &mut moves)
        .context("invalid grid configuration")?;
    let mut engine = TraversalEngine::new(grid, moves);

    let report = if args.watch {
        let mut renderer = AsciiRenderer::stdout();
        engine.run(&mut renderer)
    } else {
        engine.run(&mut ())
    }
    .context("traversal failed")?;

    match report.status {
        Status::Found => {
            println!("🎯 Target Reached!");
            print_report(&report);
        }
        Status::Exhausted => {
            println!(
                "🚧 No path exists for this obstacle layout ({} cells explored)",
                report.step_count + 1
            );
        }
        // run only returns terminal reports
        Status::Exploring => {}
    }

    if let Some(path) = &args.output {
        save_report(&report, path)
            .with_context(|| format!("failed to save report to {}", path.display()))?;
        println!("💾 Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &TraversalReport) {
    println!("{}", "-".repeat(30));
    println!("Path: {:?}", report.path);
    println!("Total Moves: {}", report.step_count);
    println!("Final Efficiency Score: {}", report.score);
    println!("{}", "-".repeat(30));
}

fn save_report(report: &TraversalReport, path: &PathBuf) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Clock-derived fallback seed for unseeded runs.
fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() ^ elapsed.as_secs() as u32)
        .unwrap_or(1)
}
