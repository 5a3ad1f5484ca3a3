use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use maze_core::{route_all, Penalties};
use maze_io::{parse, render};

#[derive(Parser)]
#[command(name = "maze-router")]
#[command(about = "Two-layer grid maze router for net routing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route every net in a session and write the committed paths
    Route {
        /// Input file: header, obstacles, net pin lists
        input: PathBuf,
        /// Output file: one line per routed net
        output: PathBuf,
        /// Also render a two-panel PNG visualization
        #[arg(long)]
        png: Option<PathBuf>,
        /// Raise log verbosity; repeatable (-v, -vv). Overridden by RUST_LOG.
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

fn init_tracing(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Route { input, output, png, verbose } => {
            init_tracing(verbose);
            run_route(&input, &output, png.as_deref())
        }
    }
}

fn run_route(input: &std::path::Path, output: &std::path::Path, png: Option<&std::path::Path>) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading input file {}", input.display()))?;

    let parsed = parse(&text).with_context(|| format!("parsing input file {}", input.display()))?;

    for diagnostic in &parsed.diagnostics {
        warn!("{diagnostic}");
    }

    let mut grid = maze_core::Grid::new(parsed.rows, parsed.cols);
    for &(layer, row, col) in &parsed.obstacles {
        grid.mark_obstacle(layer, row, col);
    }

    let penalties = Penalties {
        bend_penalty: parsed.bend_penalty,
        via_penalty: parsed.via_penalty,
    };

    let result = route_all(&mut grid, &parsed.nets, &penalties);
    for diagnostic in &result.diagnostics {
        warn!("{diagnostic}");
    }
    info!(
        routed = result.routed.len(),
        total = parsed.nets.len(),
        "routing session complete"
    );

    let rendered = render(&result.routed);
    fs::write(output, rendered).with_context(|| format!("writing output file {}", output.display()))?;

    if let Some(png_path) = png {
        if let Err(err) = maze_io::visualize::save_png(png_path, parsed.rows, parsed.cols, &parsed.obstacles, &result.routed)
        {
            warn!(error = %err, path = %png_path.display(), "failed to render PNG visualization");
        }
    }

    Ok(())
}
