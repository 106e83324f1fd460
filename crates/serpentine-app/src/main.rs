//! Serpentine Demo Application
//!
//! Headless driver for the curved-space snake engine. Runs a session at a
//! fixed tick and logs frame summaries; the real windowing/input layer is a
//! separate front end that consumes the same engine API.
//!
//! # Usage
//!
//! ```bash
//! # Walk the hyperbolic manifold for 300 ticks
//! serpentine run --manifold hyperbolic --ticks 300
//!
//! # Deterministic flat run
//! serpentine run --manifold flat --seed 42
//!
//! # Inspect a {7,3} tessellation two rings deep
//! serpentine tiling --rings 2
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use serpentine_engine::{Manifold, Session, SessionConfig, Tiling};

/// Serpentine curved-space snake demo
#[derive(Parser, Debug)]
#[command(name = "serpentine")]
#[command(author, version, about = "Curved-space snake engine demo", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a headless session (default if no subcommand)
    Run {
        /// Manifold: flat, spherical, or hyperbolic
        #[arg(short, long, default_value = "hyperbolic")]
        manifold: String,

        /// Number of movement ticks
        #[arg(short, long, default_value = "300")]
        ticks: u64,

        /// Seed for deterministic target placement
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Build a {p,q} tessellation and report its shape
    Tiling {
        /// Polygon vertex count
        #[arg(short, long, default_value = "7")]
        p: usize,

        /// Polygons meeting at each vertex
        #[arg(short, long, default_value = "3")]
        q: usize,

        /// Rings of neighbors around the base tile
        #[arg(short, long, default_value = "1")]
        rings: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Serpentine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None => run_session("hyperbolic", 300, None),
        Some(Commands::Run {
            manifold,
            ticks,
            seed,
        }) => run_session(&manifold, ticks, seed),
        Some(Commands::Tiling { p, q, rings }) => report_tiling(p, q, rings),
    }
}

fn parse_manifold(name: &str) -> anyhow::Result<Manifold> {
    match name.to_lowercase().as_str() {
        "flat" => Ok(Manifold::Flat),
        "spherical" => Ok(Manifold::Spherical),
        "hyperbolic" => Ok(Manifold::Hyperbolic),
        other => bail!("unknown manifold '{other}' (expected flat, spherical or hyperbolic)"),
    }
}

/// Drive one session at a fixed tick with a canned input pattern:
/// steady forward motion with a periodic lateral drift.
fn run_session(manifold: &str, ticks: u64, seed: Option<u64>) -> anyhow::Result<()> {
    let manifold = parse_manifold(manifold)?;
    let mut session = match seed {
        Some(seed) => Session::with_seed(manifold, seed),
        None => Session::with_config(manifold, SessionConfig::default()),
    }
    .context("failed to start session")?;

    info!("Session on the {} manifold", manifold.name());
    if let Some(tiling) = session.tiling() {
        info!(
            "Tessellation {{{},{}}} with {} tiles",
            tiling.p(),
            tiling.q(),
            tiling.len()
        );
    }

    let mut eaten = 0u64;
    for tick in 0..ticks {
        session.move_forward(1.0).context("forward step failed")?;
        if tick % 4 == 0 {
            session.move_lateral(-1.0).context("lateral step failed")?;
        }

        if session.try_consume_target().context("eat check failed")? {
            eaten += 1;
            info!(tick, eaten, len = session.body().len(), "target eaten");
        }

        if tick % 60 == 0 {
            let frame = session.render_frame().context("frame build failed")?;
            debug!(
                tick,
                body = frame.body.len(),
                front = frame.front_body().count(),
                back = frame.back_body().count(),
                "frame"
            );
        }
    }

    info!(
        ticks,
        eaten,
        final_len = session.body().len(),
        "session finished"
    );
    Ok(())
}

fn report_tiling(p: usize, q: usize, rings: usize) -> anyhow::Result<()> {
    let tiling = Tiling::with_rings(p, q, rings)
        .with_context(|| format!("cannot build a {{{p},{q}}} tessellation"))?;

    info!(
        "{{{},{}}} tessellation: {} tiles after {} ring(s)",
        tiling.p(),
        tiling.q(),
        tiling.len(),
        rings
    );
    for (i, tile) in tiling.tiles().iter().enumerate().take(3) {
        debug!(tile = i, vertices = tile.vertex_count(), "tile");
    }
    Ok(())
}
