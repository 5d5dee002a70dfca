#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a Warren area and prints its map.

mod config;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warren_area::{query, Area, AreaConfig};
use warren_core::{BoundsPolicy, Capacity, GridCoord};
use warren_rendering::{MapView, Presenter, TextPresenter};

use self::config::{FileConfig, Overrides, Settings};

/// Generates the topology of a procedural dungeon area.
#[derive(Debug, Parser)]
#[command(name = "warren", version)]
struct Cli {
    /// Maximum number of cells to scatter [default: 500].
    #[arg(long)]
    capacity: Option<usize>,

    /// Seed for the generator; a random seed is drawn and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Whether normalization keeps the maximum row and column [default: exclusive].
    #[arg(long, value_enum)]
    bounds: Option<BoundsArg>,

    /// TOML file providing `capacity`, `seed` and `bounds`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also list the exits of every cell after the map.
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoundsArg {
    Exclusive,
    Inclusive,
}

impl From<BoundsArg> for BoundsPolicy {
    fn from(value: BoundsArg) -> Self {
        match value {
            BoundsArg::Exclusive => Self::Exclusive,
            BoundsArg::Inclusive => Self::Inclusive,
        }
    }
}

/// Entry point for the Warren command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warren=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let file = cli.config.as_deref().map(FileConfig::load).transpose()?;
    let settings = Settings::resolve(
        Overrides {
            capacity: cli.capacity,
            seed: cli.seed,
            bounds: cli.bounds.map(BoundsPolicy::from),
        },
        file,
    );
    let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        seed,
        capacity = settings.capacity,
        bounds = ?settings.bounds,
        "generating area"
    );

    let config = AreaConfig::new(Capacity::new(settings.capacity)?, settings.bounds);
    let area = Area::from_seed(&config, seed).context("area generation failed")?;
    let view = MapView::new(
        query::grid(&area),
        query::start_cell(&area),
        query::end_cell(&area),
        query::origin_cell(&area),
    );

    let stdout = io::stdout();
    let mut presenter = TextPresenter::new(stdout.lock());
    presenter.present(&view)?;

    if cli.summary {
        let mut out = presenter.into_inner();
        write_summary(&mut out, &area).context("failed to write exit summary")?;
    }

    Ok(())
}

fn write_summary(out: &mut impl Write, area: &Area) -> io::Result<()> {
    writeln!(out, "start: {}", describe(query::start_cell(area)))?;
    writeln!(out, "end: {}", describe(query::end_cell(area)))?;
    for cell in query::grid(area).cells() {
        let exits: Vec<&str> = query::exits(area, cell.coord())
            .into_iter()
            .map(|direction| direction.label())
            .collect();
        writeln!(
            out,
            "{},{}: {}",
            cell.coord().x(),
            cell.coord().y(),
            exits.join(" ")
        )?;
    }
    out.flush()
}

fn describe(coord: Option<GridCoord>) -> String {
    coord.map_or_else(|| "none".to_owned(), |c| format!("{},{}", c.x(), c.y()))
}
