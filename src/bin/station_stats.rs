use std::{
    io::{self, BufWriter, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use station_stats::{Config, Input, Summary, aggregate};
use tracing_subscriber::EnvFilter;

/// Prints min/mean/max temperature per station, sorted by station name.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// `name;temperature` measurements, one per line
    path: PathBuf,

    /// Worker threads [default: available parallelism]
    #[arg(short, long)]
    threads: Option<NonZeroUsize>,

    /// Fixed seed for station name keys [default: random]
    #[arg(long)]
    seed: Option<u64>,

    /// Write a CPU profile flamegraph to this SVG file (unix only)
    #[arg(long, value_name = "FILE")]
    flamegraph: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_environment();
    if let Some(threads) = cli.threads {
        config = config.with_workers(threads);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    #[cfg(not(unix))]
    if cli.flamegraph.is_some() {
        anyhow::bail!("--flamegraph is only supported on unix");
    }

    #[cfg(unix)]
    let profiler = cli
        .flamegraph
        .as_ref()
        .map(|_| {
            pprof::ProfilerGuardBuilder::default()
                .frequency(997)
                .blocklist(&["libc", "libgcc", "pthread", "vdso"])
                .build()
        })
        .transpose()
        .context("could not start profiler")?;

    let input = Input::open(&cli.path)
        .with_context(|| format!("could not open {}", cli.path.display()))?;
    let merged = aggregate(input.bytes(), &config)
        .with_context(|| format!("could not summarize {}", cli.path.display()))?;

    let mut out = BufWriter::new(io::stdout().lock());
    Summary::new(merged).write_to(&mut out)?;
    out.flush()?;

    #[cfg(unix)]
    if let (Some(guard), Some(path)) = (profiler, &cli.flamegraph) {
        let report = guard.report().build()?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("could not create {}", path.display()))?;
        report.flamegraph(file)?;
    }

    Ok(())
}
