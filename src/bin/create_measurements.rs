use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Writes `name;temperature` lines sampled around each station's mean.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Number of lines to write, `_` separators allowed
    #[arg(value_parser = parse_rows)]
    rows: u64,

    /// `name;mean` station list, lines starting with `#` are ignored
    #[arg(short, long, default_value = "data/weather_stations.csv")]
    stations: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_rows(s: &str) -> Result<u64, std::num::ParseIntError> {
    s.replace('_', "").parse()
}

#[derive(Debug)]
struct City {
    name: String,
    distribution: Normal<f64>,
}

impl City {
    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, mean) = s
            .split_once(';')
            .ok_or_else(|| anyhow!("missing ';' in {s:?}"))?;
        let mean: f64 = mean
            .trim()
            .parse()
            .with_context(|| format!("bad mean in {s:?}"))?;
        let distribution =
            Normal::new(mean, 10.0).with_context(|| format!("bad distribution for {name}"))?;

        Ok(City {
            name: name.to_string(),
            distribution,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cities: Vec<City> = fs::read_to_string(&cli.stations)
        .with_context(|| format!("could not read {}", cli.stations.display()))?
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(str::parse)
        .collect::<Result<_>>()?;
    if cities.is_empty() {
        bail!("no stations in {}", cli.stations.display());
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut out = BufWriter::with_capacity(1 << 20, io::stdout().lock());
    for _ in 0..cli.rows {
        let city = &cities[rng.random_range(0..cities.len())];
        writeln!(out, "{};{:.1}", city.name, city.sample(&mut rng))?;
    }
    out.flush()?;

    info!(rows = cli.rows, stations = cities.len(), "wrote measurements");
    Ok(())
}
