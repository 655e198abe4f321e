use std::{ops::Range, path::Path, time::Instant};

use rayon::{ThreadPoolBuilder, prelude::*};
use tracing::{debug, info, instrument};

use crate::{
    config::Config,
    error::{Error, Result},
    format::Summary,
    input::Input,
    key::KeyHasher,
    merge::{Merged, merge},
    partition::partition,
    scanner::Section,
    table::Table,
    temperature::Temperature,
};

/// Scans one range into a fresh table owned by the calling worker.
pub fn scan_section<'a>(
    buf: &'a [u8],
    range: Range<usize>,
    hasher: &KeyHasher,
) -> Result<Table<'a>> {
    let mut table = Table::new();
    let mut records = 0u64;

    for record in Section::new(buf, range.clone()) {
        let record = record?;
        let temp = Temperature::parse(record.temperature)
            .map_err(|kind| Error::parse(record.offset, kind))?;

        table.update(hasher.hash(record.name), record.name, temp, record.offset)?;
        records += 1;
    }

    debug!(?range, records, stations = table.len(), "scanned section");
    Ok(table)
}

/// Partitions `buf`, scans every range on its own worker and merges the
/// private tables once all workers have finished.
#[instrument(skip_all, fields(len = buf.len(), workers = config.workers().get()))]
pub fn aggregate<'a>(buf: &'a [u8], config: &Config) -> Result<Merged<'a>> {
    let started = Instant::now();
    let ranges = partition(buf, config.workers())?;
    let hasher = config.hasher();

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.workers().get())
        .thread_name(|i| format!("scan-{i}"))
        .build()?;

    let tables = pool.install(|| {
        ranges
            .into_par_iter()
            .map(|range| scan_section(buf, range, hasher))
            .collect::<Result<Vec<_>>>()
    })?;
    info!(elapsed = ?started.elapsed(), "scanned all sections");

    let merged = merge(tables)?;
    info!(elapsed = ?started.elapsed(), "aggregated input");
    Ok(merged)
}

/// Runs the whole pipeline over an in-memory buffer.
pub fn summarize(buf: &[u8], config: &Config) -> Result<String> {
    Ok(Summary::new(aggregate(buf, config)?).to_string())
}

/// Maps `path` and runs the whole pipeline over it.
pub fn summarize_file(path: impl AsRef<Path>, config: &Config) -> Result<String> {
    let input = Input::open(path)?;
    summarize(input.bytes(), config)
}
