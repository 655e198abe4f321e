use std::{num::NonZeroUsize, thread::available_parallelism};

use crate::key::KeyHasher;

/// Immutable settings for one run, shared by reference with every worker.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    workers: NonZeroUsize,
    hasher: KeyHasher,
}

impl Config {
    pub fn new(workers: NonZeroUsize, hasher: KeyHasher) -> Self {
        Self { workers, hasher }
    }

    /// One worker per available core and a fresh random seed.
    pub fn from_environment() -> Self {
        let workers = available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self::new(workers, KeyHasher::random())
    }

    pub fn with_workers(self, workers: NonZeroUsize) -> Self {
        Self { workers, ..self }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            hasher: KeyHasher::with_seed(seed),
            ..self
        }
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn hasher(&self) -> &KeyHasher {
        &self.hasher
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_environment()
    }
}
