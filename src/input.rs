use std::{
    fs::File,
    path::{Path, PathBuf},
};

use memmap2::Mmap;
use tracing::debug;

use crate::error::{Error, Result};

/// Read-only mapping of the input file.
///
/// Record views borrow from here, so the mapping lives until every worker,
/// the merge and the formatter are done with it and is unmapped on drop.
#[derive(Debug)]
pub struct Input {
    map: Mmap,
    path: PathBuf,
}

impl Input {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();
        check_len(len)?;

        // SAFETY: the file is only read, and is assumed not to be truncated
        // or rewritten while the run holds the mapping.
        let map = unsafe { Mmap::map(&file) }.map_err(io_error)?;

        #[cfg(unix)]
        if let Err(err) = map.advise(memmap2::Advice::Sequential) {
            debug!(%err, "madvise(SEQUENTIAL) failed");
        }

        debug!(path = %path.display(), len, "mapped input");
        Ok(Self {
            map,
            path: path.to_path_buf(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn check_len(len: u64) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyInput);
    }
    match usize::try_from(len) {
        Ok(n) if n <= isize::MAX as usize => Ok(()),
        _ => Err(Error::InputTooLarge { len }),
    }
}
