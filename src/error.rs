use std::{io, path::PathBuf};

use thiserror::Error;

use crate::key::NameKey;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input is empty")]
    EmptyInput,

    #[error("input is {len} bytes, more than can be mapped on this platform")]
    InputTooLarge { len: u64 },

    #[error("malformed record at byte {offset}: {kind}")]
    Parse { offset: usize, kind: ParseErrorKind },

    #[error("stations {first:?} and {second:?} share name key {key} (byte {offset})")]
    KeyCollision {
        key: NameKey,
        first: String,
        second: String,
        offset: usize,
    },

    #[error("could not start worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn parse(offset: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { offset, kind }
    }

    pub(crate) fn collision(key: NameKey, first: &[u8], second: &[u8], offset: usize) -> Self {
        Self::KeyCollision {
            key,
            first: String::from_utf8_lossy(first).into_owned(),
            second: String::from_utf8_lossy(second).into_owned(),
            offset,
        }
    }
}

/// Ways a single line can violate `<name>;<temperature>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty line")]
    EmptyLine,
    #[error("missing ';' between name and temperature")]
    MissingDelimiter,
    #[error("empty temperature")]
    EmptyTemperature,
    #[error("temperature has no integer digits")]
    MissingDigits,
    #[error("'-' is only allowed as the first byte")]
    MisplacedSign,
    #[error("'.' is not followed by a digit")]
    MissingFraction,
    #[error("more than one fractional digit")]
    ExtraFraction,
    #[error("more than one '.'")]
    RepeatedDecimalPoint,
    #[error("more than {max} integer digits", max = crate::temperature::MAX_WHOLE_DIGITS)]
    TooManyDigits,
    #[error("unexpected byte {0:#04x} in temperature")]
    InvalidByte(u8),
}
