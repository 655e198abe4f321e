use std::{num::NonZeroUsize, ops::Range};

use crate::{
    error::{Error, Result},
    swar::ByteSearch,
};

/// Splits `buf` into exactly `workers` contiguous ranges, each starting on a
/// line boundary.
///
/// Every nominal boundary `i * len / workers` is pushed forward past the next
/// `\n`, so a line always belongs to the range it starts in. A boundary never
/// moves back past the previous one, which means trailing ranges can be empty
/// when lines are long compared to `len / workers`.
pub fn partition(buf: &[u8], workers: NonZeroUsize) -> Result<Vec<Range<usize>>> {
    let len = buf.len();
    if len == 0 {
        return Err(Error::EmptyInput);
    }

    let workers = workers.get();
    let mut starts = Vec::with_capacity(workers + 1);
    starts.push(0);

    for i in 1..workers {
        let nominal = (len as u128 * i as u128 / workers as u128) as usize;
        let previous = starts[starts.len() - 1];
        starts.push(line_start_after(buf, nominal.max(previous)));
    }
    starts.push(len);

    Ok(starts.windows(2).map(|w| w[0]..w[1]).collect())
}

#[inline]
fn line_start_after(buf: &[u8], from: usize) -> usize {
    match buf[from..].position_of(b'\n') {
        Some(nl) => from + nl + 1,
        None => buf.len(),
    }
}
