const MSB_MASK: u64 = 0x8080_8080_8080_8080;
const LSB_MASK: u64 = 0x0101_0101_0101_0101;

/// Word-at-a-time byte search over the mapped input.
pub trait ByteSearch {
    fn position_of(&self, needle: u8) -> Option<usize>;
}

impl ByteSearch for [u8] {
    #[inline(always)]
    fn position_of(&self, needle: u8) -> Option<usize> {
        let repeat = LSB_MASK * needle as u64;

        let mut words = self.chunks_exact(8);
        let mut i = 0;
        for word in &mut words {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(word);
            let xored = u64::from_le_bytes(buf) ^ repeat;

            // the lowest flagged byte is always a real match
            let matching_bytes = xored.wrapping_sub(LSB_MASK) & !xored & MSB_MASK;
            if matching_bytes != 0 {
                return Some(i + (matching_bytes.trailing_zeros() / 8) as usize);
            }

            i += 8;
        }

        words
            .remainder()
            .iter()
            .position(|&b| b == needle)
            .map(|j| i + j)
    }
}
