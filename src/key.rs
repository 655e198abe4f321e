use std::fmt;

// (2^64) / \phi
const MAGIC_CONST: u64 = 0x9E3779B97F4A7C15;

/// Fingerprint of a station name. Only meaningful within one run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NameKey(u64);

impl NameKey {
    pub const fn get(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Seeded, order-sensitive hash from name bytes to [`NameKey`].
///
/// One hasher is built per run and shared read-only by every worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyHasher {
    seed: u64,
}

impl KeyHasher {
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn random() -> Self {
        Self::with_seed(rand::random())
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[inline(always)]
    pub fn hash(&self, name: &[u8]) -> NameKey {
        let mut hash = self.seed ^ (name.len() as u64).wrapping_mul(MAGIC_CONST);

        let mut words = name.chunks_exact(8);
        for word in &mut words {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(word);
            hash = mix(hash, u64::from_le_bytes(buf));
        }

        let tail = words.remainder();
        if !tail.is_empty() {
            let mut buf = [0u8; 8];
            buf[..tail.len()].copy_from_slice(tail);
            hash = mix(hash, u64::from_le_bytes(buf));
        }

        hash ^= hash >> 35;
        hash = hash.wrapping_mul(MAGIC_CONST);
        NameKey(hash ^ (hash >> 29))
    }
}

#[inline(always)]
fn mix(hash: u64, word: u64) -> u64 {
    (hash.rotate_left(23) ^ word).wrapping_mul(MAGIC_CONST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash() {
        let hasher = KeyHasher::with_seed(7);

        let a = "Cardinal".as_bytes();
        let b = "Greater Manchester".as_bytes();
        let c = "Ur".as_bytes();

        assert_eq!(hasher.hash(a), hasher.hash(a));
        assert_eq!(hasher.hash(b), hasher.hash(b));

        assert_ne!(hasher.hash(a), hasher.hash(b));
        assert_ne!(hasher.hash(a), hasher.hash(c));
        assert_ne!(hasher.hash(b), hasher.hash(c));
    }

    #[test]
    fn test_hash_is_order_sensitive() {
        let hasher = KeyHasher::with_seed(0);

        assert_ne!(hasher.hash(b"ab"), hasher.hash(b"ba"));
        assert_ne!(
            hasher.hash(b"AAAAAAAABBBBBBBB"),
            hasher.hash(b"BBBBBBBBAAAAAAAA")
        );
    }

    #[test]
    fn test_hash_length_matters() {
        let hasher = KeyHasher::with_seed(0);

        // zero padding in the tail must not make these equal
        assert_ne!(hasher.hash(b"a"), hasher.hash(b"a\0"));
        assert_ne!(hasher.hash(b""), hasher.hash(b"\0"));
    }

    #[test]
    fn test_seed_changes_keys() {
        let name = b"Thiruvananthapuram";
        assert_ne!(
            KeyHasher::with_seed(1).hash(name),
            KeyHasher::with_seed(2).hash(name)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(NameKey::from_raw(0xab).to_string(), "0x00000000000000ab");
    }
}
