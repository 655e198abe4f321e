use hashbrown::{HashMap, hash_map::Entry};
use tracing::info;

use crate::{
    error::{Error, Result},
    key::NameKey,
    table::{StationRecord, Table},
};

/// Union of every worker's table. Read-only once built.
#[derive(Debug, Default)]
pub struct Merged<'a> {
    stations: HashMap<NameKey, StationRecord<'a>>,
}

impl<'a> Merged<'a> {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, key: NameKey) -> Option<&StationRecord<'a>> {
        self.stations.get(&key)
    }

    /// Stations ordered by raw byte comparison of their names.
    pub fn into_sorted(self) -> Vec<StationRecord<'a>> {
        let mut records: Vec<_> = self.stations.into_values().collect();
        records.sort_unstable_by(|a, b| a.name.cmp(b.name));
        records
    }

    fn absorb(&mut self, key: NameKey, record: StationRecord<'a>) -> Result<()> {
        match self.stations.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.name != record.name {
                    return Err(Error::collision(
                        key,
                        existing.name,
                        record.name,
                        record.offset,
                    ));
                }
                existing.combine(&record);
            }
        }
        Ok(())
    }
}

/// Folds the per-worker tables into one. The result does not depend on the
/// order of `tables`.
pub fn merge<'a>(tables: impl IntoIterator<Item = Table<'a>>) -> Result<Merged<'a>> {
    let mut merged = Merged::default();
    let mut workers = 0;

    for table in tables {
        workers += 1;
        for (key, record) in table {
            merged.absorb(key, record)?;
        }
    }

    info!(workers, stations = merged.len(), "merged worker tables");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key::KeyHasher, temperature::Temperature};

    const HASHER: KeyHasher = KeyHasher::with_seed(3);

    fn table<'a>(readings: &[(&'a str, i64)]) -> Table<'a> {
        let mut table = Table::new();
        for (offset, &(name, tenths)) in readings.iter().enumerate() {
            table
                .update(
                    HASHER.hash(name.as_bytes()),
                    name.as_bytes(),
                    Temperature::from_tenths(tenths),
                    offset,
                )
                .unwrap();
        }
        table
    }

    fn stats(merged: Merged<'_>) -> Vec<(String, i64, i64, u64, i64)> {
        merged
            .into_sorted()
            .into_iter()
            .map(|r| {
                (
                    String::from_utf8(r.name.to_vec()).unwrap(),
                    r.min.tenths(),
                    r.max.tenths(),
                    r.count,
                    r.sum.tenths(),
                )
            })
            .collect()
    }

    #[test]
    fn test_merge_combines_duplicates() {
        let a = table(&[("Hamburg", 120), ("Berlin", -15)]);
        let b = table(&[("Hamburg", 80), ("Hamburg", 160), ("Oslo", 3)]);

        let merged = merge([a, b]).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(HASHER.hash(b"Hamburg")).unwrap().count, 3);
        assert!(merged.get(HASHER.hash(b"Lagos")).is_none());

        assert_eq!(
            stats(merged),
            vec![
                ("Berlin".to_string(), -15, -15, 1, -15),
                ("Hamburg".to_string(), 80, 160, 3, 360),
                ("Oslo".to_string(), 3, 3, 1, 3),
            ]
        );
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let readings: [&[(&str, i64)]; 3] = [
            &[("Ab", 10), ("Cd", -40), ("Ab", 999)],
            &[("Cd", 25), ("Ef", 0)],
            &[("Ab", -999), ("Ef", 1), ("Cd", -41)],
        ];

        let expected = stats(merge(readings.iter().map(|r| table(r))).unwrap());
        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            let merged = merge(order.iter().map(|&i| table(readings[i]))).unwrap();
            assert_eq!(stats(merged), expected, "{order:?}");
        }
    }

    #[test]
    fn test_merge_nothing() {
        let merged = merge(Vec::<Table<'_>>::new()).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_detects_cross_worker_collision() {
        let key = HASHER.hash(b"Hamburg");

        let mut a = Table::new();
        a.update(key, b"Hamburg", Temperature::from_tenths(1), 0)
            .unwrap();
        let mut b = Table::new();
        b.update(key, b"Hamborg", Temperature::from_tenths(1), 40)
            .unwrap();

        match merge([a, b]) {
            Err(Error::KeyCollision { offset, .. }) => assert_eq!(offset, 40),
            other => panic!("expected collision, got {other:?}"),
        }
    }
}
