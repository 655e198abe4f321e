use std::fmt;

use crate::{
    error::{Error, Result},
    key::NameKey,
    temperature::Temperature,
};

const EMPTY: u32 = u32::MAX;
const DEFAULT_SLOTS: usize = 1 << 14;

/// Running statistics for one station.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StationRecord<'a> {
    pub name: &'a [u8],
    pub min: Temperature,
    pub max: Temperature,
    pub count: u64,
    pub sum: Temperature,
    /// Byte offset of the line this station was first seen on.
    pub offset: usize,
}

impl<'a> StationRecord<'a> {
    pub fn new(name: &'a [u8], temp: Temperature, offset: usize) -> Self {
        Self {
            name,
            min: temp,
            max: temp,
            count: 1,
            sum: temp,
            offset,
        }
    }

    #[inline(always)]
    pub fn add(&mut self, temp: Temperature) {
        self.count += 1;
        self.sum += temp;
        self.min = self.min.min(temp);
        self.max = self.max.max(temp);
    }

    pub fn combine(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.offset = self.offset.min(other.offset);
    }

    pub fn mean(&self) -> Temperature {
        Temperature::mean(self.sum, self.count)
    }
}

impl fmt::Display for StationRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{name}={min}/{mean}/{max}",
            name = String::from_utf8_lossy(self.name),
            min = self.min,
            mean = self.mean(),
            max = self.max
        )
    }
}

/// Per-worker aggregate table keyed by [`NameKey`].
///
/// Open addressing with linear probing over a power-of-two slot array. Slots
/// hold indices into a dense entry list so growing only moves `u32`s.
pub struct Table<'a> {
    slots: Vec<u32>,
    entries: Vec<(NameKey, StationRecord<'a>)>,
    mask: usize,
}

impl Default for Table<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Table<'a> {
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_SLOTS)
    }

    pub fn with_slots(size: usize) -> Self {
        let size = size.max(2).next_power_of_two();
        Self {
            slots: vec![EMPTY; size],
            entries: Vec::with_capacity(size / 2),
            mask: size - 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot holding `key`, or the empty slot where it would go.
    #[inline(always)]
    fn lookup(&self, key: NameKey) -> usize {
        let mut slot = key.get() as usize & self.mask;

        loop {
            let index = self.slots[slot];
            if index == EMPTY || self.entries[index as usize].0 == key {
                return slot;
            }
            slot = (slot + 1) & self.mask;
        }
    }

    /// Adds one reading for `name`.
    ///
    /// An existing entry under `key` must carry the same name, otherwise two
    /// stations share a key and the run fails with `KeyCollision`.
    #[inline(always)]
    pub fn update(
        &mut self,
        key: NameKey,
        name: &'a [u8],
        temp: Temperature,
        offset: usize,
    ) -> Result<()> {
        let slot = self.lookup(key);
        let index = self.slots[slot];

        if index != EMPTY {
            let (_, record) = &mut self.entries[index as usize];
            if record.name != name {
                return Err(Error::collision(key, record.name, name, offset));
            }
            record.add(temp);
            return Ok(());
        }

        self.slots[slot] = self.entries.len() as u32;
        self.entries
            .push((key, StationRecord::new(name, temp, offset)));

        if self.entries.len() * 2 > self.slots.len() {
            self.grow();
        }

        Ok(())
    }

    pub fn get(&self, key: NameKey) -> Option<&StationRecord<'a>> {
        match self.slots[self.lookup(key)] {
            EMPTY => None,
            index => Some(&self.entries[index as usize].1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NameKey, &StationRecord<'a>)> {
        self.entries.iter().map(|(key, record)| (*key, record))
    }

    fn grow(&mut self) {
        let size = self.slots.len() * 2;
        self.slots = vec![EMPTY; size];
        self.mask = size - 1;

        for (index, (key, _)) in self.entries.iter().enumerate() {
            let mut slot = key.get() as usize & self.mask;
            while self.slots[slot] != EMPTY {
                slot = (slot + 1) & self.mask;
            }
            self.slots[slot] = index as u32;
        }
    }
}

impl<'a> IntoIterator for Table<'a> {
    type Item = (NameKey, StationRecord<'a>);
    type IntoIter = std::vec::IntoIter<(NameKey, StationRecord<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
