use std::{fmt, io};

use crate::{merge::Merged, table::StationRecord};

/// The final `{name=min/mean/max, ...}` line, stations sorted by name.
#[derive(Debug)]
pub struct Summary<'a> {
    stations: Vec<StationRecord<'a>>,
}

impl<'a> Summary<'a> {
    pub fn new(merged: Merged<'a>) -> Self {
        Self {
            stations: merged.into_sorted(),
        }
    }

    pub fn stations(&self) -> &[StationRecord<'a>] {
        &self.stations
    }

    /// Writes the summary with names as raw bytes.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"{")?;
        for (i, station) in self.stations.iter().enumerate() {
            if i != 0 {
                out.write_all(b", ")?;
            }
            out.write_all(station.name)?;
            write!(
                out,
                "={}/{}/{}",
                station.min,
                station.mean(),
                station.max
            )?;
        }
        out.write_all(b"}\n")
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, station) in self.stations.iter().enumerate() {
            let separator = if i != 0 { ", " } else { "" };
            write!(f, "{separator}{station}")?;
        }
        f.write_str("}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key::KeyHasher, merge::merge, table::Table, temperature::Temperature};

    fn summary<'a>(readings: &[(&'a str, &str)]) -> Summary<'a> {
        let hasher = KeyHasher::with_seed(11);
        let mut table = Table::new();
        for &(name, temp) in readings {
            let temp: Temperature = temp.parse().unwrap();
            table
                .update(hasher.hash(name.as_bytes()), name.as_bytes(), temp, 0)
                .unwrap();
        }
        Summary::new(merge([table]).unwrap())
    }

    #[test]
    fn test_summary() {
        let s = summary(&[
            ("Hamburg", "12.0"),
            ("Hamburg", "8.0"),
            ("Berlin", "-1.5"),
            ("Hamburg", "16.0"),
        ]);

        assert_eq!(
            s.to_string(),
            "{Berlin=-1.5/-1.5/-1.5, Hamburg=8.0/12.0/16.0}\n"
        );
    }

    #[test]
    fn test_write_to_matches_display() {
        let s = summary(&[("Ñuñoa", "-0.3"), ("Abéché", "29.4"), ("Zürich", "5")]);

        let mut out = Vec::new();
        s.write_to(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), s.to_string());
        assert_eq!(
            s.to_string(),
            "{Abéché=29.4/29.4/29.4, Zürich=5.0/5.0/5.0, Ñuñoa=-0.3/-0.3/-0.3}\n"
        );
    }

    #[test]
    fn test_byte_order_not_locale_order() {
        let s = summary(&[("b", "1.0"), ("B", "1.0"), ("a", "1.0"), ("A", "1.0")]);
        let names: Vec<&[u8]> = s.stations().iter().map(|r| r.name).collect();

        assert_eq!(names, vec![&b"A"[..], &b"B"[..], &b"a"[..], &b"b"[..]]);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(summary(&[]).to_string(), "{}\n");
    }
}
