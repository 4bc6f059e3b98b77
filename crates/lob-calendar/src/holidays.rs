//! Holiday tables.
//!
//! The holiday set is configuration, not an algorithm: the calendar builder
//! only asks "is this date closed?". A built-in table covers the default
//! horizon; any other horizon supplies its own CSV artifact.
//!
//! ## CSV artifact contract
//!
//! | Column | Example      | Notes                     |
//! |--------|--------------|---------------------------|
//! | `date` | `2019-02-05` | ISO date, required        |
//! | `name` | `Spring Festival` | free text, may be blank |

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// A set of closed dates, each with an optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: NaiveDate,
    #[serde(default)]
    name: String,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a closed date. A repeated date keeps the latest name.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.dates.insert(date, name.into());
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.dates.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.dates.iter().map(|(d, n)| (*d, n.as_str()))
    }

    /// Mainland China exchange closures for 2019 and 2020.
    ///
    /// Weekday closures only: the statutory holiday itself plus the official
    /// days off around it (Spring Festival week, the Labour Day and National
    /// Day breaks, and the 2020 Spring Festival extension to 01-31).
    /// Make-up working days always fall on weekends, when the exchanges stay
    /// closed anyway, so they need no entry.
    pub fn cn_2019_2020() -> Self {
        const HOLIDAYS: &[(i32, u32, u32, &str)] = &[
            // ── 2019 ─────────────────────────────────────────────────────
            (2019, 1, 1, "New Year's Day"),
            (2019, 2, 4, "Spring Festival"),
            (2019, 2, 5, "Spring Festival"),
            (2019, 2, 6, "Spring Festival"),
            (2019, 2, 7, "Spring Festival"),
            (2019, 2, 8, "Spring Festival"),
            (2019, 4, 5, "Tomb-Sweeping Day"),
            (2019, 5, 1, "Labour Day"),
            (2019, 5, 2, "Labour Day"),
            (2019, 5, 3, "Labour Day"),
            (2019, 6, 7, "Dragon Boat Festival"),
            (2019, 9, 13, "Mid-Autumn Festival"),
            (2019, 10, 1, "National Day"),
            (2019, 10, 2, "National Day"),
            (2019, 10, 3, "National Day"),
            (2019, 10, 4, "National Day"),
            (2019, 10, 7, "National Day"),
            // ── 2020 ─────────────────────────────────────────────────────
            (2020, 1, 1, "New Year's Day"),
            (2020, 1, 24, "Spring Festival"),
            (2020, 1, 27, "Spring Festival"),
            (2020, 1, 28, "Spring Festival"),
            (2020, 1, 29, "Spring Festival"),
            (2020, 1, 30, "Spring Festival"),
            (2020, 1, 31, "Spring Festival"),
            (2020, 4, 6, "Tomb-Sweeping Day"),
            (2020, 5, 1, "Labour Day"),
            (2020, 5, 4, "Labour Day"),
            (2020, 5, 5, "Labour Day"),
            (2020, 6, 25, "Dragon Boat Festival"),
            (2020, 6, 26, "Dragon Boat Festival"),
            (2020, 10, 1, "National Day"),
            (2020, 10, 2, "National Day"),
            (2020, 10, 5, "National Day"),
            (2020, 10, 6, "National Day"),
            (2020, 10, 7, "National Day"),
            (2020, 10, 8, "National Day"),
        ];

        let mut set = Self::new();
        for &(y, m, d, name) in HOLIDAYS {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                set.insert(date, name);
            }
        }
        set
    }

    /// Parse a holiday CSV from any reader (see module docs for columns).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut set = Self::new();
        for (i, record) in rdr.deserialize::<HolidayRecord>().enumerate() {
            // Row 1 is the header.
            let row = i + 2;
            let record = record.with_context(|| format!("holiday csv row {row} is invalid"))?;
            set.insert(record.date, record.name);
        }
        Ok(set)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open holiday csv: {}", path.display()))?;
        Self::from_csv_reader(file)
            .with_context(|| format!("failed to load holiday csv: {}", path.display()))
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut set = Self::new();
        for date in iter {
            set.insert(date, "");
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builtin_table_contains_new_year_2019() {
        let set = HolidaySet::cn_2019_2020();
        assert!(set.contains(ymd(2019, 1, 1)));
        assert_eq!(set.name_of(ymd(2019, 1, 1)), Some("New Year's Day"));
        assert!(!set.contains(ymd(2019, 1, 2)));
        assert_eq!(set.len(), 36);
    }

    #[test]
    fn builtin_table_covers_closure_weeks() {
        let set = HolidaySet::cn_2019_2020();
        // Spring Festival eve and the Friday after it.
        assert!(set.contains(ymd(2019, 2, 4)));
        assert!(set.contains(ymd(2019, 2, 8)));
        // 2020 Spring Festival extension.
        assert!(set.contains(ymd(2020, 1, 31)));
        // Weekend make-up working days are not listed.
        assert!(!set.contains(ymd(2019, 2, 2)));
        assert!(set.iter().all(|(d, _)| d.weekday().number_from_monday() <= 5));
    }

    #[test]
    fn csv_reader_parses_dates_and_optional_names() {
        let csv = "date,name\n2021-01-01,New Year's Day\n2021-02-12,\n";
        let set = HolidaySet::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.name_of(ymd(2021, 2, 12)), Some(""));
    }

    #[test]
    fn csv_reader_reports_row_of_bad_date() {
        let csv = "date,name\n2021-01-01,ok\n2021-13-01,bad month\n";
        let err = HolidaySet::from_csv_reader(csv.as_bytes()).unwrap_err();

        assert!(
            format!("{err:#}").contains("row 3"),
            "error should name the failing row: {err:#}"
        );
    }

    #[test]
    fn collects_from_date_iterator() {
        let set: HolidaySet = [ymd(2024, 1, 1), ymd(2024, 1, 1), ymd(2024, 5, 1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
