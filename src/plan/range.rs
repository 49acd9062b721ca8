use chrono::NaiveDate;

use super::loader::RestaurantRecord;
use super::{Error, Result};

/// Trip bounds are typed in the US short style, slot dates are ISO; the
/// two formats never mix.
pub const RANGE_DATE_FORMAT: &str = "%m/%d/%Y";

/// An inclusive calendar window. Construction validates ordering, so a
/// value of this type always satisfies `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::invalid_range(&format!(
                "end date {end} precedes start date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses `mm/dd/yyyy` bounds. Either bound failing to parse, or the
    /// end preceding the start, is fatal to the whole suggestion run.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_bound(start, "start")?;
        let end = parse_bound(end, "end")?;
        Self::new(start, end)
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar date in the window, in order, regardless of which
    /// dates ended up with any availability.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let count = (self.end - self.start).num_days() + 1;
        (0..count).map(move |offset| start + chrono::Duration::days(offset))
    }
}

fn parse_bound(raw: &str, which: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RANGE_DATE_FORMAT)
        .map_err(|_| Error::invalid_range(&format!("{which} date {raw:?} is not mm/dd/yyyy")))
}

/// Restricts every record to slots inside the window and drops records
/// that end up with nothing left.
pub fn filter_records(records: Vec<RestaurantRecord>, range: &DateRange) -> Vec<RestaurantRecord> {
    records
        .into_iter()
        .filter_map(|mut record| {
            record.slots.retain(|slot| range.contains(slot.date));
            if record.slots.is_empty() {
                None
            } else {
                Some(record)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_available_slots;

    fn record(name: &str, slots: &str) -> RestaurantRecord {
        RestaurantRecord {
            name: name.to_string(),
            score: None,
            detail_url: None,
            slots: parse_available_slots(slots),
        }
    }

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("11/02/2024", "11/05/2024").unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2024, 11, 2).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
        assert_eq!(range.days().count(), 4);
    }

    #[test]
    fn test_end_before_start_is_fatal() {
        assert!(matches!(
            DateRange::parse("11/05/2024", "11/02/2024"),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_unparseable_bound_is_fatal() {
        assert!(matches!(
            DateRange::parse("2024-11-02", "11/05/2024"),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            DateRange::parse("11/02/2024", "someday"),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_filter_keeps_only_in_range_slots() {
        let range = DateRange::parse("11/02/2024", "11/03/2024").unwrap();
        let records = vec![
            record(
                "Sushi Saito",
                "2024-11-01 (lunch): Early\n2024-11-02 (lunch): Counter\n2024-11-03 (dinner): Omakase\n2024-11-04 (dinner): Late",
            ),
            record("Den", "2024-12-25 (dinner): Holiday"),
        ];

        let filtered = filter_records(records, &range);
        // Den fell entirely outside the window and is dropped
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slots.len(), 2);
        assert!(filtered[0]
            .slots
            .iter()
            .all(|slot| range.contains(slot.date)));
    }
}
