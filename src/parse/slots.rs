use std::fmt::{self, Display, Formatter};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Sentinel written in place of the slots column when a restaurant has
/// nothing bookable.
pub const NO_AVAILABILITY: &str = "No Availability";

const SLOT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The reservation platform groups bookable stock by operation; everything
/// that isn't a lunch or dinner service keeps its original token so the
/// wire string survives a parse/format round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealPeriod {
    Lunch,
    Dinner,
    Other(String),
}

impl MealPeriod {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Other(token.to_string()),
        }
    }
}

impl Display for MealPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Other(token) => write!(f, "{token}"),
        }
    }
}

/// One concrete reservation offering: a date, the service it belongs to and
/// the stock group's display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub period: MealPeriod,
    pub label: String,
}

/// Parses a raw availability string of `<date> (<period>): <label>` segments.
///
/// Segments that don't match the pattern are skipped rather than reported;
/// the strings come out of scraped CSVs and are routinely messy. The
/// sentinel [`NO_AVAILABILITY`] (and anything blank) parses to no slots.
pub fn parse_available_slots(raw: &str) -> Vec<AvailabilitySlot> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NO_AVAILABILITY {
        return Vec::new();
    }
    static SEGMENT: OnceLock<Regex> = OnceLock::new();
    let segment = SEGMENT.get_or_init(|| {
        Regex::new(r"(\d{4}-\d{2}-\d{2}) \((\w+)\): (.+)").expect("regex should be valid")
    });

    let mut slots = Vec::new();
    for captures in segment.captures_iter(raw) {
        let (_, [date, period, label]) = captures.extract();
        // the pattern only guarantees digit shape, not a real calendar date
        let Ok(date) = NaiveDate::parse_from_str(date, SLOT_DATE_FORMAT) else {
            continue;
        };
        slots.push(AvailabilitySlot {
            date,
            period: MealPeriod::from_token(period),
            label: label.to_string(),
        });
    }
    slots
}

/// Renders slots back to the newline-joined wire format consumed by
/// [`parse_available_slots`]. An empty sequence renders the sentinel.
pub fn format_slots(slots: &[AvailabilitySlot]) -> String {
    if slots.is_empty() {
        return NO_AVAILABILITY.to_string();
    }
    slots
        .iter()
        .map(|slot| {
            format!(
                "{} ({}): {}",
                slot.date.format(SLOT_DATE_FORMAT),
                slot.period,
                slot.label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_parses_to_nothing() {
        assert!(parse_available_slots(NO_AVAILABILITY).is_empty());
        assert!(parse_available_slots("").is_empty());
        assert!(parse_available_slots("  \n ").is_empty());
    }

    #[test]
    fn test_parses_segments_in_order() {
        let raw = "2024-11-02 (lunch): Counter seat\n2024-11-02 (dinner): Omakase course\n2024-11-03 (Lunch): Counter seat";
        let slots = parse_available_slots(raw);
        assert_eq!(slots.len(), 3);
        assert_eq!(
            slots[0],
            AvailabilitySlot {
                date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
                period: MealPeriod::Lunch,
                label: "Counter seat".to_string(),
            }
        );
        assert_eq!(slots[1].period, MealPeriod::Dinner);
        // the period token is matched case-insensitively
        assert_eq!(slots[2].period, MealPeriod::Lunch);
    }

    #[test]
    fn test_unrecognized_period_is_kept_as_other() {
        let slots = parse_available_slots("2024-11-02 (waitlist): Bar seat");
        assert_eq!(slots[0].period, MealPeriod::Other("waitlist".to_string()));
    }

    #[test]
    fn test_malformed_segments_are_dropped() {
        let raw = "garbage line\n2024-11-02 (lunch): Counter seat\n11/02/2024 (dinner): wrong date shape\n2024-13-40 (dinner): impossible date";
        let slots = parse_available_slots(raw);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].label, "Counter seat");
    }

    #[test]
    fn test_format_round_trips_parsed_slots() {
        let raw = "2024-11-02 (lunch): Counter seat\n2024-11-03 (dinner): Omakase course\n2024-11-04 (waitlist): Bar seat";
        let slots = parse_available_slots(raw);
        assert_eq!(format_slots(&slots), raw);
    }

    #[test]
    fn test_format_of_empty_is_sentinel() {
        assert_eq!(format_slots(&[]), NO_AVAILABILITY);
    }
}
