use std::path::Path;

use log::warn;
use serde::{Deserialize, Deserializer};

use crate::parse::{parse_available_slots, AvailabilitySlot};

/// One restaurant's normalized availability, merged from the scraped CSVs.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantRecord {
    pub name: String,
    pub score: Option<f64>,
    pub detail_url: Option<String>,
    pub slots: Vec<AvailabilitySlot>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    #[serde(rename = "Restaurant")]
    restaurant: String,
    #[serde(rename = "Tabelog Score", deserialize_with = "lenient_score", default)]
    score: Option<f64>,
    #[serde(rename = "Detail Page URL", default)]
    detail_url: Option<String>,
    #[serde(rename = "Available Slots", default)]
    slots: String,
}

/// Scores come back as `N/A` (or blank) whenever the listing site had no
/// rating; anything that isn't a number means "unscored", not an error.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

impl From<AvailabilityRow> for RestaurantRecord {
    fn from(row: AvailabilityRow) -> Self {
        Self {
            name: row.restaurant,
            score: row.score,
            detail_url: row.detail_url.filter(|url| {
                let url = url.trim();
                !url.is_empty() && url != "N/A"
            }),
            slots: parse_available_slots(&row.slots),
        }
    }
}

/// Loads and concatenates availability CSVs, preserving file and row order.
///
/// A source that can't be opened or a row that can't be decoded is warned
/// about and skipped; these files are assembled by scraping runs against a
/// live site and partial batches are normal. No readable sources at all
/// simply yields an empty table.
pub fn load_reservations<P: AsRef<Path>>(paths: &[P]) -> Vec<RestaurantRecord> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let mut reader = match csv::Reader::from_path(path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };
        for row in reader.deserialize::<AvailabilityRow>() {
            match row {
                Ok(row) => records.push(RestaurantRecord::from(row)),
                Err(e) => warn!("skipping a row of {}: {e}", path.display()),
            }
        }
    }
    records
}
