use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::parse::{format_slots, RestaurantListing};
use crate::plan::RestaurantRecord;

/// Cell written when a value never made it out of a scrape.
const NOT_AVAILABLE: &str = "N/A";

/// The ratings CSV: what ratings mode writes and availability mode reads.
pub fn write_ratings<P: AsRef<Path>>(
    listings: &[RestaurantListing],
    path: P,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Name", "Rating"])?;
    for listing in listings {
        let rating = listing
            .rating
            .map_or_else(|| NOT_AVAILABLE.to_string(), |rating| rating.to_string());
        writer.write_record([listing.name.as_str(), rating.as_str()])?;
    }
    writer.flush()?;
    Ok(path.to_owned())
}

#[derive(Debug, Deserialize)]
struct RatingsRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Rating", deserialize_with = "lenient_rating", default)]
    rating: Option<f64>,
}

fn lenient_rating<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

/// Reads a ratings CSV back in. Unlike availability sources this file is
/// the direct input the caller named, so failing to read it is fatal.
pub fn load_ratings<P: AsRef<Path>>(path: P) -> Result<Vec<RestaurantListing>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut listings = Vec::new();
    for row in reader.deserialize::<RatingsRow>() {
        let row = row?;
        listings.push(RestaurantListing {
            name: row.name,
            rating: row.rating,
        });
    }
    Ok(listings)
}

/// The availability CSV: one row per restaurant with its slots rendered
/// back to the wire string the suggest-mode loader parses.
pub fn write_availability<P: AsRef<Path>>(
    records: &[RestaurantRecord],
    path: P,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Restaurant", "Tabelog Score", "Detail Page URL", "Available Slots"])?;
    for record in records {
        writer.write_record([
            record.name.clone(),
            record
                .score
                .map_or_else(|| NOT_AVAILABLE.to_string(), |score| score.to_string()),
            record
                .detail_url
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            format_slots(&record.slots),
        ])?;
    }
    writer.flush()?;
    Ok(path.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_available_slots;
    use std::fs;

    #[test]
    fn test_ratings_round_trip() {
        let listings = vec![
            RestaurantListing {
                name: "Sushi Saito".to_string(),
                rating: Some(4.52),
            },
            RestaurantListing {
                name: "Shibuya Ramen Stand".to_string(),
                rating: None,
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = write_ratings(&listings, dir.path().join("ratings.csv")).unwrap();
        assert_eq!(load_ratings(path).unwrap(), listings);
    }

    #[test]
    fn test_availability_round_trips_through_the_loader() {
        let records = vec![
            RestaurantRecord {
                name: "Sushi Saito".to_string(),
                score: Some(4.52),
                detail_url: Some("https://omakase.in/en/restaurants/sushi-saito".to_string()),
                slots: parse_available_slots(
                    "2024-11-02 (lunch): Counter seat\n2024-11-02 (dinner): Omakase course",
                ),
            },
            RestaurantRecord {
                name: "Den".to_string(),
                score: None,
                detail_url: None,
                slots: Vec::new(),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = write_availability(&records, dir.path().join("availability.csv")).unwrap();
        let loaded = crate::plan::load_reservations(&[path]);
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_write_availability_renders_sentinels() {
        let records = vec![RestaurantRecord {
            name: "Den".to_string(),
            score: None,
            detail_url: None,
            slots: Vec::new(),
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = write_availability(&records, dir.path().join("availability.csv")).unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("Den,N/A,N/A,No Availability"));
    }
}
