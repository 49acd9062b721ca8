use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::parse::{AvailabilitySlot, MealPeriod};

// Wire shapes of the reservation platform's internal calendar API. Only
// the fields this tool reads are modeled; serde drops the rest.

#[derive(Debug, Deserialize)]
struct DatesResponse {
    status: u16,
    #[serde(default)]
    data: Option<DatesData>,
}

#[derive(Debug, Deserialize)]
struct DatesData {
    #[serde(default)]
    has_availability: bool,
    #[serde(default)]
    available_dates: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    data: DetailData,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    grouped_online_stock_groups: BTreeMap<String, Vec<StockGroup>>,
}

#[derive(Debug, Deserialize)]
struct StockGroup {
    display_title: String,
    #[serde(default)]
    guests_count_option_values: Vec<u32>,
}

/// Interprets a month-probe response body. Anything other than an in-band
/// 200 with `has_availability` means "no dates this month".
pub fn available_dates_from_json(body: &str) -> Result<Vec<NaiveDate>, serde_json::Error> {
    let response: DatesResponse = serde_json::from_str(body)?;
    Ok(match response.data {
        Some(data) if response.status == 200 && data.has_availability => data.available_dates,
        _ => Vec::new(),
    })
}

/// Flattens a day-detail response into slots for `date`. When a guest
/// count is requested, only stock groups offering that party size
/// survive; with no count every group does.
pub fn slots_from_detail_json(
    body: &str,
    date: NaiveDate,
    guests: Option<u32>,
) -> Result<Vec<AvailabilitySlot>, serde_json::Error> {
    let response: DetailResponse = serde_json::from_str(body)?;
    let mut slots = Vec::new();
    for (operation, groups) in &response.data.grouped_online_stock_groups {
        for group in groups {
            if let Some(count) = guests {
                if !group.guests_count_option_values.contains(&count) {
                    continue;
                }
            }
            slots.push(AvailabilitySlot {
                date,
                period: MealPeriod::from_token(operation),
                label: group.display_title.clone(),
            });
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATES_BODY: &str = r#"{
        "status": 200,
        "data": {
            "has_availability": true,
            "available_dates": ["2024-11-02", "2024-11-05"]
        }
    }"#;

    const DETAIL_BODY: &str = r#"{
        "status": 200,
        "data": {
            "grouped_online_stock_groups": {
                "lunch": [
                    {
                        "display_title": "Counter seat",
                        "guests_count_option_values": [1, 2],
                        "time_options": [{"start_time": "12:00", "end_time": "14:00"}]
                    }
                ],
                "dinner": [
                    {
                        "display_title": "Omakase course",
                        "guests_count_option_values": [2, 4],
                        "courses": [{"title": "Chef's choice", "price": 38500}]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_available_dates_from_json() {
        let dates = available_dates_from_json(DATES_BODY).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn test_no_availability_means_no_dates() {
        let body = r#"{"status": 200, "data": {"has_availability": false, "available_dates": []}}"#;
        assert!(available_dates_from_json(body).unwrap().is_empty());
        // in-band error statuses also degrade to an empty month
        let body = r#"{"status": 401, "data": null}"#;
        assert!(available_dates_from_json(body).unwrap().is_empty());
    }

    #[test]
    fn test_slots_from_detail_json() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let slots = slots_from_detail_json(DETAIL_BODY, date, None).unwrap();
        assert_eq!(slots.len(), 2);
        // BTreeMap grouping: dinner sorts before lunch
        assert_eq!(slots[0].period, MealPeriod::Dinner);
        assert_eq!(slots[0].label, "Omakase course");
        assert_eq!(slots[1].period, MealPeriod::Lunch);
        assert!(slots.iter().all(|slot| slot.date == date));
    }

    #[test]
    fn test_guest_count_filters_stock_groups() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let slots = slots_from_detail_json(DETAIL_BODY, date, Some(4)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].label, "Omakase course");
    }
}
