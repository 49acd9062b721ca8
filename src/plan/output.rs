use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::allocate::{DayPlan, Suggestion};
use super::range::DateRange;
use super::Result;

/// Placeholder cell for a meal nothing was assigned to.
pub const NO_SUGGESTION: &str = "No suggestion";

/// Writes the day-by-day suggestion table: one row per calendar date in
/// the trip window, including dates the allocator produced nothing for.
/// Returns the path of the written artifact.
pub fn write_suggestions<P: AsRef<Path>>(
    plan: &BTreeMap<NaiveDate, DayPlan>,
    range: &DateRange,
    path: P,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Date", "Lunch", "Dinner"])?;
    for date in range.days() {
        let day = plan.get(&date);
        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            cell(day.and_then(|d| d.lunch.as_ref())),
            cell(day.and_then(|d| d.dinner.as_ref())),
        ])?;
    }
    writer.flush()?;
    Ok(path.to_owned())
}

fn cell(suggestion: Option<&Suggestion>) -> String {
    suggestion.map_or_else(
        || NO_SUGGESTION.to_string(),
        |s| format!("{} - {}", s.restaurant, s.label),
    )
}
