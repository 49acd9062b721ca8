use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use super::loader::RestaurantRecord;
use crate::parse::MealPeriod;

/// One recommendation: who to book and which stock group to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub restaurant: String,
    pub label: String,
}

/// A day's pair of recommendations. Either side may stay empty when
/// nothing bookable fits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPlan {
    pub lunch: Option<Suggestion>,
    pub dinner: Option<Suggestion>,
}

impl DayPlan {
    fn is_full(&self) -> bool {
        self.lunch.is_some() && self.dinner.is_some()
    }
}

/// Greedily assigns at most one lunch and one dinner per day, highest
/// rated restaurants first.
///
/// The map covers every date that shows up in some record's slots, and
/// only those; the output formatter densifies to the full trip window.
/// With `allow_repeats` false a restaurant is spent the moment it lands
/// any suggestion, and stays spent for the rest of the trip.
pub fn suggest_reservations(
    records: &[RestaurantRecord],
    allow_repeats: bool,
) -> BTreeMap<NaiveDate, DayPlan> {
    let ranked = rank_by_score(records);
    let dates: BTreeSet<NaiveDate> = records
        .iter()
        .flat_map(|record| record.slots.iter().map(|slot| slot.date))
        .collect();

    let mut used = HashSet::new();
    let mut plan = BTreeMap::new();
    for date in dates {
        let day = assign_day(date, &ranked, allow_repeats, &mut used);
        plan.insert(date, day);
    }
    plan
}

/// Stable score ordering: scored restaurants first, score descending;
/// unscored restaurants after all of them. The original index is the
/// explicit final key, so equal scores keep their table order instead of
/// leaning on the sort's stability.
fn rank_by_score(records: &[RestaurantRecord]) -> Vec<&RestaurantRecord> {
    let mut indexed: Vec<(usize, &RestaurantRecord)> = records.iter().enumerate().collect();
    indexed.sort_by(|(left_index, left), (right_index, right)| {
        match (left.score, right.score) {
            (Some(l), Some(r)) => r.total_cmp(&l).then(left_index.cmp(right_index)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => left_index.cmp(right_index),
        }
    });
    indexed.into_iter().map(|(_, record)| record).collect()
}

/// Fills one day. First matching lunch slot takes lunch, first matching
/// dinner slot takes dinner; the slot scan and then the restaurant loop
/// stop as soon as both are filled, so a top-ranked restaurant offering
/// both services can claim the whole day before anyone else is looked at.
///
/// `used` is the cross-day accumulator; it is only consulted when repeats
/// are disallowed, but always updated.
fn assign_day(
    date: NaiveDate,
    ranked: &[&RestaurantRecord],
    allow_repeats: bool,
    used: &mut HashSet<String>,
) -> DayPlan {
    let mut day = DayPlan::default();
    for record in ranked {
        if !allow_repeats && used.contains(record.name.as_str()) {
            continue;
        }
        for slot in &record.slots {
            if slot.date != date {
                continue;
            }
            match slot.period {
                MealPeriod::Lunch if day.lunch.is_none() => {
                    day.lunch = Some(Suggestion {
                        restaurant: record.name.clone(),
                        label: slot.label.clone(),
                    });
                    used.insert(record.name.clone());
                }
                MealPeriod::Dinner if day.dinner.is_none() => {
                    day.dinner = Some(Suggestion {
                        restaurant: record.name.clone(),
                        label: slot.label.clone(),
                    });
                    used.insert(record.name.clone());
                }
                _ => {}
            }
            if day.is_full() {
                break;
            }
        }
        if day.is_full() {
            break;
        }
    }
    day
}
