mod allocate;
mod error;
mod loader;
mod output;
mod range;

pub use allocate::{suggest_reservations, DayPlan, Suggestion};
pub use error::{Error, Result};
pub use loader::{load_reservations, RestaurantRecord};
pub use output::{write_suggestions, NO_SUGGESTION};
pub use range::{filter_records, DateRange, RANGE_DATE_FORMAT};
