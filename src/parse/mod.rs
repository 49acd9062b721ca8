mod cookie;
mod error;
mod listing_page;
mod normalize_whitespace;
mod search_page;
mod slots;

pub use cookie::cookie_header;
pub use error::Error;
pub use listing_page::{restaurants_from_listing, RestaurantListing};
pub use normalize_whitespace::normalize_whitespace;
pub use search_page::{find_restaurant, RestaurantMatch};
pub use slots::{
    format_slots, parse_available_slots, AvailabilitySlot, MealPeriod, NO_AVAILABILITY,
};
