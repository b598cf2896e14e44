pub mod availability;
pub mod calendar;
pub mod dates;
pub mod desk;
pub mod models;
pub mod occupancy;
pub mod placement;
pub mod pricing;
pub mod summary;

pub use availability::{available_rooms, find_available_rooms, AvailabilityQuery, CapacityTable};
pub use dates::{night_count, normalize_to_day, overlaps, DateRange};
pub use models::{Reservation, Room};
pub use occupancy::{occupancy_value, stay_units, GuestMix};
pub use placement::assign_room;
pub use summary::{category_color, parse_locale_amount, summarize_by_category};
