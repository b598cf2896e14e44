pub mod connection;
pub mod reservations;
pub mod rooms;
pub mod tour_prices;

pub use connection::{init_db, Database};
