// src/domain/desk.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::Reservation;

/// Where a stay is relative to a given day, as the front desk colours it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    Upcoming,
    Arriving,
    InHouse,
    Departed,
}

/// Note the checkout day itself still reads as in house.
pub fn stay_status(res: &Reservation, today: NaiveDate) -> StayStatus {
    if today == res.start {
        StayStatus::Arriving
    } else if today > res.start && today <= res.end {
        StayStatus::InHouse
    } else if today > res.end {
        StayStatus::Departed
    } else {
        StayStatus::Upcoming
    }
}

fn hotel_matches(res: &Reservation, hotel: Option<&str>) -> bool {
    match hotel {
        None => true,
        Some(wanted) => res
            .hotel
            .as_deref()
            .is_some_and(|h| h.trim().to_lowercase() == wanted.trim().to_lowercase()),
    }
}

fn sorted_by_guest(mut list: Vec<Reservation>) -> Vec<Reservation> {
    list.sort_by_cached_key(|res| res.guest_name.to_lowercase());
    list
}

/// Reservations starting on `date`, sorted by guest name.
pub fn arrivals_on(reservations: &[Reservation], date: NaiveDate, hotel: Option<&str>) -> Vec<Reservation> {
    sorted_by_guest(
        reservations
            .iter()
            .filter(|res| res.start == date && hotel_matches(res, hotel))
            .cloned()
            .collect(),
    )
}

/// Reservations checking out on `date`, sorted by guest name.
pub fn departures_on(reservations: &[Reservation], date: NaiveDate, hotel: Option<&str>) -> Vec<Reservation> {
    sorted_by_guest(
        reservations
            .iter()
            .filter(|res| res.end == date && hotel_matches(res, hotel))
            .cloned()
            .collect(),
    )
}
