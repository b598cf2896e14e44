// src/domain/occupancy.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::Reservation;
use crate::errors::BookingError;

pub const ADULT_WEIGHT: f64 = 1.0;
pub const CHILD_WEIGHT: f64 = 0.5;
pub const INFANT_WEIGHT: f64 = 0.0;

/// Guest composition of a party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMix {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl GuestMix {
    /// Bodies a room must hold. Two or more infants take up one extra place;
    /// a single infant shares a bed.
    pub fn occupants(&self) -> u32 {
        let infant_place = if self.infants >= 2 { 1 } else { 0 };
        self.adults + self.children + infant_place
    }

    pub fn stay_units(&self) -> f64 {
        stay_units(self.adults, self.children, self.infants)
    }
}

/// Billable guest weight: adults count fully, children half, infants not at all.
pub fn stay_units(adults: u32, children: u32, infants: u32) -> f64 {
    adults as f64 * ADULT_WEIGHT + children as f64 * CHILD_WEIGHT + infants as f64 * INFANT_WEIGHT
}

/// Weighted guest nights ("Geceleme") of one reservation.
pub fn occupancy_value(res: &Reservation) -> Result<f64, BookingError> {
    let nights = res.range()?.nights();
    Ok(res.guests().stay_units() * nights as f64)
}

/// Sum of [`occupancy_value`] over a collection.
pub fn total_occupancy_value(reservations: &[Reservation]) -> Result<f64, BookingError> {
    // Half units are exact in f64, so summing per reservation stays order-independent.
    reservations
        .iter()
        .try_fold(0.0, |acc, res| Ok(acc + occupancy_value(res)?))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuestStats {
    pub total: u32,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

/// Head counts over a list, e.g. today's arrivals.
pub fn guest_stats(reservations: &[Reservation]) -> GuestStats {
    reservations.iter().fold(GuestStats::default(), |mut acc, res| {
        acc.adults += res.adults;
        acc.children += res.children;
        acc.infants += res.infants;
        acc.total += res.adults + res.children + res.infants;
        acc
    })
}

/// Dashboard figures for a reservation list as seen on `today`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OccupancyStats {
    pub total_nights: i64,
    pub total_adults: u32,
    pub total_children: u32,
    pub total_infants: u32,
    pub total_overnight_value: f64,

    /// Reservations in house on `today`; each counts as one night.
    pub today_nights: i64,
    pub today_adults: u32,
    pub today_children: u32,
    pub today_infants: u32,
    pub today_overnight_value: f64,
}

pub fn occupancy_stats(
    reservations: &[Reservation],
    today: NaiveDate,
) -> Result<OccupancyStats, BookingError> {
    let mut stats = OccupancyStats::default();

    for res in reservations {
        let range = res.range()?;
        stats.total_nights += range.nights();
        stats.total_adults += res.adults;
        stats.total_children += res.children;
        stats.total_infants += res.infants;

        if range.contains(today) {
            stats.today_nights += 1;
            stats.today_adults += res.adults;
            stats.today_children += res.children;
            stats.today_infants += res.infants;
        }
    }

    stats.total_overnight_value = stay_units(stats.total_adults, stats.total_children, 0);
    stats.today_overnight_value = stay_units(stats.today_adults, stats.today_children, 0);
    Ok(stats)
}
