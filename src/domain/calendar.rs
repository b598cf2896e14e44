// src/domain/calendar.rs

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::models::Reservation;

/// A run of consecutive days shown as columns of the room grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub first_day: NaiveDate,
    pub day_count: u32,
}

impl CalendarWindow {
    pub fn new(first_day: NaiveDate, day_count: u32) -> Self {
        Self {
            first_day,
            day_count: day_count.max(1),
        }
    }

    /// Saturates at the last representable date.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_signed(Duration::days(self.day_count as i64 - 1))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Reservations on `room_no` that touch the window. Both ends are inclusive here:
/// the grid draws the checkout day, so a stay ending on the first column is shown.
pub fn reservations_for_room<'a>(
    reservations: &'a [Reservation],
    room_no: u32,
    window: &CalendarWindow,
) -> Vec<&'a Reservation> {
    let last = window.last_day();
    reservations
        .iter()
        .filter(|res| res.holds_room(room_no))
        .filter(|res| res.start <= last && res.end >= window.first_day)
        .collect()
}

/// Where a reservation bar sits in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarPosition {
    pub start_index: i64,
    pub width: i64,
}

/// Column of the first night and the number of columns the bar spans, clamped to the window.
pub fn calendar_position(res: &Reservation, window: &CalendarWindow) -> BarPosition {
    let bar_start = res.start.max(window.first_day);
    let bar_end = res.end.min(window.last_day());

    BarPosition {
        start_index: (bar_start - window.first_day).num_days(),
        width: (bar_end - bar_start).num_days().max(0),
    }
}
