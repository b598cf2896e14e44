// src/domain/availability.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::dates::DateRange;
use crate::domain::models::{Reservation, Room};
use crate::domain::occupancy::GuestMix;
use crate::errors::BookingError;

/// Maximum occupants per room type, keyed on `Room::code`.
/// Rooms whose code is missing or not listed are not capacity-limited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityTable {
    limits: HashMap<String, u32>,
}

/// One row of the capacity table as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCapacity {
    pub code: String,
    pub max_occupants: u32,
}

impl CapacityTable {
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RoomCapacity>,
    {
        let limits = rows
            .into_iter()
            .map(|row| (row.code.trim().to_string(), row.max_occupants))
            .collect();
        Self { limits }
    }

    pub fn limit_for(&self, code: Option<&str>) -> Option<u32> {
        code.and_then(|c| self.limits.get(c.trim()).copied())
    }

    pub fn fits(&self, room: &Room, party: &GuestMix) -> bool {
        match self.limit_for(room.code.as_deref()) {
            Some(max) => party.occupants() <= max,
            None => true,
        }
    }
}

/// What the caller is looking for.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub range: DateRange,
    pub party: Option<GuestMix>,
    /// Reservation being re-edited; its own booking never blocks a room.
    pub exclude_reservation_id: Option<String>,
}

impl AvailabilityQuery {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            party: None,
            exclude_reservation_id: None,
        }
    }

    pub fn with_party(mut self, party: GuestMix) -> Self {
        self.party = Some(party);
        self
    }

    pub fn excluding(mut self, reservation_id: impl Into<String>) -> Self {
        self.exclude_reservation_id = Some(reservation_id.into());
        self
    }
}

/// Reservations that hold a room during `range`, keyed by room number.
/// When several clash on one room the first in input order is kept.
pub fn occupied_rooms<'a>(
    reservations: &'a [Reservation],
    range: &DateRange,
    exclude_reservation_id: Option<&str>,
) -> BTreeMap<u32, &'a Reservation> {
    let mut occupied = BTreeMap::new();

    for res in reservations {
        if exclude_reservation_id.is_some_and(|id| !id.is_empty() && id == res.id) {
            continue;
        }
        let Some(room_no) = res.room_no() else {
            if res.room_code.is_some() {
                debug!(id = %res.id, room_code = ?res.room_code, "room_code is not a room number");
            }
            continue;
        };
        // A stay without nights holds nothing.
        let Ok(stay) = res.range() else {
            debug!(id = %res.id, "skipping reservation with empty stay");
            continue;
        };
        if stay.overlaps(range) {
            occupied.entry(room_no).or_insert(res);
        }
    }

    occupied
}

/// Rooms free for the whole of `query.range`, ordered by floor then number.
pub fn available_rooms<'a>(
    rooms: &'a [Room],
    reservations: &[Reservation],
    query: &AvailabilityQuery,
    capacities: &CapacityTable,
) -> Vec<&'a Room> {
    let occupied = occupied_rooms(
        reservations,
        &query.range,
        query.exclude_reservation_id.as_deref(),
    );

    let mut free: Vec<&Room> = rooms
        .iter()
        .filter(|room| !occupied.contains_key(&room.no))
        .filter(|room| match &query.party {
            Some(party) => capacities.fits(room, party),
            None => true,
        })
        .collect();

    free.sort_by_key(|room| (room.floor, room.no));

    debug!(
        start = %query.range.start,
        end = %query.range.end,
        occupied = occupied.len(),
        free = free.len(),
        "resolved availability"
    );
    free
}

/// Validates the raw range first; an empty or inverted stay is an error, never "all rooms".
pub fn find_available_rooms<'a>(
    rooms: &'a [Room],
    reservations: &[Reservation],
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    party: Option<GuestMix>,
    exclude_reservation_id: Option<&str>,
    capacities: &CapacityTable,
) -> Result<Vec<&'a Room>, BookingError> {
    let mut query = AvailabilityQuery::new(DateRange::new(start, end)?);
    query.party = party;
    query.exclude_reservation_id = exclude_reservation_id.map(str::to_string);
    Ok(available_rooms(rooms, reservations, &query, capacities))
}

pub fn is_room_available(
    room_no: u32,
    reservations: &[Reservation],
    range: &DateRange,
) -> bool {
    !occupied_rooms(reservations, range, None).contains_key(&room_no)
}
