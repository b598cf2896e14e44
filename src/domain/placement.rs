// src/domain/placement.rs
//
// The only place double-booking is prevented. Callers must run these checks in the
// same logical operation that writes the reservation (see `db::reservations`).

use tracing::debug;

use crate::domain::availability::occupied_rooms;
use crate::domain::models::{Reservation, Room};
use crate::errors::BookingError;

/// Fails with `RoomConflict` if another reservation holds `room_no` during the stay of
/// `reservation`. The reservation's own id is ignored so re-saving a booking is allowed.
pub fn check_room_free(
    reservation: &Reservation,
    room_no: u32,
    all_reservations: &[Reservation],
) -> Result<(), BookingError> {
    let stay = reservation.range()?;
    let exclude = Some(reservation.id.as_str()).filter(|id| !id.is_empty());
    match occupied_rooms(all_reservations, &stay, exclude).get(&room_no) {
        Some(clash) => {
            debug!(room_no, clash = %clash.id, "placement rejected");
            Err(BookingError::RoomConflict {
                room_no,
                reservation_id: clash.id.clone(),
            })
        }
        None => Ok(()),
    }
}

/// Returns a copy of `reservation` placed in `room_no`, or the conflict that prevents it.
pub fn assign_room(
    reservation: &Reservation,
    room_no: u32,
    all_reservations: &[Reservation],
) -> Result<Reservation, BookingError> {
    check_room_free(reservation, room_no, all_reservations)?;

    let mut placed = reservation.clone();
    placed.room_code = Some(room_no.to_string());
    Ok(placed)
}

/// `room_code` must name a room that exists in the hotel's inventory.
pub fn ensure_room_exists(room_code: &str, rooms: &[Room]) -> Result<u32, BookingError> {
    room_code
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|no| rooms.iter().any(|room| room.no == *no))
        .ok_or_else(|| BookingError::UnknownRoom(room_code.to_string()))
}

/// Full write-time validation of a reservation against the current snapshot.
pub fn validate_placement(
    reservation: &Reservation,
    rooms: &[Room],
    all_reservations: &[Reservation],
) -> Result<(), BookingError> {
    reservation.range()?;
    if let Some(code) = reservation.room_code.as_deref() {
        let room_no = ensure_room_exists(code, rooms)?;
        check_room_free(reservation, room_no, all_reservations)?;
    }
    Ok(())
}
