// src/db/reservations.rs
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{info, warn};

use crate::db::connection::Database;
use crate::db::rooms::load_rooms;
use crate::domain::models::Reservation;
use crate::domain::placement;
use crate::errors::{BookingError, ServerError};
use crate::ids::generate_id_default;

/// Decodes a stored document into the strict reservation shape.
/// Unknown shapes fail here instead of being guessed at further down.
fn decode(id: &str, doc: &str) -> Result<Reservation, BookingError> {
    let mut res: Reservation =
        serde_json::from_str(doc).map_err(|e| BookingError::MalformedRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
    res.id = id.to_string();
    res.range().map_err(|e| BookingError::MalformedRecord {
        id: id.to_string(),
        reason: e.to_string(),
    })?;
    Ok(res)
}

pub fn load_reservations(conn: &Connection, hotel: &str) -> Result<Vec<Reservation>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select id, doc
            from reservations
            where hotel = ?1
            order by start_date, id
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![hotel], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        let (id, doc) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        out.push(decode(&id, &doc)?);
    }
    Ok(out)
}

fn load_one(conn: &Connection, hotel: &str, id: &str) -> Result<Reservation, ServerError> {
    let doc: Option<String> = conn
        .query_row(
            "select doc from reservations where hotel = ?1 and id = ?2",
            params![hotel, id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    match doc {
        Some(doc) => Ok(decode(id, &doc)?),
        None => Err(ServerError::NotFound),
    }
}

fn write(conn: &Connection, hotel: &str, res: &Reservation) -> Result<(), ServerError> {
    let doc = serde_json::to_string(res)
        .map_err(|e| ServerError::DbError(format!("failed to encode reservation: {e}")))?;

    conn.execute(
        r#"
        insert into reservations (hotel, id, start_date, end_date, room_code, doc, updated_at)
        values (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        on conflict(hotel, id) do update set
            start_date = excluded.start_date,
            end_date = excluded.end_date,
            room_code = excluded.room_code,
            doc = excluded.doc,
            updated_at = excluded.updated_at
        "#,
        params![
            hotel,
            res.id,
            res.start,
            res.end,
            res.room_code,
            doc,
            Utc::now().naive_utc()
        ],
    )
    .map_err(|e| ServerError::DbError(format!("failed to save reservation: {e}")))?;
    Ok(())
}

/// Runs `f` inside a write transaction. `IMMEDIATE` takes the write lock up front,
/// so a placement check and the write that depends on it cannot interleave with
/// another writer's.
pub(crate) fn in_write_tx<T, F>(db: &Database, f: F) -> Result<T, ServerError>
where
    F: FnOnce(&Connection) -> Result<T, ServerError>,
{
    db.with_conn(|conn| {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let out = f(&tx)?;
        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;
        Ok(out)
    })
}

pub fn list_reservations(db: &Database, hotel: &str) -> Result<Vec<Reservation>, ServerError> {
    db.with_conn(|conn| load_reservations(conn, hotel))
}

pub fn get_reservation(db: &Database, hotel: &str, id: &str) -> Result<Reservation, ServerError> {
    db.with_conn(|conn| load_one(conn, hotel, id))
}

/// Creates or updates a reservation.
///
/// Range, room reference and double-booking are checked against the hotel's current
/// rooms and reservations inside the same transaction as the write. A reservation
/// without an id gets a fresh one.
pub fn save_reservation(
    db: &Database,
    hotel: &str,
    reservation: Reservation,
) -> Result<Reservation, ServerError> {
    let mut res = reservation;
    res.hotel = Some(hotel.to_string());
    if res.id.trim().is_empty() {
        res.id = generate_id_default();
    }

    let saved = in_write_tx(db, |conn| {
        let rooms = load_rooms(conn, hotel)?;
        let existing = load_reservations(conn, hotel)?;

        if let Err(err) = placement::validate_placement(&res, &rooms, &existing) {
            warn!(hotel, id = %res.id, error = %err, "reservation rejected");
            return Err(err.into());
        }

        write(conn, hotel, &res)?;
        Ok(res)
    })?;

    info!(hotel, id = %saved.id, room = ?saved.room_code, "reservation saved");
    Ok(saved)
}

/// Places an existing reservation in `room_no`, or fails with the conflicting booking.
pub fn assign_room(
    db: &Database,
    hotel: &str,
    id: &str,
    room_no: u32,
) -> Result<Reservation, ServerError> {
    let placed = in_write_tx(db, |conn| {
        let rooms = load_rooms(conn, hotel)?;
        placement::ensure_room_exists(&room_no.to_string(), &rooms)?;

        let current = load_one(conn, hotel, id)?;
        let existing = load_reservations(conn, hotel)?;
        let placed = placement::assign_room(&current, room_no, &existing).map_err(|err| {
            warn!(hotel, id, room_no, error = %err, "room assignment rejected");
            err
        })?;

        write(conn, hotel, &placed)?;
        Ok(placed)
    })?;

    info!(hotel, id, room_no, "room assigned");
    Ok(placed)
}

pub enum DeskFlag {
    CheckedIn,
    CheckedOut,
}

/// Toggles the check-in or check-out flag of a reservation.
pub fn set_desk_flag(
    db: &Database,
    hotel: &str,
    id: &str,
    flag: DeskFlag,
    value: bool,
) -> Result<Reservation, ServerError> {
    let updated = in_write_tx(db, |conn| {
        let mut res = load_one(conn, hotel, id)?;
        match flag {
            DeskFlag::CheckedIn => res.checked_in = value,
            DeskFlag::CheckedOut => res.checked_out = value,
        }
        write(conn, hotel, &res)?;
        Ok(res)
    })?;

    info!(
        hotel,
        id,
        checked_in = updated.checked_in,
        checked_out = updated.checked_out,
        "desk status updated"
    );
    Ok(updated)
}

pub fn set_checked_in(db: &Database, hotel: &str, id: &str, value: bool) -> Result<Reservation, ServerError> {
    set_desk_flag(db, hotel, id, DeskFlag::CheckedIn, value)
}

pub fn set_checked_out(db: &Database, hotel: &str, id: &str, value: bool) -> Result<Reservation, ServerError> {
    set_desk_flag(db, hotel, id, DeskFlag::CheckedOut, value)
}

pub fn delete_reservation(db: &Database, hotel: &str, id: &str) -> Result<(), ServerError> {
    let removed = db.with_conn(|conn| {
        conn.execute(
            "delete from reservations where hotel = ?1 and id = ?2",
            params![hotel, id],
        )
        .map_err(|e| ServerError::DbError(format!("failed to delete reservation: {e}")))
    })?;

    if removed == 0 {
        return Err(ServerError::NotFound);
    }
    info!(hotel, id, "reservation deleted");
    Ok(())
}
