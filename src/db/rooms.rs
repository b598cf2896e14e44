// src/db/rooms.rs
use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::db::connection::Database;
use crate::db::reservations::{in_write_tx, load_reservations};
use crate::domain::models::Room;
use crate::errors::ServerError;

/// Room inventory of one hotel, ordered by floor then number.
pub fn load_rooms(conn: &Connection, hotel: &str) -> Result<Vec<Room>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select no, floor, code
            from rooms
            where hotel = ?1
            order by floor, no
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![hotel], |row| {
            Ok(Room {
                no: row.get(0)?,
                floor: row.get(1)?,
                code: row.get(2)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn list_rooms(db: &Database, hotel: &str) -> Result<Vec<Room>, ServerError> {
    db.with_conn(|conn| load_rooms(conn, hotel))
}

/// Inserts the room or replaces the floor/code of an existing number.
pub fn upsert_room(db: &Database, hotel: &str, room: &Room) -> Result<(), ServerError> {
    let code = room
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into rooms (hotel, no, floor, code)
            values (?1, ?2, ?3, ?4)
            on conflict(hotel, no) do update set
                floor = excluded.floor,
                code = excluded.code
            "#,
            params![hotel, room.no, room.floor, code],
        )
        .map_err(|e| ServerError::DbError(format!("failed to save room: {e}")))?;
        Ok(())
    })?;

    info!(hotel, no = room.no, "room saved");
    Ok(())
}

/// Removes a room. Refused with `Conflict` while any reservation is still assigned to it.
pub fn delete_room(db: &Database, hotel: &str, no: u32) -> Result<(), ServerError> {
    in_write_tx(db, |conn| {
        if let Some(holder) = load_reservations(conn, hotel)?
            .into_iter()
            .find(|res| res.holds_room(no))
        {
            warn!(hotel, no, reservation = %holder.id, "room delete refused");
            return Err(ServerError::Conflict(format!(
                "room {no} is still assigned to reservation {}",
                holder.id
            )));
        }

        let removed = conn
            .execute(
                "delete from rooms where hotel = ?1 and no = ?2",
                params![hotel, no],
            )
            .map_err(|e| ServerError::DbError(format!("failed to delete room: {e}")))?;

        if removed == 0 {
            return Err(ServerError::NotFound);
        }
        Ok(())
    })?;

    info!(hotel, no, "room deleted");
    Ok(())
}
