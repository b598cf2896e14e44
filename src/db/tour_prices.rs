// src/db/tour_prices.rs
use rusqlite::params;
use tracing::info;

use crate::db::connection::Database;
use crate::domain::pricing::{price_sheets_for_year, TourPriceDefinition};
use crate::errors::{BookingError, ServerError};
use crate::ids::generate_id_default;

/// Price sheets of a hotel, optionally limited to those starting in `year`.
pub fn list_tour_prices(
    db: &Database,
    hotel: &str,
    year: Option<i32>,
) -> Result<Vec<TourPriceDefinition>, ServerError> {
    let defs = db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                select id, hotel, tour_name, start_date, end_date, adult_price, child_discount
                from tour_prices
                where hotel = ?1
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params![hotel], |row| {
                Ok(TourPriceDefinition {
                    id: row.get(0)?,
                    hotel: row.get(1)?,
                    tour_name: row.get(2)?,
                    start_date: row.get(3)?,
                    end_date: row.get(4)?,
                    adult_price: row.get(5)?,
                    child_discount: row.get(6)?,
                })
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })?;

    Ok(price_sheets_for_year(defs, year))
}

/// Stores a new price sheet under `hotel` and returns it with its id.
pub fn add_tour_price(
    db: &Database,
    hotel: &str,
    def: TourPriceDefinition,
) -> Result<TourPriceDefinition, ServerError> {
    // Validity is inclusive on both ends, so a single-day sheet is fine.
    if def.end_date < def.start_date {
        return Err(BookingError::InvalidRange {
            start: def.start_date,
            end: def.end_date,
        }
        .into());
    }
    if def.tour_name.trim().is_empty() {
        return Err(ServerError::BadRequest("tourName is required".into()));
    }
    if !(0.0..=1.0).contains(&def.child_discount) {
        return Err(ServerError::BadRequest(
            "childDiscount must be between 0 and 1".into(),
        ));
    }

    let mut def = def;
    def.hotel = hotel.to_string();
    def.tour_name = def.tour_name.trim().to_string();
    let id = generate_id_default();
    def.id = Some(id.clone());

    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into tour_prices
                (id, hotel, tour_name, start_date, end_date, adult_price, child_discount)
            values (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                id,
                def.hotel,
                def.tour_name,
                def.start_date,
                def.end_date,
                def.adult_price,
                def.child_discount
            ],
        )
        .map_err(|e| ServerError::DbError(format!("failed to save tour price: {e}")))?;
        Ok(())
    })?;

    info!(hotel, id = %id, tour = %def.tour_name, "tour price added");
    Ok(def)
}

pub fn delete_tour_price(db: &Database, hotel: &str, id: &str) -> Result<(), ServerError> {
    let removed = db.with_conn(|conn| {
        conn.execute(
            "delete from tour_prices where hotel = ?1 and id = ?2",
            params![hotel, id],
        )
        .map_err(|e| ServerError::DbError(format!("failed to delete tour price: {e}")))
    })?;

    if removed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
