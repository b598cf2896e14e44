use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use chrono::{Datelike, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::EngineConfig;
use crate::db::{reservations, rooms, tour_prices, Database};
use crate::domain::availability::{find_available_rooms, CapacityTable};
use crate::domain::calendar::{calendar_position, reservations_for_room, CalendarWindow};
use crate::domain::dates::{normalize_to_day, parse_day};
use crate::domain::desk::{arrivals_on, departures_on, stay_status};
use crate::domain::models::{Reservation, Room};
use crate::domain::occupancy::{guest_stats, occupancy_stats, total_occupancy_value, GuestMix};
use crate::domain::pricing::TourPriceDefinition;
use crate::domain::summary::summarize_by_category_with;
use crate::errors::ServerError;
use crate::responses::{created, ok, ResultResp};

/// Everything a request handler needs. Shared read-only across workers.
pub struct App {
    pub db: Database,
    pub capacities: CapacityTable,
    pub default_category: String,
}

impl App {
    pub fn new(db: Database, engine: &EngineConfig) -> Self {
        Self {
            db,
            capacities: engine.capacity_table(),
            default_category: engine.default_category.clone(),
        }
    }
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);
    debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => ok(&json!({ "status": "ok" })),

        // Rooms
        ("GET", "/rooms") => {
            let hotel = require(&params, "hotel")?;
            ok(&rooms::list_rooms(&app.db, hotel)?)
        }
        ("POST", "/rooms") => {
            let hotel = require(&params, "hotel")?;
            let room: Room = read_json(&mut req)?;
            rooms::upsert_room(&app.db, hotel, &room)?;
            created(&room)
        }
        ("DELETE", "/rooms") => {
            let hotel = require(&params, "hotel")?;
            let no: u32 = parse_param(&params, "no")?;
            rooms::delete_room(&app.db, hotel, no)?;
            ok(&json!({ "deleted": no }))
        }

        // Reservations
        ("GET", "/reservations") => {
            let hotel = require(&params, "hotel")?;
            let all = reservations::list_reservations(&app.db, hotel)?;
            ok(&filter_year(all, optional_year(&params)?))
        }
        ("POST", "/reservations") => {
            let hotel = require(&params, "hotel")?;
            let incoming: Reservation = read_json(&mut req)?;
            let saved = reservations::save_reservation(&app.db, hotel, incoming)?;
            created(&saved)
        }
        ("DELETE", "/reservations") => {
            let hotel = require(&params, "hotel")?;
            let id = require(&params, "id")?;
            reservations::delete_reservation(&app.db, hotel, id)?;
            ok(&json!({ "deleted": id }))
        }
        ("POST", "/reservations/assign") => {
            #[derive(Deserialize)]
            struct Assign {
                id: String,
                room_no: u32,
            }
            let hotel = require(&params, "hotel")?;
            let body: Assign = read_json(&mut req)?;
            ok(&reservations::assign_room(&app.db, hotel, &body.id, body.room_no)?)
        }
        ("POST", "/reservations/check-in") => {
            let hotel = require(&params, "hotel")?;
            let body: DeskToggle = read_json(&mut req)?;
            ok(&reservations::set_checked_in(&app.db, hotel, &body.id, body.checked)?)
        }
        ("POST", "/reservations/check-out") => {
            let hotel = require(&params, "hotel")?;
            let body: DeskToggle = read_json(&mut req)?;
            ok(&reservations::set_checked_out(&app.db, hotel, &body.id, body.checked)?)
        }

        // Engine queries
        ("GET", "/availability") => availability(app, &params),
        ("GET", "/calendar") => calendar(app, &params),
        ("GET", "/desk") => {
            let hotel = require(&params, "hotel")?;
            let date = day_or_today(&params, "date")?;
            let all = reservations::list_reservations(&app.db, hotel)?;
            let arrivals = arrivals_on(&all, date, Some(hotel));
            let departures = departures_on(&all, date, Some(hotel));
            ok(&json!({
                "date": date,
                "arrival_guests": guest_stats(&arrivals),
                "departure_guests": guest_stats(&departures),
                "arrivals": arrivals,
                "departures": departures,
            }))
        }
        ("GET", "/summary") => {
            let hotel = require(&params, "hotel")?;
            let all = filter_year(
                reservations::list_reservations(&app.db, hotel)?,
                optional_year(&params)?,
            );
            let categories = summarize_by_category_with(&all, &app.default_category)?;
            let total_amount: f64 = categories.iter().map(|c| c.total_amount).sum();
            ok(&json!({
                "categories": categories,
                "total_stay_units": total_occupancy_value(&all)?,
                "total_amount": total_amount,
            }))
        }
        ("GET", "/stats") => {
            let hotel = require(&params, "hotel")?;
            let date = day_or_today(&params, "date")?;
            let all = reservations::list_reservations(&app.db, hotel)?;
            ok(&occupancy_stats(&all, date)?)
        }

        // Tour price sheets
        ("GET", "/tour-prices") => {
            let hotel = require(&params, "hotel")?;
            ok(&tour_prices::list_tour_prices(&app.db, hotel, optional_year(&params)?)?)
        }
        ("POST", "/tour-prices") => {
            let hotel = require(&params, "hotel")?;
            let def: TourPriceDefinition = read_json(&mut req)?;
            created(&tour_prices::add_tour_price(&app.db, hotel, def)?)
        }
        ("DELETE", "/tour-prices") => {
            let hotel = require(&params, "hotel")?;
            let id = require(&params, "id")?;
            tour_prices::delete_tour_price(&app.db, hotel, id)?;
            ok(&json!({ "deleted": id }))
        }

        _ => Err(ServerError::NotFound),
    }
}

#[derive(Deserialize)]
struct DeskToggle {
    id: String,
    #[serde(default = "default_checked")]
    checked: bool,
}

fn default_checked() -> bool {
    true
}

/// `GET /availability?hotel=..&start=..&end=..[&adults=&children=&infants=][&exclude=]`
fn availability(app: &App, params: &HashMap<String, String>) -> ResultResp {
    let hotel = require(params, "hotel")?;
    let start = parse_day_param(params, "start")?;
    let end = parse_day_param(params, "end")?;

    let party = if ["adults", "children", "infants"]
        .iter()
        .any(|k| params.contains_key(*k))
    {
        Some(GuestMix {
            adults: parse_param_or(params, "adults", 0)?,
            children: parse_param_or(params, "children", 0)?,
            infants: parse_param_or(params, "infants", 0)?,
        })
    } else {
        None
    };

    let all_rooms = rooms::list_rooms(&app.db, hotel)?;
    let all = reservations::list_reservations(&app.db, hotel)?;
    let free = find_available_rooms(
        &all_rooms,
        &all,
        start,
        end,
        party,
        params.get("exclude").map(String::as_str),
        &app.capacities,
    )?;

    ok(&json!({
        "start": start,
        "end": end,
        "party": party.unwrap_or_default(),
        "capacity_checked": party.is_some(),
        "rooms": free,
    }))
}

/// Widest calendar window a single request may ask for.
pub const MAX_CALENDAR_DAYS: u32 = 366;

/// `GET /calendar?hotel=..&room=..&from=..&days=..`: bars for one row of the room grid.
fn calendar(app: &App, params: &HashMap<String, String>) -> ResultResp {
    let hotel = require(params, "hotel")?;
    let room_no: u32 = parse_param(params, "room")?;
    let from = parse_day_param(params, "from")?;
    let days: u32 = parse_param_or(params, "days", 31)?;
    if !(1..=MAX_CALENDAR_DAYS).contains(&days) {
        return Err(ServerError::BadRequest(format!(
            "`days` must be between 1 and {MAX_CALENDAR_DAYS}"
        )));
    }
    let today = today();

    let window = CalendarWindow::new(from, days);
    let all = reservations::list_reservations(&app.db, hotel)?;
    let bars: Vec<_> = reservations_for_room(&all, room_no, &window)
        .into_iter()
        .map(|res| {
            json!({
                "id": res.id,
                "isim": res.guest_name,
                "tur": res.category_or(&app.default_category),
                "status": stay_status(res, today),
                "position": calendar_position(res, &window),
            })
        })
        .collect();

    ok(&json!({
        "room": room_no,
        "from": window.first_day,
        "to": window.last_day(),
        "bars": bars,
    }))
}

fn today() -> NaiveDate {
    normalize_to_day(Local::now())
}

fn filter_year(all: Vec<Reservation>, year: Option<i32>) -> Vec<Reservation> {
    match year {
        Some(year) => all.into_iter().filter(|r| r.start.year() == year).collect(),
        None => all,
    }
}

fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    serde_json::from_slice(&buf).map_err(|e| ServerError::BadRequest(format!("invalid JSON: {e}")))
}

fn require<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing `{key}` parameter")))
}

fn parse_param<T: std::str::FromStr>(params: &HashMap<String, String>, key: &str) -> Result<T, ServerError> {
    require(params, key)?
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid `{key}` parameter")))
}

fn parse_param_or<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, ServerError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(_) => parse_param(params, key),
        None => Ok(default),
    }
}

fn parse_day_param(params: &HashMap<String, String>, key: &str) -> Result<NaiveDate, ServerError> {
    let raw = require(params, key)?;
    parse_day(raw).ok_or_else(|| ServerError::BadRequest(format!("invalid date `{key}`: {raw}")))
}

fn day_or_today(params: &HashMap<String, String>, key: &str) -> Result<NaiveDate, ServerError> {
    if params.contains_key(key) {
        parse_day_param(params, key)
    } else {
        Ok(today())
    }
}

fn optional_year(params: &HashMap<String, String>) -> Result<Option<i32>, ServerError> {
    match params.get("year") {
        Some(_) => parse_param(params, "year").map(Some),
        None => Ok(None),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
