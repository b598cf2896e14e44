use crate::config::EngineConfig;
use crate::db::connection::{init_db, Database};
use crate::domain::models::Room;
use crate::responses::error_to_response;
use crate::router::{handle, App};
use astra::Body;
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const HOTEL: &str = "Deniz Otel";
pub const HOTEL_QS: &str = "Deniz%20Otel";

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns a fresh test database using the production schema
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "hotel_desk_test_{}_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let db = Database::new(path);
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_app() -> App {
    App::new(init_test_db(), &EngineConfig::default())
}

pub fn seed_rooms(app: &App, rooms: &[(u32, i32, &str)]) {
    for (no, floor, code) in rooms {
        let room = Room {
            no: *no,
            floor: *floor,
            code: Some(code.to_string()),
        };
        crate::db::rooms::upsert_room(&app.db, HOTEL, &room).expect("seed room");
    }
}

/// Runs a request through the router and returns status and decoded JSON body.
pub fn call(app: &App, method: Method, uri: &str, body: Option<Value>) -> (u16, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };
    let status = resp.status().as_u16();

    let mut text = String::new();
    resp.into_body().reader().read_to_string(&mut text).unwrap();
    let json = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or_else(|e| panic!("non-JSON body {text:?}: {e}"))
    };
    (status, json)
}

pub fn get(app: &App, uri: &str) -> (u16, Value) {
    call(app, Method::GET, uri, None)
}

pub fn post(app: &App, uri: &str, body: Value) -> (u16, Value) {
    call(app, Method::POST, uri, Some(body))
}
