// src/tests/router_tests/reservation_tests.rs

use crate::tests::utils::{call, get, post, seed_rooms, test_app, HOTEL, HOTEL_QS};
use http::Method;
use serde_json::json;

fn booking(name: &str, start: &str, end: &str, room: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "isim": name,
        "baslangic_tarihi": start,
        "bitis_tarihi": end,
        "pax": 2,
        "cocuk_sayisi": 0,
        "bebek_sayisi": 0,
        "tur": "ETS",
        "ucret": "4.500,00"
    });
    if let Some(room) = room {
        body["room_code"] = json!(room);
    }
    body
}

#[test]
fn new_reservation_gets_id_and_tenant() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F")]);

    let (status, saved) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Deniz Ak", "2025-07-10", "2025-07-12", Some("101")),
    );
    assert_eq!(status, 201);
    assert_eq!(saved["id"].as_str().unwrap().len(), 20);
    assert_eq!(saved["hotel"], HOTEL);
    assert_eq!(saved["tur"], "ETS");

    let (_, list) = get(&app, &format!("/reservations?hotel={HOTEL_QS}"));
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Another tenant sees nothing.
    let (_, other) = get(&app, "/reservations?hotel=Dag%20Otel");
    assert!(other.as_array().unwrap().is_empty());
}

#[test]
fn double_booking_is_refused_with_conflicting_id() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F"), (102, 1, "FS")]);

    let (_, first) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("First", "2025-07-10", "2025-07-12", Some("101")),
    );
    let first_id = first["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Second", "2025-07-11", "2025-07-13", Some("101")),
    );
    assert_eq!(status, 409);
    assert!(body["error"].as_str().unwrap().contains(&first_id));

    // Nothing was written.
    let (_, list) = get(&app, &format!("/reservations?hotel={HOTEL_QS}"));
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn assign_endpoint_places_or_refuses() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F"), (102, 1, "FS")]);

    post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Holder", "2025-07-10", "2025-07-12", Some("101")),
    );
    let (_, loose) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Walk-in", "2025-07-11", "2025-07-13", None),
    );
    let id = loose["id"].as_str().unwrap();

    let (status, _) = post(
        &app,
        &format!("/reservations/assign?hotel={HOTEL_QS}"),
        json!({ "id": id, "room_no": 101 }),
    );
    assert_eq!(status, 409);

    let (status, _) = post(
        &app,
        &format!("/reservations/assign?hotel={HOTEL_QS}"),
        json!({ "id": id, "room_no": 999 }),
    );
    assert_eq!(status, 400);

    let (status, placed) = post(
        &app,
        &format!("/reservations/assign?hotel={HOTEL_QS}"),
        json!({ "id": id, "room_no": 102 }),
    );
    assert_eq!(status, 200);
    assert_eq!(placed["room_code"], "102");
}

#[test]
fn invalid_payloads_are_rejected() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F")]);

    let (status, _) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Zero nights", "2025-07-12", "2025-07-12", None),
    );
    assert_eq!(status, 400);

    let (status, _) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Ghost room", "2025-07-10", "2025-07-12", Some("404")),
    );
    assert_eq!(status, 400);

    let (status, _) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        json!({ "isim": "No dates" }),
    );
    assert_eq!(status, 400);
}

#[test]
fn delete_reservation_frees_the_room() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F")]);

    let (_, saved) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Leaving", "2025-07-10", "2025-07-12", Some("101")),
    );
    let id = saved["id"].as_str().unwrap();

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/reservations?hotel={HOTEL_QS}&id={id}"),
        None,
    );
    assert_eq!(status, 200);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/reservations?hotel={HOTEL_QS}&id={id}"),
        None,
    );
    assert_eq!(status, 404);

    let (status, _) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Next", "2025-07-10", "2025-07-12", Some("101")),
    );
    assert_eq!(status, 201);
}

#[test]
fn room_with_bookings_is_not_deleted() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F")]);

    let (_, saved) = post(
        &app,
        &format!("/reservations?hotel={HOTEL_QS}"),
        booking("Staying", "2025-07-10", "2025-07-12", Some("101")),
    );
    let id = saved["id"].as_str().unwrap();

    let (status, body) = call(&app, Method::DELETE, &format!("/rooms?hotel={HOTEL_QS}&no=101"), None);
    assert_eq!(status, 409);
    assert!(body["error"].as_str().unwrap().contains(id));

    let (_, rooms) = get(&app, &format!("/rooms?hotel={HOTEL_QS}"));
    assert_eq!(rooms.as_array().unwrap().len(), 1);
}
