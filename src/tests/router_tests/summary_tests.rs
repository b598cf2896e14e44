// src/tests/router_tests/summary_tests.rs

use crate::config::EngineConfig;
use crate::router::App;
use crate::tests::utils::{call, get, init_test_db, post, seed_rooms, test_app, HOTEL_QS};
use http::Method;
use serde_json::json;

#[test]
fn summary_groups_by_channel() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F"), (102, 1, "FS"), (103, 1, "F")]);

    let bookings = [
        ("ETS", "101", "2025-07-10", "2025-07-13", 2, 1, "4.500,00"),
        ("ETS", "102", "2025-07-10", "2025-07-12", 1, 0, "1.250,50"),
        ("", "103", "2025-07-10", "2025-07-11", 2, 0, "900"),
    ];
    for (tur, room, start, end, pax, kids, ucret) in bookings {
        let (status, _) = post(
            &app,
            &format!("/reservations?hotel={HOTEL_QS}"),
            json!({
                "isim": "Guest",
                "baslangic_tarihi": start,
                "bitis_tarihi": end,
                "pax": pax,
                "cocuk_sayisi": kids,
                "tur": tur,
                "ucret": ucret,
                "room_code": room
            }),
        );
        assert_eq!(status, 201);
    }

    let (status, body) = get(&app, &format!("/summary?hotel={HOTEL_QS}&year=2025"));
    assert_eq!(status, 200);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"], "ETS");
    assert_eq!(categories[0]["reservations"], 2);
    assert_eq!(categories[0]["total_stay_units"], 9.5);
    assert_eq!(categories[0]["total_amount"], 5750.5);
    assert_eq!(categories[0]["color"], "green");
    assert_eq!(categories[1]["category"], "Normal");
    assert_eq!(categories[1]["total_stay_units"], 2.0);

    assert_eq!(body["total_stay_units"], 11.5);
    assert_eq!(body["total_amount"], 6650.5);

    let (_, other_year) = get(&app, &format!("/summary?hotel={HOTEL_QS}&year=2024"));
    assert!(other_year["categories"].as_array().unwrap().is_empty());
}

#[test]
fn stats_count_in_house_guests() {
    let app = test_app();
    seed_rooms(&app, &[(101, 1, "F"), (102, 1, "FS")]);
    for (room, start, end, kids) in [("101", "2025-07-10", "2025-07-13", 1), ("102", "2025-07-13", "2025-07-15", 0)] {
        post(
            &app,
            &format!("/reservations?hotel={HOTEL_QS}"),
            json!({
                "isim": "Guest",
                "baslangic_tarihi": start,
                "bitis_tarihi": end,
                "pax": 2,
                "cocuk_sayisi": kids,
                "bebek_sayisi": 1,
                "room_code": room
            }),
        );
    }

    let (status, stats) = get(&app, &format!("/stats?hotel={HOTEL_QS}&date=2025-07-12"));
    assert_eq!(status, 200);
    assert_eq!(stats["total_nights"], 5);
    assert_eq!(stats["total_adults"], 4);
    assert_eq!(stats["total_infants"], 2);
    assert_eq!(stats["total_overnight_value"], 4.5);
    assert_eq!(stats["today_nights"], 1);
    assert_eq!(stats["today_adults"], 2);
    assert_eq!(stats["today_overnight_value"], 2.5);

    // Checkout day no longer counts as in house.
    let (_, stats) = get(&app, &format!("/stats?hotel={HOTEL_QS}&date=2025-07-13"));
    assert_eq!(stats["today_adults"], 2);
    assert_eq!(stats["today_children"], 0);
}

#[test]
fn tour_price_sheets_are_stored_per_hotel() {
    let app = test_app();

    let (status, sheet) = post(
        &app,
        &format!("/tour-prices?hotel={HOTEL_QS}"),
        json!({
            "hotel": "ignored",
            "tourName": "Kapadokya",
            "startDate": "2025-06-01",
            "endDate": "2025-06-30",
            "adultPrice": "1.250,00",
            "childDiscount": 0.5
        }),
    );
    assert_eq!(status, 201);
    assert_eq!(sheet["hotel"], "Deniz Otel");
    assert_eq!(sheet["adultPrice"], 1250.0);
    let id = sheet["id"].as_str().unwrap().to_string();

    let (status, _) = post(
        &app,
        &format!("/tour-prices?hotel={HOTEL_QS}"),
        json!({
            "hotel": "x",
            "tourName": "Efes",
            "startDate": "2025-06-10",
            "endDate": "2025-06-01",
            "adultPrice": 100,
            "childDiscount": 0.5
        }),
    );
    assert_eq!(status, 400);

    let (_, list) = get(&app, &format!("/tour-prices?hotel={HOTEL_QS}&year=2025"));
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (_, list) = get(&app, "/tour-prices?hotel=Dag%20Otel");
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/tour-prices?hotel={HOTEL_QS}&id={id}"),
        None,
    );
    assert_eq!(status, 200);
    let (_, list) = get(&app, &format!("/tour-prices?hotel={HOTEL_QS}"));
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn configured_default_category_labels_untagged_bookings() {
    let engine = EngineConfig {
        default_category: "Diğer".to_string(),
        ..EngineConfig::default()
    };
    let app = App::new(init_test_db(), &engine);
    seed_rooms(&app, &[(101, 1, "F"), (102, 1, "FS")]);

    for (room, tur) in [("101", None), ("102", Some("ETS"))] {
        let mut body = json!({
            "isim": "Guest",
            "baslangic_tarihi": "2025-07-10",
            "bitis_tarihi": "2025-07-12",
            "pax": 2,
            "room_code": room
        });
        if let Some(tur) = tur {
            body["tur"] = json!(tur);
        }
        assert_eq!(post(&app, &format!("/reservations?hotel={HOTEL_QS}"), body).0, 201);
    }

    let (_, body) = get(&app, &format!("/summary?hotel={HOTEL_QS}"));
    let labels: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["category"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Diğer", "ETS"]);

    let (_, cal) = get(
        &app,
        &format!("/calendar?hotel={HOTEL_QS}&room=101&from=2025-07-09&days=7"),
    );
    assert_eq!(cal["bars"][0]["tur"], "Diğer");
}
