use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use actix_web_flash_messages::Level;
use chrono::NaiveDate;
use serde_json::{Value, json};
use tour_booking::domain::bus::NewBus;
use tour_booking::domain::pricing::TourRates;
use tour_booking::domain::tour::NewTour;
use tour_booking::domain::types::{BusName, Money, PlaceName, TourName};
use tour_booking::repository::{BusWriter, DieselRepository, TourWriter};
use tour_booking::routes::alert_level_to_str;
use tour_booking::routes::api::{
    api_v1_booking, api_v1_tour, api_v1_tour_booking, api_v1_tour_seats, json_config, path_config,
};

mod common;

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

fn published_tour(repo: &DieselRepository) -> i32 {
    let bus = repo
        .create_bus(&NewBus::try_new(BusName::new("Coach 1").unwrap(), None, 12, None).unwrap())
        .unwrap();
    let rates = TourRates {
        double: Money::from_cents(800_000).unwrap(),
        triple: Money::from_cents(700_000).unwrap(),
        quad: Money::from_cents(650_000).unwrap(),
        child: Money::from_cents(400_000).unwrap(),
    };
    let tour = NewTour::try_new(
        TourName::new("Barrancas del Cobre").unwrap(),
        PlaceName::new("Creel").unwrap(),
        None,
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 11, 6).unwrap(),
        Some(bus.id),
        rates,
        true,
    )
    .unwrap();
    repo.create_tour(&tour).unwrap().id.get()
}

#[actix_web::test]
async fn test_tour_booking_through_the_api() {
    let test_db = common::TestDb::new("test_tour_booking_through_the_api.db");
    let repo = DieselRepository::new(test_db.pool());
    let tour_id = published_tour(&repo);

    let app = test::init_service(
        App::new().app_data(web::Data::new(repo)).service(
            web::scope("/api")
                .service(api_v1_tour_booking)
                .service(api_v1_tour_seats)
                .service(api_v1_booking),
        ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/tours/{tour_id}/bookings"))
        .set_json(json!({
            "adults": 2,
            "name": "Ana Lopez",
            "email": "ana@example.com",
            "seats": [1, 2]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let confirmation: Value = test::read_body_json(resp).await;
    assert_eq!(confirmation["total"], 1_600_000);
    assert_eq!(confirmation["deposit"], 480_000);
    let folio = confirmation["folio"].as_str().unwrap().to_string();

    // Seat 2 now belongs to the first reservation.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/tours/{tour_id}/bookings"))
        .set_json(json!({
            "adults": 2,
            "name": "Luis Perez",
            "email": "luis@example.com",
            "seats": [2, 3]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tours/{tour_id}/seats"))
        .to_request();
    let seat_map: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(seat_map["available"], 10);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/bookings/{folio}"))
        .to_request();
    let lookup: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lookup["status"], "pending");
    assert_eq!(lookup["paid"], 0);
}

#[actix_web::test]
async fn test_booking_validation_errors() {
    let test_db = common::TestDb::new("test_booking_validation_errors.db");
    let repo = DieselRepository::new(test_db.pool());
    let tour_id = published_tour(&repo);

    let app = test::init_service(
        App::new().app_data(web::Data::new(repo)).service(
            web::scope("/api")
                .service(api_v1_tour_booking)
                .service(api_v1_booking),
        ),
    )
    .await;

    // Three travellers cannot sit on two seats.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/tours/{tour_id}/bookings"))
        .set_json(json!({
            "adults": 3,
            "name": "Ana Lopez",
            "email": "ana@example.com",
            "seats": [1, 2]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get()
        .uri("/api/v1/bookings/not-a-folio")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_bodies_get_json_errors() {
    let test_db = common::TestDb::new("test_malformed_bodies_get_json_errors.db");
    let repo = DieselRepository::new(test_db.pool());
    let tour_id = published_tour(&repo);

    let app = test::init_service(
        App::new().app_data(web::Data::new(repo)).service(
            web::scope("/api")
                .app_data(json_config())
                .app_data(path_config())
                .service(api_v1_tour_booking)
                .service(api_v1_tour),
        ),
    )
    .await;

    for body in [
        json!({"adults": -1, "name": "Ana", "email": "ana@example.com"}),
        json!({"adults": "two", "name": "Ana", "email": "ana@example.com"}),
        json!({"adults": 2, "email": "ana@example.com"}),
    ] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/tours/{tour_id}/bookings"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = test::read_body_json(resp).await;
        assert!(error["error"].is_string());
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/tours/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Not found");
}
