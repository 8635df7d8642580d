//! Public booking API consumed by the agency website.

use actix_web::error::InternalError;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};

use crate::dto::catalog::ToursQuery;
use crate::forms::booking::{BusBookingForm, BusQuoteForm, TourBookingForm, TourQuoteForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, booking as booking_service, bus_booking as bus_service};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps service failures to JSON errors with a matching status code.
fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    let body = |message: String| ErrorBody { error: message };
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body("Not found".to_string())),
        ServiceError::SeatTaken => HttpResponse::Conflict().json(body(
            "One of the selected seats is no longer available".to_string(),
        )),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::UnprocessableEntity().json(body(message))
        }
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(body("Internal error".to_string()))
        }
    }
}

/// Bodies that fail to deserialize are answered like any other invalid input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::UnprocessableEntity().json(ErrorBody {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::UnprocessableEntity().json(ErrorBody {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

/// Identifiers that are not numbers cannot name a record.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorBody {
            error: "Not found".to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

#[derive(Debug, Deserialize)]
pub struct ToursQueryParams {
    search: Option<String>,
    page: Option<usize>,
}

#[get("/v1/tours")]
pub async fn api_v1_tours(
    params: web::Query<ToursQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ToursQuery {
        search: params.search,
        page: params.page,
    };
    match booking_service::list_published_tours(repo.get_ref(), query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response(err, "list tours"),
    }
}

#[get("/v1/tours/{tour_id}")]
pub async fn api_v1_tour(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match booking_service::load_tour_booking(repo.get_ref(), path.into_inner()) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load tour"),
    }
}

#[get("/v1/tours/{tour_id}/seats")]
pub async fn api_v1_tour_seats(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match booking_service::load_tour_booking(repo.get_ref(), path.into_inner()) {
        Ok(data) => match data.seat_map {
            Some(seat_map) => HttpResponse::Ok().json(seat_map),
            None => error_response(ServiceError::NotFound, "load tour seats"),
        },
        Err(err) => error_response(err, "load tour seats"),
    }
}

#[post("/v1/tours/{tour_id}/quote")]
pub async fn api_v1_tour_quote(
    path: web::Path<i32>,
    form: web::Json<TourQuoteForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match booking_service::quote_tour_booking(repo.get_ref(), path.into_inner(), form.into_inner())
    {
        Ok(quote) => HttpResponse::Ok().json(quote),
        Err(err) => error_response(err, "quote tour"),
    }
}

#[post("/v1/tours/{tour_id}/bookings")]
pub async fn api_v1_tour_booking(
    path: web::Path<i32>,
    form: web::Json<TourBookingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match booking_service::book_tour(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(confirmation) => HttpResponse::Created().json(confirmation),
        Err(err) => error_response(err, "book tour"),
    }
}

#[get("/v1/schedules")]
pub async fn api_v1_schedules(repo: web::Data<DieselRepository>) -> impl Responder {
    match bus_service::list_schedules(repo.get_ref()) {
        Ok(schedules) => HttpResponse::Ok().json(schedules),
        Err(err) => error_response(err, "list schedules"),
    }
}

#[get("/v1/schedules/{schedule_id}")]
pub async fn api_v1_schedule(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bus_service::load_bus_booking(repo.get_ref(), path.into_inner()) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load schedule"),
    }
}

#[get("/v1/schedules/{schedule_id}/seats")]
pub async fn api_v1_schedule_seats(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bus_service::load_bus_booking(repo.get_ref(), path.into_inner()) {
        Ok(data) => HttpResponse::Ok().json(data.seat_map),
        Err(err) => error_response(err, "load schedule seats"),
    }
}

#[post("/v1/schedules/{schedule_id}/quote")]
pub async fn api_v1_schedule_quote(
    path: web::Path<i32>,
    form: web::Json<BusQuoteForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bus_service::quote_bus_booking(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(quote) => HttpResponse::Ok().json(quote),
        Err(err) => error_response(err, "quote bus trip"),
    }
}

#[post("/v1/schedules/{schedule_id}/bookings")]
pub async fn api_v1_schedule_booking(
    path: web::Path<i32>,
    form: web::Json<BusBookingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bus_service::book_bus_trip(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(confirmation) => HttpResponse::Created().json(confirmation),
        Err(err) => error_response(err, "book bus trip"),
    }
}

#[get("/v1/bookings/{folio}")]
pub async fn api_v1_booking(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match booking_service::lookup_booking(repo.get_ref(), &path.into_inner()) {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(err) => error_response(err, "look up booking"),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        assert_eq!(
            error_response(ServiceError::SeatTaken, "book").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(ServiceError::NotFound, "book").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::Form("bad".into()), "book").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_response(ServiceError::Internal("boom".into()), "book").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
