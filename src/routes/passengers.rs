//! Back-office passenger pages of scheduled bus departures.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::passengers::PassengersQuery;
use crate::forms::clients::{PaymentForm, StatusForm};
use crate::forms::format_seat_list;
use crate::forms::passengers::PassengerForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, form_outcome, page_error, render_template};
use crate::services::passengers as passengers_service;

#[derive(Deserialize)]
pub struct PassengersQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[get("/schedules/{schedule_id}/passengers")]
pub async fn show_passengers(
    path: web::Path<i32>,
    params: web::Query<PassengersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = PassengersQuery {
        search: params.q,
        page: params.page,
    };
    match passengers_service::list_passengers(repo.get_ref(), &user, path.into_inner(), query) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "routes", &server_config.auth_service_url);
            context.insert("schedule", &data.schedule);
            context.insert("route", &data.route);
            context.insert("passengers", &data.passengers);
            context.insert("search_query", &data.search_query.unwrap_or_default());
            context.insert("seats_available", &data.seats_available);
            render_template(&tera, "passengers/index.html", &context)
        }
        Err(err) => page_error(err, "load passengers"),
    }
}

#[get("/passengers/{passenger_id}")]
pub async fn show_passenger(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match passengers_service::load_passenger(repo.get_ref(), &user, path.into_inner()) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "routes", &server_config.auth_service_url);
            context.insert("passenger", &data.passenger);
            context.insert("balance", &data.passenger.balance());
            context.insert("schedule", &data.schedule);
            context.insert("route", &data.route);
            context.insert("seats", &format_seat_list(&data.seats));
            context.insert("seat_map", &data.seat_map);
            context.insert("deposit", &data.deposit);
            context.insert("currency", &data.currency);
            render_template(&tera, "passengers/show.html", &context)
        }
        Err(err) => page_error(err, "load passenger"),
    }
}

#[post("/passengers/{passenger_id}")]
pub async fn save_passenger(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<PassengerForm>,
) -> impl Responder {
    let passenger_id = path.into_inner();
    let result = passengers_service::update_passenger(
        repo.get_ref(),
        &user,
        passenger_id,
        form.into_inner(),
    );
    form_outcome(
        result,
        "Passenger saved.",
        &format!("/admin/passengers/{passenger_id}"),
        "save passenger",
    )
}

#[post("/passengers/{passenger_id}/payments")]
pub async fn add_passenger_payment(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<PaymentForm>,
) -> impl Responder {
    let passenger_id = path.into_inner();
    let result = passengers_service::record_passenger_payment(
        repo.get_ref(),
        &user,
        passenger_id,
        form.into_inner(),
    );
    form_outcome(
        result,
        "Payment recorded.",
        &format!("/admin/passengers/{passenger_id}"),
        "record payment",
    )
}

#[post("/passengers/{passenger_id}/status")]
pub async fn set_passenger_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<StatusForm>,
) -> impl Responder {
    let passenger_id = path.into_inner();
    let result = passengers_service::change_passenger_status(
        repo.get_ref(),
        &user,
        passenger_id,
        form.into_inner(),
    );
    form_outcome(
        result,
        "Status updated.",
        &format!("/admin/passengers/{passenger_id}"),
        "change status",
    )
}
