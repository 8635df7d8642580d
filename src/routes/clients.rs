//! Back-office reservation pages of tours.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::clients::ClientsQuery;
use crate::forms::clients::{ClientForm, PaymentForm, StatusForm};
use crate::forms::format_seat_list;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, form_outcome, page_error, render_template};
use crate::services::ServiceError;
use crate::services::clients as clients_service;

#[derive(Deserialize)]
pub struct ClientsQueryParams {
    q: Option<String>,
    status: Option<String>,
    page: Option<usize>,
}

#[get("/tours/{tour_id}/clients")]
pub async fn show_clients(
    path: web::Path<i32>,
    params: web::Query<ClientsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ClientsQuery {
        status: params.status,
        search: params.q,
        page: params.page,
    };
    match clients_service::list_clients(repo.get_ref(), &user, path.into_inner(), query) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "tours", &server_config.auth_service_url);
            context.insert("tour", &data.tour);
            context.insert("clients", &data.clients);
            context.insert("search_query", &data.search_query.unwrap_or_default());
            context.insert("status_filter", &data.status_filter.unwrap_or_default());
            context.insert("seats_available", &data.seats_available);
            render_template(&tera, "clients/index.html", &context)
        }
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => page_error(err, "load clients"),
    }
}

#[get("/tours/{tour_id}/manifest.csv")]
pub async fn download_manifest(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match clients_service::export_manifest(repo.get_ref(), &user, path.into_inner()) {
        Ok((tour, csv)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"manifest-{}.csv\"", tour.id),
            ))
            .body(csv),
        Err(err) => page_error(err, "export manifest"),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_client(repo.get_ref(), &user, path.into_inner()) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "tours", &server_config.auth_service_url);
            context.insert("client", &data.client);
            context.insert("balance", &data.client.balance());
            context.insert("tour", &data.tour);
            context.insert("seats", &format_seat_list(&data.seats));
            context.insert("seat_map", &data.seat_map);
            context.insert("rooms", &data.rooms);
            context.insert("extras", &data.extras);
            context.insert("selected_extras", &data.selected_extras);
            context.insert("deposit", &data.deposit);
            context.insert("currency", &data.currency);
            render_template(&tera, "clients/show.html", &context)
        }
        Err(err) => page_error(err, "load client"),
    }
}

#[post("/clients/{client_id}")]
/// Reads the body by hand: the add-on checkboxes repeat the `extras` key.
pub async fn save_client(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let client_id = path.into_inner();
    let back = format!("/admin/clients/{client_id}");
    let result = serde_html_form::from_bytes::<ClientForm>(&body)
        .map_err(|err| ServiceError::Form(format!("Malformed form: {err}")))
        .and_then(|form| clients_service::update_client(repo.get_ref(), &user, client_id, form));
    form_outcome(result, "Reservation saved.", &back, "save client")
}

#[post("/clients/{client_id}/payments")]
pub async fn add_client_payment(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<PaymentForm>,
) -> impl Responder {
    let client_id = path.into_inner();
    let result =
        clients_service::record_payment(repo.get_ref(), &user, client_id, form.into_inner());
    form_outcome(
        result,
        "Payment recorded.",
        &format!("/admin/clients/{client_id}"),
        "record payment",
    )
}

#[post("/clients/{client_id}/status")]
pub async fn set_client_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<StatusForm>,
) -> impl Responder {
    let client_id = path.into_inner();
    let result =
        clients_service::change_status(repo.get_ref(), &user, client_id, form.into_inner());
    form_outcome(
        result,
        "Status updated.",
        &format!("/admin/clients/{client_id}"),
        "change status",
    )
}
