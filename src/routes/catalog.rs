//! Back-office catalog pages.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::catalog::ToursQuery;
use crate::forms::catalog::{
    BusForm, HotelForm, HotelQuoteForm, ProviderForm, RouteForm, ScheduleForm, TourForm,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, form_outcome, page_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::catalog as catalog_service;

#[derive(Deserialize)]
pub struct ListQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[get("/tours")]
pub async fn show_tours(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ToursQuery {
        search: params.q,
        page: params.page,
    };
    match catalog_service::list_tours(repo.get_ref(), &user, query) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "tours", &server_config.auth_service_url);
            context.insert("tours", &data.tours);
            context.insert("buses", &data.buses);
            context.insert("search_query", &data.search_query.unwrap_or_default());
            render_template(&tera, "tours/index.html", &context)
        }
        Err(err) => page_error(err, "load tours"),
    }
}

#[post("/tours")]
pub async fn add_tour(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<TourForm>,
) -> impl Responder {
    let result = catalog_service::create_tour(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Tour created.", "/admin/tours", "create tour")
}

#[get("/tours/{tour_id}")]
pub async fn show_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "tours", &server_config.auth_service_url);
            context.insert("tour", &data.tour);
            context.insert("nights", &data.tour.nights());
            context.insert("buses", &data.buses);
            context.insert("hotels", &data.hotels);
            render_template(&tera, "tours/show.html", &context)
        }
        Err(err) => page_error(err, "load tour"),
    }
}

#[post("/tours/{tour_id}")]
pub async fn save_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<TourForm>,
) -> impl Responder {
    let tour_id = path.into_inner();
    let result = catalog_service::update_tour(repo.get_ref(), &user, tour_id, form.into_inner());
    form_outcome(
        result,
        "Tour saved.",
        &format!("/admin/tours/{tour_id}"),
        "save tour",
    )
}

#[get("/buses")]
pub async fn show_buses(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_buses(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "buses", &server_config.auth_service_url);
            context.insert("buses", &data.buses);
            render_template(&tera, "buses/index.html", &context)
        }
        Err(err) => page_error(err, "load buses"),
    }
}

#[post("/buses")]
pub async fn add_bus(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<BusForm>,
) -> impl Responder {
    let result = catalog_service::create_bus(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Bus added.", "/admin/buses", "add bus")
}

#[post("/buses/{bus_id}")]
pub async fn save_bus(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<BusForm>,
) -> impl Responder {
    let result =
        catalog_service::update_bus(repo.get_ref(), &user, path.into_inner(), form.into_inner());
    form_outcome(result, "Bus saved.", "/admin/buses", "save bus")
}

#[get("/hotels")]
pub async fn show_hotels(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_hotels(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "hotels", &server_config.auth_service_url);
            context.insert("hotels", &data.hotels);
            render_template(&tera, "hotels/index.html", &context)
        }
        Err(err) => page_error(err, "load hotels"),
    }
}

#[post("/hotels")]
pub async fn add_hotel(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<HotelForm>,
) -> impl Responder {
    let result = catalog_service::create_hotel(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Hotel added.", "/admin/hotels", "add hotel")
}

#[post("/hotels/{hotel_id}")]
pub async fn save_hotel(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<HotelForm>,
) -> impl Responder {
    let result =
        catalog_service::update_hotel(repo.get_ref(), &user, path.into_inner(), form.into_inner());
    form_outcome(result, "Hotel saved.", "/admin/hotels", "save hotel")
}

#[get("/hotel-quote")]
/// Lodging cost of a party; the form lives on the tour page.
pub async fn show_hotel_quote(
    params: web::Query<HotelQuoteForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::hotel_quote(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "hotels", &server_config.auth_service_url);
            context.insert("quote", &data);
            render_template(&tera, "hotels/quote.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/hotels")
        }
        Err(err) => page_error(err, "quote hotel"),
    }
}

#[get("/providers")]
pub async fn show_providers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_providers(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "providers",
                &server_config.auth_service_url,
            );
            context.insert("providers", &data.providers);
            render_template(&tera, "providers/index.html", &context)
        }
        Err(err) => page_error(err, "load providers"),
    }
}

#[post("/providers")]
pub async fn add_provider(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ProviderForm>,
) -> impl Responder {
    let result = catalog_service::create_provider(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Add-on created.", "/admin/providers", "add provider")
}

#[post("/providers/{provider_id}")]
pub async fn save_provider(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ProviderForm>,
) -> impl Responder {
    let result = catalog_service::update_provider(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
    );
    form_outcome(result, "Add-on saved.", "/admin/providers", "save provider")
}

#[get("/routes")]
pub async fn show_routes(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_routes(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "routes", &server_config.auth_service_url);
            context.insert("routes", &data.routes);
            context.insert("schedules", &data.schedules);
            context.insert("buses", &data.buses);
            render_template(&tera, "routes/index.html", &context)
        }
        Err(err) => page_error(err, "load routes"),
    }
}

#[post("/routes")]
pub async fn add_route(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<RouteForm>,
) -> impl Responder {
    let result = catalog_service::create_route(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Route created.", "/admin/routes", "create route")
}

#[post("/routes/{route_id}")]
pub async fn save_route(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<RouteForm>,
) -> impl Responder {
    let result =
        catalog_service::update_route(repo.get_ref(), &user, path.into_inner(), form.into_inner());
    form_outcome(result, "Route saved.", "/admin/routes", "save route")
}

#[post("/schedules")]
pub async fn add_schedule(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ScheduleForm>,
) -> impl Responder {
    let result = catalog_service::create_schedule(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Departure scheduled.", "/admin/routes", "create schedule")
}

#[post("/schedules/{schedule_id}")]
pub async fn save_schedule(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ScheduleForm>,
) -> impl Responder {
    let result = catalog_service::update_schedule(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
    );
    form_outcome(result, "Departure saved.", "/admin/routes", "save schedule")
}
