//! Tour and bus-trip booking for a travel agency: a public booking API and a
//! back office for catalog and reservation management.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Role required for every back-office page.
pub const SERVICE_ADMIN_ROLE: &str = "agency_admin";

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::establish_connection_pool;
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::api::{
        api_v1_booking, api_v1_schedule, api_v1_schedule_booking, api_v1_schedule_quote,
        api_v1_schedule_seats, api_v1_schedules, api_v1_tour, api_v1_tour_booking,
        api_v1_tour_quote, api_v1_tour_seats, api_v1_tours, json_config, path_config,
        query_config,
    };
    use crate::routes::catalog::{
        add_bus, add_hotel, add_provider, add_route, add_schedule, add_tour, save_bus,
        save_hotel, save_provider, save_route, save_schedule, save_tour, show_buses,
        show_hotel_quote, show_hotels, show_providers, show_routes, show_tour, show_tours,
    };
    use crate::routes::clients::{
        add_client_payment, download_manifest, save_client, set_client_status, show_client,
        show_clients,
    };
    use crate::routes::passengers::{
        add_passenger_payment, save_passenger, set_passenger_status, show_passenger,
        show_passengers,
    };
    use crate::routes::settings::{save_settings, show_settings};
    use crate::routes::{logout, money_filter, not_assigned};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let mut tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
        tera.register_filter("money", money_filter);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(server_config.secure_cookies)
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(not_assigned)
                .service(
                    web::scope("/api")
                        .app_data(json_config())
                        .app_data(query_config())
                        .app_data(path_config())
                        .service(api_v1_tours)
                        .service(api_v1_tour)
                        .service(api_v1_tour_seats)
                        .service(api_v1_tour_quote)
                        .service(api_v1_tour_booking)
                        .service(api_v1_schedules)
                        .service(api_v1_schedule)
                        .service(api_v1_schedule_seats)
                        .service(api_v1_schedule_quote)
                        .service(api_v1_schedule_booking)
                        .service(api_v1_booking),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RedirectUnauthorized)
                        .service(show_tours)
                        .service(add_tour)
                        .service(download_manifest)
                        .service(show_clients)
                        .service(show_tour)
                        .service(save_tour)
                        .service(show_buses)
                        .service(add_bus)
                        .service(save_bus)
                        .service(show_hotels)
                        .service(add_hotel)
                        .service(save_hotel)
                        .service(show_hotel_quote)
                        .service(show_providers)
                        .service(add_provider)
                        .service(save_provider)
                        .service(show_routes)
                        .service(add_route)
                        .service(save_route)
                        .service(add_schedule)
                        .service(save_schedule)
                        .service(show_passengers)
                        .service(show_client)
                        .service(save_client)
                        .service(add_client_payment)
                        .service(set_client_status)
                        .service(show_passenger)
                        .service(save_passenger)
                        .service(add_passenger_payment)
                        .service(set_passenger_status)
                        .service(show_settings)
                        .service(save_settings)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
