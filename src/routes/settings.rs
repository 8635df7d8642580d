use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::settings::SettingsForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, form_outcome, page_error, render_template};
use crate::services::settings as settings_service;

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match settings_service::load_settings(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("settings", &data.settings);
            render_template(&tera, "settings/index.html", &context)
        }
        Err(err) => page_error(err, "load settings"),
    }
}

#[post("/settings")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<SettingsForm>,
) -> impl Responder {
    let result = settings_service::save_settings(repo.get_ref(), &user, form.into_inner());
    form_outcome(result, "Settings saved.", "/admin/settings", "save settings")
}
