//! HTTP handlers: the public JSON API and the back-office pages.

use std::collections::HashMap;

use actix_identity::Identity;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod catalog;
pub mod clients;
pub mod passengers;
pub mod settings;

/// Maps flash message levels to Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every back-office page.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Response for a back-office page whose data failed to load.
pub fn page_error(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flashes the outcome of a back-office form post and redirects to `back`.
pub fn form_outcome<T>(
    result: ServiceResult<T>,
    success: &str,
    back: &str,
    action: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        Err(ServiceError::SeatTaken) => {
            FlashMessage::error("One of the selected seats is already taken.").send();
            redirect(back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Record not found.").send();
            redirect(back)
        }
        Err(err) => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Could not {action}.")).send();
            redirect(back)
        }
    }
}

/// Tera filter printing an amount of cents as `1,234.50`.
pub fn money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let cents = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("money filter expects an amount in cents"))?;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();
    let mut whole = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            whole.push(',');
        }
        whole.push(c);
    }
    Ok(tera::Value::String(format!("{sign}{whole}.{:02}", cents % 100)))
}

#[get("/na")]
/// Landing page for signed-in users lacking the back-office role.
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "na", &server_config.auth_service_url);
    render_template(&tera, "main/not_assigned.html", &context)
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/admin/tours")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(cents: i64) -> String {
        money_filter(&tera::Value::from(cents), &HashMap::new())
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn money_filter_groups_thousands() {
        assert_eq!(format(0), "0.00");
        assert_eq!(format(5), "0.05");
        assert_eq!(format(123_456), "1,234.56");
        assert_eq!(format(100_000_000), "1,000,000.00");
        assert!(money_filter(&tera::Value::from("x"), &HashMap::new()).is_err());
    }
}
