//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, http::header, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PAGE_SIZE_CHOICES;
use crate::services::{ServiceError, ServiceResult, check_role};
use crate::{APPLICANT_ROLE, SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub mod admission_blocks;
pub mod admission_years;
pub mod api;
pub mod applicants;
pub mod criteria;
pub mod majors;
pub mod profile;
pub mod quotas;
pub mod regions;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Template context shared by every full page.
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
    context.insert("is_staff", &check_role(SERVICE_ACCESS_ROLE, &user.roles));
    context.insert("is_admin", &check_role(SERVICE_ADMIN_ROLE, &user.roles));
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context.insert("page_sizes", &PAGE_SIZE_CHOICES);
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

/// Serves `body` as a downloadable CSV file.
pub fn csv_attachment(file_name: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(body)
}

/// Flashes the outcome of a create, update or delete and sends the browser
/// back to the list, which refetches the collection.
pub fn finish_mutation<T>(
    result: ServiceResult<T>,
    back: &str,
    success: &str,
    failure: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Không đủ quyền.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(format!("{failure}: {message}")).send();
            redirect(back)
        }
        Err(ServiceError::Conflict(message)) => {
            log::warn!("Rejected conflicting write: {message}");
            FlashMessage::error(format!(
                "{failure}: dữ liệu bị trùng hoặc đang được sử dụng."
            ))
            .send();
            redirect(back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Không tìm thấy bản ghi.").send();
            redirect(back)
        }
        Err(err) => {
            log::error!("{failure}: {err}");
            FlashMessage::error(failure).send();
            redirect(back)
        }
    }
}

/// Response for a list page whose service failed.
pub fn list_error(err: ServiceError, what: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Không đủ quyền.").send();
            redirect("/na")
        }
        err => {
            log::error!("Failed to list {what}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Response for a modal body whose service failed.
pub fn modal_error(err: ServiceError, what: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to load {what} modal: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Sends each user to the screen their role opens.
#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    if check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        redirect("/applicants")
    } else if check_role(APPLICANT_ROLE, &user.roles) {
        redirect("/profile")
    } else {
        redirect("/na")
    }
}

#[get("/na")]
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
    redirect("/")
}
