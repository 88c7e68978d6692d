use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, list_error, modal_error, render_template};
use crate::services::applicants as applicants_service;

#[get("/applicants")]
pub async fn show_applicants(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match applicants_service::list_applicants(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "applicants",
                &server_config.auth_service_url,
            );
            context.insert("data", &data);
            render_template(&tera, "applicants/index.html", &context)
        }
        Err(err) => list_error(err, "applicants"),
    }
}

#[post("/applicants/modal/{applicant_id}")]
pub async fn applicant_modal(
    applicant_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match applicants_service::load_applicant_detail(
        repo.get_ref(),
        &user,
        applicant_id.into_inner(),
    ) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("data", &data);
            render_template(&tera, "applicants/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "applicant"),
    }
}
