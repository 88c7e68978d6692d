use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/majors")]
pub async fn api_v1_majors(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match api_service::list_majors(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("Failed to list majors: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
