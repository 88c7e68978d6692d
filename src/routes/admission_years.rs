use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::ListQuery;
use crate::forms::admission_years::AdmissionYearForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, finish_mutation, list_error, render_template};
use crate::services::admission_years as years_service;

#[get("/years")]
pub async fn show_admission_years(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match years_service::list_admission_years(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "years", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "admission_years/index.html", &context)
        }
        Err(err) => list_error(err, "admission years"),
    }
}

#[post("/years/add")]
pub async fn add_admission_year(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AdmissionYearForm>,
) -> impl Responder {
    finish_mutation(
        years_service::add_admission_year(repo.get_ref(), &user, form),
        "/years",
        "Đã thêm năm tuyển sinh.",
        "Lỗi khi thêm năm tuyển sinh",
    )
}

#[post("/years/activate/{year_id}")]
pub async fn activate_admission_year(
    year_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        years_service::activate_admission_year(repo.get_ref(), &user, year_id.into_inner()),
        "/years",
        "Đã kích hoạt năm tuyển sinh.",
        "Lỗi khi kích hoạt năm tuyển sinh",
    )
}

#[post("/years/delete/{year_id}")]
pub async fn delete_admission_year(
    year_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        years_service::delete_admission_year(repo.get_ref(), &user, year_id.into_inner()),
        "/years",
        "Đã xóa năm tuyển sinh.",
        "Lỗi khi xóa năm tuyển sinh",
    )
}
