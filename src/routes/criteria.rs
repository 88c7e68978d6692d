use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::criteria::CriterionForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, finish_mutation, list_error, modal_error, render_template};
use crate::services::criteria as criteria_service;

#[get("/criteria")]
pub async fn show_criteria(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match criteria_service::list_criteria(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "criteria", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "criteria/index.html", &context)
        }
        Err(err) => list_error(err, "criteria"),
    }
}

#[post("/criteria/modal/{criterion_id}")]
pub async fn criterion_modal(
    criterion_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match criteria_service::load_criterion_modal(repo.get_ref(), &user, criterion_id.into_inner())
    {
        Ok(criterion) => {
            let mut context = Context::new();
            context.insert("criterion", &criterion);
            render_template(&tera, "criteria/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "criterion"),
    }
}

#[post("/criteria/add")]
pub async fn add_criterion(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CriterionForm>,
) -> impl Responder {
    finish_mutation(
        criteria_service::add_criterion(repo.get_ref(), &user, form),
        "/criteria",
        "Đã thêm tiêu chí xét tuyển.",
        "Lỗi khi thêm tiêu chí xét tuyển",
    )
}

#[post("/criteria/save/{criterion_id}")]
pub async fn save_criterion(
    criterion_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CriterionForm>,
) -> impl Responder {
    finish_mutation(
        criteria_service::save_criterion(repo.get_ref(), &user, criterion_id.into_inner(), form),
        "/criteria",
        "Đã cập nhật tiêu chí xét tuyển.",
        "Lỗi khi cập nhật tiêu chí xét tuyển",
    )
}

#[post("/criteria/delete/{criterion_id}")]
pub async fn delete_criterion(
    criterion_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        criteria_service::delete_criterion(repo.get_ref(), &user, criterion_id.into_inner()),
        "/criteria",
        "Đã xóa tiêu chí xét tuyển.",
        "Lỗi khi xóa tiêu chí xét tuyển",
    )
}
