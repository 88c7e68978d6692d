use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::quotas::QuotaForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, csv_attachment, finish_mutation, list_error, modal_error, redirect,
    render_template,
};
use crate::services::{ServiceError, quotas as quotas_service};

#[get("/quotas")]
pub async fn show_quotas(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match quotas_service::list_quotas(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "quotas", &server_config.auth_service_url);
            context.insert("data", &data.page);
            context.insert("majors", &data.majors);
            context.insert("blocks", &data.blocks);
            context.insert("years", &data.years);
            render_template(&tera, "quotas/index.html", &context)
        }
        Err(err) => list_error(err, "quotas"),
    }
}

#[post("/quotas/modal/{quota_id}")]
pub async fn quota_modal(
    quota_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match quotas_service::load_quota_modal(repo.get_ref(), &user, quota_id.into_inner()) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("quota", &data.quota);
            context.insert("majors", &data.majors);
            context.insert("blocks", &data.blocks);
            context.insert("years", &data.years);
            render_template(&tera, "quotas/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "quota"),
    }
}

#[post("/quotas/add")]
pub async fn add_quota(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<QuotaForm>,
) -> impl Responder {
    finish_mutation(
        quotas_service::add_quota(repo.get_ref(), &user, form),
        "/quotas",
        "Đã thêm chỉ tiêu.",
        "Lỗi khi thêm chỉ tiêu",
    )
}

#[post("/quotas/save/{quota_id}")]
pub async fn save_quota(
    quota_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<QuotaForm>,
) -> impl Responder {
    finish_mutation(
        quotas_service::save_quota(repo.get_ref(), &user, quota_id.into_inner(), form),
        "/quotas",
        "Đã cập nhật chỉ tiêu.",
        "Lỗi khi cập nhật chỉ tiêu",
    )
}

#[post("/quotas/delete/{quota_id}")]
pub async fn delete_quota(
    quota_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        quotas_service::delete_quota(repo.get_ref(), &user, quota_id.into_inner()),
        "/quotas",
        "Đã xóa chỉ tiêu.",
        "Lỗi khi xóa chỉ tiêu",
    )
}

#[get("/quotas/export")]
pub async fn export_quotas(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match quotas_service::export_quotas(repo.get_ref(), &user) {
        Ok(body) => csv_attachment("quotas.csv", body),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Không đủ quyền.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to export quotas: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
