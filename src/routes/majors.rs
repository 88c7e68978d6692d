use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::majors::{MajorForm, UploadMajorsForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, csv_attachment, finish_mutation, list_error, modal_error, redirect,
    render_template,
};
use crate::services::{ServiceError, majors as majors_service};

#[get("/majors")]
pub async fn show_majors(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match majors_service::list_majors(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "majors", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "majors/index.html", &context)
        }
        Err(err) => list_error(err, "majors"),
    }
}

#[post("/majors/modal/{major_id}")]
pub async fn major_modal(
    major_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match majors_service::load_major_modal(repo.get_ref(), &user, major_id.into_inner()) {
        Ok(major) => {
            let mut context = Context::new();
            context.insert("major", &major);
            render_template(&tera, "majors/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "major"),
    }
}

#[post("/majors/add")]
pub async fn add_major(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<MajorForm>,
) -> impl Responder {
    finish_mutation(
        majors_service::add_major(repo.get_ref(), &user, form),
        "/majors",
        "Đã thêm ngành.",
        "Lỗi khi thêm ngành",
    )
}

#[post("/majors/save/{major_id}")]
pub async fn save_major(
    major_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<MajorForm>,
) -> impl Responder {
    finish_mutation(
        majors_service::save_major(repo.get_ref(), &user, major_id.into_inner(), form),
        "/majors",
        "Đã cập nhật ngành.",
        "Lỗi khi cập nhật ngành",
    )
}

#[post("/majors/delete/{major_id}")]
pub async fn delete_major(
    major_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        majors_service::delete_major(repo.get_ref(), &user, major_id.into_inner()),
        "/majors",
        "Đã xóa ngành.",
        "Lỗi khi xóa ngành",
    )
}

#[post("/majors/upload")]
pub async fn upload_majors(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadMajorsForm>,
) -> impl Responder {
    match majors_service::upload_majors(repo.get_ref(), &user, &mut form) {
        Ok(count) => {
            FlashMessage::success(format!("Đã nhập {count} ngành.")).send();
            redirect("/majors")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Không đủ quyền.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Lỗi khi đọc tệp CSV: {message}")).send();
            redirect("/majors")
        }
        Err(err) => {
            log::error!("Failed to import majors: {err}");
            FlashMessage::error("Lỗi khi nhập ngành").send();
            redirect("/majors")
        }
    }
}

#[get("/majors/export")]
pub async fn export_majors(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match majors_service::export_majors(repo.get_ref(), &user) {
        Ok(body) => csv_attachment("majors.csv", body),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Không đủ quyền.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to export majors: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
