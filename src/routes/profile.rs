use std::path::Path;

use actix_files::NamedFile;
use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::applicant::{LearningRecordForm, ProfileForm, UploadPhotoForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, finish_mutation, list_error, redirect, render_template};
use crate::services::{ServiceError, profile as profile_service};

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_profile(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "profile", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "profile/index.html", &context)
        }
        Err(err) => list_error(err, "profile"),
    }
}

#[post("/profile/save")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    finish_mutation(
        profile_service::save_profile(repo.get_ref(), &user, form),
        "/profile",
        "Đã lưu thông tin cá nhân.",
        "Lỗi khi lưu thông tin cá nhân",
    )
}

#[post("/profile/history/add")]
pub async fn add_learning_record(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LearningRecordForm>,
) -> impl Responder {
    finish_mutation(
        profile_service::add_learning_record(repo.get_ref(), &user, form),
        "/profile",
        "Đã thêm quá trình học tập.",
        "Lỗi khi thêm quá trình học tập",
    )
}

#[post("/profile/history/delete/{record_id}")]
pub async fn delete_learning_record(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        profile_service::delete_learning_record(repo.get_ref(), &user, record_id.into_inner()),
        "/profile",
        "Đã xóa quá trình học tập.",
        "Lỗi khi xóa quá trình học tập",
    )
}

#[post("/profile/transcript/save")]
pub async fn save_transcript(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    finish_mutation(
        profile_service::save_transcript(repo.get_ref(), &user, body.as_ref()),
        "/profile",
        "Đã lưu bảng điểm.",
        "Lỗi khi lưu bảng điểm",
    )
}

#[post("/profile/photo")]
pub async fn upload_photo(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(mut form): MultipartForm<UploadPhotoForm>,
) -> impl Responder {
    finish_mutation(
        profile_service::upload_photo(
            repo.get_ref(),
            &user,
            &mut form,
            Path::new(&server_config.upload_dir),
        ),
        "/profile",
        "Đã tải ảnh thẻ lên.",
        "Lỗi khi tải ảnh thẻ",
    )
}

#[get("/photos/{applicant_id}")]
pub async fn show_photo(
    req: HttpRequest,
    applicant_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    let path = match profile_service::photo_file(
        repo.get_ref(),
        &user,
        applicant_id.into_inner(),
        Path::new(&server_config.upload_dir),
    ) {
        Ok(path) => path,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Không đủ quyền.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to resolve photo: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match NamedFile::open(&path) {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            log::error!("Failed to open photo {}: {e}", path.display());
            HttpResponse::NotFound().finish()
        }
    }
}
