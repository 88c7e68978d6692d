use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::admission_blocks::AdmissionBlockForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, finish_mutation, list_error, modal_error, render_template};
use crate::services::admission_blocks as blocks_service;

#[get("/blocks")]
pub async fn show_admission_blocks(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blocks_service::list_admission_blocks(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "blocks", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "admission_blocks/index.html", &context)
        }
        Err(err) => list_error(err, "admission blocks"),
    }
}

#[post("/blocks/modal/{block_id}")]
pub async fn admission_block_modal(
    block_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blocks_service::load_admission_block_modal(repo.get_ref(), &user, block_id.into_inner())
    {
        Ok(block) => {
            let mut context = Context::new();
            context.insert("block", &block);
            render_template(&tera, "admission_blocks/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "admission block"),
    }
}

#[post("/blocks/add")]
pub async fn add_admission_block(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AdmissionBlockForm>,
) -> impl Responder {
    finish_mutation(
        blocks_service::add_admission_block(repo.get_ref(), &user, form),
        "/blocks",
        "Đã thêm khối xét tuyển.",
        "Lỗi khi thêm khối xét tuyển",
    )
}

#[post("/blocks/save/{block_id}")]
pub async fn save_admission_block(
    block_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AdmissionBlockForm>,
) -> impl Responder {
    finish_mutation(
        blocks_service::save_admission_block(repo.get_ref(), &user, block_id.into_inner(), form),
        "/blocks",
        "Đã cập nhật khối xét tuyển.",
        "Lỗi khi cập nhật khối xét tuyển",
    )
}

#[post("/blocks/delete/{block_id}")]
pub async fn delete_admission_block(
    block_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        blocks_service::delete_admission_block(repo.get_ref(), &user, block_id.into_inner()),
        "/blocks",
        "Đã xóa khối xét tuyển.",
        "Lỗi khi xóa khối xét tuyển",
    )
}
