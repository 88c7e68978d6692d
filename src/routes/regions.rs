use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::regions::RegionForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, finish_mutation, list_error, modal_error, render_template};
use crate::services::regions as regions_service;

#[get("/regions")]
pub async fn show_regions(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match regions_service::list_regions(
        repo.get_ref(),
        &user,
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "regions", &server_config.auth_service_url);
            context.insert("data", &data);
            render_template(&tera, "regions/index.html", &context)
        }
        Err(err) => list_error(err, "regions"),
    }
}

#[post("/regions/modal/{region_id}")]
pub async fn region_modal(
    region_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match regions_service::load_region_modal(repo.get_ref(), &user, region_id.into_inner()) {
        Ok(region) => {
            let mut context = Context::new();
            context.insert("region", &region);
            render_template(&tera, "regions/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "region"),
    }
}

#[post("/regions/add")]
pub async fn add_region(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegionForm>,
) -> impl Responder {
    finish_mutation(
        regions_service::add_region(repo.get_ref(), &user, form),
        "/regions",
        "Đã thêm khu vực ưu tiên.",
        "Lỗi khi thêm khu vực ưu tiên",
    )
}

#[post("/regions/save/{region_id}")]
pub async fn save_region(
    region_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegionForm>,
) -> impl Responder {
    finish_mutation(
        regions_service::save_region(repo.get_ref(), &user, region_id.into_inner(), form),
        "/regions",
        "Đã cập nhật khu vực ưu tiên.",
        "Lỗi khi cập nhật khu vực ưu tiên",
    )
}

#[post("/regions/delete/{region_id}")]
pub async fn delete_region(
    region_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    finish_mutation(
        regions_service::delete_region(repo.get_ref(), &user, region_id.into_inner()),
        "/regions",
        "Đã xóa khu vực ưu tiên.",
        "Lỗi khi xóa khu vực ưu tiên",
    )
}
