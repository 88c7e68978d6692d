#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::admission_blocks::{
    add_admission_block, admission_block_modal, delete_admission_block, save_admission_block,
    show_admission_blocks,
};
#[cfg(feature = "server")]
use crate::routes::admission_years::{
    activate_admission_year, add_admission_year, delete_admission_year, show_admission_years,
};
#[cfg(feature = "server")]
use crate::routes::api::api_v1_majors;
#[cfg(feature = "server")]
use crate::routes::applicants::{applicant_modal, show_applicants};
#[cfg(feature = "server")]
use crate::routes::criteria::{
    add_criterion, criterion_modal, delete_criterion, save_criterion, show_criteria,
};
#[cfg(feature = "server")]
use crate::routes::majors::{
    add_major, delete_major, export_majors, major_modal, save_major, show_majors, upload_majors,
};
#[cfg(feature = "server")]
use crate::routes::profile::{
    add_learning_record, delete_learning_record, save_profile, save_transcript, show_photo,
    show_profile, upload_photo,
};
#[cfg(feature = "server")]
use crate::routes::quotas::{
    add_quota, delete_quota, export_quotas, quota_modal, save_quota, show_quotas,
};
#[cfg(feature = "server")]
use crate::routes::regions::{add_region, delete_region, region_modal, save_region, show_regions};
#[cfg(feature = "server")]
use crate::routes::{index, logout, not_assigned};

pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Staff role granting read access to every screen.
pub const SERVICE_ACCESS_ROLE: &str = "admission";
/// Staff role allowed to change the admission catalog.
pub const SERVICE_ADMIN_ROLE: &str = "admission_admin";
pub const APPLICANT_ROLE: &str = "applicant";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    std::fs::create_dir_all(&server_config.upload_dir)?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting admission portal on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_majors))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized::new(&server_config.signin_url))
                    .service(index)
                    .service(show_admission_blocks)
                    .service(admission_block_modal)
                    .service(add_admission_block)
                    .service(save_admission_block)
                    .service(delete_admission_block)
                    .service(show_majors)
                    .service(export_majors)
                    .service(upload_majors)
                    .service(major_modal)
                    .service(add_major)
                    .service(save_major)
                    .service(delete_major)
                    .service(show_regions)
                    .service(region_modal)
                    .service(add_region)
                    .service(save_region)
                    .service(delete_region)
                    .service(show_admission_years)
                    .service(add_admission_year)
                    .service(activate_admission_year)
                    .service(delete_admission_year)
                    .service(show_criteria)
                    .service(criterion_modal)
                    .service(add_criterion)
                    .service(save_criterion)
                    .service(delete_criterion)
                    .service(show_quotas)
                    .service(export_quotas)
                    .service(quota_modal)
                    .service(add_quota)
                    .service(save_quota)
                    .service(delete_quota)
                    .service(show_applicants)
                    .service(applicant_modal)
                    .service(show_profile)
                    .service(save_profile)
                    .service(add_learning_record)
                    .service(delete_learning_record)
                    .service(save_transcript)
                    .service(upload_photo)
                    .service(show_photo)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
