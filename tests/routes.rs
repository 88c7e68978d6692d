use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use admission_portal::routes::{alert_level_to_str, finish_mutation};
use admission_portal::services::ServiceError;

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn conflict_flashes_and_returns_to_list() {
    let store = CookieMessageStore::builder(Key::from(&[7u8; 64])).build();
    let flash = FlashMessagesFramework::builder(store).build();
    let app = test::init_service(App::new().wrap(flash).route(
        "/majors/delete/1",
        web::post().to(|| async {
            finish_mutation::<()>(
                Err(ServiceError::Conflict(
                    "record is still referenced: FOREIGN KEY constraint failed".to_string(),
                )),
                "/majors",
                "Đã xóa ngành.",
                "Lỗi khi xóa ngành",
            )
        }),
    ))
    .await;

    let req = test::TestRequest::post().uri("/majors/delete/1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/majors");
    assert!(resp.headers().contains_key(header::SET_COOKIE));
}
