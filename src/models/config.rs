//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Directory receiving uploaded applicant photos.
    pub upload_dir: String,
    /// HMAC secret shared with the auth service; also signs session cookies.
    pub secret: String,
    pub auth_service_url: String,
    /// Where unauthenticated visitors are sent.
    pub signin_url: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}
