//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::major::Major;

/// Response body of `GET /api/v1/majors`.
#[derive(Debug, Serialize)]
pub struct MajorsResponse {
    /// Number of majors matching the search.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub majors: Vec<Major>,
}
