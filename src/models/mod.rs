//! Diesel row models plus the server-side configuration and identity models.

pub mod admission_block;
pub mod admission_year;
pub mod applicant;
#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod criterion;
pub mod major;
pub mod quota;
pub mod region;
