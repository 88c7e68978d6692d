//! Domain aggregates exposed by the admission service layer.

pub mod admission_block;
pub mod admission_year;
pub mod applicant;
pub mod criterion;
pub mod major;
pub mod quota;
pub mod region;
pub mod types;
