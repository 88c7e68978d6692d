use serde::Deserialize;

use crate::domain::admission_year::NewAdmissionYear;
use crate::domain::types::YearNumber;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct AdmissionYearForm {
    pub year: i32,
}

impl TryFrom<AdmissionYearForm> for NewAdmissionYear {
    type Error = FormError;

    fn try_from(form: AdmissionYearForm) -> Result<Self, Self::Error> {
        Ok(Self {
            year: YearNumber::new(form.year).map_err(|e| FormError::InvalidValue(e.to_string()))?,
        })
    }
}
