use serde::Deserialize;
use validator::Validate;

use crate::domain::criterion::NewCriterion;
use crate::domain::types::{CatalogCode, DisplayName};
use crate::forms::{FormError, optional_text};

/// Body of the add and edit criterion forms.
#[derive(Debug, Deserialize, Validate)]
pub struct CriterionForm {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<CriterionForm> for NewCriterion {
    type Error = FormError;

    fn try_from(form: CriterionForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCriterion::new(
            CatalogCode::new(form.code).map_err(|_| FormError::InvalidCode)?,
            DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            optional_text(form.description),
        ))
    }
}
