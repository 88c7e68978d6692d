use serde::Deserialize;
use validator::Validate;

use crate::domain::admission_block::NewAdmissionBlock;
use crate::domain::types::{CatalogCode, DisplayName};
use crate::forms::FormError;

/// Body of the add and edit admission block forms.
#[derive(Debug, Deserialize, Validate)]
pub struct AdmissionBlockForm {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub subjects: String,
}

impl TryFrom<AdmissionBlockForm> for NewAdmissionBlock {
    type Error = FormError;

    fn try_from(form: AdmissionBlockForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            code: CatalogCode::new(form.code).map_err(|_| FormError::InvalidCode)?,
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            subjects: DisplayName::new(form.subjects).map_err(|_| FormError::InvalidName)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalised() {
        let form = AdmissionBlockForm {
            code: " a00 ".to_string(),
            name: "Khối A00".to_string(),
            subjects: "Toán, Lý, Hóa".to_string(),
        };

        let block = NewAdmissionBlock::try_from(form).unwrap();

        assert_eq!(block.code.as_str(), "A00");
    }

    #[test]
    fn empty_name_is_rejected() {
        let form = AdmissionBlockForm {
            code: "A01".to_string(),
            name: String::new(),
            subjects: "Toán, Lý, Anh".to_string(),
        };

        assert!(matches!(
            NewAdmissionBlock::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
