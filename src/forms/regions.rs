use serde::Deserialize;
use validator::Validate;

use crate::domain::region::NewRegion;
use crate::domain::types::{BonusPoints, CatalogCode, DisplayName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct RegionForm {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub bonus_points: f64,
}

impl TryFrom<RegionForm> for NewRegion {
    type Error = FormError;

    fn try_from(form: RegionForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            code: CatalogCode::new(form.code).map_err(|_| FormError::InvalidCode)?,
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            bonus_points: BonusPoints::new(form.bonus_points)
                .map_err(|e| FormError::InvalidValue(e.to_string()))?,
        })
    }
}
