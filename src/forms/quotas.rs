use serde::Deserialize;

use crate::domain::quota::NewQuota;
use crate::domain::types::{AdmissionBlockId, AdmissionYearId, MajorId, QuotaAmount};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct QuotaForm {
    pub major_id: i32,
    pub admission_block_id: i32,
    pub admission_year_id: i32,
    pub amount: i32,
}

impl TryFrom<QuotaForm> for NewQuota {
    type Error = FormError;

    fn try_from(form: QuotaForm) -> Result<Self, Self::Error> {
        Ok(Self {
            major_id: MajorId::new(form.major_id).map_err(|_| FormError::InvalidId)?,
            admission_block_id: AdmissionBlockId::new(form.admission_block_id)
                .map_err(|_| FormError::InvalidId)?,
            admission_year_id: AdmissionYearId::new(form.admission_year_id)
                .map_err(|_| FormError::InvalidId)?,
            amount: QuotaAmount::new(form.amount)
                .map_err(|e| FormError::InvalidValue(e.to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amount_is_rejected() {
        let form = QuotaForm {
            major_id: 1,
            admission_block_id: 1,
            admission_year_id: 1,
            amount: -5,
        };

        assert!(matches!(
            NewQuota::try_from(form),
            Err(FormError::InvalidValue(_))
        ));
    }

    #[test]
    fn zero_major_id_is_rejected() {
        let form = QuotaForm {
            major_id: 0,
            admission_block_id: 1,
            admission_year_id: 1,
            amount: 50,
        };

        assert!(matches!(NewQuota::try_from(form), Err(FormError::InvalidId)));
    }
}
