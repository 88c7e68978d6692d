use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::major::NewMajor;
use crate::domain::types::{CatalogCode, DisplayName};
use crate::forms::{FormError, optional_text};

/// Body of the add and edit major forms.
#[derive(Debug, Deserialize, Validate)]
pub struct MajorForm {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<MajorForm> for NewMajor {
    type Error = FormError;

    fn try_from(form: MajorForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewMajor::new(
            CatalogCode::new(form.code).map_err(|_| FormError::InvalidCode)?,
            DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            optional_text(form.description),
        ))
    }
}

/// CSV file with `code,name,description` columns.
#[derive(MultipartForm)]
pub struct UploadMajorsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct MajorRecord {
    code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl UploadMajorsForm {
    /// Reads every row of the uploaded file, failing on the first invalid one.
    pub fn parse(&mut self) -> Result<Vec<NewMajor>, FormError> {
        let mut content = String::new();
        self.csv
            .file
            .read_to_string(&mut content)
            .map_err(|e| FormError::InvalidFile(e.to_string()))?;

        parse_majors_csv(&content)
    }
}

pub fn parse_majors_csv(content: &str) -> Result<Vec<NewMajor>, FormError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut majors = Vec::new();
    for (index, record) in reader.deserialize::<MajorRecord>().enumerate() {
        let line = index + 2;
        let record = record.map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
        let code = CatalogCode::new(record.code)
            .map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
        let name = DisplayName::new(record.name)
            .map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
        majors.push(NewMajor::new(code, name, optional_text(record.description)));
    }

    Ok(majors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_optional_description() {
        let csv = "code,name,description\n7480201,Công nghệ thông tin,\n7340101,Quản trị kinh doanh,Hệ chính quy\n";

        let majors = parse_majors_csv(csv).unwrap();

        assert_eq!(majors.len(), 2);
        assert_eq!(majors[0].description, None);
        assert_eq!(majors[1].description.as_deref(), Some("Hệ chính quy"));
    }

    #[test]
    fn reports_line_of_invalid_row() {
        let csv = "code,name,description\n7480201,Công nghệ thông tin,\n,Thiếu mã,\n";

        let err = parse_majors_csv(csv).unwrap_err();

        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn blank_description_in_form_is_dropped() {
        let form = MajorForm {
            code: "7480201".to_string(),
            name: "Công nghệ thông tin".to_string(),
            description: Some("  ".to_string()),
        };

        let major = NewMajor::try_from(form).unwrap();

        assert_eq!(major.description, None);
    }
}
