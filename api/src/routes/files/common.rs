use axum::extract::Multipart;
use services::file_service::Upload;

use crate::response::ApiError;

/// Fields of a file upload form. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct FileForm {
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub upload: Option<Upload>,
}

impl FileForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FileForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "course_id" => form.course_id = Some(text(field).await?),
                "title" => form.title = Some(text(field).await?),
                "file" => {
                    if form.upload.is_some() {
                        return Err(ApiError::bad_request("Only one file may be uploaded per request"));
                    }
                    let original_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Could not read file: {e}")))?;
                    form.upload = Some(Upload {
                        original_name,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => continue,
            }
        }

        Ok(form)
    }
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid form field: {e}")))
}
