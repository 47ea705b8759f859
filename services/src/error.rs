use ai::AiError;
use marker::MarkerError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Failure of a business operation, classified by how the caller should react.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or rule-breaking input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule would be broken.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Upstream(#[from] AiError),

    #[error("Scoring configuration error: {0}")]
    Scoring(#[from] MarkerError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<ValidationErrors> for ServiceError {
    /// Reports the first failing field, by field name, so messages are stable.
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let message = fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}."))
                })
            })
            .unwrap_or_else(|| "Invalid request.".to_string());

        ServiceError::BadRequest(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
        password: String,
        #[validate(contains(pattern = "@", message = "Email must contain '@'."))]
        email: String,
    }

    #[test]
    fn validation_errors_report_first_field_alphabetically() {
        let err: ServiceError = Sample {
            password: "short".into(),
            email: "nope".into(),
        }
        .validate()
        .unwrap_err()
        .into();
        assert_eq!(err.to_string(), "Email must contain '@'.");
    }

    #[test]
    fn database_errors_are_prefixed() {
        let err = ServiceError::from(DbErr::Custom("locked".into()));
        assert_eq!(err.to_string(), "Database error: Custom Error: locked");
    }
}
