//! Business workflows behind the HTTP surface.
//!
//! Every function takes the database handle (and the AI client where needed)
//! explicitly. Multi-step writes run in one transaction.

pub mod ai_model_service;
pub mod archive_service;
pub mod assessment_service;
pub mod assessor_service;
pub mod assignment_service;
pub mod auth_service;
pub mod bootstrap;
pub mod course_service;
pub mod courseware_service;
pub mod error;
pub mod evaluation;
pub mod file_service;
pub mod grade_range_service;
pub mod grade_service;
pub mod student_answer_service;
pub mod sweep;
pub mod text_extract;
pub mod user_service;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ServiceError, ServiceResult};
