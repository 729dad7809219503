use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::inquiry::StoredInquiry;
use crate::repository::{InquiryRepository, RepositoryError};
use crate::validation::{validate_inquiry, ValidationErrors, NON_FIELD_ERRORS};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Validate-then-persist entry point for travel inquiries.
#[derive(Clone)]
pub struct InquiryService {
    repo: Arc<dyn InquiryRepository>,
}

impl InquiryService {
    pub fn new(repo: Arc<dyn InquiryRepository>) -> Self {
        Self { repo }
    }

    /// Validates `payload` and stores it as a new inquiry.
    ///
    /// Nothing is written unless every rule passes. A storage failure is
    /// returned as is; the insert is not retried.
    pub async fn submit(&self, payload: &Value) -> Result<StoredInquiry, SubmitError> {
        let Value::Object(fields) = payload else {
            let mut errors = ValidationErrors::new();
            errors.add(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(payload)
                ),
            );
            return Err(errors.into());
        };

        let inquiry = validate_inquiry(fields).map_err(|errors| {
            let fields: Vec<&str> = errors.fields().collect();
            debug!(?fields, "Inquiry rejected");
            errors
        })?;

        let stored = self.repo.insert(&inquiry).await.map_err(|e| {
            error!("Failed to store inquiry: {}", e);
            e
        })?;

        info!(inquiry_id = stored.id, "Inquiry stored: {}", stored.inquiry);
        Ok(stored)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
