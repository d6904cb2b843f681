//! Problem documents and validation failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RFC9457-compatible problem document surfaced on validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Parameters that failed validation, if applicable.
    pub invalid_params: Option<Vec<ProblemInvalidParam>>,
}

/// Invalid parameter pointer surfaced alongside a [`ProblemDetails`] payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemInvalidParam {
    /// JSON Pointer to the offending field.
    pub pointer: String,
    /// Human-readable description of the validation failure.
    pub message: String,
}

impl ProblemInvalidParam {
    /// Invalid parameter at `/{field}`.
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            pointer: format!("/{field}"),
            message: message.into(),
        }
    }
}

/// Request failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("request validation failed")]
pub struct ValidationError {
    /// Every failing parameter, in field order.
    pub params: Vec<ProblemInvalidParam>,
}

impl ValidationError {
    /// Whether `pointer` is among the failing parameters.
    #[must_use]
    pub fn has_pointer(&self, pointer: &str) -> bool {
        self.params.iter().any(|param| param.pointer == pointer)
    }

    /// Problem document for this failure.
    #[must_use]
    pub fn to_problem(&self) -> ProblemDetails {
        ProblemDetails {
            kind: "https://atelier.dev/problems/validation".to_string(),
            title: "validation failed".to_string(),
            status: 422,
            detail: None,
            invalid_params: Some(self.params.clone()),
        }
    }
}

/// Collects parameter failures while a DTO is checked field by field.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<ProblemInvalidParam>);

impl Violations {
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(ProblemInvalidParam::new(field, message));
    }

    pub(crate) fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { params: self.0 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_document_lists_params() {
        let err = ValidationError {
            params: vec![ProblemInvalidParam::new("title", "too long")],
        };
        let problem = err.to_problem();
        assert_eq!(problem.status, 422);
        let json = serde_json::to_value(&problem).ok();
        let pointer = json
            .as_ref()
            .and_then(|value| value.pointer("/invalid_params/0/pointer"))
            .and_then(|value| value.as_str());
        assert_eq!(pointer, Some("/title"));
        assert!(json.is_some_and(|value| value.get("detail").is_none()));
    }
}
