//! Project inquiry schema and validation.
//!
//! The same validation runs in the contact client, for immediate feedback,
//! and in the relay endpoint, where it is the trust boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::Error;
use crate::service::ServiceCategory;

/// Form fields in display order. Field errors are reported in this order.
pub const FIELD_ORDER: [&str; 5] = ["name", "phone", "email", "service", "description"];

/// Raw inquiry as entered in the contact form.
///
/// Absent fields deserialize as empty strings so that they are reported
/// as field errors instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InquiryForm {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub phone: String,

    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_service"))]
    pub service: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Please provide more details about your project"))]
    pub description: String,

    /// Hidden field. Humans never see it, so it stays empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
}

/// Validates the service selection against the offered categories.
fn validate_service(value: &str) -> Result<(), ValidationError> {
    if value.parse::<ServiceCategory>().is_ok() {
        return Ok(());
    }

    let code = if value.is_empty() {
        "required"
    } else {
        "unknown_service"
    };
    let mut err = ValidationError::new(code);
    err.message = Some("Please select a service".into());
    Err(err)
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Every violated constraint of one inquiry, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns true if `field` has at least one error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Names of the failing fields, without duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for e in &self.0 {
            if !fields.contains(&e.field.as_str()) {
                fields.push(&e.field);
            }
        }
        fields
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let by_field = errors.field_errors();
        let mut out = Vec::new();

        for field in FIELD_ORDER {
            let Some(field_errors) = by_field.get(field) else {
                continue;
            };
            for e in field_errors.iter() {
                out.push(FieldError {
                    field: field.to_string(),
                    code: e.code.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                });
            }
        }

        Self(out)
    }
}

/// A validated project inquiry.
///
/// Only produced by [`validate_inquiry`]; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquirySubmission {
    name: String,
    phone: String,
    email: String,
    service: ServiceCategory,
    description: String,
    honeypot: Option<String>,
}

impl InquirySubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn service(&self) -> ServiceCategory {
        self.service
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True if the hidden field carries anything besides whitespace.
    pub fn is_spam(&self) -> bool {
        self.honeypot
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty())
    }
}

/// Validates a raw inquiry.
///
/// All fields are checked independently and every violation is reported.
/// Lengths are counted in characters on the input as given; whitespace is
/// not trimmed.
pub fn validate_inquiry(form: InquiryForm) -> Result<InquirySubmission, FieldErrors> {
    if let Err(errors) = form.validate() {
        return Err(FieldErrors::from(&errors));
    }

    let service = form.service.parse::<ServiceCategory>().map_err(|_| {
        FieldErrors::new(vec![FieldError {
            field: "service".to_string(),
            code: "unknown_service".to_string(),
            message: "Please select a service".to_string(),
        }])
    })?;

    Ok(InquirySubmission {
        name: form.name,
        phone: form.phone,
        email: form.email,
        service,
        description: form.description,
        honeypot: form.honeypot,
    })
}

/// Reads and validates an inquiry from a JSON request body.
///
/// A body that is not a JSON object is a [`Error::MalformedBody`]. A field
/// holding a non-string value is reported as `invalid_type` alongside the
/// usual checks of every other field. Missing or null fields count as
/// empty.
pub fn validate_inquiry_json(body: &[u8]) -> crate::Result<InquirySubmission> {
    let value: Value = serde_json::from_slice(body)?;
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::malformed_body(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            )))
        }
    };

    let mut type_errors = Vec::new();
    let mut take = |field: &'static str| -> Option<String> {
        match object.remove(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                type_errors.push(FieldError {
                    field: field.to_string(),
                    code: "invalid_type".to_string(),
                    message: format!("Expected string, received {}", json_type(&other)),
                });
                None
            }
        }
    };

    let form = InquiryForm {
        name: take("name").unwrap_or_default(),
        phone: take("phone").unwrap_or_default(),
        email: take("email").unwrap_or_default(),
        service: take("service").unwrap_or_default(),
        description: take("description").unwrap_or_default(),
        honeypot: take("honeypot"),
    };

    let errors = match validate_inquiry(form) {
        Ok(submission) if type_errors.is_empty() => return Ok(submission),
        Ok(_) => Vec::new(),
        Err(errors) => errors.into_inner(),
    };

    // A mistyped field reports its type error only.
    let mut merged: Vec<FieldError> = errors
        .into_iter()
        .filter(|e| !type_errors.iter().any(|t| t.field == e.field))
        .collect();
    merged.extend(type_errors);
    merged.sort_by_key(|e| {
        FIELD_ORDER
            .iter()
            .position(|f| *f == e.field)
            .unwrap_or(FIELD_ORDER.len())
    });

    Err(Error::Validation(FieldErrors::new(merged)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
