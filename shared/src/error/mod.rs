//! Error payloads shared by the backend, the edge server and the client
//!
//! The backend always answers with a JSON body, including on failure:
//!
//! | Status | Body |
//! |--------|------|
//! | 422 | [`EntityErrorPayload`] (per-field validation messages) |
//! | other non-2xx | `{ "message": ..., ... }` |

use serde::{Deserialize, Serialize};

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of a 422 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityErrorPayload {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl EntityErrorPayload {
    /// Message for `field`, if the backend reported one
    pub fn field_message(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
