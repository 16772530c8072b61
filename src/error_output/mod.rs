//! Structured error documents printed by the command-line tool.

mod error_mapping;

pub use error_mapping::ToStructuredError;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct StructuredError {
    pub gallery: String,
    pub logs: String,
    pub messages: Vec<ErrorMessage>,
}

impl StructuredError {
    pub fn new(gallery: &str, logs: &str, code: &str, message: String) -> Self {
        Self {
            gallery: gallery.to_string(),
            logs: logs.to_string(),
            messages: vec![ErrorMessage {
                message,
                tip: None,
                code: code.to_string(),
            }],
        }
    }

    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        if let Some(msg) = self.messages.first_mut() {
            msg.tip = Some(tip.to_string());
        }
        self
    }

    /// Append the error's source chain as extra messages under the same code.
    #[must_use]
    pub fn with_causes(mut self, err: &(dyn std::error::Error + 'static)) -> Self {
        let code = self
            .messages
            .first()
            .map(|m| m.code.clone())
            .unwrap_or_default();
        let mut source = err.source();
        while let Some(cause) = source {
            self.messages.push(ErrorMessage {
                message: cause.to_string(),
                tip: None,
                code: code.clone(),
            });
            source = cause.source();
        }
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            r#"{"gallery":"","logs":"","messages":[{"message":"serialization error","code":"INTERNAL_ERROR"}]}"#.to_string()
        })
    }
}

/// Convert a domain error into a structured JSON error string.
pub fn to_error_json<E>(gallery: &str, logs: &str, err: &E) -> String
where
    E: ToStructuredError + std::error::Error + 'static,
{
    let (code, tip) = err.error_code_and_tip();
    let mut se = StructuredError::new(gallery, logs, code, err.to_string()).with_causes(err);
    if let Some(tip) = tip {
        se = se.with_tip(tip);
    }
    se.to_json()
}

#[cfg(test)]
#[path = "structured_error_tests.rs"]
mod structured_error_tests;
