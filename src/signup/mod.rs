//! Serverless-function envelope for mailing-list signups.
//!
//! The landing page posts `{email, source}` to a function endpoint. This
//! module models that request/response pair and maps signup outcomes to
//! HTTP status codes and JSON bodies, including the CORS preflight.
//!
//! The MCP binary does not route through [`handle`]; its `subscribe` tool
//! calls the signup service directly. [`handle`] is the library entry point
//! for hosting the signup as a standalone function, where the host adapter
//! converts its event into a [`FunctionRequest`] and returns the
//! [`FunctionResponse`].

mod handler;

pub use handler::handle;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SUCCESS_MESSAGE: &str = "Subscribed successfully";
pub const FAILURE_MESSAGE: &str = "Subscription failed";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// An incoming function invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl FunctionRequest {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }

    /// A `POST` carrying `body`.
    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }
}

/// The function's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl FunctionResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// JSON payload posted by the signup form.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub source: String,
}

/// JSON payload returned to the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignupResponse {
    Success { success: bool, message: String },
    Failure { error: String },
}

impl SignupResponse {
    pub fn success() -> Self {
        Self::Success {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }
}
