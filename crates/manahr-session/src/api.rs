//! Backend response envelope and failure mapping
//!
//! Every backend endpoint answers `{success, message, data, pagination?}`.
//! Failures collapse to one human-readable message; HTTP 401 is kept apart
//! because it ends the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AuthTokens, User};

/// Message used when neither the body nor the transport explains a failure
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// HTTP status that expires the session
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Page information attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// The backend's response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful response, or the failure it describes
    ///
    /// Success does not require a payload: data-less endpoints such as
    /// `/auth/logout` yield `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApiFailure> {
        if self.success {
            return Ok(self.data);
        }

        let message = pick_message(Some(&self.message), self.error.as_deref());
        Err(match self.status_code {
            Some(STATUS_UNAUTHORIZED) => ApiFailure::Unauthorized { message },
            status => ApiFailure::Rejected { status, message },
        })
    }

    /// Outcome of a call whose payload is not needed
    pub fn into_ack(self) -> Result<(), ApiFailure> {
        self.into_result().map(|_| ())
    }
}

/// Error fields of a failed response body
///
/// Failed bodies are not always full envelopes, so every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Payload of `/auth/login` and `/auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: User,
    pub token: String,
    pub refresh_token: String,
}

impl LoginData {
    pub fn tokens(&self) -> AuthTokens {
        AuthTokens::new(self.token.clone(), self.refresh_token.clone())
    }
}

/// A failed backend call, reduced to what the UI shows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// HTTP 401: the session is no longer valid
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any other non-success status; `None` when the body carried none
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// No response reached us
    #[error("{message}")]
    Transport { message: String },
}

impl ApiFailure {
    /// Build a failure from a status code and raw response body
    ///
    /// The message is the body's `message`, else its `error`, else
    /// [`DEFAULT_ERROR_MESSAGE`]. Bodies that are not JSON objects fall back
    /// to the default.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
        let message = pick_message(body.message.as_deref(), body.error.as_deref());

        if status == STATUS_UNAUTHORIZED {
            ApiFailure::Unauthorized { message }
        } else {
            ApiFailure::Rejected {
                status: Some(status),
                message,
            }
        }
    }

    /// Failure where no response arrived
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        ApiFailure::Transport {
            message: pick_message(Some(&message), None),
        }
    }

    /// The one human-readable message for the UI
    pub fn message(&self) -> &str {
        match self {
            ApiFailure::Unauthorized { message }
            | ApiFailure::Rejected { message, .. }
            | ApiFailure::Transport { message } => message,
        }
    }

    /// Whether this failure ends the session
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, ApiFailure::Unauthorized { .. })
    }
}

fn pick_message(message: Option<&str>, error: Option<&str>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| error.filter(|e| !e.trim().is_empty()))
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string()
}
