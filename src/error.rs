//! Error Types
//!
//! Every outbound call reports failure through [`RequestError`]. Call sites
//! do not branch on the variant; they show [`RequestError::user_message`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("refusing to send request to non same-origin url: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Http { status: u16, message: Option<String> },

    #[error("request rejected: {}", .0.as_deref().unwrap_or("no error message"))]
    Rejected(Option<String>),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Server-provided text when there is one, otherwise `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            RequestError::Http { message: Some(message), .. }
            | RequestError::Rejected(Some(message)) => message,
            _ => fallback,
        }
    }
}
