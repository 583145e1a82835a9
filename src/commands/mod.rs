//! Server Action Wrappers
//!
//! Bindings to the shop's state-changing endpoints, organized by domain.

mod task;
mod repair;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::RequestError;
use crate::models::ActionResponse;

pub use task::*;
pub use repair::*;

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// `{prefix}/{segments...}/`
fn action_url(prefix: &str, segments: &[&str]) -> String {
    let mut url = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.extend(utf8_percent_encode(segment, SEGMENT));
    }
    url.push('/');
    url
}

/// `success: false` is a failure even on HTTP 200
fn into_result(response: ActionResponse) -> Result<ActionResponse, RequestError> {
    if response.success {
        Ok(response)
    } else {
        Err(RequestError::Rejected(response.failure_message().map(str::to_owned)))
    }
}
