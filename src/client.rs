//! Request Client
//!
//! Wraps outbound calls with the CSRF header and turns every failure into a
//! [`RequestError`]. The network itself sits behind [`HttpTransport`].

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::UiConfig;
use crate::cookies::{read_cookie, CookieSource};
use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a prepared request. Fails only when no response was received.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Same-origin paths only: `/x`, never `//host/x` or `https://...`
pub fn is_same_origin_path(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.contains('\\')
}

#[derive(Clone)]
pub struct RequestClient {
    transport: Rc<dyn HttpTransport>,
    cookies: Rc<dyn CookieSource>,
    config: Rc<UiConfig>,
}

impl RequestClient {
    pub fn new(transport: Rc<dyn HttpTransport>, cookies: Rc<dyn CookieSource>, config: Rc<UiConfig>) -> Self {
        Self { transport, cookies, config }
    }

    /// Send a request and decode the JSON body of a 2xx response.
    pub async fn send<R: DeserializeOwned>(
        &self,
        url: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<R, RequestError> {
        if !is_same_origin_path(url) {
            return Err(RequestError::InvalidUrl(url.to_string()));
        }
        let request = self.build_request(url, method, body)?;

        log::debug!("{} {}", method.as_str(), url);
        let response = self.transport.execute(request).await?;

        if response.is_success() {
            serde_json::from_str(&response.body).map_err(|e| RequestError::Decode(e.to_string()))
        } else {
            log::debug!("{} {} failed with HTTP {}", method.as_str(), url, response.status);
            Err(RequestError::Http {
                status: response.status,
                message: error_message(&response.body),
            })
        }
    }

    fn build_request(
        &self,
        url: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpRequest, RequestError> {
        let mut headers = vec![("X-Requested-With".to_string(), "XMLHttpRequest".to_string())];

        match read_cookie(&self.cookies.cookie_string(), &self.config.csrf_cookie) {
            Some(token) => headers.push((self.config.csrf_header.clone(), token)),
            None => log::warn!("no {} cookie, sending {} without CSRF token", self.config.csrf_cookie, url),
        }

        let body = match body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(serde_json::to_string(value).map_err(|e| RequestError::Decode(e.to_string()))?)
            }
            None => None,
        };

        Ok(HttpRequest { method, url: url.to_string(), headers, body })
    }
}

/// `error` or `message` from a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(field)?.as_str().map(str::to_owned))
}
