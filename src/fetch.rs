//! Fetch Transport
//!
//! [`HttpTransport`] over `window.fetch` with same-origin credentials.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use crate::client::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::RequestError;

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn js_err(context: &str, e: JsValue) -> RequestError {
    RequestError::Network(format!("{}: {:?}", context, e))
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(|e| js_err("build request", e))?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(|e| js_err("set header", e))?;
        }

        let window = web_sys::window().ok_or_else(|| RequestError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| js_err("fetch", e))?
            .dyn_into()
            .map_err(|e| js_err("fetch result", e))?;

        let text = JsFuture::from(response.text().map_err(|e| js_err("read body", e))?)
            .await
            .map_err(|e| js_err("read body", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
