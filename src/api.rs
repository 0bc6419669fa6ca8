//! Browser-side calls to the ask and status endpoints.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::types::{AskRequest, AskResponse, ConnectivityStatus};

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// POST the question and decode the reply payload.
pub async fn post_ask(url: &str, question: &str) -> Result<AskResponse, FetchError> {
    let body = serde_json::to_string(&AskRequest {
        question: question.to_string(),
    })
    .map_err(|e| FetchError::Decode(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Network(js_debug(&e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| FetchError::Network(js_debug(&e)))?;

    fetch_json(request).await
}

/// One status poll.
pub async fn fetch_status(url: &str) -> Result<ConnectivityStatus, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Network(js_debug(&e)))?;
    fetch_json(request).await
}

/// HEAD a document URL to check it resolves before embedding it.
pub async fn probe_document(url: &str) -> Result<(), FetchError> {
    let opts = RequestInit::new();
    opts.set_method("HEAD");
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Network(js_debug(&e)))?;
    fetch_response(request).await.map(|_| ())
}

async fn fetch_response(request: Request) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Network(js_debug(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| FetchError::Network(js_debug(&e)))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    Ok(resp)
}

async fn fetch_json<T: DeserializeOwned>(request: Request) -> Result<T, FetchError> {
    let resp = fetch_response(request).await?;
    let json_promise = resp.json().map_err(|e| FetchError::Decode(js_debug(&e)))?;
    let json = JsFuture::from(json_promise)
        .await
        .map_err(|e| FetchError::Decode(js_debug(&e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| FetchError::Decode(e.to_string()))
}

fn js_debug(value: &JsValue) -> String {
    format!("{:?}", value)
}
