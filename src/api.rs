//! Persistence API Client
//!
//! Thin wrappers over the card REST endpoints, all JSON over fetch. Every
//! call returns `Result<T, String>`; there are no retries and no timeouts,
//! a hung request simply never resolves.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::models::{Card, CardPayload, CardSummary};

/// Used when the page has no usable origin (e.g. opened from disk).
const FALLBACK_API_BASE: &str = "http://localhost:8000";

fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .filter(|origin| !origin.is_empty() && origin != "null")
        .unwrap_or_else(|| FALLBACK_API_BASE.to_string())
}

/// Percent-encode a card id for use in a path or query string.
pub fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

fn card_path(id: &str) -> String {
    format!("/cards/{}", encode_id(id))
}

async fn request_text(method: &str, path: &str, body: Option<String>) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let url = format!("{}{}", api_base(), path);

    let opts = RequestInit::new();
    opts.set_method(method);
    let has_body = body.is_some();
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("request build failed: {e:?}"))?;
    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("set header failed: {e:?}"))?;
    }

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {e:?}"))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {e:?}"))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}

/// `GET /cards`
pub async fn list_cards() -> Result<Vec<CardSummary>, String> {
    let body = request_text("GET", "/cards", None).await?;
    serde_json::from_str(&body).map_err(|e| e.to_string())
}

/// `POST /cards`
pub async fn create_card(payload: &CardPayload) -> Result<Card, String> {
    let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    let response = request_text("POST", "/cards", Some(body)).await?;
    serde_json::from_str(&response).map_err(|e| e.to_string())
}

/// `GET /cards/:id`
pub async fn fetch_card(id: &str) -> Result<Card, String> {
    let body = request_text("GET", &card_path(id), None).await?;
    serde_json::from_str(&body).map_err(|e| e.to_string())
}

/// `GET /cards/:id`, returning the server's response body verbatim. Used by
/// the JSON download so the file reflects the stored record, not the
/// in-memory working copy.
pub async fn fetch_card_raw(id: &str) -> Result<String, String> {
    request_text("GET", &card_path(id), None).await
}

/// `PUT /cards/:id` with the full prediction array.
pub async fn update_card(id: &str, payload: &CardPayload) -> Result<Card, String> {
    let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    let response = request_text("PUT", &card_path(id), Some(body)).await?;
    serde_json::from_str(&response).map_err(|e| e.to_string())
}
