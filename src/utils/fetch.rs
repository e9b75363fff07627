//! Network fetching with timeout support.
//!
//! Gateway requests race the Fetch API against a timer, so a request that
//! outlives its interest lifetime resolves as a timeout even if the HTTP
//! connection is still open.

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::DATA_NAME_HEADER;
use crate::core::error::FetchError;

/// Await `promise`, failing with [`FetchError::Timeout`] once `lifetime_ms`
/// has passed.
///
/// The deadline timer settles with `undefined`; a gateway fetch always
/// settles with a `Response` object, so the two cannot be confused.
async fn within_lifetime(promise: Promise, lifetime_ms: i32) -> Result<JsValue, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let deadline = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, lifetime_ms);
    });

    let contenders = Array::of2(&promise, &deadline);
    match JsFuture::from(Promise::race(&contenders)).await {
        Ok(value) if value.is_undefined() => Err(FetchError::Timeout),
        Ok(value) => Ok(value),
        Err(err) => Err(FetchError::NetworkError(
            err.as_string().unwrap_or_else(|| "fetch rejected".to_string()),
        )),
    }
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// Body and metadata of a successful gateway response.
#[derive(Debug, Clone)]
pub struct FetchedData {
    pub bytes: Vec<u8>,
    /// Value of the data-name header, if the gateway sent one
    pub data_name: Option<String>,
}

/// Fetch raw bytes from `url`, giving up after `timeout_ms`.
///
/// Only the wait for response headers is bounded; the body read that follows
/// is not.
pub async fn fetch_bytes(url: &str, timeout_ms: i32) -> Result<FetchedData, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    let fetch_promise = window.fetch_with_request(&request);

    let resp: Response = within_lifetime(fetch_promise, timeout_ms)
        .await?
        .dyn_into()
        .map_err(|_| FetchError::ResponseReadFailed)?;

    if !resp.ok() {
        return Err(FetchError::HttpError(resp.status()));
    }

    let data_name = resp.headers().get(DATA_NAME_HEADER).ok().flatten();
    let buffer = JsFuture::from(
        resp.array_buffer()
            .map_err(|_| FetchError::ResponseReadFailed)?,
    )
    .await
    .map_err(|_| FetchError::ResponseReadFailed)?;

    Ok(FetchedData {
        bytes: Uint8Array::new(&buffer).to_vec(),
        data_name,
    })
}
