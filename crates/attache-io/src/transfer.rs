//! Multipart upload and delete requests over `XMLHttpRequest`.
//!
//! `XMLHttpRequest` is used instead of `fetch` because it is the only
//! browser API that reports upload progress events. Requests are bridged
//! to futures through a JS promise resolved from the `onload`/`onerror`
//! handlers; completions arrive on the event loop like every other
//! callback.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::BlobPropertyBag;

use crate::components::DroppedFile;
use crate::preview::mime_for;

/// Errors from a transfer attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    Js(String),

    /// The request never produced a response (network failure).
    #[error("network request failed")]
    Network,

    /// The server answered with a non-success status.
    #[error("server returned status {code}")]
    Status {
        code: u16,
        /// Raw response body; may carry a `{ "message": ... }` payload.
        body: String,
    },
}

impl From<JsValue> for TransferError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Upload a batch of files as one multipart request.
///
/// Every file is appended under the repeated `images` field.
/// `on_progress` receives the raw loaded/total byte counts from each
/// progress event on the upload stream.
///
/// # Errors
///
/// Returns [`TransferError::Js`] if a browser API call fails,
/// [`TransferError::Network`] if the request never completes, and
/// [`TransferError::Status`] for a non-2xx response.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn post_images(
    url: &str,
    files: &[DroppedFile],
    on_progress: impl FnMut(f64, f64) + 'static,
) -> Result<String, TransferError> {
    let form = web_sys::FormData::new()?;
    for file in files {
        let blob = bytes_to_blob(&file.bytes, mime_for(&file.name))?;
        form.append_with_blob_and_filename("images", &blob, &file.name)?;
    }

    let xhr = web_sys::XmlHttpRequest::new()?;
    xhr.open("POST", url)?;

    // Progress events fire on the upload stream, not the request itself.
    let mut on_progress = on_progress;
    let onprogress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
        move |event: web_sys::ProgressEvent| {
            if event.length_computable() {
                on_progress(event.loaded(), event.total());
            }
        },
    );
    xhr.upload()?
        .set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

    let outcome = send_and_wait(&xhr, Some(&form)).await;

    // Detach the handler before the closure guard drops.
    if let Ok(upload) = xhr.upload() {
        upload.set_onprogress(None);
    }
    drop(onprogress);

    outcome
}

/// Delete one uploaded file.
///
/// # Errors
///
/// Same taxonomy as [`post_images`].
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn delete_image(url: &str) -> Result<String, TransferError> {
    let xhr = web_sys::XmlHttpRequest::new()?;
    xhr.open("DELETE", url)?;
    send_and_wait(&xhr, None).await
}

/// Send a prepared request and wait for it to settle.
///
/// Resolves to the response body on 2xx, [`TransferError::Status`] with
/// the body otherwise, [`TransferError::Network`] when no response
/// arrives at all.
#[allow(clippy::future_not_send)]
async fn send_and_wait(
    xhr: &web_sys::XmlHttpRequest,
    form: Option<&web_sys::FormData>,
) -> Result<String, TransferError> {
    let (promise, resolve, reject) = new_promise();

    let onload = Closure::<dyn FnMut()>::new(move || {
        resolve.call0(&JsValue::NULL).ok();
    });
    let onerror = Closure::<dyn FnMut()>::new(move || {
        reject.call0(&JsValue::NULL).ok();
    });
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    match form {
        Some(form) => xhr.send_with_opt_form_data(Some(form))?,
        None => xhr.send()?,
    }

    // Await the promise -- this yields to the browser event loop. The
    // closure guards stay alive until the request settles.
    let settled = wasm_bindgen_futures::JsFuture::from(promise).await;

    xhr.set_onload(None);
    xhr.set_onerror(None);
    drop(onload);
    drop(onerror);

    if settled.is_err() {
        return Err(TransferError::Network);
    }

    let code = xhr.status()?;
    let body = xhr.response_text()?.unwrap_or_default();
    if (200..300).contains(&code) {
        Ok(body)
    } else {
        Err(TransferError::Status { code, body })
    }
}

/// Create a Blob from raw bytes with the given MIME type.
fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, TransferError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    Ok(web_sys::Blob::new_with_u8_array_sequence_and_options(
        &parts, &opts,
    )?)
}

/// Create a JS Promise along with its resolve and reject functions.
fn new_promise() -> (js_sys::Promise, js_sys::Function, js_sys::Function) {
    let resolve = Rc::new(RefCell::new(None::<js_sys::Function>));
    let reject = Rc::new(RefCell::new(None::<js_sys::Function>));
    let resolve_clone = Rc::clone(&resolve);
    let reject_clone = Rc::clone(&reject);

    let promise = js_sys::Promise::new(&mut move |res, rej| {
        *resolve_clone.borrow_mut() = Some(res);
        *reject_clone.borrow_mut() = Some(rej);
    });

    let resolve_fn = resolve
        .borrow_mut()
        .take()
        .expect_throw("resolve not captured");
    let reject_fn = reject
        .borrow_mut()
        .take()
        .expect_throw("reject not captured");

    (promise, resolve_fn, reject_fn)
}
