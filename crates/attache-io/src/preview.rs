//! Local preview creation via Blob object URLs.
//!
//! Turns dropped file bytes into a `blob:` URL the gallery can render
//! immediately, wrapped in a [`PreviewHandle`] whose release hook revokes
//! the URL once the last holder lets go. Entry removal, wholesale registry
//! replacement, and widget teardown all reclaim the resource through the
//! same path.

use attache_core::PreviewHandle;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors creating a preview resource.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// MIME type for a filename, by extension.
///
/// Browsers sniff image content anyway; the type mainly helps devtools
/// and servers that trust it.
#[must_use]
pub fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();
    if ext.eq_ignore_ascii_case("png") {
        "image/png"
    } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else if ext.eq_ignore_ascii_case("bmp") {
        "image/bmp"
    } else if ext.eq_ignore_ascii_case("webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

/// Create a Blob object URL for `bytes` and wrap it in a handle that
/// revokes the URL when dropped.
///
/// # Errors
///
/// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
pub fn create_preview(bytes: &[u8], name: &str) -> Result<PreviewHandle, PreviewError> {
    // 1. Create a Uint8Array from the file bytes.
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    // 2. Create a Blob with the file's MIME type.
    let opts = BlobPropertyBag::new();
    opts.set_type(mime_for(name));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    // 3. Generate an object URL and tie its lifetime to the handle.
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(PreviewHandle::with_release(url, |url| {
        // Best-effort: the URL may already be gone on teardown.
        let _ = web_sys::Url::revoke_object_url(url);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_matches_extension_case_insensitively() {
        assert_eq!(mime_for("a.PNG"), "image/png");
        assert_eq!(mime_for("b.jpeg"), "image/jpeg");
        assert_eq!(mime_for("c.jpg"), "image/jpeg");
        assert_eq!(mime_for("d.webp"), "image/webp");
        assert_eq!(mime_for("e.bmp"), "image/bmp");
        assert_eq!(mime_for("unknown"), "application/octet-stream");
    }
}
