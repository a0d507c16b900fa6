//! Wire types for the upload backend.
//!
//! The upload endpoint answers `{ "message": ..., "files": [...] }`; the
//! delete endpoint answers `{ "message": ... }`. Error payloads reuse the
//! message envelope, so [`server_message`] also extracts the error text a
//! failed request carries, when it carries one.

use serde::{Deserialize, Serialize};

use crate::entry::ImageEntry;

/// Errors interpreting a backend response.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The body was not a well-formed upload response.
    #[error("malformed upload response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// One confirmed file in an upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
    pub filename: String,
}

impl UploadedFile {
    /// The confirmed registry entry for this file.
    #[must_use]
    pub fn into_entry(self) -> ImageEntry {
        ImageEntry::confirmed(self.url, self.filename)
    }
}

/// Successful upload response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<UploadedFile>,
}

impl UploadResponse {
    /// Parse an upload response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedResponse`] when the body is not
    /// a well-formed upload response.
    pub fn parse(body: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Split into the user-facing message and the confirmed entries,
    /// preserving server order.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<ImageEntry>) {
        let entries = self
            .files
            .into_iter()
            .map(UploadedFile::into_entry)
            .collect();
        (self.message, entries)
    }
}

/// The bare message envelope used by delete responses and error payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageEnvelope {
    message: String,
}

/// Extract the `message` field from a response body, if present.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<MessageEnvelope>(body)
        .ok()
        .map(|envelope| envelope.message)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_preserves_server_order() {
        let body = r#"{
            "message": "2 images uploaded",
            "files": [
                { "url": "/a.png", "filename": "a.png" },
                { "url": "/b.png", "filename": "b.png" }
            ]
        }"#;
        let response = UploadResponse::parse(body).expect("well-formed body");
        let (message, entries) = response.into_parts();

        assert_eq!(message, "2 images uploaded");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].filename(), Some("a.png"));
        assert_eq!(entries[0].display_url(), "/a.png");
        assert_eq!(entries[1].filename(), Some("b.png"));
    }

    #[test]
    fn malformed_upload_response_is_an_error() {
        assert!(UploadResponse::parse("not json").is_err());
        assert!(UploadResponse::parse(r#"{"message":"no files field"}"#).is_err());
    }

    #[test]
    fn server_message_extracts_the_envelope() {
        assert_eq!(
            server_message(r#"{"message":"not found"}"#),
            Some("not found".into())
        );
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(""), None);
    }
}
