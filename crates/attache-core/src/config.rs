//! Widget configuration: server base URL and the registry size limit.

use serde::{Deserialize, Serialize};

/// Configuration the embedding application supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    /// Base URL of the upload backend, without a trailing slash.
    pub server_base: String,
    /// Maximum number of entries the registry may hold.
    pub max_images: usize,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            server_base: "/api".into(),
            max_images: 5,
        }
    }
}

impl UploaderConfig {
    /// The multipart upload endpoint.
    #[must_use]
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.server_base.trim_end_matches('/'))
    }

    /// The delete endpoint for one uploaded file.
    #[must_use]
    pub fn delete_url(&self, filename: &str) -> String {
        format!(
            "{}/uploads/{filename}",
            self.server_base.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_rooted_at_the_server_base() {
        let config = UploaderConfig {
            server_base: "https://example.test/api/".into(),
            max_images: 5,
        };
        assert_eq!(config.upload_url(), "https://example.test/api/upload");
        assert_eq!(
            config.delete_url("a.png"),
            "https://example.test/api/uploads/a.png"
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: UploaderConfig =
            serde_json::from_str(r#"{ "max_images": 8 }"#).unwrap_or_default();
        assert_eq!(config.max_images, 8);
        assert_eq!(config.server_base, "/api");
    }
}
