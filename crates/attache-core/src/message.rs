//! User-facing notices and the localization keys they resolve through.
//!
//! The widget never formats user-visible copy itself. It emits either a
//! [`MessageKey`] (resolved by the app's localization collaborator) or a
//! server-supplied string shown verbatim, tagged with a [`Severity`].

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A localization key plus its arguments.
///
/// `name()` is the identifier in the FTL resource; `args()` are the
/// fluent arguments the message interpolates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKey {
    /// Prompt shown while a drag hovers over the drop zone.
    DropPrompt,
    /// Description line under the drop zone, parameterized by the maximum.
    DropDescription { max: usize },
    /// The total-count limit would be exceeded.
    LimitExceeded { max: usize },
    /// The request never reached the server.
    ConnectivityError,
    /// A previously attached image no longer renders.
    ImageNotFound,
    /// Label shown next to the progress indicator.
    UploadingLabel,
    /// A file was rejected for its type at the capability layer.
    UnsupportedType { name: String },
    /// More files were picked in one interaction than the soft ceiling.
    TooManyFiles { max: usize },
    /// A picked file could not be read.
    UnreadableFile { name: String },
    /// Accessible label on the per-entry remove button.
    RemoveImage,
    /// Text shown on the placeholder tile for a not-found entry.
    ImagePlaceholder,
}

impl MessageKey {
    /// The message identifier in the localization resource.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DropPrompt => "drop-prompt",
            Self::DropDescription { .. } => "drop-description",
            Self::LimitExceeded { .. } => "limit-exceeded",
            Self::ConnectivityError => "connectivity-error",
            Self::ImageNotFound => "image-not-found",
            Self::UploadingLabel => "uploading-label",
            Self::UnsupportedType { .. } => "unsupported-type",
            Self::TooManyFiles { .. } => "too-many-files",
            Self::UnreadableFile { .. } => "unreadable-file",
            Self::RemoveImage => "remove-image",
            Self::ImagePlaceholder => "image-placeholder",
        }
    }

    /// The arguments the message interpolates, as name/value pairs.
    #[must_use]
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::DropDescription { max }
            | Self::LimitExceeded { max }
            | Self::TooManyFiles { max } => {
                vec![("max", max.to_string())]
            }
            Self::UnsupportedType { name } | Self::UnreadableFile { name } => {
                vec![("name", name.clone())]
            }
            Self::DropPrompt
            | Self::ConnectivityError
            | Self::ImageNotFound
            | Self::UploadingLabel
            | Self::RemoveImage
            | Self::ImagePlaceholder => Vec::new(),
        }
    }
}

/// The text of a notice: a key to localize, or a server string verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum NoticeText {
    Key(MessageKey),
    Server(String),
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: NoticeText,
    pub severity: Severity,
}

impl Notice {
    /// A success notice carrying a server-supplied message.
    #[must_use]
    pub const fn server_success(message: String) -> Self {
        Self {
            text: NoticeText::Server(message),
            severity: Severity::Success,
        }
    }

    /// An error notice carrying a server-supplied message.
    #[must_use]
    pub const fn server_error(message: String) -> Self {
        Self {
            text: NoticeText::Server(message),
            severity: Severity::Error,
        }
    }

    /// An error notice resolved from a localization key.
    #[must_use]
    pub const fn error_key(key: MessageKey) -> Self {
        Self {
            text: NoticeText::Key(key),
            severity: Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_keys_expose_their_arguments() {
        let key = MessageKey::LimitExceeded { max: 5 };
        assert_eq!(key.name(), "limit-exceeded");
        assert_eq!(key.args(), vec![("max", "5".to_string())]);
    }

    #[test]
    fn plain_keys_have_no_arguments() {
        assert!(MessageKey::ConnectivityError.args().is_empty());
        assert!(MessageKey::DropPrompt.args().is_empty());
    }

    #[test]
    fn notice_helpers_set_severity() {
        assert_eq!(
            Notice::server_success("ok".into()).severity,
            Severity::Success
        );
        assert_eq!(
            Notice::error_key(MessageKey::ConnectivityError).severity,
            Severity::Error
        );
    }
}
