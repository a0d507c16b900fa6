//! Image entries: the unit the registry stores and the gallery renders.

use crate::preview::PreviewHandle;

/// Where an entry's displayable image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A locally created preview, shown before the server confirms the file.
    Preview(PreviewHandle),
    /// A server URL, available once the entry is confirmed.
    Remote(String),
}

/// One image attached (or being attached) to the resource.
///
/// Every entry carries a preview handle, a server filename, or both --
/// never neither. The [`pending`](Self::pending) and
/// [`confirmed`](Self::confirmed) constructors are the only way to build
/// one, which is what enforces that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    source: ImageSource,
    filename: Option<String>,
    not_found: bool,
}

impl ImageEntry {
    /// An entry for a file accepted locally but not yet confirmed by the
    /// server. It has no filename; until one is assigned it is local-only
    /// and removable without a network call.
    #[must_use]
    pub const fn pending(preview: PreviewHandle) -> Self {
        Self {
            source: ImageSource::Preview(preview),
            filename: None,
            not_found: false,
        }
    }

    /// An entry confirmed by the server with a stable URL and filename.
    #[must_use]
    pub fn confirmed(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Remote(url.into()),
            filename: Some(filename.into()),
            not_found: false,
        }
    }

    /// The URL the gallery should render, preview or remote.
    #[must_use]
    pub fn display_url(&self) -> &str {
        match &self.source {
            ImageSource::Preview(handle) => handle.url(),
            ImageSource::Remote(url) => url,
        }
    }

    /// The server-side identifier, once assigned.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Whether the entry never received a server identifier. Local-only
    /// entries are removed without a network call.
    #[must_use]
    pub const fn is_local_only(&self) -> bool {
        self.filename.is_none()
    }

    /// Whether the remote resource failed to render.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.not_found
    }

    /// A copy of this entry with the not-found flag raised.
    #[must_use]
    pub(crate) fn into_not_found(self) -> Self {
        Self {
            not_found: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_entry_is_local_only() {
        let entry = ImageEntry::pending(PreviewHandle::new("blob:p"));
        assert!(entry.is_local_only());
        assert_eq!(entry.filename(), None);
        assert_eq!(entry.display_url(), "blob:p");
        assert!(!entry.is_not_found());
    }

    #[test]
    fn confirmed_entry_carries_identifier() {
        let entry = ImageEntry::confirmed("/uploads/a.png", "a.png");
        assert!(!entry.is_local_only());
        assert_eq!(entry.filename(), Some("a.png"));
        assert_eq!(entry.display_url(), "/uploads/a.png");
    }

    #[test]
    fn into_not_found_preserves_everything_else() {
        let entry = ImageEntry::confirmed("/uploads/a.png", "a.png").into_not_found();
        assert!(entry.is_not_found());
        assert_eq!(entry.filename(), Some("a.png"));
        assert_eq!(entry.display_url(), "/uploads/a.png");
    }
}
