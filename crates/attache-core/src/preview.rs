//! Reference-counted local preview handles with scoped release.
//!
//! A [`PreviewHandle`] wraps the URL of a locally created preview resource
//! (in the browser, a Blob object URL) together with an optional release
//! hook. The hook runs exactly once, when the last clone of the handle is
//! dropped, so the resource is reclaimed on entry removal, on wholesale
//! registry replacement, and on widget teardown alike.

use std::fmt;
use std::rc::Rc;

/// Release hook invoked with the preview URL when the handle is dropped.
type ReleaseFn = Box<dyn Fn(&str)>;

struct Inner {
    url: String,
    release: Option<ReleaseFn>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(release) = &self.release {
            release(&self.url);
        }
    }
}

/// A local preview resource whose URL stays valid for the handle's lifetime.
///
/// Cloning is cheap (reference-counted); the release hook fires once, after
/// the last clone is gone. Handles without a hook are inert and exist so
/// tests and native callers can build entries without a browser.
pub struct PreviewHandle(Rc<Inner>);

impl PreviewHandle {
    /// Create a handle with no release hook.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(Rc::new(Inner {
            url: url.into(),
            release: None,
        }))
    }

    /// Create a handle whose `release` hook runs when the last clone drops.
    #[must_use]
    pub fn with_release(url: impl Into<String>, release: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(Inner {
            url: url.into(),
            release: Some(Box::new(release)),
        }))
    }

    /// The preview URL (e.g. a `blob:` object URL).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0.url
    }
}

impl Clone for PreviewHandle {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        // Handles are interchangeable when they name the same resource.
        self.0.url == other.0.url
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("url", &self.0.url)
            .field("has_release", &self.0.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn url_is_exposed() {
        let handle = PreviewHandle::new("blob:abc");
        assert_eq!(handle.url(), "blob:abc");
    }

    #[test]
    fn release_fires_once_when_last_clone_drops() {
        let count = Rc::new(Cell::new(0u32));
        let seen = Rc::new(Cell::new(false));

        let handle = {
            let count = Rc::clone(&count);
            let seen = Rc::clone(&seen);
            PreviewHandle::with_release("blob:xyz", move |url| {
                count.set(count.get() + 1);
                seen.set(url == "blob:xyz");
            })
        };
        let clone = handle.clone();

        drop(handle);
        assert_eq!(count.get(), 0, "release must wait for the last clone");

        drop(clone);
        assert_eq!(count.get(), 1, "release must fire exactly once");
        assert!(seen.get(), "release must receive the original URL");
    }

    #[test]
    fn handles_compare_by_url() {
        let a = PreviewHandle::new("blob:same");
        let b = PreviewHandle::with_release("blob:same", |_| {});
        let c = PreviewHandle::new("blob:other");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
