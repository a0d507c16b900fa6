//! Dioxus UI components for attache.
//!
//! Provides the attachment manager widget plus its parts: the drag-and-drop
//! zone with file picker, the entry gallery with progress overlay, and the
//! snackbar that displays transient notices.

mod drop_zone;
mod gallery;
mod manager;
mod snackbar;

pub use drop_zone::DropZone;
pub use drop_zone::DroppedFile;
pub use drop_zone::FileBatch;
pub use gallery::Gallery;
pub use manager::AttachmentManager;
pub use snackbar::Snackbar;
