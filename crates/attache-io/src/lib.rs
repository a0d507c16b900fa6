//! attache-io: Browser I/O and Dioxus component library.
//!
//! Handles multipart uploads with progress events, Blob-URL preview
//! handles, localized message resolution, and provides the attachment
//! manager widget plus its drop zone, gallery, and snackbar components.

pub mod components;
pub mod i18n;
pub mod preview;
pub mod transfer;

pub use components::{
    AttachmentManager, DropZone, DroppedFile, FileBatch, Gallery, Snackbar,
};
pub use i18n::Messages;
pub use transfer::TransferError;
