//! attache-core: Attachment registry and upload decision logic (sans-IO).
//!
//! Owns the ordered, size-bounded list of image entries and every decision
//! the upload widget makes: batch screening, the total-count limit, the
//! single-flight upload queue, progress clamping, removal planning, and
//! render-failure recovery.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory data
//! and returns structured outcomes. All browser and network interaction
//! lives in `attache-io`.

pub mod batch;
pub mod config;
pub mod entry;
pub mod flight;
pub mod message;
pub mod preview;
pub mod progress;
pub mod protocol;
pub mod registry;

pub use batch::{DropDecision, RejectReason, RejectedFile, decide_drop, has_allowed_extension};
pub use config::UploaderConfig;
pub use entry::{ImageEntry, ImageSource};
pub use flight::{Dispatch, SingleFlight};
pub use message::{MessageKey, Notice, NoticeText, Severity};
pub use preview::PreviewHandle;
pub use progress::ProgressTracker;
pub use protocol::{ProtocolError, UploadResponse, UploadedFile};
pub use registry::{Registry, Removal};
