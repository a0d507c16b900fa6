//! The attachment manager widget: drop zone, gallery, and the upload and
//! deletion controllers tying them to the backend.
//!
//! State lives in a sans-IO [`Registry`] behind a signal; every decision
//! (batch screening, limits, queuing, removal planning) is delegated to
//! `attache-core` so this component only sequences I/O and dispatches
//! callbacks.

use attache_core::{
    Dispatch, DropDecision, ImageEntry, MessageKey, Notice, ProgressTracker, Registry, Removal,
    SingleFlight, UploadResponse, UploaderConfig, decide_drop, protocol,
};
use dioxus::prelude::*;

use crate::components::{DropZone, DroppedFile, FileBatch, Gallery};
use crate::preview;
use crate::transfer::{self, TransferError};

/// Props for the [`AttachmentManager`] component.
#[derive(Props, Clone, PartialEq)]
pub struct AttachmentManagerProps {
    /// Server base URL and registry size limit.
    config: UploaderConfig,
    /// Previously confirmed entries to seed the registry with.
    #[props(default)]
    initial: Vec<ImageEntry>,
    /// Fired with the full entry list after every successful mutation --
    /// upload commit, deletion, local-only removal, not-found flag update.
    /// Never fired on failure.
    on_change: EventHandler<Vec<ImageEntry>>,
    /// Fired for every user-facing notice (the app hosts the snackbar).
    on_notice: EventHandler<Notice>,
}

/// Image attachment manager: gallery of current entries plus a
/// drag-and-drop upload zone.
///
/// Uploads are single-flight: a batch dropped while a transfer runs is
/// queued and dispatched when the slot frees, re-screened against the
/// registry the completed upload just replaced. Requires an
/// `Rc<Messages>` context for its child components.
#[component]
pub fn AttachmentManager(props: AttachmentManagerProps) -> Element {
    let config = props.config.clone();
    let limit = config.max_images;
    let on_change = props.on_change;
    let on_notice = props.on_notice;

    let initial = props.initial.clone();
    let mut registry = use_signal(move || Registry::seeded(limit, initial));
    let mut flight = use_signal(SingleFlight::<Vec<DroppedFile>>::new);
    let uploading = use_signal(|| false);
    let progress = use_signal(ProgressTracker::new);

    // --- Upload controller ---
    // Runs the started batch and then drains the queue, one transfer at
    // a time. Queued batches are re-screened at dispatch time because
    // the registry was just replaced wholesale.
    let upload_config = config.clone();
    let run_uploads = move |first: Vec<DroppedFile>| {
        let config = upload_config.clone();
        spawn(async move {
            let mut batch = Some(first);
            while let Some(files) = batch.take() {
                upload_batch(
                    &config, files, registry, uploading, progress, on_change, on_notice,
                )
                .await;
                batch = next_batch(limit, registry, flight, on_notice);
            }
        });
    };

    let handle_batch = move |batch: FileBatch| {
        // An interaction that produced no files (e.g. a stray drag) is
        // not a batch.
        if batch.accepted.is_empty() && batch.rejected.is_empty() {
            return;
        }
        let current = registry.peek().len();
        match decide_drop(batch.accepted.len(), &batch.rejected, current, limit) {
            DropDecision::Upload => match flight.write().submit(batch.accepted) {
                Dispatch::Start(files) => run_uploads(files),
                Dispatch::Queued => {}
            },
            DropDecision::Rejected(key) => on_notice.call(Notice::error_key(key)),
            DropDecision::LimitExceeded { max } => {
                on_notice.call(Notice::error_key(MessageKey::LimitExceeded { max }));
            }
        }
    };

    // --- Deletion controller ---
    let delete_config = config.clone();
    let handle_remove = move |index: usize| {
        let plan = registry.peek().removal_plan(index);
        match plan {
            None => tracing::warn!("remove request for out-of-range index {index}"),
            Some(Removal::Local) => {
                registry.write().remove(index);
                let snapshot = registry.peek().snapshot();
                on_change.call(snapshot);
            }
            Some(Removal::Network { filename }) => {
                let url = delete_config.delete_url(&filename);
                spawn(async move {
                    delete_entry(&url, filename, registry, on_change, on_notice).await;
                });
            }
        }
    };

    // --- Render-failure recovery ---
    let handle_render_error = move |index: usize| {
        if registry.write().mark_not_found(index) {
            let snapshot = registry.peek().snapshot();
            on_change.call(snapshot);
            on_notice.call(Notice::error_key(MessageKey::ImageNotFound));
        }
    };

    let entries = registry.read().snapshot();

    rsx! {
        div { class: "flex flex-col gap-4",
            Gallery {
                entries,
                uploading: uploading(),
                progress: progress.read().value(),
                on_remove: handle_remove,
                on_render_error: handle_render_error,
            }

            DropZone {
                max_images: limit,
                on_batch: handle_batch,
            }
        }
    }
}

/// Run one batch through the upload endpoint.
///
/// Appends pending entries (with Blob-URL previews) for the duration of
/// the transfer. Success replaces the registry with the server's list;
/// failure withdraws the pending tail and leaves the confirmed content
/// untouched.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
async fn upload_batch(
    config: &UploaderConfig,
    files: Vec<DroppedFile>,
    mut registry: Signal<Registry>,
    mut uploading: Signal<bool>,
    mut progress: Signal<ProgressTracker>,
    on_change: EventHandler<Vec<ImageEntry>>,
    on_notice: EventHandler<Notice>,
) {
    // One pending entry per file. A file whose preview cannot be created
    // still uploads; it just has no tile until the server confirms it.
    let mut pending = Vec::with_capacity(files.len());
    for file in &files {
        match preview::create_preview(&file.bytes, &file.name) {
            Ok(handle) => pending.push(ImageEntry::pending(handle)),
            Err(e) => tracing::warn!("preview creation failed for {}: {e}", file.name),
        }
    }
    let pending_count = registry.write().begin_upload(pending);

    uploading.set(true);
    progress.set(ProgressTracker::new());

    let result = transfer::post_images(&config.upload_url(), &files, move |loaded, total| {
        progress.write().update(loaded, total);
    })
    .await;

    match result {
        Ok(body) => match UploadResponse::parse(&body) {
            Ok(response) => {
                let (message, entries) = response.into_parts();
                registry.write().commit_upload(entries);
                let snapshot = registry.peek().snapshot();
                on_change.call(snapshot);
                on_notice.call(Notice::server_success(message));
            }
            Err(e) => {
                tracing::warn!("malformed upload response: {e}");
                registry.write().abort_upload(pending_count);
                on_notice.call(Notice::error_key(MessageKey::ConnectivityError));
            }
        },
        Err(error) => {
            registry.write().abort_upload(pending_count);
            on_notice.call(failure_notice(&error));
        }
    }

    uploading.set(false);
}

/// Take the next queued batch that still fits the refreshed registry.
///
/// Batches that no longer fit are refused with the limit message, the
/// same outcome they would have gotten had the slot been free.
fn next_batch(
    limit: usize,
    registry: Signal<Registry>,
    mut flight: Signal<SingleFlight<Vec<DroppedFile>>>,
    on_notice: EventHandler<Notice>,
) -> Option<Vec<DroppedFile>> {
    loop {
        let next = flight.write().complete()?;
        if registry.peek().fits(next.len()) {
            return Some(next);
        }
        on_notice.call(Notice::error_key(MessageKey::LimitExceeded { max: limit }));
    }
}

/// Execute a network removal keyed by filename.
///
/// The entry is resolved by identifier after the response arrives, so a
/// registry replaced mid-flight cannot make this remove the wrong entry.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
async fn delete_entry(
    url: &str,
    filename: String,
    mut registry: Signal<Registry>,
    on_change: EventHandler<Vec<ImageEntry>>,
    on_notice: EventHandler<Notice>,
) {
    match transfer::delete_image(url).await {
        Ok(body) => {
            // The entry may already be gone if an upload replaced the
            // registry while the request was in flight.
            if registry.write().remove_by_filename(&filename).is_some() {
                let snapshot = registry.peek().snapshot();
                on_change.call(snapshot);
            }
            if let Some(message) = protocol::server_message(&body) {
                on_notice.call(Notice::server_success(message));
            }
        }
        Err(error) => on_notice.call(failure_notice(&error)),
    }
}

/// The notice for a failed transfer: the server's own message when it
/// sent one, the generic connectivity error otherwise.
fn failure_notice(error: &TransferError) -> Notice {
    match error {
        TransferError::Status { body, .. } => protocol::server_message(body).map_or_else(
            || Notice::error_key(MessageKey::ConnectivityError),
            Notice::server_error,
        ),
        TransferError::Network | TransferError::Js(_) => {
            Notice::error_key(MessageKey::ConnectivityError)
        }
    }
}
