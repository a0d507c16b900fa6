//! Drag-and-drop zone with a file picker, the widget's capability layer.
//!
//! Screens every interaction into an accepted batch and a rejected batch
//! (with reasons) before anything reaches the upload controller. Type
//! acceptance and the soft per-interaction ceiling live here; the hard
//! total-count limit belongs to the controller.

use std::rc::Rc;

use attache_core::batch::{ALLOWED_EXTENSIONS, RejectReason, RejectedFile, has_allowed_extension};
use attache_core::message::MessageKey;
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

use crate::i18n::Messages;

/// A file that passed capability screening, with its bytes read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One interaction's worth of screened files.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBatch {
    pub accepted: Vec<DroppedFile>,
    pub rejected: Vec<RejectedFile>,
}

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Called with the screened batch after every interaction.
    on_batch: EventHandler<FileBatch>,
    /// Configured registry maximum, shown in the description line.
    max_images: usize,
    /// Soft ceiling on files per interaction; the excess is rejected.
    #[props(default = 10)]
    max_per_pick: usize,
}

/// A drag-and-drop zone with a multi-select file picker.
///
/// Accepts PNG, JPEG, BMP, and WebP images. Reads each selected file's
/// bytes and fires `on_batch` with the accepted and rejected halves of
/// the interaction. Requires an `Rc<Messages>` context for its prompt
/// and description copy.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let messages: Rc<Messages> = use_context();
    let mut dragging = use_signal(|| false);

    let max_per_pick = props.max_per_pick;
    let on_batch = props.on_batch;

    // Screen one interaction's files. Shared by the picker and the
    // drag-and-drop path so the acceptance rules live in one place.
    let screen_files = move |files: Vec<FileData>| async move {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            let name = file.name();
            if !has_allowed_extension(&name) {
                rejected.push(RejectedFile::new(name, RejectReason::UnsupportedType));
                continue;
            }
            if accepted.len() >= max_per_pick {
                rejected.push(RejectedFile::new(
                    name,
                    RejectReason::TooManyFiles { max: max_per_pick },
                ));
                continue;
            }
            match file.read_bytes().await {
                Ok(bytes) => accepted.push(DroppedFile {
                    name,
                    bytes: bytes.to_vec(),
                }),
                Err(_) => rejected.push(RejectedFile::new(name, RejectReason::Unreadable)),
            }
        }
        on_batch.call(FileBatch { accepted, rejected });
    };

    let handle_change = move |evt: FormEvent| async move {
        screen_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        screen_files(evt.files()).await;
    };

    let border_class = if dragging() {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };

    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let prompt = messages.resolve(&MessageKey::DropPrompt);
    let description = messages.resolve(&MessageKey::DropDescription {
        max: props.max_images,
    });

    rsx! {
        div {
            class: "border-2 border-dashed rounded-lg p-6 text-center transition-colors {border_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if dragging() {
                p { class: "text-[var(--text-accent)] mb-2",
                    "{prompt}"
                }
            }

            p { class: "text-[var(--text-secondary)] mb-3",
                "{description}"
            }

            label {
                class: "inline-block px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded cursor-pointer text-white font-medium transition-colors",
                input {
                    r#type: "file",
                    accept: "{accept}",
                    multiple: true,
                    class: "hidden",
                    onchange: handle_change,
                }
                "Choose Files"
            }
        }
    }
}
