//! Gallery of attached images with removal and render-failure reporting.

use std::rc::Rc;

use attache_core::{ImageEntry, MessageKey};
use dioxus::prelude::*;

use crate::i18n::Messages;

/// Props for the [`Gallery`] component.
#[derive(Props, Clone, PartialEq)]
pub struct GalleryProps {
    /// Entries in display order.
    entries: Vec<ImageEntry>,
    /// Whether a transfer is in flight.
    uploading: bool,
    /// Clamped transfer percentage (0-100).
    progress: u8,
    /// Called with the entry index when its remove button is clicked.
    on_remove: EventHandler<usize>,
    /// Called with the entry index when its image fails to render.
    on_render_error: EventHandler<usize>,
}

/// Grid of attachment tiles with an upload progress bar.
///
/// Entries flagged not-found render as a placeholder tile that keeps the
/// entry's position and remove button. Requires an `Rc<Messages>` context.
#[component]
pub fn Gallery(props: GalleryProps) -> Element {
    let messages: Rc<Messages> = use_context();

    let uploading_label = messages.resolve(&MessageKey::UploadingLabel);

    rsx! {
        div { class: "flex flex-col gap-3",
            if props.uploading {
                div { class: "flex items-center gap-3",
                    p { class: "text-[var(--text-secondary)] text-sm",
                        "{uploading_label} {props.progress}%"
                    }
                    div { class: "flex-1 h-2 bg-[var(--surface)] rounded overflow-hidden",
                        div {
                            class: "h-full bg-[var(--btn-primary)] transition-all",
                            style: "width: {props.progress}%",
                        }
                    }
                }
            }

            div { class: "grid grid-cols-2 sm:grid-cols-3 md:grid-cols-5 gap-3",
                for (index, entry) in props.entries.iter().enumerate() {
                    {render_tile(entry, index, &props.on_remove, &props.on_render_error, &messages)}
                }
            }
        }
    }
}

/// Render a single attachment tile.
fn render_tile(
    entry: &ImageEntry,
    index: usize,
    on_remove: &EventHandler<usize>,
    on_render_error: &EventHandler<usize>,
    messages: &Messages,
) -> Element {
    let on_remove = *on_remove;
    let on_render_error = *on_render_error;
    let remove_label = messages.resolve(&MessageKey::RemoveImage);
    let placeholder = messages.resolve(&MessageKey::ImagePlaceholder);
    let url = entry.display_url().to_owned();
    let alt = format!("attachment {}", index + 1);

    rsx! {
        div {
            key: "{url}",
            class: "relative aspect-square rounded overflow-hidden bg-[var(--surface)] border border-[var(--border-muted)]",

            if entry.is_not_found() {
                // The resource is gone server-side; keep the slot visible
                // until the user removes it.
                div { class: "w-full h-full flex items-center justify-center p-2",
                    p { class: "text-[var(--text-disabled)] text-xs text-center",
                        "{placeholder}"
                    }
                }
            } else {
                img {
                    src: "{url}",
                    class: "w-full h-full object-cover",
                    alt: "{alt}",
                    onerror: move |_| on_render_error.call(index),
                }
            }

            button {
                class: "absolute top-1 right-1 w-6 h-6 rounded-full bg-[var(--surface-active)] hover:bg-[var(--btn-danger)] text-[var(--text)] text-sm leading-none cursor-pointer",
                title: "{remove_label}",
                aria_label: "{remove_label}",
                onclick: move |_| on_remove.call(index),
                "\u{d7}"
            }
        }
    }
}
