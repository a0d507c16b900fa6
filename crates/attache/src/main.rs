use std::rc::Rc;

use attache_core::{ImageEntry, Notice, UploaderConfig};
use attache_io::{AttachmentManager, Messages, Snackbar};
use dioxus::prelude::*;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app);
}

/// Root application component.
///
/// Provides the localization bundle, holds the authoritative attachment
/// list the widget reports into, and hosts the snackbar the widget's
/// notices land in.
fn app() -> Element {
    use_context_provider(build_messages);

    let mut attachments = use_signal(Vec::<ImageEntry>::new);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let config = UploaderConfig::default();
    let max = config.max_images;
    let count = attachments.read().len();

    rsx! {
        // Shared theme (CSS variables for both color schemes).
        style { dangerous_inner_html: include_str!("../assets/theme.css") }

        div { class: "min-h-screen bg-[var(--bg)] text-[var(--text)] flex flex-col",
            // Header
            header { class: "px-6 py-4 border-b border-[var(--border-muted)]",
                h1 { class: "text-2xl font-semibold", "attache" }
                p { class: "text-[var(--muted)] text-sm",
                    "Attach images to this annotation resource"
                }
            }

            // Main content: the attachment manager
            main { class: "flex-1 p-6 max-w-3xl w-full mx-auto flex flex-col gap-4",
                div { class: "flex items-baseline justify-between",
                    h2 { class: "text-lg font-semibold", "Images" }
                    p { class: "text-[var(--text-secondary)] text-sm",
                        "{count} of {max} attached"
                    }
                }

                AttachmentManager {
                    config,
                    on_change: move |entries: Vec<ImageEntry>| attachments.set(entries),
                    on_notice: move |n: Notice| notice.set(Some(n)),
                }
            }
        }

        Snackbar {
            notice: notice(),
            on_dismiss: move |()| notice.set(None),
        }
    }
}

/// Build the en-US message bundle from the embedded FTL resource.
///
/// The resource is compiled in, so a parse failure is a packaging defect;
/// the empty bundle keeps the app up and makes every key render as
/// `MISSING: <key>` instead of crashing.
fn build_messages() -> Rc<Messages> {
    match Messages::new("en-US", include_str!("../assets/i18n/en-US.ftl")) {
        Ok(messages) => Rc::new(messages),
        Err(e) => {
            tracing::error!("failed to build message bundle: {e}");
            Rc::new(Messages::empty())
        }
    }
}
