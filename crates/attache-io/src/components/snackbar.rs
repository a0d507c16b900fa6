//! Snackbar host for transient notices.
//!
//! The manager only emits [`Notice`]s; the embedding application owns one
//! `Snackbar` and feeds the latest notice in. Success and error notices
//! share the auto-dismiss timer; a newer notice supersedes the pending
//! dismissal of the one it replaced.

use std::rc::Rc;

use attache_core::{Notice, Severity};
use dioxus::prelude::*;

use crate::i18n::Messages;

/// How long a notice stays up before auto-dismissing.
const DISMISS_AFTER_MS: u32 = 4000;

/// Props for the [`Snackbar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SnackbarProps {
    /// The notice to display; `None` hides the snackbar.
    notice: Option<Notice>,
    /// Called when the notice should be cleared (timer or manual dismiss).
    on_dismiss: EventHandler<()>,
}

/// Bottom-anchored snackbar showing one notice at a time.
///
/// Requires an `Rc<Messages>` context to resolve localized notice text;
/// server-supplied text is shown verbatim.
#[component]
pub fn Snackbar(props: SnackbarProps) -> Element {
    let messages: Rc<Messages> = use_context();
    let mut generation = use_signal(|| 0u64);
    let on_dismiss = props.on_dismiss;

    // Re-arm the auto-dismiss timer whenever a notice renders. Props are
    // memoized, so this body runs once per notice change; the generation
    // counter lets a superseded timer recognize it is stale and leave
    // the newer notice alone.
    if props.notice.is_some() {
        generation += 1;
        let my_generation = *generation.peek();

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            if *generation.peek() == my_generation {
                on_dismiss.call(());
            }
        });
    }

    let Some(notice) = props.notice else {
        return rsx! {};
    };

    let accent = match notice.severity {
        Severity::Success => "border-[var(--border-success)] text-[var(--text-success)]",
        Severity::Error => "border-[var(--border-error)] text-[var(--text-error)]",
    };
    let text = messages.notice_text(&notice.text);

    rsx! {
        div {
            class: "fixed bottom-4 left-1/2 -translate-x-1/2 flex items-center gap-3 px-4 py-2 rounded border bg-[var(--surface)] shadow-lg {accent}",
            role: "status",

            p { class: "text-sm", "{text}" }

            button {
                class: "text-[var(--text-secondary)] hover:text-[var(--text)] cursor-pointer leading-none",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "\u{d7}"
            }
        }
    }
}
