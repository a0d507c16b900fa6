//! Message resolution through Fluent.
//!
//! The widget emits [`MessageKey`]s; the embedding application supplies
//! an FTL resource and [`Messages`] turns keys into display strings.
//! Server-supplied notice text passes through verbatim.

use attache_core::{MessageKey, NoticeText};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

/// Errors building a [`Messages`] bundle.
#[derive(Debug, thiserror::Error)]
pub enum MessagesError {
    /// The locale string is not a valid language identifier.
    #[error("invalid locale {0:?}")]
    InvalidLocale(String),

    /// The FTL source failed to parse.
    #[error("invalid FTL resource: {0}")]
    InvalidResource(String),
}

/// A single-locale Fluent bundle resolving widget message keys.
pub struct Messages {
    bundle: FluentBundle<FluentResource>,
}

impl Messages {
    /// Build a bundle for `locale` from FTL `source`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagesError::InvalidLocale`] for an unparseable locale
    /// and [`MessagesError::InvalidResource`] for unparseable FTL.
    pub fn new(locale: &str, source: &str) -> Result<Self, MessagesError> {
        let locale: LanguageIdentifier = locale
            .parse()
            .map_err(|_| MessagesError::InvalidLocale(locale.to_owned()))?;

        let resource = FluentResource::try_new(source.to_owned())
            .map_err(|(_, errors)| MessagesError::InvalidResource(format!("{errors:?}")))?;

        let mut bundle = FluentBundle::new(vec![locale]);
        // Skip Unicode isolation marks around placeables; the widget
        // renders into text nodes, not bidi-mixed markup.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| MessagesError::InvalidResource(format!("{errors:?}")))?;

        Ok(Self { bundle })
    }

    /// A bundle with no messages: every key resolves to its `MISSING`
    /// form. Fallback for when the embedded resource cannot be parsed.
    #[must_use]
    pub fn empty() -> Self {
        let mut bundle = FluentBundle::new(vec![LanguageIdentifier::default()]);
        bundle.set_use_isolating(false);
        Self { bundle }
    }

    /// Resolve a message key, interpolating its arguments.
    ///
    /// Missing keys resolve to `MISSING: <key>` so a dropped FTL entry is
    /// visible in the UI instead of silently blank.
    #[must_use]
    pub fn resolve(&self, key: &MessageKey) -> String {
        let Some(message) = self.bundle.get_message(key.name()) else {
            return format!("MISSING: {}", key.name());
        };
        let Some(pattern) = message.value() else {
            return format!("MISSING: {}", key.name());
        };

        let mut args = FluentArgs::new();
        for (name, value) in key.args() {
            args.set(name, FluentValue::from(value));
        }

        let mut errors = Vec::new();
        let value = self
            .bundle
            .format_pattern(pattern, Some(&args), &mut errors);
        value.into_owned()
    }

    /// Resolve notice text: keys localize, server strings pass through.
    #[must_use]
    pub fn notice_text(&self, text: &NoticeText) -> String {
        match text {
            NoticeText::Key(key) => self.resolve(key),
            NoticeText::Server(message) => message.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    const FTL: &str = "\
drop-prompt = Drop the images to attach them
limit-exceeded = You can attach at most { $max } images
unsupported-type = { $name } is not a supported image type
";

    fn messages() -> Messages {
        Messages::new("en-US", FTL).expect("test FTL is well-formed")
    }

    #[test]
    fn plain_keys_resolve() {
        assert_eq!(
            messages().resolve(&MessageKey::DropPrompt),
            "Drop the images to attach them"
        );
    }

    #[test]
    fn arguments_interpolate() {
        assert_eq!(
            messages().resolve(&MessageKey::LimitExceeded { max: 5 }),
            "You can attach at most 5 images"
        );
        assert_eq!(
            messages().resolve(&MessageKey::UnsupportedType {
                name: "notes.txt".into()
            }),
            "notes.txt is not a supported image type"
        );
    }

    #[test]
    fn missing_keys_are_loud() {
        assert_eq!(
            messages().resolve(&MessageKey::ConnectivityError),
            "MISSING: connectivity-error"
        );
    }

    #[test]
    fn server_text_passes_through() {
        let text = NoticeText::Server("3 images uploaded".into());
        assert_eq!(messages().notice_text(&text), "3 images uploaded");
    }

    #[test]
    fn invalid_locale_is_rejected() {
        assert!(matches!(
            Messages::new("not a locale!", FTL),
            Err(MessagesError::InvalidLocale(_))
        ));
    }
}
