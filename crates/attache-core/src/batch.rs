//! Batch screening: capability-level acceptance and the drop decision.
//!
//! The drop zone screens each interaction into accepted and rejected
//! files; [`decide_drop`] then decides whether the batch proceeds to
//! upload. A batch with any rejection aborts wholesale -- there is no
//! partial acceptance.

use crate::message::MessageKey;

/// File extensions the drop zone accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Check whether a filename ends in an allowed image extension.
#[must_use]
pub fn has_allowed_extension(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

/// Why the capability layer rejected a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Not an accepted image type.
    UnsupportedType,
    /// Beyond the soft per-interaction file-count ceiling.
    TooManyFiles { max: usize },
    /// The file's bytes could not be read.
    Unreadable,
}

/// A file rejected before reaching the upload controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

impl RejectedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }

    /// The localized message for this rejection.
    #[must_use]
    pub fn message_key(&self) -> MessageKey {
        match &self.reason {
            RejectReason::UnsupportedType => MessageKey::UnsupportedType {
                name: self.name.clone(),
            },
            RejectReason::TooManyFiles { max } => MessageKey::TooManyFiles { max: *max },
            RejectReason::Unreadable => MessageKey::UnreadableFile {
                name: self.name.clone(),
            },
        }
    }
}

/// Outcome of screening one dropped batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DropDecision {
    /// Proceed: build pending entries and upload the whole batch.
    Upload,
    /// At least one file was rejected; surface the first rejection's
    /// message and abort the batch.
    Rejected(MessageKey),
    /// Accepting the batch would exceed the total-count limit; nothing
    /// is uploaded.
    LimitExceeded { max: usize },
}

/// Decide what to do with a screened batch.
///
/// `current` is the registry length before the drop; `limit` the
/// configured maximum. The registry is untouched on both abort paths.
#[must_use]
pub fn decide_drop(
    accepted: usize,
    rejected: &[RejectedFile],
    current: usize,
    limit: usize,
) -> DropDecision {
    if let Some(first) = rejected.first() {
        return DropDecision::Rejected(first.message_key());
    }
    if current + accepted > limit {
        return DropDecision::LimitExceeded { max: limit };
    }
    DropDecision::Upload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_screening_is_case_insensitive() {
        assert!(has_allowed_extension("photo.PNG"));
        assert!(has_allowed_extension("photo.jpeg"));
        assert!(!has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("no-extension"));
    }

    #[test]
    fn any_rejection_aborts_the_whole_batch() {
        let rejected = vec![
            RejectedFile::new("a.txt", RejectReason::UnsupportedType),
            RejectedFile::new("b.txt", RejectReason::UnsupportedType),
        ];
        let decision = decide_drop(3, &rejected, 0, 5);
        assert_eq!(
            decision,
            DropDecision::Rejected(MessageKey::UnsupportedType {
                name: "a.txt".into()
            }),
            "the first rejection's message must be surfaced"
        );
    }

    #[test]
    fn over_limit_batch_is_refused() {
        // limit 5, 3 already attached, 3 more dropped
        let decision = decide_drop(3, &[], 3, 5);
        assert_eq!(decision, DropDecision::LimitExceeded { max: 5 });
    }

    #[test]
    fn batch_exactly_at_limit_uploads() {
        assert_eq!(decide_drop(2, &[], 3, 5), DropDecision::Upload);
    }

    #[test]
    fn rejection_takes_precedence_over_limit() {
        let rejected = vec![RejectedFile::new("a.txt", RejectReason::Unreadable)];
        let decision = decide_drop(10, &rejected, 5, 5);
        assert!(
            matches!(decision, DropDecision::Rejected(_)),
            "capability rejections are reported before the limit check"
        );
    }
}
