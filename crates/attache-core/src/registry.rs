//! The ordered, size-bounded list of image entries.
//!
//! Display order is insertion order. Pending entries for the in-flight
//! batch sit at the tail; a successful upload replaces the whole list
//! with the server's confirmed entries, a failed one removes only the
//! pending tail. Preview handles are released automatically when the
//! entries holding them leave the registry (see `preview.rs`).

use crate::entry::ImageEntry;

/// How a removal request should be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Drop the entry locally; the server does not know it (local-only
    /// entry) or already lost it (not-found entry).
    Local,
    /// Ask the server to delete `filename`, then drop the entry.
    Network { filename: String },
}

/// Ordered, size-bounded image entry list.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    entries: Vec<ImageEntry>,
    limit: usize,
}

impl Registry {
    /// An empty registry bounded by `limit`.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// A registry seeded from an externally supplied list.
    ///
    /// The seed is truncated to `limit` so the size invariant holds from
    /// the start.
    #[must_use]
    pub fn seeded(limit: usize, mut initial: Vec<ImageEntry>) -> Self {
        initial.truncate(limit);
        Self {
            entries: initial,
            limit,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    /// Whether `incoming` more entries still fit under the limit.
    #[must_use]
    pub const fn fits(&self, incoming: usize) -> bool {
        self.entries.len() + incoming <= self.limit
    }

    /// A copy of the current entries, for the change callback.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ImageEntry> {
        self.entries.clone()
    }

    /// Append the pending entries of a dispatched batch.
    ///
    /// Returns the number appended, which [`abort_upload`](Self::abort_upload)
    /// takes back on failure. Callers check [`fits`](Self::fits) first;
    /// the batch is refused outright here as a backstop.
    pub fn begin_upload(&mut self, pending: Vec<ImageEntry>) -> usize {
        if !self.fits(pending.len()) {
            return 0;
        }
        let count = pending.len();
        self.entries.extend(pending);
        count
    }

    /// Remove the pending tail of a failed batch. The confirmed content
    /// is untouched -- no partial commit.
    pub fn abort_upload(&mut self, pending_count: usize) {
        let keep = self.entries.len().saturating_sub(pending_count);
        self.entries.truncate(keep);
    }

    /// Replace the whole list with the server-confirmed entries.
    ///
    /// The server's order is authoritative. The list is truncated to the
    /// limit to preserve the size invariant against a misbehaving server.
    pub fn commit_upload(&mut self, mut confirmed: Vec<ImageEntry>) {
        confirmed.truncate(self.limit);
        self.entries = confirmed;
    }

    /// How the entry at `index` should be removed, or `None` when the
    /// index is out of range.
    ///
    /// Entries flagged not-found and entries that never received a server
    /// identifier are removed locally; everything else goes through the
    /// server, keyed by the entry's own filename. No identifier is ever
    /// inferred from a preview URL.
    #[must_use]
    pub fn removal_plan(&self, index: usize) -> Option<Removal> {
        let entry = self.entries.get(index)?;
        if entry.is_not_found() || entry.is_local_only() {
            return Some(Removal::Local);
        }
        entry
            .filename()
            .map(|filename| Removal::Network {
                filename: filename.to_owned(),
            })
    }

    /// Remove exactly one entry by position.
    pub fn remove(&mut self, index: usize) -> Option<ImageEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove the first entry carrying `filename`.
    ///
    /// Network removals resolve by identifier rather than position, so a
    /// registry mutation that lands while the delete request is in flight
    /// cannot make the completion remove the wrong entry.
    pub fn remove_by_filename(&mut self, filename: &str) -> Option<ImageEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.filename() == Some(filename))?;
        Some(self.entries.remove(index))
    }

    /// Flag the entry at `index` as not-found, keeping its position.
    ///
    /// The list is rebuilt with one entry replaced rather than mutated in
    /// place. Idempotent; returns `false` only for an out-of-range index.
    pub fn mark_not_found(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries = self
            .entries
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, entry)| {
                if i == index {
                    entry.into_not_found()
                } else {
                    entry
                }
            })
            .collect();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewHandle;

    fn confirmed(n: u32) -> ImageEntry {
        ImageEntry::confirmed(format!("/uploads/{n}.png"), format!("{n}.png"))
    }

    fn pending(n: u32) -> ImageEntry {
        ImageEntry::pending(PreviewHandle::new(format!("blob:{n}")))
    }

    #[test]
    fn seeding_truncates_to_the_limit() {
        let registry = Registry::seeded(2, vec![confirmed(1), confirmed(2), confirmed(3)]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).and_then(ImageEntry::filename), Some("2.png"));
    }

    #[test]
    fn fits_accounts_for_current_length() {
        let registry = Registry::seeded(5, vec![confirmed(1), confirmed(2), confirmed(3)]);
        assert!(registry.fits(2));
        assert!(!registry.fits(3));
    }

    #[test]
    fn failed_upload_removes_only_the_pending_tail() {
        let mut registry = Registry::seeded(5, vec![confirmed(1), confirmed(2)]);
        let count = registry.begin_upload(vec![pending(3), pending(4)]);
        assert_eq!(count, 2);
        assert_eq!(registry.len(), 4);

        registry.abort_upload(count);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).and_then(ImageEntry::filename), Some("1.png"));
    }

    #[test]
    fn commit_replaces_wholesale_in_server_order() {
        let mut registry = Registry::seeded(5, vec![confirmed(9)]);
        registry.begin_upload(vec![pending(1)]);

        registry.commit_upload(vec![confirmed(1), confirmed(2)]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).and_then(ImageEntry::filename), Some("1.png"));
        assert_eq!(registry.get(1).and_then(ImageEntry::filename), Some("2.png"));
    }

    #[test]
    fn commit_enforces_the_size_invariant() {
        let mut registry = Registry::new(1);
        registry.commit_upload(vec![confirmed(1), confirmed(2)]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn begin_upload_refuses_an_oversized_batch() {
        let mut registry = Registry::new(1);
        let count = registry.begin_upload(vec![pending(1), pending(2)]);
        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn removal_plan_prefers_local_paths() {
        let mut registry = Registry::seeded(3, vec![confirmed(1), confirmed(2)]);
        registry.begin_upload(vec![pending(3)]);
        registry.mark_not_found(0);

        // not-found entry: the server already lost it
        assert_eq!(registry.removal_plan(0), Some(Removal::Local));
        // confirmed, found entry: goes through the server
        assert_eq!(
            registry.removal_plan(1),
            Some(Removal::Network {
                filename: "2.png".into()
            })
        );
        // pending entry without an identifier: local-only
        assert_eq!(registry.removal_plan(2), Some(Removal::Local));
        // out of range
        assert_eq!(registry.removal_plan(3), None);
    }

    #[test]
    fn remove_by_filename_survives_reordering() {
        let mut registry = Registry::seeded(3, vec![confirmed(1), confirmed(2), confirmed(3)]);
        // Another mutation shifts positions while a delete is in flight.
        registry.remove(0);

        let removed = registry.remove_by_filename("3.png");
        assert_eq!(removed.and_then(|e| e.filename().map(String::from)), Some("3.png".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).and_then(ImageEntry::filename), Some("2.png"));
    }

    #[test]
    fn mark_not_found_is_idempotent() {
        let mut registry = Registry::seeded(2, vec![confirmed(1), confirmed(2)]);
        assert!(registry.mark_not_found(1));
        assert!(registry.mark_not_found(1));
        assert_eq!(registry.len(), 2, "flagging must not change the length");
        assert!(registry.get(1).is_some_and(ImageEntry::is_not_found));
        assert!(!registry.get(0).is_some_and(ImageEntry::is_not_found));
    }

    #[test]
    fn mark_not_found_rejects_out_of_range() {
        let mut registry = Registry::new(2);
        assert!(!registry.mark_not_found(0));
    }

    #[test]
    fn removal_releases_the_preview_handle() {
        use std::cell::Cell;
        use std::rc::Rc;

        let released = Rc::new(Cell::new(false));
        let handle = {
            let released = Rc::clone(&released);
            PreviewHandle::with_release("blob:tracked", move |_| released.set(true))
        };

        let mut registry = Registry::new(2);
        registry.begin_upload(vec![ImageEntry::pending(handle)]);
        assert!(!released.get());

        registry.abort_upload(1);
        assert!(
            released.get(),
            "dropping the pending tail must release its preview"
        );
    }
}
