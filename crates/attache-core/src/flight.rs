//! Single-flight upload queue.
//!
//! Exactly one batch is in flight at a time. Batches submitted while a
//! transfer runs are queued FIFO and handed back one by one as transfers
//! complete, so two uploads can never interleave their registry updates.

use std::collections::VecDeque;

/// What [`SingleFlight::submit`] did with a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<B> {
    /// The slot was free; start this batch now.
    Start(B),
    /// A transfer is in flight; the batch waits its turn.
    Queued,
}

/// A single-slot transfer queue.
#[derive(Debug, Clone)]
pub struct SingleFlight<B> {
    in_flight: bool,
    queued: VecDeque<B>,
}

impl<B> Default for SingleFlight<B> {
    fn default() -> Self {
        Self {
            in_flight: false,
            queued: VecDeque::new(),
        }
    }
}

impl<B> SingleFlight<B> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a batch: start it if the slot is free, queue it otherwise.
    pub fn submit(&mut self, batch: B) -> Dispatch<B> {
        if self.in_flight {
            self.queued.push_back(batch);
            return Dispatch::Queued;
        }
        self.in_flight = true;
        Dispatch::Start(batch)
    }

    /// Report the in-flight transfer finished and take the next batch.
    ///
    /// Returns `Some` while queued batches remain -- the slot stays
    /// occupied and the caller starts (or re-screens and discards, then
    /// calls this again) the returned batch. Returns `None` once the
    /// queue is drained, freeing the slot.
    pub fn complete(&mut self) -> Option<B> {
        match self.queued.pop_front() {
            Some(next) => Some(next),
            None => {
                self.in_flight = false;
                None
            }
        }
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_submission_starts_immediately() {
        let mut flight = SingleFlight::new();
        assert_eq!(flight.submit("a"), Dispatch::Start("a"));
        assert!(flight.is_in_flight());
    }

    #[test]
    fn submissions_while_busy_are_queued_fifo() {
        let mut flight = SingleFlight::new();
        assert_eq!(flight.submit("a"), Dispatch::Start("a"));
        assert_eq!(flight.submit("b"), Dispatch::Queued);
        assert_eq!(flight.submit("c"), Dispatch::Queued);
        assert_eq!(flight.queued_len(), 2);

        assert_eq!(flight.complete(), Some("b"));
        assert!(flight.is_in_flight(), "slot stays occupied for the next batch");
        assert_eq!(flight.complete(), Some("c"));
        assert_eq!(flight.complete(), None);
        assert!(!flight.is_in_flight());
    }

    #[test]
    fn slot_frees_only_when_the_queue_drains() {
        let mut flight = SingleFlight::new();
        let _ = flight.submit(1);
        assert_eq!(flight.complete(), None);
        assert!(!flight.is_in_flight());

        // The slot is reusable afterwards.
        assert_eq!(flight.submit(2), Dispatch::Start(2));
    }
}
