//! Request generations for discarding stale responses
//!
//! Each fetch takes a ticket; a response is only applied while its ticket is
//! still current. Starting a newer fetch or closing the view invalidates older
//! tickets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared generation counter of one view. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

/// Generation a fetch was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any outstanding one
    pub fn begin(&self) -> GenerationTicket {
        GenerationTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket, e.g. when the view is closed
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_invalidate_through_clone() {
        let generation = RequestGeneration::new();
        let handle = generation.clone();
        let ticket = generation.begin();

        handle.invalidate();

        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_tickets_increase() {
        let generation = RequestGeneration::new();
        let a = generation.begin();
        let b = generation.begin();
        assert_ne!(a, b);
    }
}
