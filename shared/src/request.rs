use std::cell::Cell;

/// Ticket handed out for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Tracks the latest request of a loader so superseded responses can be
/// dropped instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: Cell<u64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn next(&self) -> RequestTicket {
        let id = self.latest.get() + 1;
        self.latest.set(id);
        RequestTicket(id)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let ticket = generation.next();
        assert!(generation.is_current(ticket));
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
