//! Dataset snapshots and reload sequencing.
//!
//! Every reload replaces the whole probe list. Reload requests may overlap
//! and complete out of order, so each request is tagged with a sequence
//! number and only responses newer than the last applied one are kept.

use std::time::Instant;

use super::probe::ProbeRow;

/// A complete probe list produced by one reload request.
#[derive(Debug, Clone)]
pub struct ProbeSnapshot {
    /// Sequence number of the request that produced this snapshot.
    pub sequence: u64,
    pub rows: Vec<ProbeRow>,
    pub received_at: Instant,
}

impl ProbeSnapshot {
    pub fn new(sequence: u64, rows: Vec<ProbeRow>) -> Self {
        Self {
            sequence,
            rows,
            received_at: Instant::now(),
        }
    }
}

/// Issues reload sequence numbers and rejects stale responses.
#[derive(Debug, Default, Clone)]
pub struct Sequencer {
    issued: u64,
    applied: Option<u64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for a new request.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record a completed response.
    ///
    /// Returns `false` when a response for a later request was already
    /// applied, in which case the caller must drop this one.
    pub fn accept(&mut self, sequence: u64) -> bool {
        match self.applied {
            Some(applied) if sequence <= applied => false,
            _ => {
                self.applied = Some(sequence);
                true
            }
        }
    }

    /// Sequence number of the last applied response.
    pub fn applied(&self) -> Option<u64> {
        self.applied
    }

    /// Number of requests issued but not yet superseded by an applied response.
    pub fn in_flight(&self) -> u64 {
        self.issued - self.applied.unwrap_or(0).min(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let mut seq = Sequencer::new();
        assert_eq!(seq.issue(), 1);
        assert_eq!(seq.issue(), 2);
        assert_eq!(seq.in_flight(), 2);
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let mut seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        // The later request completes first
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert_eq!(seq.applied(), Some(second));
        assert_eq!(seq.in_flight(), 0);
    }

    #[test]
    fn test_in_order_responses_are_applied() {
        let mut seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(seq.accept(first));
        assert!(seq.accept(second));
    }

    #[test]
    fn test_duplicate_response_is_discarded() {
        let mut seq = Sequencer::new();
        let only = seq.issue();
        assert!(seq.accept(only));
        assert!(!seq.accept(only));
    }
}
