use std::collections::VecDeque;

use tracing::debug;

use crate::{
    domain::{MessageRef, UserId},
    errors::Error,
    Result,
};

pub const DEFAULT_LEDGER_CAPACITY: usize = 50;

/// Bounded record of which (response, requester) pairs are still eligible
/// for a requester-initiated retraction.
///
/// Insertion order is recency order. When a new record would exceed the
/// capacity, the oldest record is evicted: old responses simply become
/// non-retractable, which is the accepted trade-off for a fixed memory
/// budget. Removal of a pair that is no longer present is an expected race
/// (already evicted, or already deleted), not an error.
#[derive(Debug)]
pub struct OwnershipLedger {
    capacity: usize,
    entries: VecDeque<(MessageRef, UserId)>,
}

impl Default for OwnershipLedger {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LEDGER_CAPACITY,
            entries: VecDeque::new(),
        }
    }
}

impl OwnershipLedger {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config(
                "ownership ledger capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    /// Remember `requester` as the owner of `response`, evicting the oldest
    /// record if the ledger is full.
    pub fn record(&mut self, response: MessageRef, requester: UserId) {
        if self.entries.len() == self.capacity {
            if let Some((evicted, _)) = self.entries.pop_front() {
                debug!(
                    message_id = evicted.message_id.0,
                    "ownership ledger full, evicting oldest record"
                );
            }
        }
        self.entries.push_back((response, requester));
    }

    /// Exact-pair membership: both the response and the requester must match.
    pub fn contains(&self, response: MessageRef, requester: UserId) -> bool {
        self.entries.contains(&(response, requester))
    }

    /// Drop the record for `(response, requester)` if it is still present.
    /// A miss is logged and swallowed: the record may have been evicted or
    /// removed by an earlier retraction.
    pub fn remove(&mut self, response: MessageRef, requester: UserId) {
        match self
            .entries
            .iter()
            .position(|entry| *entry == (response, requester))
        {
            Some(idx) => {
                self.entries.remove(idx);
            }
            None => {
                debug!(
                    message_id = response.message_id.0,
                    "no ownership record to remove (already evicted or deleted)"
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatId, MessageId};

    fn msg(id: i32) -> MessageRef {
        MessageRef {
            chat_id: ChatId(100),
            message_id: MessageId(id),
        }
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(OwnershipLedger::new(0).is_err());
    }

    #[test]
    fn records_and_checks_exact_pairs() {
        let mut ledger = OwnershipLedger::new(10).unwrap();
        ledger.record(msg(1), UserId(5));

        assert!(ledger.contains(msg(1), UserId(5)));
        assert!(!ledger.contains(msg(1), UserId(6)));
        assert!(!ledger.contains(msg(2), UserId(5)));
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut ledger = OwnershipLedger::new(2).unwrap();
        ledger.record(msg(1), UserId(1));
        ledger.record(msg(2), UserId(2));
        ledger.record(msg(3), UserId(3));

        assert!(!ledger.contains(msg(1), UserId(1)));
        assert!(ledger.contains(msg(2), UserId(2)));
        assert!(ledger.contains(msg(3), UserId(3)));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn overflow_evicts_exactly_one() {
        let capacity = 5;
        let mut ledger = OwnershipLedger::new(capacity).unwrap();
        for i in 0..=(capacity as i32) {
            ledger.record(msg(i), UserId(i as i64));
        }

        assert_eq!(ledger.len(), capacity);
        assert!(!ledger.contains(msg(0), UserId(0)));
        for i in 1..=(capacity as i32) {
            assert!(ledger.contains(msg(i), UserId(i as i64)));
        }
    }

    #[test]
    fn remove_is_idempotent() {
        let mut ledger = OwnershipLedger::new(10).unwrap();
        ledger.record(msg(1), UserId(1));

        ledger.remove(msg(1), UserId(1));
        assert!(!ledger.contains(msg(1), UserId(1)));

        // Second remove is a no-op, not a panic.
        ledger.remove(msg(1), UserId(1));
        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_does_not_count_as_eviction() {
        let mut ledger = OwnershipLedger::new(2).unwrap();
        ledger.record(msg(1), UserId(1));
        ledger.record(msg(2), UserId(2));

        ledger.remove(msg(1), UserId(1));
        ledger.record(msg(3), UserId(3));

        // Removing early made room; nothing else was evicted.
        assert!(ledger.contains(msg(2), UserId(2)));
        assert!(ledger.contains(msg(3), UserId(3)));
    }

    #[test]
    fn default_capacity_is_fifty() {
        let mut ledger = OwnershipLedger::default();
        for i in 0..60 {
            ledger.record(msg(i), UserId(1));
        }
        assert_eq!(ledger.len(), DEFAULT_LEDGER_CAPACITY);
        assert!(!ledger.contains(msg(9), UserId(1)));
        assert!(ledger.contains(msg(10), UserId(1)));
    }
}
