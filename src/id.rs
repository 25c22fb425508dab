//! Node identity: a monotonically increasing integer id, and the sequence counters (id, MRU)
//! that hand them out.

use std::fmt;

/// A node's identity within a single [`Tree`](crate::tree::Tree). Unique for the lifetime of
/// that tree; never reused even after the node it named is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u64);

impl nohash_hasher::IsEnabled for NodeId {}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monotonic counter. Used both for node ids and for the MRU (most-recently-used) ordering
/// assigned to panes on focus; the two are tracked separately so restoring one on deserialize
/// doesn't perturb the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Sequence(u64);

impl Sequence {
    pub(crate) fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub(crate) fn current(&self) -> u64 {
        self.0
    }

    /// Restores the counter to an exact value, e.g. after deserializing a tree, so subsequent
    /// allocations don't collide with rehydrated ids/mru values.
    pub(crate) fn restore(&mut self, value: u64) {
        self.0 = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic_and_restorable() {
        let mut seq = Sequence::default();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        seq.restore(100);
        assert_eq!(seq.next(), 101);
    }
}
