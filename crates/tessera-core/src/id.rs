//! Stable node identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used for ids minted by an [`IdAllocator`]
const GENERATED_PREFIX: &str = "T";

/// A stable node identifier as it appears in document files, e.g. `"12:345"`.
///
/// Ids are opaque strings; the only structure Tessera relies on is the
/// `T:<n>` shape of ids it generates itself for clones and new frames.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The counter value if this id was produced by an [`IdAllocator`]
    fn generated_index(&self) -> Option<u64> {
        let (prefix, n) = self.0.split_once(':')?;
        if prefix != GENERATED_PREFIX {
            return None;
        }
        n.parse().ok()
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints fresh node ids for a single document.
///
/// Loaded documents may already contain generated ids from an earlier fix
/// run, so the counter is bumped past any id observed while loading.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Produce the next id from the counter.
    ///
    /// The counter wraps once exhausted, so callers holding a node store
    /// must still skip ids that are taken.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(format!("{}:{}", GENERATED_PREFIX, self.next));
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Make sure future ids never collide with `id`
    pub fn observe(&mut self, id: &NodeId) {
        if let Some(n) = id.generated_index() {
            if n >= self.next {
                self.next = n.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let mut ids = IdAllocator::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str(), "T:1");
        assert_eq!(id2.as_str(), "T:2");
    }

    #[test]
    fn test_observe_skips_past_loaded_ids() {
        let mut ids = IdAllocator::new();
        ids.observe(&NodeId::from("T:41"));
        ids.observe(&NodeId::from("12:900"));
        assert_eq!(ids.next_id().as_str(), "T:42");
    }

    #[test]
    fn test_observe_max_id_does_not_overflow() {
        let mut ids = IdAllocator::new();
        ids.observe(&NodeId::from("T:18446744073709551615"));
        assert_eq!(ids.next_id().as_str(), "T:18446744073709551615");
        assert_eq!(ids.next_id().as_str(), "T:0");
    }

    #[test]
    fn test_serde_transparent() {
        let id = NodeId::from("1:2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1:2\"");
        let back: NodeId = serde_json::from_str("\"1:2\"").unwrap();
        assert_eq!(back, id);
    }
}
