//! The bucket table: storage nodes, stored items, and admin operations.
//!
//! The table is created once with a fixed node count and per-node
//! capacity. It exclusively owns its nodes and items; callers only ever
//! receive projections (`NodeSummary`, `NodeDetail`) or placement
//! receipts, never references into the table.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Capacity cost of a single stored item.
pub const ITEM_SIZE: u32 = 1;

/// Current unix timestamp in milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// An item stored in a bucket.
///
/// The `id` is the digest hex string of the inserted input. Digest
/// collisions are possible and are not deduplicated: every insertion is
/// a new item, even with an identical digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageItem {
    /// Digest hex string of the input.
    pub id: String,
    /// The original input, stored verbatim.
    pub content: String,
    /// Unix millis at insertion, never mutated.
    pub timestamp: u64,
    /// Fixed unit cost per item.
    pub size: u32,
    /// Name of the bucket the digest initially mapped to, kept for
    /// audit even when the item lands elsewhere.
    pub original_location: String,
    /// Double-hashing stride, recorded only by that strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<usize>,
    /// 1-indexed probe count, recorded only by double hashing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_sequence: Option<usize>,
}

/// One bucket in the fixed-size table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageNode {
    /// Stable identifier, assigned at construction, never reused.
    pub id: u32,
    /// Human-readable label, immutable.
    pub name: String,
    /// Maximum item count, fixed at construction. Advisory for the
    /// chaining strategy, a hard limit for open addressing.
    pub capacity: u32,
    /// Current occupancy (chain length for chaining).
    pub used_capacity: u32,
    /// Items placed by the open-addressing strategies, insertion order.
    pub stored_items: Vec<StorageItem>,
    /// Items placed by the chaining strategy, insertion order.
    pub chain: Vec<StorageItem>,
    /// Insertions accepted by this node whose initial target was a
    /// different node (probing strategies only).
    pub collisions: u32,
}

impl StorageNode {
    fn new(id: u32, name: String, capacity: u32) -> Self {
        Self {
            id,
            name,
            capacity,
            used_capacity: 0,
            stored_items: Vec::new(),
            chain: Vec::new(),
            collisions: 0,
        }
    }

    /// Whether this node can accept an open-addressing item.
    pub fn has_free_capacity(&self) -> bool {
        self.used_capacity < self.capacity
    }

    /// Return this node to its freshly-constructed empty state.
    fn clear(&mut self) {
        self.used_capacity = 0;
        self.stored_items.clear();
        self.chain.clear();
        self.collisions = 0;
    }
}

/// Occupancy-only view of a node, with item collections omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub id: u32,
    pub name: String,
    pub capacity: u32,
    pub used_capacity: u32,
    pub collisions: u32,
}

/// Full view of a node, including both item collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub id: u32,
    pub name: String,
    pub capacity: u32,
    pub used_capacity: u32,
    pub collisions: u32,
    pub stored_items: Vec<StorageItem>,
    pub chain: Vec<StorageItem>,
}

impl From<&StorageNode> for NodeSummary {
    fn from(node: &StorageNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            capacity: node.capacity,
            used_capacity: node.used_capacity,
            collisions: node.collisions,
        }
    }
}

impl From<&StorageNode> for NodeDetail {
    fn from(node: &StorageNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            capacity: node.capacity,
            used_capacity: node.used_capacity,
            collisions: node.collisions,
            stored_items: node.stored_items.clone(),
            chain: node.chain.clone(),
        }
    }
}

/// Label for the node at a given table position.
fn node_label(index: usize) -> String {
    if index < 26 {
        format!("Storage Node {}", (b'A' + index as u8) as char)
    } else {
        format!("Storage Node {}", index + 1)
    }
}

/// The fixed-size ordered collection of storage nodes.
#[derive(Debug)]
pub struct BucketTable {
    nodes: Vec<StorageNode>,
}

impl BucketTable {
    /// Build a table of `node_count` empty nodes with the given
    /// per-node capacity. Node ids are 1-based and stable.
    pub fn new(node_count: usize, capacity: u32) -> Self {
        let nodes = (0..node_count)
            .map(|i| StorageNode::new(i as u32 + 1, node_label(i), capacity))
            .collect();
        Self { nodes }
    }

    /// Number of buckets in the table.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, index: usize) -> &StorageNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut StorageNode {
        &mut self.nodes[index]
    }

    /// Clear every node back to its initial empty state. Idempotent.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.clear();
        }
    }

    /// Occupancy summaries for all nodes, in table order.
    pub fn summaries(&self) -> Vec<NodeSummary> {
        self.nodes.iter().map(NodeSummary::from).collect()
    }

    /// Occupancy summary for one node.
    pub fn summary(&self, id: u32) -> Result<NodeSummary> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(NodeSummary::from)
            .ok_or(Error::NodeNotFound(id))
    }

    /// Full detail (including item collections) for one node.
    pub fn detail(&self, id: u32) -> Result<NodeDetail> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(NodeDetail::from)
            .ok_or(Error::NodeNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_empty() {
        let table = BucketTable::new(4, 3);
        assert_eq!(table.node_count(), 4);
        for summary in table.summaries() {
            assert_eq!(summary.used_capacity, 0);
            assert_eq!(summary.capacity, 3);
            assert_eq!(summary.collisions, 0);
        }
    }

    #[test]
    fn node_ids_and_names_are_stable() {
        let table = BucketTable::new(4, 3);
        let summaries = table.summaries();
        assert_eq!(summaries[0].id, 1);
        assert_eq!(summaries[0].name, "Storage Node A");
        assert_eq!(summaries[3].id, 4);
        assert_eq!(summaries[3].name, "Storage Node D");
    }

    #[test]
    fn detail_unknown_id() {
        let table = BucketTable::new(4, 3);
        assert_eq!(table.detail(99), Err(Error::NodeNotFound(99)));
    }

    #[test]
    fn detail_includes_collections() {
        let table = BucketTable::new(2, 3);
        let detail = table.detail(1).unwrap();
        assert!(detail.stored_items.is_empty());
        assert!(detail.chain.is_empty());
    }

    #[test]
    fn summary_omits_item_collections() {
        let table = BucketTable::new(2, 3);
        let json = serde_json::to_value(table.summaries()).unwrap();
        let first = &json[0];
        assert!(first.get("storedItems").is_none());
        assert!(first.get("chain").is_none());
        assert_eq!(first["usedCapacity"], 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut table = BucketTable::new(4, 3);
        table.reset();
        table.reset();
        assert!(table.summaries().iter().all(|s| s.used_capacity == 0));
    }

    #[test]
    fn labels_past_alphabet_are_numeric() {
        assert_eq!(node_label(0), "Storage Node A");
        assert_eq!(node_label(25), "Storage Node Z");
        assert_eq!(node_label(26), "Storage Node 27");
    }
}
