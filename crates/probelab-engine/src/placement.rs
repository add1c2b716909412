//! The placement engine: strategy dispatch and the three
//! collision-resolution algorithms.
//!
//! All three strategies mutate the table only after a slot has been
//! found, so a failed insertion leaves the table untouched.

use crate::digest::{self, Digest};
use crate::error::{Error, Result};
use crate::table::{now_millis, BucketTable, StorageItem, ITEM_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A collision-resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Append to an unbounded per-node chain. Never fails.
    #[default]
    Chaining,
    /// Scan forward one bucket at a time, wrapping around the table.
    LinearProbing,
    /// Scan with a per-input stride derived from a second digest.
    DoubleHashing,
}

impl Strategy {
    /// Wire name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Chaining => "chaining",
            Strategy::LinearProbing => "linear-probing",
            Strategy::DoubleHashing => "double-hashing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chaining" => Ok(Strategy::Chaining),
            "linear-probing" => Ok(Strategy::LinearProbing),
            "double-hashing" => Ok(Strategy::DoubleHashing),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// The outcome of a successful insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Digest hex string of the input (also the item id).
    pub digest: String,
    /// Id of the node that accepted the item.
    pub node_id: u32,
    /// Name of the node that accepted the item.
    pub location: String,
    /// Name of the node the digest initially mapped to.
    pub original_location: String,
    /// Whether the item shares a bucket with a prior item (chaining) or
    /// was relocated away from its initial bucket (probing).
    pub is_collision: bool,
    /// The strategy that placed the item.
    pub strategy: Strategy,
    /// Double-hashing stride, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<usize>,
    /// 1-indexed probe count, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_sequence: Option<usize>,
    /// Unix millis at insertion.
    pub timestamp: u64,
}

impl BucketTable {
    /// Insert an input using the given strategy.
    ///
    /// Computes the digest, maps it to the initial bucket, and resolves
    /// any capacity conflict per the strategy. Empty input is rejected
    /// before any mutation; a full probe cycle without a free slot
    /// yields [`Error::TableFull`] with the table unchanged.
    pub fn insert(&mut self, input: &str, strategy: Strategy) -> Result<Placement> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.node_count() == 0 {
            return Err(Error::TableFull);
        }
        let digest = Digest::compute(input.as_bytes());
        let initial = digest.initial_index(self.node_count());
        match strategy {
            Strategy::Chaining => Ok(self.place_chained(input, &digest, initial)),
            Strategy::LinearProbing => {
                self.place_probed(input, &digest, initial, 1, Strategy::LinearProbing)
            }
            Strategy::DoubleHashing => {
                let step = digest::step_size(input.as_bytes(), self.node_count());
                self.place_probed(input, &digest, initial, step, Strategy::DoubleHashing)
            }
        }
    }

    /// Chaining: append to the initial node's chain. Never relocates,
    /// never rejects; capacity is advisory here.
    fn place_chained(&mut self, input: &str, digest: &Digest, initial: usize) -> Placement {
        let timestamp = now_millis();
        let node = self.node_mut(initial);
        let is_collision = !node.chain.is_empty();
        let item = StorageItem {
            id: digest.to_hex(),
            content: input.to_string(),
            timestamp,
            size: ITEM_SIZE,
            original_location: node.name.clone(),
            step_size: None,
            probe_sequence: None,
        };
        node.chain.push(item);
        node.used_capacity += ITEM_SIZE;
        Placement {
            digest: digest.to_hex(),
            node_id: node.id,
            location: node.name.clone(),
            original_location: node.name.clone(),
            is_collision,
            strategy: Strategy::Chaining,
            step_size: None,
            probe_sequence: None,
            timestamp,
        }
    }

    /// Open addressing: probe from the initial index with the given
    /// stride for at most `node_count` attempts. The first node with
    /// free capacity accepts the item; a relocated item increments the
    /// accepting node's collision counter.
    fn place_probed(
        &mut self,
        input: &str,
        digest: &Digest,
        initial: usize,
        step: usize,
        strategy: Strategy,
    ) -> Result<Placement> {
        let n = self.node_count();
        let original_location = self.node(initial).name.clone();
        // Stride is fixed for the whole probe sequence of this insertion.
        let record_step = (strategy == Strategy::DoubleHashing).then_some(step);

        for attempt in 0..n {
            let index = (initial + attempt * step) % n;
            if !self.node(index).has_free_capacity() {
                continue;
            }
            let is_collision = index != initial;
            let probe_sequence = record_step.map(|_| attempt + 1);
            let timestamp = now_millis();
            let item = StorageItem {
                id: digest.to_hex(),
                content: input.to_string(),
                timestamp,
                size: ITEM_SIZE,
                original_location: original_location.clone(),
                step_size: record_step,
                probe_sequence,
            };
            let node = self.node_mut(index);
            node.used_capacity += ITEM_SIZE;
            node.stored_items.push(item);
            if is_collision {
                node.collisions += 1;
            }
            return Ok(Placement {
                digest: digest.to_hex(),
                node_id: node.id,
                location: node.name.clone(),
                original_location,
                is_collision,
                strategy,
                step_size: record_step,
                probe_sequence,
                timestamp,
            });
        }
        Err(Error::TableFull)
    }
}
