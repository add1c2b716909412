//! Probelab Engine
//!
//! The hashing and placement core of Probelab: an educational
//! simulation of hash-table insertion with pluggable
//! collision-resolution strategies over a fixed set of storage nodes.
//!
//! # Design
//!
//! Inputs are hashed with SHA-256 and truncated to an 8-hex-character
//! digest. The digest maps deterministically to an initial bucket via
//! modular reduction. On capacity conflict, one of three classic
//! strategies resolves the collision:
//!
//! - **Chaining**: append to an unbounded per-node chain.
//! - **Linear probing**: scan forward one bucket at a time.
//! - **Double hashing**: scan with a per-input stride mixed from two
//!   independent digest algorithms.
//!
//! The [`BucketTable`] owns all nodes and items. Callers interact
//! through explicit results and projections, never references into the
//! table, so independent tables (e.g. one per test) are cheap.
//!
//! # Example
//!
//! ```
//! use probelab_engine::{BucketTable, Strategy};
//!
//! let mut table = BucketTable::new(4, 3);
//! let placement = table.insert("hello", Strategy::Chaining)?;
//! assert!(!placement.is_collision);
//! # Ok::<(), probelab_engine::Error>(())
//! ```

mod digest;
mod error;
mod placement;
mod table;

pub use digest::{step_size, Digest};
pub use error::{Error, Result};
pub use placement::{Placement, Strategy};
pub use table::{BucketTable, NodeDetail, NodeSummary, StorageItem, StorageNode, ITEM_SIZE};
