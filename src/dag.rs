use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{block::Block, traits::Context};

/// Read-only access to the locally known part of the message DAG.
///
/// Implemented by the embedding node over its block store, its latest-message
/// index and its buffer of pending blocks. `fetch_block` is the only
/// operation that may suspend; everything else answers from in-memory state.
#[async_trait]
pub trait DagView<C: Context>: Send + Sync {
    /// Looks up a block by hash.
    ///
    /// Returns `None` if the block store does not have the block. Since
    /// blocks are admitted only after their justifications are resolved, a
    /// `None` inside a justification cone is fatal for the caller.
    async fn fetch_block(&self, hash: &C::Hash) -> Option<Block<C>>;

    /// A snapshot of the latest block known from each validator.
    fn latest_messages(&self) -> BTreeMap<C::ValidatorId, C::Hash>;

    /// Returns whether some not-yet-admitted block has requested `hash` as a
    /// dependency.
    fn is_requested_as_dependency(&self, hash: &C::Hash) -> bool;
}
