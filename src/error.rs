use thiserror::Error;

use crate::traits::Context;

/// A fatal inconsistency in the locally stored DAG.
///
/// Justifications of an admitted block are resolved before admission, so any
/// of these indicates corrupt storage or a protocol-level bug; processing of
/// the current block must halt, and no local recovery is attempted.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DagError<C: Context> {
    /// A cited block could not be found in the block store.
    #[error("justification cone cites block {hash:?}, which is not in storage")]
    MissingBlock {
        /// Hash of the block that could not be resolved.
        hash: C::Hash,
    },
    /// A block inside the cone neither witnesses the equivocation nor names a
    /// latest block for the equivocator.
    #[error("block {block:?} carries no justification for validator {validator:?}")]
    MissingEquivocatorJustification {
        /// The offending block.
        block: C::Hash,
        /// The validator whose latest message is unaccounted for.
        validator: C::ValidatorId,
    },
    /// A creator chain could not be followed down to the block immediately
    /// above the fork point.
    #[error("no ancestor of block {block:?} at sequence number {seq_number}")]
    MissingBranchAncestor {
        /// The block whose chain was being descended.
        block: C::Hash,
        /// The sequence number at which an ancestor was expected.
        seq_number: u64,
    },
}
