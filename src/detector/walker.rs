//! The justification scan that decides whether a block can prove a recorded
//! equivocation.

use std::collections::BTreeSet;

use crate::{
    block::Block, dag::DagView, error::DagError, tracker::EquivocationRecord, traits::Context,
};

/// Returns whether `block`'s justification cone proves the recorded
/// equivocation, i.e. reaches a previously recorded witness, or two distinct
/// branches of the equivocator's chain above the fork point.
///
/// The justifications are scanned in order, fetching cited blocks on demand,
/// and the scan stops as soon as the equivocation is proven.
pub(super) async fn proves_equivocation<C: Context, D: DagView<C>>(
    dag: &D,
    record: &EquivocationRecord<C>,
    block: &Block<C>,
) -> Result<bool, DagError<C>> {
    // Hashes of the blocks sitting immediately above the fork point, one per
    // branch observed so far.
    let mut branch_children = BTreeSet::new();
    for justification in block.justifications() {
        if record.witnesses.contains(justification.hash()) {
            return Ok(true);
        }
        let cited = fetch(dag, justification.hash()).await?;
        if let Some(candidate) = latest_from_equivocator(dag, record, &cited).await? {
            branch_children.insert(branch_child(dag, record, candidate).await?);
            if branch_children.len() > 1 {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Returns the latest block from the equivocator reachable through `cited`,
/// provided it sits above the fork point.
///
/// A block authored by the equivocator speaks for itself. Any other block
/// must name the equivocator in its own justifications; a block that does
/// neither, and is not a recorded witness, violates the DAG's invariants.
async fn latest_from_equivocator<C: Context, D: DagView<C>>(
    dag: &D,
    record: &EquivocationRecord<C>,
    cited: &Block<C>,
) -> Result<Option<Block<C>>, DagError<C>> {
    let candidate = if *cited.creator() == record.equivocator {
        cited.clone()
    } else {
        let hash = cited.justification_for(&record.equivocator).ok_or_else(|| {
            DagError::MissingEquivocatorJustification {
                block: cited.hash().clone(),
                validator: record.equivocator.clone(),
            }
        })?;
        fetch(dag, hash).await?
    };
    if candidate.seq_number() > record.base_seq_number {
        Ok(Some(candidate))
    } else {
        // The candidate predates the fork, or is its base.
        Ok(None)
    }
}

/// Canonicalizes `candidate` to its ancestor sitting immediately above the
/// fork point, descending the creator's own chain.
///
/// Two blocks at different sequence numbers can belong to the same branch;
/// comparing the ancestors at `base_seq_number + 1` makes "more than one
/// child" equivalent to "more than one branch".
async fn branch_child<C: Context, D: DagView<C>>(
    dag: &D,
    record: &EquivocationRecord<C>,
    candidate: Block<C>,
) -> Result<C::Hash, DagError<C>> {
    let target = record.base_seq_number + 1;
    let mut child = candidate;
    loop {
        if child.seq_number() == target {
            return Ok(child.hash().clone());
        }
        let previous = match child.creator_justification() {
            Some(hash) if child.seq_number() > target => fetch(dag, hash).await?,
            // The block immediately above the fork point was admitted before
            // any of its descendants, so a chain that cannot be followed down
            // to it is corrupt.
            _ => {
                return Err(DagError::MissingBranchAncestor {
                    block: child.hash().clone(),
                    seq_number: target,
                })
            }
        };
        child = previous;
    }
}

/// Looks up a block that the DAG's invariants say must exist.
async fn fetch<C: Context, D: DagView<C>>(
    dag: &D,
    hash: &C::Hash,
) -> Result<Block<C>, DagError<C>> {
    dag.fetch_block(hash)
        .await
        .ok_or_else(|| DagError::MissingBlock { hash: hash.clone() })
}
