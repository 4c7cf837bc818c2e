mod walker;


use tracing::{info, trace, warn};

use crate::{
    block::Block,
    dag::DagView,
    error::DagError,
    tracker::{EquivocationRecord, EquivocationTracker},
    traits::Context,
};

/// The relation of an incoming block to its creator's chain in the local
/// view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocalVerdict {
    /// The block linearly extends the chain of its creator.
    Valid,
    /// The block forks its creator's chain, but some pending block has
    /// already requested it as a dependency, so it must be accommodated.
    AdmissibleEquivocation,
    /// The block forks its creator's chain and nothing depends on it; it can
    /// be discarded.
    IgnorableEquivocation,
}

/// The outcome of checking a block against all outstanding equivocation
/// records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NeglectVerdict<C: Context> {
    /// The block neglects no known equivocation.
    Valid,
    /// The block could have slashed the recorded equivocator, but did not.
    /// This invalidates the block.
    NeglectedEquivocation(EquivocationRecord<C>),
}

/// What a single block's justification cone reveals about one equivocation
/// record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DiscoveryStatus {
    /// The block can prove the equivocation and did not slash it.
    Neglected,
    /// The block has acknowledged the equivocation.
    Detected,
    /// The block cannot see the equivocation yet.
    Oblivious,
}

/// Detects equivocations in incoming blocks and polices neglect of known
/// ones.
///
/// Cheap to clone; all clones operate on the same record store.
#[derive(Clone, Debug)]
pub struct EquivocationDetector<C: Context> {
    tracker: EquivocationTracker<C>,
}

impl<C: Context> EquivocationDetector<C> {
    /// Creates a detector over the given record store.
    ///
    /// The store is shared: the outer pipeline keeps its own handle and
    /// inserts records through [`record_equivocation`] when it escalates an
    /// admissible equivocation.
    ///
    /// [`record_equivocation`]: EquivocationDetector::record_equivocation
    pub fn new(tracker: EquivocationTracker<C>) -> Self {
        EquivocationDetector { tracker }
    }

    /// The record store this detector operates on.
    pub fn tracker(&self) -> &EquivocationTracker<C> {
        &self.tracker
    }

    /// Classifies a fresh block against the locally known chain of its
    /// creator.
    ///
    /// A block whose creator justification matches the latest message known
    /// from the same creator cannot be branching the creator's chain. Any
    /// mismatch means the creator forked, or the local view is stale; either
    /// way the block is only acceptable if some pending block has already
    /// requested it as a dependency.
    ///
    /// Performs no fetches and never touches the record store. Escalating an
    /// [`LocalVerdict::AdmissibleEquivocation`] into a record is the caller's
    /// move.
    pub fn classify<D: DagView<C>>(&self, dag: &D, block: &Block<C>) -> LocalVerdict {
        let latest_message = dag.latest_messages().get(block.creator()).cloned();
        if block.creator_justification().cloned() == latest_message {
            return LocalVerdict::Valid;
        }
        if dag.is_requested_as_dependency(block.hash()) {
            info!(
                block = ?block.hash(),
                creator = ?block.creator(),
                "block equivocates, but is a requested dependency"
            );
            LocalVerdict::AdmissibleEquivocation
        } else {
            warn!(
                block = ?block.hash(),
                creator = ?block.creator(),
                "ignoring equivocating block"
            );
            LocalVerdict::IgnorableEquivocation
        }
    }

    /// Registers a fork of `equivocator`'s chain at `base_seq_number`, the
    /// shared sequence number of the colliding blocks minus one.
    ///
    /// Called by the outer pipeline when it accepts an admissible
    /// equivocation. Returns `false` if that fork was already recorded.
    pub fn record_equivocation(&self, equivocator: C::ValidatorId, base_seq_number: u64) -> bool {
        self.tracker.insert(equivocator, base_seq_number)
    }

    /// Checks whether `block` neglects any recorded equivocation.
    ///
    /// Iterates over a snapshot of the record store. For every record, the
    /// block either proves the equivocation without having slashed it (the
    /// whole check fails), acknowledges it (the block is remembered as a
    /// witness), or cannot see it yet (nothing changes).
    ///
    /// May suspend at block-store fetches. An error means the DAG violates
    /// its own invariants; processing of the block must halt.
    pub async fn check_neglect<D: DagView<C>>(
        &self,
        dag: &D,
        block: &Block<C>,
    ) -> Result<NeglectVerdict<C>, DagError<C>> {
        for record in self.tracker.snapshot() {
            match discovery_status(dag, &record, block).await? {
                DiscoveryStatus::Neglected => {
                    warn!(
                        block = ?block.hash(),
                        equivocator = ?record.equivocator,
                        base_seq_number = record.base_seq_number,
                        "block neglects a known equivocation"
                    );
                    return Ok(NeglectVerdict::NeglectedEquivocation(record));
                }
                DiscoveryStatus::Detected => {
                    trace!(
                        block = ?block.hash(),
                        equivocator = ?record.equivocator,
                        "block witnesses a known equivocation"
                    );
                    let mut witnesses = record.witnesses;
                    witnesses.insert(block.hash().clone());
                    self.tracker.replace_witnesses(
                        &record.equivocator,
                        record.base_seq_number,
                        witnesses,
                    );
                }
                DiscoveryStatus::Oblivious => (),
            }
        }
        Ok(NeglectVerdict::Valid)
    }
}

/// Determines what `block` reveals about a single record.
///
/// The bond table is consulted first: by protocol rule a validator can only
/// leave the bond set through a slashing transaction, so a block whose bonds
/// no longer carry the equivocator has already acknowledged the fork, no
/// matter what it cites. Only a block that still bonds the equivocator has
/// its justification cone searched for proof.
async fn discovery_status<C: Context, D: DagView<C>>(
    dag: &D,
    record: &EquivocationRecord<C>,
    block: &Block<C>,
) -> Result<DiscoveryStatus, DagError<C>> {
    match block.bond(&record.equivocator) {
        None => Ok(DiscoveryStatus::Detected),
        // TODO: A zero stake should be impossible while bonded; treat it like
        // a dropped bond until the bonding contract enforces that.
        Some(stake) if stake.is_zero() => Ok(DiscoveryStatus::Detected),
        Some(_) => {
            if walker::proves_equivocation(dag, record, block).await? {
                Ok(DiscoveryStatus::Neglected)
            } else {
                Ok(DiscoveryStatus::Oblivious)
            }
        }
    }
}
