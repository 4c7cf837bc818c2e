use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    sync::{Arc, RwLock},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::traits::Context;

/// A known equivocation: a validator whose personal chain has forked, and
/// where it forked.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::ValidatorId: Serialize, C::Hash: Serialize",
    deserialize = "C::ValidatorId: Deserialize<'de>, C::Hash: Deserialize<'de>",
))]
pub struct EquivocationRecord<C: Context> {
    /// The validator that produced two distinct blocks with the same
    /// sequence number.
    pub equivocator: C::ValidatorId,
    /// Sequence number of the last block common to both branches; the
    /// colliding blocks sit at `base_seq_number + 1`.
    pub base_seq_number: u64,
    /// Blocks whose justification cones are known to prove the equivocation.
    pub witnesses: BTreeSet<C::Hash>,
}

/// The shared set of outstanding equivocation records.
///
/// Cheap to clone; all clones operate on the same records. There is at most
/// one record per `(equivocator, base_seq_number)` pair, records are never
/// removed, and a record's witness set only grows.
#[derive(Clone, Debug)]
pub struct EquivocationTracker<C: Context> {
    records: Arc<RwLock<BTreeMap<(C::ValidatorId, u64), BTreeSet<C::Hash>>>>,
}

impl<C: Context> EquivocationTracker<C> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        EquivocationTracker {
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Registers a fork of `equivocator`'s chain at `base_seq_number`, with
    /// no witnesses. Returns `false` if that fork was already recorded.
    pub fn insert(&self, equivocator: C::ValidatorId, base_seq_number: u64) -> bool {
        let mut records = self.records.write().unwrap();
        match records.entry((equivocator, base_seq_number)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                trace!(
                    equivocator = ?vacant.key().0,
                    base_seq_number,
                    "recording equivocation"
                );
                vacant.insert(BTreeSet::new());
                true
            }
        }
    }

    /// Takes a consistent view of all records for a single detection pass.
    ///
    /// Records inserted while a pass is running are not seen by that pass;
    /// they are considered for the next block.
    pub fn snapshot(&self) -> Vec<EquivocationRecord<C>> {
        let records = self.records.read().unwrap();
        records
            .iter()
            .map(|((equivocator, base_seq_number), witnesses)| EquivocationRecord {
                equivocator: equivocator.clone(),
                base_seq_number: *base_seq_number,
                witnesses: witnesses.clone(),
            })
            .collect_vec()
    }

    /// Replaces the witness set of the record for
    /// `(equivocator, base_seq_number)`.
    ///
    /// The stored set becomes the union of the current and the given set, so
    /// a witness added by a racing pass is never lost: witness knowledge only
    /// grows. Does nothing if no such record exists.
    pub fn replace_witnesses(
        &self,
        equivocator: &C::ValidatorId,
        base_seq_number: u64,
        witnesses: BTreeSet<C::Hash>,
    ) {
        let mut records = self.records.write().unwrap();
        if let Some(current) = records.get_mut(&(equivocator.clone(), base_seq_number)) {
            current.extend(witnesses);
        }
    }

    /// Returns the number of outstanding records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Returns `true` if no equivocation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

impl<C: Context> Default for EquivocationTracker<C> {
    fn default() -> Self {
        Self::new()
    }
}
