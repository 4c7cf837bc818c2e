use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{traits::Context, weight::Weight};

/// A single justification: the latest block the creator had seen from
/// `validator` when the citing block was created.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::ValidatorId: Serialize, C::Hash: Serialize",
    deserialize = "C::ValidatorId: Deserialize<'de>, C::Hash: Deserialize<'de>",
))]
pub struct Justification<C: Context> {
    validator: C::ValidatorId,
    hash: C::Hash,
}

impl<C: Context> Justification<C> {
    /// Creates a justification naming `hash` as the latest block seen from
    /// `validator`.
    pub fn new(validator: C::ValidatorId, hash: C::Hash) -> Self {
        Justification { validator, hash }
    }

    /// The validator whose latest message this justification names.
    pub fn validator(&self) -> &C::ValidatorId {
        &self.validator
    }

    /// The hash of the cited block.
    pub fn hash(&self) -> &C::Hash {
        &self.hash
    }
}

/// The attributes of a block that equivocation detection consumes.
///
/// Blocks are produced and stored elsewhere; this type is a read-only
/// projection. The justification sequence is ordered and carries at most one
/// entry per validator, and `bonds` is the bonded validator set as of this
/// block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::ValidatorId: Serialize, C::Hash: Serialize",
    deserialize = "C::ValidatorId: Deserialize<'de>, C::Hash: Deserialize<'de>",
))]
pub struct Block<C: Context> {
    hash: C::Hash,
    creator: C::ValidatorId,
    seq_number: u64,
    justifications: Vec<Justification<C>>,
    bonds: BTreeMap<C::ValidatorId, Weight>,
}

impl<C: Context> Block<C> {
    /// Creates a block from its constituent parts.
    pub fn new(
        hash: C::Hash,
        creator: C::ValidatorId,
        seq_number: u64,
        justifications: Vec<Justification<C>>,
        bonds: BTreeMap<C::ValidatorId, Weight>,
    ) -> Self {
        Block {
            hash,
            creator,
            seq_number,
            justifications,
            bonds,
        }
    }

    /// The block's hash.
    pub fn hash(&self) -> &C::Hash {
        &self.hash
    }

    /// The validator that created the block.
    pub fn creator(&self) -> &C::ValidatorId {
        &self.creator
    }

    /// The creator's personal sequence number for this block.
    pub fn seq_number(&self) -> u64 {
        self.seq_number
    }

    /// The blocks the creator cited, in order.
    pub fn justifications(&self) -> &[Justification<C>] {
        &self.justifications
    }

    /// The justification naming the creator's own previous block, if the
    /// block carries one.
    pub fn creator_justification(&self) -> Option<&C::Hash> {
        self.justification_for(&self.creator)
    }

    /// The hash of the latest block the creator saw from `validator`, if
    /// cited at all.
    pub fn justification_for(&self, validator: &C::ValidatorId) -> Option<&C::Hash> {
        self.justifications
            .iter()
            .find(|justification| justification.validator() == validator)
            .map(|justification| justification.hash())
    }

    /// The stake bonded by `validator` as of this block, or `None` if the
    /// validator is not in the bond table.
    pub fn bond(&self, validator: &C::ValidatorId) -> Option<Weight> {
        self.bonds.get(validator).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::detector::tests::{block, ALICE, BOB, CAROL};

    #[test]
    fn justification_lookup() {
        let b = block(0xB2, BOB, 2, &[(BOB, 0xB1), (ALICE, 0xA1)]);
        assert_eq!(Some(&0xB1), b.creator_justification());
        assert_eq!(Some(&0xA1), b.justification_for(&ALICE));
        assert_eq!(None, b.justification_for(&CAROL));
    }

    #[test]
    fn missing_creator_justification() {
        let b = block(0xB1, BOB, 1, &[(ALICE, 0xA1)]);
        assert_eq!(None, b.creator_justification());
    }
}
