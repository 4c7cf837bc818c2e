use std::{fmt::Debug, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};

/// A validator identifier.
pub trait ValidatorIdT: Eq + Ord + Clone + Debug + Hash + Serialize + DeserializeOwned {}
impl<VID> ValidatorIdT for VID where VID: Eq + Ord + Clone + Debug + Hash + Serialize + DeserializeOwned
{}

/// A hash, as an identifier for a block.
pub trait HashT: Eq + Ord + Clone + Debug + Hash + Serialize + DeserializeOwned {}
impl<H> HashT for H where H: Eq + Ord + Clone + Debug + Hash + Serialize + DeserializeOwned {}

/// The collection of types the instantiating chain chooses for validator
/// identities and block hashes.
// These trait bounds make `#[derive(...)]` work for types with a `C: Context`
// type parameter.
pub trait Context: Clone + Debug + Eq + Ord + Hash {
    /// Unique identifiers for validators.
    type ValidatorId: ValidatorIdT;
    /// Unique identifiers for blocks.
    type Hash: HashT;
}
