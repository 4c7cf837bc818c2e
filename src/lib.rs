//! # Equivocation detection for a Casper message DAG
//!
//! Validators in a Casper-style protocol extend a linear personal chain of
//! blocks, numbered by a per-validator sequence number, and every block cites
//! the latest block its creator had seen from each other validator (its
//! justifications). A validator that issues two distinct blocks with the same
//! sequence number has *equivocated*: its chain has forked.
//!
//! This crate answers two questions about every block entering the local view:
//!
//! * Does the block itself fork its creator's chain, and if so must it be
//!   accommodated (something pending already depends on it) or can it be
//!   discarded? See [`EquivocationDetector::classify`].
//! * Does the block's justification cone prove a previously recorded
//!   equivocation that the block failed to slash? Neglecting known evidence is
//!   itself a protocol violation. See [`EquivocationDetector::check_neglect`].
//!
//! Block storage, the latest-message index and the pending-dependency query
//! are supplied by the embedding node through [`DagView`]; the set of known
//! equivocations lives in the shared [`EquivocationTracker`].

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod block;
mod dag;
mod detector;
mod error;
mod tracker;
mod traits;
mod weight;

pub use block::{Block, Justification};
pub use dag::DagView;
pub use detector::{EquivocationDetector, LocalVerdict, NeglectVerdict};
pub use error::DagError;
pub use tracker::{EquivocationRecord, EquivocationTracker};
pub use traits::{Context, HashT, ValidatorIdT};
pub use weight::Weight;
