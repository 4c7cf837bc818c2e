use datasize::DataSize;
use serde::{Deserialize, Serialize};

/// A validator's bonded stake, as recorded in a block's bond table.
#[derive(
    Copy, Clone, DataSize, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize,
    Deserialize,
)]
pub struct Weight(pub u64);

impl Weight {
    /// Returns `true` if the stake is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}
