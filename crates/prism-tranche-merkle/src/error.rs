use solana_pubkey::Pubkey;
use thiserror::Error;

pub type MerkleResult<T> = Result<T, MerkleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// An allocation tree needs at least one leaf; an empty list is a configuration error.
    #[error("Cannot build an allocation tree from an empty allocation list")]
    EmptyAllocation,

    #[error("No leaf for recipient {recipient} with amount {amount}")]
    LeafNotFound { recipient: Pubkey, amount: u128 },

    #[error("Invalid leaf index {index} (tree has {leaf_count} leaves)")]
    InvalidLeafIndex { index: usize, leaf_count: usize },
}
