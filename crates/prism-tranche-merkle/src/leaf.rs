use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use crate::AllocationHasher;

/// Length of a Borsh-encoded [`AllocationLeaf`]: 32 byte pubkey + 16 byte u128.
pub const LEAF_PREIMAGE_LEN: usize = 48;

/// Represents the data that is hashed to form a leaf in an allocation tree.
/// Each leaf corresponds to one recipient's allocation within a tranche.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AllocationLeaf {
    /// The public key of the recipient.
    pub recipient: Pubkey,
    /// Allocated amount in base units (fixed-point, token decimals implied).
    pub amount: u128,
}

impl AllocationLeaf {
    pub fn new(recipient: Pubkey, amount: u128) -> Self {
        Self { recipient, amount }
    }

    /// The leaf preimage: identical to the Borsh encoding of `self`.
    pub fn to_bytes(&self) -> [u8; LEAF_PREIMAGE_LEN] {
        let mut bytes = [0u8; LEAF_PREIMAGE_LEN];
        bytes[..32].copy_from_slice(self.recipient.as_ref());
        bytes[32..].copy_from_slice(&self.amount.to_le_bytes());
        bytes
    }

    pub fn to_hash(&self) -> [u8; 32] {
        hash_allocation_leaf(self)
    }
}

/// Hashes an `AllocationLeaf` to produce a 32-byte hash suitable for tree construction.
/// This follows our hashing scheme: SHA256(borsh_serialized_leaf_data).
pub fn hash_allocation_leaf(leaf: &AllocationLeaf) -> [u8; 32] {
    AllocationHasher::hash_bytes(&leaf.to_bytes())
}
