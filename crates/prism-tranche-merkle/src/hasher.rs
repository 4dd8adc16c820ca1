use rs_merkle::Hasher;
use sha2::{Digest, Sha256};

/// Merkle tree hasher for tranche allocation trees.
///
/// ## Hashing Scheme
///
/// - **Leaf nodes**: `SHA256(borsh(AllocationLeaf))`, a 48 byte preimage
///   (`recipient || amount_le`)
/// - **Internal nodes**: `SHA256(min(a, b) || max(a, b))`, a 64 byte preimage
/// - **Lone nodes**: the last node of an odd-sized layer is promoted unchanged
///
/// Sorting the pair before hashing makes the parent independent of which child
/// sits on the left, so proofs carry no position bits and verification is a
/// plain fold over the sibling list.
///
/// Leaf and internal preimages differ in length, which keeps a leaf hash from
/// ever being replayed as an internal node.
///
/// The lone-node rule is the same one `rs_merkle::MerkleTree` applies, so this
/// type doubles as an `rs_merkle::Hasher` and trees built with either must agree
/// on the root.
#[derive(Clone, Debug)]
pub struct AllocationHasher;

impl AllocationHasher {
    /// Hash an arbitrary byte string.
    pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    /// Hash two sibling nodes using the commutative pairing rule.
    pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };

        let mut hasher = Sha256::new();
        hasher.update(first);
        hasher.update(second);
        hasher.finalize().into()
    }
}

impl Hasher for AllocationHasher {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> [u8; 32] {
        Self::hash_bytes(data)
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right_hash) => Self::hash_pair(left, right_hash),
            // No right sibling: promote the left node unchanged
            None => *left,
        }
    }
}
