use solana_pubkey::Pubkey;
use tracing::debug;

use crate::{AllocationHasher, AllocationLeaf};

/// Fold a proof onto a leaf hash and return the root it implies.
pub fn compute_root_from_proof(leaf_hash: &[u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(*leaf_hash, |running, sibling| {
            AllocationHasher::hash_pair(&running, sibling)
        })
}

/// Verify that `(recipient, amount)` is a member of the tree committed to by `root`.
///
/// Pure predicate with no index or leaf-count inputs: the commutative pairing
/// rule means the sibling list alone determines the path. This is the exact
/// check the tranche registry runs before releasing a claim.
pub fn verify_allocation_proof(
    root: &[u8; 32],
    recipient: &Pubkey,
    amount: u128,
    proof: &[[u8; 32]],
) -> bool {
    let leaf_hash = AllocationLeaf::new(*recipient, amount).to_hash();
    let verified = compute_root_from_proof(&leaf_hash, proof) == *root;

    debug!(%recipient, amount, proof_len = proof.len(), verified, "Verified allocation proof");
    verified
}

/// Batch verify multiple proofs against the same root
pub fn batch_verify_proofs(root: &[u8; 32], claims: &[(Pubkey, u128, &[[u8; 32]])]) -> Vec<bool> {
    claims
        .iter()
        .map(|(recipient, amount, proof)| verify_allocation_proof(root, recipient, *amount, proof))
        .collect()
}
