/*!
# Prism Tranche Merkle Trees

Builds the merkle commitment for one tranche's allocation list and produces and
checks membership proofs against it.

```rust
use prism_tranche_merkle::{verify_allocation_proof, AllocationTree};
use solana_pubkey::Pubkey;

let alice = Pubkey::new_from_array([1; 32]);
let bob = Pubkey::new_from_array([2; 32]);

let tree = AllocationTree::from_allocations([(alice, 100), (bob, 200)]).unwrap();
let proof = tree.proof(&alice, 100).unwrap();

assert!(verify_allocation_proof(&tree.root(), &alice, 100, &proof));
assert!(!verify_allocation_proof(&tree.root(), &alice, 101, &proof));
```
*/

mod error;
mod hasher;
mod leaf;
mod proof;
mod tree;

pub use error::{MerkleError, MerkleResult};
pub use hasher::AllocationHasher;
pub use leaf::{hash_allocation_leaf, AllocationLeaf, LEAF_PREIMAGE_LEN};
pub use proof::{batch_verify_proofs, compute_root_from_proof, verify_allocation_proof};
pub use tree::AllocationTree;

// Re-export key types from rs-merkle for convenience
pub use rs_merkle::{Hasher, MerkleTree};
