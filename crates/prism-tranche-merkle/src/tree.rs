use solana_pubkey::Pubkey;
use tracing::debug;

use crate::{AllocationHasher, AllocationLeaf, MerkleError, MerkleResult};

/// An immutable binary merkle tree over a tranche's allocation list.
///
/// All layers live back-to-back in one arena (`nodes`); `layer_offsets[i]` is
/// where layer `i` starts and the final entry is `nodes.len()`. Layer 0 holds
/// the sorted, deduplicated leaf hashes and the last layer holds the root.
///
/// The tree is built once and never mutated, so a proof can never be taken
/// against a stale copy of the layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationTree {
    nodes: Vec<[u8; 32]>,
    layer_offsets: Vec<usize>,
}

impl AllocationTree {
    /// Build a tree from `(recipient, amount)` pairs.
    ///
    /// Input order does not matter and exact duplicate pairs collapse into a
    /// single leaf, so every party that builds from the same allocation list
    /// derives the same root.
    pub fn from_allocations<I>(allocations: I) -> MerkleResult<Self>
    where
        I: IntoIterator<Item = (Pubkey, u128)>,
    {
        let leaf_hashes = allocations
            .into_iter()
            .map(|(recipient, amount)| AllocationLeaf::new(recipient, amount).to_hash())
            .collect();

        Self::from_leaf_hashes(leaf_hashes)
    }

    /// Build a tree from already-constructed leaves.
    pub fn from_leaves(leaves: &[AllocationLeaf]) -> MerkleResult<Self> {
        Self::from_leaf_hashes(leaves.iter().map(AllocationLeaf::to_hash).collect())
    }

    /// Build a tree from leaf hashes. Hashes are sorted and deduplicated first.
    pub fn from_leaf_hashes(mut leaf_hashes: Vec<[u8; 32]>) -> MerkleResult<Self> {
        if leaf_hashes.is_empty() {
            return Err(MerkleError::EmptyAllocation);
        }

        leaf_hashes.sort_unstable();
        leaf_hashes.dedup();

        let leaf_count = leaf_hashes.len();
        let mut nodes = leaf_hashes;
        // Upper layers hold about as many nodes again as the leaf layer
        nodes.reserve(leaf_count);

        let mut layer_offsets = vec![0, leaf_count];
        let mut start = 0;
        let mut end = leaf_count;

        while end - start > 1 {
            for i in (start..end).step_by(2) {
                let parent = if i + 1 < end {
                    AllocationHasher::hash_pair(&nodes[i], &nodes[i + 1])
                } else {
                    nodes[i]
                };
                nodes.push(parent);
            }

            start = end;
            end = nodes.len();
            layer_offsets.push(end);
        }

        let tree = Self {
            nodes,
            layer_offsets,
        };
        debug!(
            leaf_count,
            layer_count = tree.layer_count(),
            "Built allocation tree"
        );

        Ok(tree)
    }

    pub fn root(&self) -> [u8; 32] {
        // Never empty: construction rejects an empty leaf set
        self.nodes[self.nodes.len() - 1]
    }

    /// Sorted, deduplicated leaf hashes (layer 0).
    pub fn leaves(&self) -> &[[u8; 32]] {
        self.layer(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.layer_offsets[1]
    }

    /// Number of layers including the leaf layer and the root layer.
    pub fn layer_count(&self) -> usize {
        self.layer_offsets.len() - 1
    }

    /// Layer `index`, leaves first. Panics if `index >= layer_count()`.
    pub fn layer(&self, index: usize) -> &[[u8; 32]] {
        &self.nodes[self.layer_offsets[index]..self.layer_offsets[index + 1]]
    }

    /// Iterate over all layers from the leaves up to the root.
    pub fn layers(&self) -> impl Iterator<Item = &[[u8; 32]]> + '_ {
        (0..self.layer_count()).map(move |index| self.layer(index))
    }

    /// Position of a leaf hash in layer 0, if present.
    pub fn leaf_index(&self, leaf_hash: &[u8; 32]) -> Option<usize> {
        self.leaves().binary_search(leaf_hash).ok()
    }

    pub fn contains(&self, recipient: &Pubkey, amount: u128) -> bool {
        let leaf_hash = AllocationLeaf::new(*recipient, amount).to_hash();
        self.leaf_index(&leaf_hash).is_some()
    }

    /// Generate the proof for `(recipient, amount)`.
    ///
    /// The amount must match the committed leaf exactly; any other amount is
    /// reported as `LeafNotFound`.
    pub fn proof(&self, recipient: &Pubkey, amount: u128) -> MerkleResult<Vec<[u8; 32]>> {
        let leaf_hash = AllocationLeaf::new(*recipient, amount).to_hash();
        let index = self
            .leaf_index(&leaf_hash)
            .ok_or(MerkleError::LeafNotFound {
                recipient: *recipient,
                amount,
            })?;

        self.proof_for_leaf_index(index)
    }

    /// Collect sibling hashes from the leaf layer up to (excluding) the root.
    ///
    /// A node promoted without a sibling contributes nothing at that layer, so
    /// the proof can be shorter than `layer_count() - 1`.
    pub fn proof_for_leaf_index(&self, leaf_index: usize) -> MerkleResult<Vec<[u8; 32]>> {
        if leaf_index >= self.leaf_count() {
            return Err(MerkleError::InvalidLeafIndex {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.layer_count() - 1);
        let mut index = leaf_index;

        for layer in self.layers().take(self.layer_count() - 1) {
            if let Some(sibling) = layer.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }

        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{verify_allocation_proof, AllocationHasher};

    fn test_allocations() -> Vec<(Pubkey, u128)> {
        vec![
            (Pubkey::new_from_array([1; 32]), 100),
            (Pubkey::new_from_array([2; 32]), 200),
            (Pubkey::new_from_array([3; 32]), 50),
        ]
    }

    #[test]
    fn test_build_tree_layers() {
        let tree = AllocationTree::from_allocations(test_allocations()).unwrap();

        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.layer_count(), 3);
        assert_eq!(tree.layer(1).len(), 2);
        assert_eq!(tree.layer(2), &[tree.root()]);

        // Leaves are sorted
        let leaves = tree.leaves().to_vec();
        let mut sorted = leaves.clone();
        sorted.sort();
        assert_eq!(leaves, sorted);

        // Odd layer: the last leaf is promoted unchanged
        assert_eq!(tree.layer(1)[1], tree.leaves()[2]);
        assert_eq!(
            tree.layer(1)[0],
            AllocationHasher::hash_pair(&tree.leaves()[0], &tree.leaves()[1])
        );
    }

    #[test]
    fn test_known_root() {
        let tree = AllocationTree::from_allocations(test_allocations()).unwrap();
        assert_eq!(
            hex::encode(tree.root()),
            "67368f66165699a27dd5daf65d858dbd8c53dca204f189465f87e15fa763dcf7"
        );
    }

    #[test]
    fn test_single_leaf_tree() {
        let recipient = Pubkey::new_from_array([1; 32]);
        let tree = AllocationTree::from_allocations([(recipient, 100)]).unwrap();
        let leaf_hash = AllocationLeaf::new(recipient, 100).to_hash();

        assert_eq!(tree.root(), leaf_hash, "Single leaf tree root should be the leaf hash");
        assert_eq!(tree.layer_count(), 1);
        assert!(tree.proof(&recipient, 100).unwrap().is_empty());
        assert!(verify_allocation_proof(&tree.root(), &recipient, 100, &[]));
    }

    #[test]
    fn test_empty_allocation_error() {
        let result = AllocationTree::from_allocations(Vec::new());
        assert_eq!(result.unwrap_err(), MerkleError::EmptyAllocation);
    }

    #[test]
    fn test_duplicates_are_removed() {
        let mut allocations = test_allocations();
        allocations.push(allocations[0]);
        allocations.push(allocations[2]);

        let with_duplicates = AllocationTree::from_allocations(allocations).unwrap();
        let without = AllocationTree::from_allocations(test_allocations()).unwrap();

        assert_eq!(with_duplicates.leaf_count(), 3);
        assert_eq!(with_duplicates, without);
    }

    #[test]
    fn test_order_independence() {
        let mut reversed = test_allocations();
        reversed.reverse();

        let tree1 = AllocationTree::from_allocations(test_allocations()).unwrap();
        let tree2 = AllocationTree::from_allocations(reversed).unwrap();

        assert_eq!(tree1.root(), tree2.root());
    }

    #[test]
    fn test_proof_lengths() {
        let tree = AllocationTree::from_allocations(test_allocations()).unwrap();

        // Seeds 1 and 3 sort into the first pair, seed 2 is the promoted leaf
        assert_eq!(tree.proof(&Pubkey::new_from_array([1; 32]), 100).unwrap().len(), 2);
        assert_eq!(tree.proof(&Pubkey::new_from_array([3; 32]), 50).unwrap().len(), 2);
        assert_eq!(tree.proof(&Pubkey::new_from_array([2; 32]), 200).unwrap().len(), 1);
    }

    #[test]
    fn test_proof_requires_exact_amount() {
        let tree = AllocationTree::from_allocations(test_allocations()).unwrap();
        let recipient = Pubkey::new_from_array([1; 32]);

        assert!(tree.contains(&recipient, 100));
        assert!(!tree.contains(&recipient, 101));
        assert_eq!(
            tree.proof(&recipient, 101).unwrap_err(),
            MerkleError::LeafNotFound {
                recipient,
                amount: 101
            }
        );
    }

    #[test]
    fn test_invalid_leaf_index() {
        let tree = AllocationTree::from_allocations(test_allocations()).unwrap();
        assert_eq!(
            tree.proof_for_leaf_index(3).unwrap_err(),
            MerkleError::InvalidLeafIndex {
                index: 3,
                leaf_count: 3
            }
        );
    }

    #[test]
    fn test_matches_rs_merkle_root() {
        for count in 1..=17u8 {
            let allocations: Vec<(Pubkey, u128)> = (0..count)
                .map(|i| (Pubkey::new_from_array([i; 32]), (i as u128 + 1) * 1_000))
                .collect();
            let tree = AllocationTree::from_allocations(allocations).unwrap();

            let reference =
                rs_merkle::MerkleTree::<AllocationHasher>::from_leaves(tree.leaves());

            assert_eq!(
                reference.root(),
                Some(tree.root()),
                "Root should match rs_merkle for {} leaves",
                count
            );
        }
    }

    #[test]
    fn test_large_tree_proofs() {
        let allocations: Vec<(Pubkey, u128)> = (0..100u8)
            .map(|i| (Pubkey::new_from_array([i; 32]), i as u128 * 7))
            .collect();
        let tree = AllocationTree::from_allocations(allocations.clone()).unwrap();

        for (recipient, amount) in allocations {
            let proof = tree.proof(&recipient, amount).unwrap();
            assert!(proof.len() <= 7, "100 leaves need at most 7 siblings");
            assert!(
                verify_allocation_proof(&tree.root(), &recipient, amount, &proof),
                "Proof for {} should be valid",
                recipient
            );
        }
    }
}
