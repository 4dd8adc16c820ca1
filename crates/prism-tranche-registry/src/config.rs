/// Configuration for a [`TrancheRegistry`](crate::TrancheRegistry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Whether `seed` requires the ledger to hold at least the tranche total
    pub verify_funding_before_seed: bool,

    /// Longest proof accepted; longer proofs are rejected without hashing.
    /// 64 siblings cover any tree addressable with a u64 leaf index.
    pub max_proof_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            verify_funding_before_seed: true,
            max_proof_len: 64,
        }
    }
}
