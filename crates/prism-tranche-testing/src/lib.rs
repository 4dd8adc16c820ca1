mod memory_ledger;
mod registry_snapshot;
mod test_fixture;

pub use memory_ledger::MemoryLedger;
pub use registry_snapshot::RegistrySnapshot;
pub use test_fixture::{TestFixture, TestRegistry};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use sha2::{Digest, Sha256};
use solana_pubkey::Pubkey;

pub const TOKEN_DECIMALS: u32 = prism_tranche_csvs::DEFAULT_TOKEN_DECIMALS;

/// Ledger funding used by `TestFixture::new()`: one million tokens
pub const DEFAULT_LEDGER_FUNDING: u128 = 1_000_000 * 10u128.pow(TOKEN_DECIMALS);

/// Whole tokens to base units
pub fn tokens(amount: u128) -> u128 {
    amount * 10u128.pow(TOKEN_DECIMALS)
}

/// Stable address for a named test participant: `SHA-256(name)`.
pub fn deterministic_pubkey(name: &str) -> Pubkey {
    Pubkey::new_from_array(Sha256::digest(name.as_bytes()).into())
}

/// Seeded shuffle, for checking results do not depend on input order.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut StdRng::seed_from_u64(seed));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_pubkey() {
        assert_eq!(deterministic_pubkey("alice"), deterministic_pubkey("alice"));
        assert_ne!(deterministic_pubkey("alice"), deterministic_pubkey("bob"));
        assert_eq!(
            deterministic_pubkey("alice").to_string(),
            "3x9az88Dkbxa6tkKByxqEn7jBTJCJCD4dVvou49L24ET"
        );
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut order = shuffled(&items, 7);
        assert_eq!(order, shuffled(&items, 7));
        order.sort();
        assert_eq!(order, items);
    }
}
