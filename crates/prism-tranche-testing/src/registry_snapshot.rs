use std::collections::HashMap;

use prism_tranche_registry::TrancheStatus;
use solana_pubkey::Pubkey;

use crate::TestFixture;

/// Registry and ledger state for before/after comparisons.
///
/// **Use cases:**
/// - Verify a rejected claim or admin action changed nothing
/// - Verify a claim only touched the expected tranche and recipient
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Remaining funding balance of the ledger
    pub ledger_balance: u128,
    pub tranche_statuses: Vec<TrancheStatus>,
    pub claimed_amounts: Vec<u128>,
    /// Claimed flags per tracked recipient, one entry per tranche
    pub claim_status: HashMap<Pubkey, Vec<bool>>,
    /// Balances received by tracked recipients
    pub recipient_balances: HashMap<Pubkey, u128>,
}

impl RegistrySnapshot {
    pub fn capture(test: &TestFixture) -> Self {
        Self::capture_with_claimants(test, &[])
    }

    pub fn capture_with_claimants(test: &TestFixture, claimants: &[Pubkey]) -> Self {
        let registry = &test.registry;
        let tranches = registry.tranches();
        let count = tranches.len() as u64;

        let claim_status = claimants
            .iter()
            .map(|claimant| {
                let status = registry
                    .claim_status(claimant, 0, count)
                    .expect("full range is always valid");
                (*claimant, status)
            })
            .collect();

        let recipient_balances = claimants
            .iter()
            .map(|claimant| (*claimant, test.ledger.balance_of(claimant)))
            .collect();

        Self {
            ledger_balance: test.ledger.balance(),
            tranche_statuses: tranches.iter().map(|tranche| tranche.status).collect(),
            claimed_amounts: (0..count).map(|i| registry.claimed_amount(i)).collect(),
            claim_status,
            recipient_balances,
        }
    }
}
