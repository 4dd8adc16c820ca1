use solana_pubkey::Pubkey;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u128, available: u128 },

    #[error("Ledger transfer failed: {0}")]
    TransferFailed(String),
}

/// The token ledger the registry pays claims from.
///
/// The registry only calls `transfer` after a claim passes every check, and
/// only records the claim once `transfer` returns `Ok`. Durability and retries
/// belong to the implementation.
pub trait TokenLedger: Send + Sync {
    /// Funds currently available to the registry (the funding source for seeding).
    fn available_balance(&self) -> u128;

    fn transfer(&self, recipient: &Pubkey, amount: u128) -> Result<(), LedgerError>;
}

impl<L: TokenLedger + ?Sized> TokenLedger for Arc<L> {
    fn available_balance(&self) -> u128 {
        (**self).available_balance()
    }

    fn transfer(&self, recipient: &Pubkey, amount: u128) -> Result<(), LedgerError> {
        (**self).transfer(recipient, amount)
    }
}
