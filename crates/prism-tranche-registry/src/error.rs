use solana_pubkey::Pubkey;
use thiserror::Error;

use crate::LedgerError;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tranche {0} does not exist.")]
    TrancheNotFound(u64),

    #[error("Tranche {0} has expired.")]
    TrancheExpired(u64),

    #[error("Recipient {recipient} has already claimed tranche {tranche}.")]
    AlreadyClaimed { tranche: u64, recipient: Pubkey },

    #[error("Claim amount must be greater than zero.")]
    ZeroAmount,

    #[error("Invalid Merkle proof provided.")]
    InvalidProof,

    #[error("Tranche total allocation must be greater than zero.")]
    ZeroAllocation,

    #[error("{0} is not authorized to administer tranches.")]
    Unauthorized(Pubkey),

    #[error("Claim amounts overflow u128.")]
    AmountOverflow,

    #[error("Invalid tranche range {begin}..{end} (tranche count {count}).")]
    InvalidRange { begin: u64, end: u64, count: u64 },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
