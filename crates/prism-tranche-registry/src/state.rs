use solana_pubkey::Pubkey;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrancheStatus {
    #[default]
    Active, // Seeded and accepting claims
    Expired, // Terminal: claims rejected, never reactivated
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tranche {
    /// Position in the registry; dense and assigned in seeding order from 0.
    pub index: u64,

    /// Root of the tranche's allocation tree. Never changes after seeding.
    pub merkle_root: [u8; 32],

    /// Sum of every allocation committed to by `merkle_root`, in base units.
    pub total_allocation: u128,

    pub status: TrancheStatus,
}

impl Tranche {
    pub fn is_active(&self) -> bool {
        self.status == TrancheStatus::Active
    }

    pub fn is_expired(&self) -> bool {
        self.status == TrancheStatus::Expired
    }
}

/// Key of the claimed-flag table: one flag per (tranche, recipient).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimKey {
    pub tranche: u64,
    pub recipient: Pubkey,
}

impl ClaimKey {
    pub fn new(tranche: u64, recipient: Pubkey) -> Self {
        Self { tranche, recipient }
    }
}

/// One entry of a multi-tranche claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrancheClaim {
    pub tranche: u64,
    pub amount: u128,
    pub proof: Vec<[u8; 32]>,
}

/// The transfer a successful claim handed to the token ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferInstruction {
    pub recipient: Pubkey,
    pub amount: u128,
    /// Tranches whose claimed flags this transfer settled.
    pub tranches: Vec<u64>,
}
