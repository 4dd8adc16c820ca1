use prism_tranche_merkle::verify_allocation_proof;
use solana_pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::{
    Authorizer, ClaimKey, LedgerError, RegistryConfig, RegistryError, RegistryResult,
    TokenLedger, Tranche, TrancheClaim, TrancheStatus, TransferInstruction,
};

/// Claimed flags plus per-tranche running totals.
#[derive(Debug, Default)]
struct ClaimBook {
    claimed: HashSet<ClaimKey>,
    claimed_amounts: HashMap<u64, u128>,
}

impl ClaimBook {
    fn is_claimed(&self, key: &ClaimKey) -> bool {
        self.claimed.contains(key)
    }

    fn record(&mut self, key: ClaimKey, amount: u128) {
        self.claimed.insert(key);
        let total = self.claimed_amounts.entry(key.tranche).or_default();
        *total = total.saturating_add(amount);
    }
}

/// Borrowed form of a claim, shared by the single and multi-tranche paths.
struct ClaimRequest<'a> {
    tranche: u64,
    amount: u128,
    proof: &'a [[u8; 32]],
}

/// Append-only set of tranches with exactly-once claims per (tranche, recipient).
///
/// ## Locking
///
/// - `tranches` (`RwLock`): claims and reads share it; `seed` and `expire` take
///   it exclusively, so an expiry can never land in the middle of a claim.
/// - `book` (`Mutex`): the claimed-flag check, the ledger transfer and the flag
///   write happen under one guard, so two claims for the same key cannot both
///   succeed. Proof hashing happens before this lock is taken.
///
/// Locks are always taken in that order. The ledger is called while `book` is
/// held and must not call back into the registry.
pub struct TrancheRegistry<L, A> {
    ledger: L,
    authorizer: A,
    config: RegistryConfig,
    tranches: RwLock<Vec<Tranche>>,
    book: Mutex<ClaimBook>,
}

impl<L: TokenLedger, A: Authorizer> TrancheRegistry<L, A> {
    /// Create a registry with default configuration
    pub fn new(ledger: L, authorizer: A) -> Self {
        Self::with_config(ledger, authorizer, RegistryConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(ledger: L, authorizer: A, config: RegistryConfig) -> Self {
        Self {
            ledger,
            authorizer,
            config,
            tranches: RwLock::new(Vec::new()),
            book: Mutex::new(ClaimBook::default()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    // ============================================================================================
    // Admin
    // ============================================================================================

    /// Append a new active tranche and return its index.
    ///
    /// With `verify_funding_before_seed` set, the ledger balance must cover the
    /// new total plus whatever active tranches still owe.
    pub fn seed(
        &self,
        authority: &Pubkey,
        merkle_root: [u8; 32],
        total_allocation: u128,
    ) -> RegistryResult<u64> {
        self.require_authorized(authority, "seed")?;

        if total_allocation == 0 {
            warn!(%authority, "Rejected seed with zero total allocation");
            return Err(RegistryError::ZeroAllocation);
        }

        let mut tranches = self.write_tranches();

        if self.config.verify_funding_before_seed {
            let outstanding = self.outstanding_commitment(&tranches)?;
            let required = outstanding
                .checked_add(total_allocation)
                .ok_or(RegistryError::AmountOverflow)?;
            let available = self.ledger.available_balance();
            if available < required {
                warn!(required, outstanding, available, "Rejected seed: ledger is underfunded");
                return Err(LedgerError::InsufficientFunds {
                    required,
                    available,
                }
                .into());
            }
        }

        let index = tranches.len() as u64;
        tranches.push(Tranche {
            index,
            merkle_root,
            total_allocation,
            status: TrancheStatus::Active,
        });

        info!(
            tranche = index,
            merkle_root = %hex::encode(merkle_root),
            total_allocation,
            "Seeded tranche"
        );

        Ok(index)
    }

    /// Permanently stop claims against a tranche. Expiring twice is an error.
    pub fn expire(&self, authority: &Pubkey, tranche: u64) -> RegistryResult<()> {
        self.require_authorized(authority, "expire")?;

        let mut tranches = self.write_tranches();
        let entry = usize::try_from(tranche)
            .ok()
            .and_then(|position| tranches.get_mut(position))
            .ok_or(RegistryError::TrancheNotFound(tranche))?;

        if entry.is_expired() {
            warn!(tranche, "Rejected expiry of an already expired tranche");
            return Err(RegistryError::TrancheExpired(tranche));
        }

        entry.status = TrancheStatus::Expired;
        info!(tranche, "Expired tranche");

        Ok(())
    }

    // ============================================================================================
    // Claims
    // ============================================================================================

    /// Pre-flight check: does `proof` verify for an existing, active tranche?
    ///
    /// Never errors. Claimed status and zero amounts are not considered here;
    /// `claim` reports those explicitly.
    pub fn verify_claim(
        &self,
        recipient: &Pubkey,
        tranche: u64,
        amount: u128,
        proof: &[[u8; 32]],
    ) -> bool {
        let tranches = self.read_tranches();

        match find_tranche(&tranches, tranche) {
            Some(entry) if entry.is_active() => {
                self.proof_matches(&entry.merkle_root, recipient, amount, proof)
            }
            _ => false,
        }
    }

    /// Redeem one leaf of one tranche.
    ///
    /// Checks run in this order: tranche exists, tranche active, not yet
    /// claimed, non-zero amount, proof verifies. On success the ledger transfer
    /// is made and only then is the claim recorded.
    pub fn claim(
        &self,
        recipient: &Pubkey,
        tranche: u64,
        amount: u128,
        proof: &[[u8; 32]],
    ) -> RegistryResult<TransferInstruction> {
        self.settle(
            recipient,
            &[ClaimRequest {
                tranche,
                amount,
                proof,
            }],
        )
    }

    /// Redeem several tranches at once with a single transfer of the summed amount.
    ///
    /// All-or-nothing: any failing entry (including a tranche listed twice)
    /// rejects the whole batch and records nothing.
    pub fn claim_tranches(
        &self,
        recipient: &Pubkey,
        claims: &[TrancheClaim],
    ) -> RegistryResult<TransferInstruction> {
        let requests: Vec<ClaimRequest<'_>> = claims
            .iter()
            .map(|claim| ClaimRequest {
                tranche: claim.tranche,
                amount: claim.amount,
                proof: &claim.proof,
            })
            .collect();

        self.settle(recipient, &requests)
    }

    fn settle(
        &self,
        recipient: &Pubkey,
        requests: &[ClaimRequest<'_>],
    ) -> RegistryResult<TransferInstruction> {
        let result = self.try_settle(recipient, requests);

        match &result {
            Ok(transfer) => info!(
                %recipient,
                amount = transfer.amount,
                tranches = ?transfer.tranches,
                "Claim settled"
            ),
            Err(err) => warn!(%recipient, error = %err, "Claim rejected"),
        }

        result
    }

    fn try_settle(
        &self,
        recipient: &Pubkey,
        requests: &[ClaimRequest<'_>],
    ) -> RegistryResult<TransferInstruction> {
        if requests.is_empty() {
            return Err(RegistryError::ZeroAmount);
        }

        let tranches = self.read_tranches();

        // Hash every proof before taking the book lock
        let proofs_valid: Vec<bool> = requests
            .iter()
            .map(|request| {
                find_tranche(&tranches, request.tranche).is_some_and(|entry| {
                    request.amount > 0
                        && self.proof_matches(
                            &entry.merkle_root,
                            recipient,
                            request.amount,
                            request.proof,
                        )
                })
            })
            .collect();

        let mut book = self.lock_book();
        let mut batch_keys = HashSet::with_capacity(requests.len());
        let mut total: u128 = 0;

        for (request, proof_valid) in requests.iter().zip(proofs_valid) {
            let entry = find_tranche(&tranches, request.tranche)
                .ok_or(RegistryError::TrancheNotFound(request.tranche))?;

            if entry.is_expired() {
                return Err(RegistryError::TrancheExpired(request.tranche));
            }

            let key = ClaimKey::new(request.tranche, *recipient);
            if book.is_claimed(&key) || !batch_keys.insert(key) {
                return Err(RegistryError::AlreadyClaimed {
                    tranche: request.tranche,
                    recipient: *recipient,
                });
            }

            if request.amount == 0 {
                return Err(RegistryError::ZeroAmount);
            }

            if !proof_valid {
                return Err(RegistryError::InvalidProof);
            }

            total = total
                .checked_add(request.amount)
                .ok_or(RegistryError::AmountOverflow)?;
        }

        // A failed transfer leaves every flag untouched
        self.ledger.transfer(recipient, total)?;

        for request in requests {
            book.record(ClaimKey::new(request.tranche, *recipient), request.amount);
        }

        Ok(TransferInstruction {
            recipient: *recipient,
            amount: total,
            tranches: requests.iter().map(|request| request.tranche).collect(),
        })
    }

    // ============================================================================================
    // Reads
    // ============================================================================================

    pub fn tranche(&self, tranche: u64) -> Option<Tranche> {
        find_tranche(&self.read_tranches(), tranche).copied()
    }

    pub fn tranche_count(&self) -> u64 {
        self.read_tranches().len() as u64
    }

    /// Snapshot of every tranche in index order.
    pub fn tranches(&self) -> Vec<Tranche> {
        self.read_tranches().clone()
    }

    pub fn is_claimed(&self, tranche: u64, recipient: &Pubkey) -> bool {
        self.lock_book().is_claimed(&ClaimKey::new(tranche, *recipient))
    }

    /// Claimed flags for tranches `begin..end`.
    pub fn claim_status(
        &self,
        recipient: &Pubkey,
        begin: u64,
        end: u64,
    ) -> RegistryResult<Vec<bool>> {
        let tranches = self.read_tranches();
        check_range(begin, end, tranches.len() as u64)?;

        let book = self.lock_book();
        Ok((begin..end)
            .map(|tranche| book.is_claimed(&ClaimKey::new(tranche, *recipient)))
            .collect())
    }

    /// Merkle roots of tranches `begin..end`.
    pub fn merkle_roots(&self, begin: u64, end: u64) -> RegistryResult<Vec<[u8; 32]>> {
        let tranches = self.read_tranches();
        check_range(begin, end, tranches.len() as u64)?;

        Ok(tranches[begin as usize..end as usize]
            .iter()
            .map(|entry| entry.merkle_root)
            .collect())
    }

    /// Sum of all successful claims against a tranche.
    pub fn claimed_amount(&self, tranche: u64) -> u128 {
        self.lock_book()
            .claimed_amounts
            .get(&tranche)
            .copied()
            .unwrap_or(0)
    }

    // ============================================================================================
    // Helpers
    // ============================================================================================

    fn require_authorized(&self, authority: &Pubkey, action: &str) -> RegistryResult<()> {
        if self.authorizer.is_authorized(authority) {
            Ok(())
        } else {
            warn!(%authority, action, "Rejected unauthorized admin action");
            Err(RegistryError::Unauthorized(*authority))
        }
    }

    fn proof_matches(
        &self,
        root: &[u8; 32],
        recipient: &Pubkey,
        amount: u128,
        proof: &[[u8; 32]],
    ) -> bool {
        if proof.len() > self.config.max_proof_len {
            debug!(
                proof_len = proof.len(),
                max = self.config.max_proof_len,
                "Proof exceeds maximum length"
            );
            return false;
        }

        verify_allocation_proof(root, recipient, amount, proof)
    }

    // State is only written after every fallible step, so a poisoned lock
    // still guards consistent data.
    fn read_tranches(&self) -> RwLockReadGuard<'_, Vec<Tranche>> {
        self.tranches.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocations of active tranches not yet paid out.
    fn outstanding_commitment(&self, tranches: &[Tranche]) -> RegistryResult<u128> {
        let book = self.lock_book();
        tranches
            .iter()
            .filter(|tranche| tranche.is_active())
            .try_fold(0u128, |sum, tranche| {
                let claimed = book
                    .claimed_amounts
                    .get(&tranche.index)
                    .copied()
                    .unwrap_or_default();
                sum.checked_add(tranche.total_allocation.saturating_sub(claimed))
                    .ok_or(RegistryError::AmountOverflow)
            })
    }

    fn write_tranches(&self) -> RwLockWriteGuard<'_, Vec<Tranche>> {
        self.tranches.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_book(&self) -> MutexGuard<'_, ClaimBook> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn find_tranche(tranches: &[Tranche], tranche: u64) -> Option<&Tranche> {
    usize::try_from(tranche)
        .ok()
        .and_then(|position| tranches.get(position))
}

fn check_range(begin: u64, end: u64, count: u64) -> RegistryResult<()> {
    if begin > end || end > count {
        return Err(RegistryError::InvalidRange { begin, end, count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_tranche_merkle::AllocationTree;
    use std::sync::Arc;

    /// Ledger that pays everything and remembers the transfers.
    #[derive(Default)]
    struct RecordingLedger {
        balance: Mutex<u128>,
        transfers: Mutex<Vec<(Pubkey, u128)>>,
    }

    impl RecordingLedger {
        fn funded(balance: u128) -> Arc<Self> {
            Arc::new(Self {
                balance: Mutex::new(balance),
                transfers: Mutex::new(Vec::new()),
            })
        }
    }

    impl TokenLedger for RecordingLedger {
        fn available_balance(&self) -> u128 {
            *self.balance.lock().unwrap()
        }

        fn transfer(&self, recipient: &Pubkey, amount: u128) -> Result<(), LedgerError> {
            let mut balance = self.balance.lock().unwrap();
            if *balance < amount {
                return Err(LedgerError::InsufficientFunds {
                    required: amount,
                    available: *balance,
                });
            }
            *balance -= amount;
            self.transfers.lock().unwrap().push((*recipient, amount));
            Ok(())
        }
    }

    fn key(seed: u8) -> Pubkey {
        Pubkey::new_from_array([seed; 32])
    }

    fn admin() -> Pubkey {
        key(0xAD)
    }

    fn setup(
        balance: u128,
    ) -> (
        TrancheRegistry<Arc<RecordingLedger>, Pubkey>,
        Arc<RecordingLedger>,
        AllocationTree,
    ) {
        let ledger = RecordingLedger::funded(balance);
        let registry = TrancheRegistry::new(ledger.clone(), admin());
        let tree =
            AllocationTree::from_allocations([(key(1), 100), (key(2), 200), (key(3), 50)]).unwrap();
        (registry, ledger, tree)
    }

    #[test]
    fn test_seed_assigns_dense_indices() {
        let (registry, _, tree) = setup(1_000);

        assert_eq!(registry.seed(&admin(), tree.root(), 350).unwrap(), 0);
        assert_eq!(registry.seed(&admin(), [1; 32], 10).unwrap(), 1);
        assert_eq!(registry.tranche_count(), 2);

        let tranche = registry.tranche(0).unwrap();
        assert_eq!(tranche.merkle_root, tree.root());
        assert_eq!(tranche.total_allocation, 350);
        assert_eq!(tranche.status, TrancheStatus::Active);
        assert!(registry.tranche(2).is_none());
    }

    #[test]
    fn test_seed_validation() {
        let (registry, _, tree) = setup(100);

        assert_eq!(
            registry.seed(&key(9), tree.root(), 50),
            Err(RegistryError::Unauthorized(key(9)))
        );
        assert_eq!(
            registry.seed(&admin(), tree.root(), 0),
            Err(RegistryError::ZeroAllocation)
        );
        assert_eq!(
            registry.seed(&admin(), tree.root(), 350),
            Err(RegistryError::Ledger(LedgerError::InsufficientFunds {
                required: 350,
                available: 100
            }))
        );
        assert_eq!(registry.tranche_count(), 0);
    }

    #[test]
    fn test_seed_funding_covers_outstanding_allocations() {
        let (registry, _, tree) = setup(400);
        registry.seed(&admin(), tree.root(), 350).unwrap();

        // 350 of the 400 is already committed
        assert_eq!(
            registry.seed(&admin(), [1; 32], 100),
            Err(RegistryError::Ledger(LedgerError::InsufficientFunds {
                required: 450,
                available: 400
            }))
        );
        assert_eq!(registry.tranche_count(), 1);

        // Paid claims release their share of the commitment and the balance alike
        let proof = tree.proof(&key(2), 200).unwrap();
        registry.claim(&key(2), 0, 200, &proof).unwrap();
        assert_eq!(registry.seed(&admin(), [1; 32], 50).unwrap(), 1);

        // Expiry releases what was left unclaimed
        assert!(registry.seed(&admin(), [2; 32], 100).is_err());
        registry.expire(&admin(), 0).unwrap();
        assert_eq!(registry.seed(&admin(), [2; 32], 100).unwrap(), 2);
    }

    #[test]
    fn test_seed_without_funding_check() {
        let ledger = RecordingLedger::funded(0);
        let config = RegistryConfig {
            verify_funding_before_seed: false,
            ..Default::default()
        };
        let registry = TrancheRegistry::with_config(ledger, admin(), config);

        assert_eq!(registry.seed(&admin(), [1; 32], 350).unwrap(), 0);
    }

    #[test]
    fn test_claim_order_of_checks() {
        let (registry, _, tree) = setup(1_000);
        registry.seed(&admin(), tree.root(), 350).unwrap();
        let proof = tree.proof(&key(1), 100).unwrap();

        assert_eq!(
            registry.claim(&key(1), 5, 100, &proof),
            Err(RegistryError::TrancheNotFound(5))
        );
        assert_eq!(
            registry.claim(&key(1), 0, 0, &proof),
            Err(RegistryError::ZeroAmount)
        );
        assert_eq!(
            registry.claim(&key(1), 0, 101, &proof),
            Err(RegistryError::InvalidProof)
        );

        registry.claim(&key(1), 0, 100, &proof).unwrap();

        // Already-claimed is reported before the zero-amount check
        assert_eq!(
            registry.claim(&key(1), 0, 0, &proof),
            Err(RegistryError::AlreadyClaimed {
                tranche: 0,
                recipient: key(1)
            })
        );

        registry.expire(&admin(), 0).unwrap();
        assert_eq!(
            registry.claim(&key(1), 0, 100, &proof),
            Err(RegistryError::TrancheExpired(0))
        );
    }

    #[test]
    fn test_claim_transfers_and_records() {
        let (registry, ledger, tree) = setup(1_000);
        registry.seed(&admin(), tree.root(), 350).unwrap();
        let proof = tree.proof(&key(2), 200).unwrap();

        let transfer = registry.claim(&key(2), 0, 200, &proof).unwrap();

        assert_eq!(
            transfer,
            TransferInstruction {
                recipient: key(2),
                amount: 200,
                tranches: vec![0],
            }
        );
        assert!(registry.is_claimed(0, &key(2)));
        assert!(!registry.is_claimed(0, &key(1)));
        assert_eq!(registry.claimed_amount(0), 200);
        assert_eq!(*ledger.transfers.lock().unwrap(), vec![(key(2), 200)]);
    }

    #[test]
    fn test_failed_transfer_leaves_flag_unset() {
        let (registry, ledger, tree) = setup(350);
        registry.seed(&admin(), tree.root(), 350).unwrap();
        *ledger.balance.lock().unwrap() = 10;

        let proof = tree.proof(&key(1), 100).unwrap();
        assert_eq!(
            registry.claim(&key(1), 0, 100, &proof),
            Err(RegistryError::Ledger(LedgerError::InsufficientFunds {
                required: 100,
                available: 10
            }))
        );
        assert!(!registry.is_claimed(0, &key(1)));
        assert_eq!(registry.claimed_amount(0), 0);

        // Once funded again the same claim goes through
        *ledger.balance.lock().unwrap() = 350;
        registry.claim(&key(1), 0, 100, &proof).unwrap();
        assert!(registry.is_claimed(0, &key(1)));
    }

    #[test]
    fn test_verify_claim_is_total() {
        let (registry, _, tree) = setup(1_000);
        let proof = tree.proof(&key(3), 50).unwrap();

        assert!(!registry.verify_claim(&key(3), 0, 50, &proof));

        registry.seed(&admin(), tree.root(), 350).unwrap();
        assert!(registry.verify_claim(&key(3), 0, 50, &proof));
        assert!(!registry.verify_claim(&key(3), 0, 51, &proof));
        assert!(!registry.verify_claim(&key(3), 7, 50, &proof));

        registry.expire(&admin(), 0).unwrap();
        assert!(!registry.verify_claim(&key(3), 0, 50, &proof));
    }

    #[test]
    fn test_oversized_proof_is_rejected() {
        let ledger = RecordingLedger::funded(1_000);
        let config = RegistryConfig {
            max_proof_len: 1,
            ..Default::default()
        };
        let registry = TrancheRegistry::with_config(ledger, admin(), config);
        let (_, _, tree) = setup(0);
        registry.seed(&admin(), tree.root(), 350).unwrap();

        // key(1) sits in the first pair and needs two siblings
        let proof = tree.proof(&key(1), 100).unwrap();
        assert_eq!(proof.len(), 2);
        assert!(!registry.verify_claim(&key(1), 0, 100, &proof));
        assert_eq!(
            registry.claim(&key(1), 0, 100, &proof),
            Err(RegistryError::InvalidProof)
        );
    }

    #[test]
    fn test_expire_errors() {
        let (registry, _, tree) = setup(1_000);
        registry.seed(&admin(), tree.root(), 350).unwrap();

        assert_eq!(
            registry.expire(&key(9), 0),
            Err(RegistryError::Unauthorized(key(9)))
        );
        assert_eq!(
            registry.expire(&admin(), 1),
            Err(RegistryError::TrancheNotFound(1))
        );

        registry.expire(&admin(), 0).unwrap();
        assert_eq!(
            registry.expire(&admin(), 0),
            Err(RegistryError::TrancheExpired(0))
        );
        assert!(registry.tranche(0).unwrap().is_expired());
    }

    #[test]
    fn test_claim_tranches_batch() {
        let (registry, ledger, tree) = setup(1_000);
        let second =
            AllocationTree::from_allocations([(key(1), 40), (key(4), 60)]).unwrap();
        registry.seed(&admin(), tree.root(), 350).unwrap();
        registry.seed(&admin(), second.root(), 100).unwrap();

        let claims = vec![
            TrancheClaim {
                tranche: 0,
                amount: 100,
                proof: tree.proof(&key(1), 100).unwrap(),
            },
            TrancheClaim {
                tranche: 1,
                amount: 40,
                proof: second.proof(&key(1), 40).unwrap(),
            },
        ];

        let transfer = registry.claim_tranches(&key(1), &claims).unwrap();
        assert_eq!(transfer.amount, 140);
        assert_eq!(transfer.tranches, vec![0, 1]);
        assert_eq!(*ledger.transfers.lock().unwrap(), vec![(key(1), 140)]);
        assert_eq!(registry.claim_status(&key(1), 0, 2).unwrap(), vec![true, true]);
    }

    #[test]
    fn test_claim_tranches_is_all_or_nothing() {
        let (registry, ledger, tree) = setup(1_000);
        registry.seed(&admin(), tree.root(), 350).unwrap();
        let proof = tree.proof(&key(1), 100).unwrap();

        let valid = TrancheClaim {
            tranche: 0,
            amount: 100,
            proof: proof.clone(),
        };
        let missing = TrancheClaim {
            tranche: 3,
            amount: 100,
            proof,
        };

        assert_eq!(
            registry.claim_tranches(&key(1), &[valid.clone(), missing]),
            Err(RegistryError::TrancheNotFound(3))
        );
        assert!(!registry.is_claimed(0, &key(1)));

        // The same tranche twice in one batch
        assert_eq!(
            registry.claim_tranches(&key(1), &[valid.clone(), valid]),
            Err(RegistryError::AlreadyClaimed {
                tranche: 0,
                recipient: key(1)
            })
        );
        assert!(!registry.is_claimed(0, &key(1)));
        assert!(ledger.transfers.lock().unwrap().is_empty());

        assert_eq!(
            registry.claim_tranches(&key(1), &[]),
            Err(RegistryError::ZeroAmount)
        );
    }

    #[test]
    fn test_range_reads() {
        let (registry, _, tree) = setup(1_000);
        registry.seed(&admin(), tree.root(), 350).unwrap();
        registry.seed(&admin(), [2; 32], 10).unwrap();

        assert_eq!(
            registry.merkle_roots(0, 2).unwrap(),
            vec![tree.root(), [2; 32]]
        );
        assert!(registry.merkle_roots(1, 1).unwrap().is_empty());
        assert_eq!(
            registry.merkle_roots(1, 3),
            Err(RegistryError::InvalidRange {
                begin: 1,
                end: 3,
                count: 2
            })
        );
        assert!(registry.claim_status(&key(1), 2, 1).is_err());
        assert_eq!(registry.claim_status(&key(1), 0, 2).unwrap(), vec![false, false]);
    }
}
