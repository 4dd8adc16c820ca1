use {
    crate::{deterministic_pubkey, MemoryLedger, RegistrySnapshot, DEFAULT_LEDGER_FUNDING},
    prism_tranche_csvs::{AllocationEntry, ClaimExport},
    prism_tranche_registry::{
        RegistryConfig, RegistryResult, TrancheClaim, TrancheRegistry, TransferInstruction,
    },
    prism_tranche_sdk::{CompiledTranche, TrancheCompiler},
    solana_pubkey::Pubkey,
    std::{collections::HashMap, sync::Arc},
};

pub type TestRegistry = TrancheRegistry<Arc<MemoryLedger>, Pubkey>;

/// A registry wired to an in-memory ledger, plus the compiled tranches that
/// were seeded into it so claims can be made by claimant name.
pub struct TestFixture {
    pub admin: Pubkey,
    pub ledger: Arc<MemoryLedger>,
    pub registry: TestRegistry,

    compiler: TrancheCompiler,
    compiled: HashMap<u64, CompiledTranche>,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_funding(DEFAULT_LEDGER_FUNDING)
    }

    pub fn with_funding(balance: u128) -> Self {
        Self::with_config(balance, RegistryConfig::default())
    }

    pub fn with_config(balance: u128, config: RegistryConfig) -> Self {
        let admin = deterministic_pubkey("admin");
        let ledger = Arc::new(MemoryLedger::new(balance));
        let registry = TrancheRegistry::with_config(ledger.clone(), admin, config);

        Self {
            admin,
            ledger,
            registry,
            compiler: TrancheCompiler::default(),
            compiled: HashMap::new(),
        }
    }

    /// Compile `(claimant name, amount in base units)` pairs.
    pub fn compile(&self, name: &str, allocations: &[(&str, u128)]) -> CompiledTranche {
        let entries = allocations
            .iter()
            .map(|(claimant, amount)| AllocationEntry {
                recipient: deterministic_pubkey(claimant),
                amount: *amount,
            })
            .collect();

        self.compiler
            .compile(name, entries)
            .unwrap_or_else(|e| panic!("Failed to compile tranche {name}: {e}"))
    }

    /// Seed a compiled tranche with its own total allocation.
    pub fn try_seed(&mut self, compiled: CompiledTranche) -> RegistryResult<u64> {
        let index = self.registry.seed(
            &self.admin,
            compiled.merkle_root(),
            compiled.total_allocation(),
        )?;
        self.compiled.insert(index, compiled);
        Ok(index)
    }

    /// Compile and seed in one step; panics if seeding fails.
    pub fn seed_tranche(&mut self, name: &str, allocations: &[(&str, u128)]) -> u64 {
        let compiled = self.compile(name, allocations);
        self.try_seed(compiled)
            .unwrap_or_else(|e| panic!("Failed to seed tranche {name}: {e}"))
    }

    pub fn compiled(&self, tranche: u64) -> &CompiledTranche {
        self.compiled
            .get(&tranche)
            .unwrap_or_else(|| panic!("Tranche {tranche} was not seeded by this fixture"))
    }

    /// The exported claim for `claimant` in `tranche`.
    pub fn claim_export(&self, claimant: &str, tranche: u64) -> ClaimExport {
        self.compiled(tranche)
            .claim_for(&deterministic_pubkey(claimant))
            .unwrap_or_else(|e| panic!("{claimant} has no claim in tranche {tranche}: {e}"))
    }

    /// Claim `claimant`'s full allocation in `tranche` with its exported proof.
    pub fn try_claim(&self, claimant: &str, tranche: u64) -> RegistryResult<TransferInstruction> {
        let export = self.claim_export(claimant, tranche);
        self.registry
            .claim(&export.recipient, tranche, export.amount, &export.proof)
    }

    /// Claim `claimant`'s allocations in every listed tranche in one batch.
    pub fn try_claim_tranches(
        &self,
        claimant: &str,
        tranches: &[u64],
    ) -> RegistryResult<TransferInstruction> {
        let claims: Vec<TrancheClaim> = tranches
            .iter()
            .map(|tranche| {
                let export = self.claim_export(claimant, *tranche);
                TrancheClaim {
                    tranche: *tranche,
                    amount: export.amount,
                    proof: export.proof,
                }
            })
            .collect();

        self.registry.claim_tranches(&deterministic_pubkey(claimant), &claims)
    }

    pub fn try_expire(&self, tranche: u64) -> RegistryResult<()> {
        self.registry.expire(&self.admin, tranche)
    }

    pub fn is_claimed(&self, claimant: &str, tranche: u64) -> bool {
        self.registry.is_claimed(tranche, &deterministic_pubkey(claimant))
    }

    pub fn snapshot(&self, claimants: &[&str]) -> RegistrySnapshot {
        let claimants: Vec<Pubkey> = claimants
            .iter()
            .map(|claimant| deterministic_pubkey(claimant))
            .collect();
        RegistrySnapshot::capture_with_claimants(self, &claimants)
    }
}
