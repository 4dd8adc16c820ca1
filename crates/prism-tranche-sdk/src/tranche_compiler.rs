/*!
# Tranche Compiler

Turns one allocation list into everything a tranche needs:

- the allocation tree and its merkle root (what the registry is seeded with)
- the checked total allocation (what the ledger must be funded with)
- a claim export per recipient (what recipients submit)

Every export is verified against the compiled root before it leaves the
compiler, so a bad proof is caught here rather than at claim time.
*/

use prism_tranche_csvs::{
    format_token_amount, total_allocation, write_claims_json, write_manifest_json,
    AllocationEntry, ClaimExport, ClaimsFile, TrancheManifest, DEFAULT_TOKEN_DECIMALS,
};
use prism_tranche_merkle::{verify_allocation_proof, AllocationTree};
use solana_pubkey::Pubkey;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{CompilerError, CompilerResult};

/// Compiles allocation lists for a token with a fixed number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrancheCompiler {
    decimals: u32,
}

impl Default for TrancheCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_DECIMALS)
    }
}

impl TrancheCompiler {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Compile a named allocation list.
    ///
    /// Entries may arrive in any order and may repeat exactly; a recipient
    /// listed with two different amounts is rejected.
    pub fn compile(
        &self,
        name: impl Into<String>,
        entries: Vec<AllocationEntry>,
    ) -> CompilerResult<CompiledTranche> {
        let name = name.into();
        let entries = canonicalize(entries)?;

        let tree = AllocationTree::from_allocations(
            entries.iter().map(|entry| (entry.recipient, entry.amount)),
        )?;
        let total_allocation = total_allocation(&entries)?;

        let compiled = CompiledTranche {
            name,
            decimals: self.decimals,
            merkle_root: tree.root(),
            total_allocation,
            entries,
            tree,
        };

        info!(
            tranche = %compiled.name,
            merkle_root = %compiled.merkle_root_hex(),
            total_allocation,
            recipients = compiled.recipient_count(),
            "Compiled tranche"
        );

        Ok(compiled)
    }
}

/// Sort by recipient, drop exact duplicates, reject conflicting amounts.
fn canonicalize(mut entries: Vec<AllocationEntry>) -> CompilerResult<Vec<AllocationEntry>> {
    entries.sort_unstable();
    entries.dedup();

    if let Some(pair) = entries
        .windows(2)
        .find(|pair| pair[0].recipient == pair[1].recipient)
    {
        return Err(CompilerError::ConflictingAllocation {
            recipient: pair[0].recipient,
            first: pair[0].amount,
            second: pair[1].amount,
        });
    }

    Ok(entries)
}

/// A compiled tranche, ready to be seeded and exported.
#[derive(Debug, Clone)]
pub struct CompiledTranche {
    name: String,
    decimals: u32,
    merkle_root: [u8; 32],
    total_allocation: u128,
    entries: Vec<AllocationEntry>,
    tree: AllocationTree,
}

/// Files written by [`CompiledTranche::write_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrancheOutputs {
    pub claims_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl CompiledTranche {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn merkle_root(&self) -> [u8; 32] {
        self.merkle_root
    }

    pub fn merkle_root_hex(&self) -> String {
        hex::encode(self.merkle_root)
    }

    pub fn total_allocation(&self) -> u128 {
        self.total_allocation
    }

    pub fn recipient_count(&self) -> usize {
        self.entries.len()
    }

    pub fn tree(&self) -> &AllocationTree {
        &self.tree
    }

    /// Allocations sorted by recipient.
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    /// The allocation committed for `recipient`, if any.
    pub fn allocation_of(&self, recipient: &Pubkey) -> Option<u128> {
        self.entries
            .binary_search_by_key(recipient, |entry| entry.recipient)
            .ok()
            .map(|position| self.entries[position].amount)
    }

    /// Claim export for one recipient of the source list.
    pub fn claim_for(&self, recipient: &Pubkey) -> CompilerResult<ClaimExport> {
        let amount =
            self.allocation_of(recipient)
                .ok_or_else(|| CompilerError::RecipientNotFound {
                    tranche: self.name.clone(),
                    recipient: *recipient,
                })?;

        self.export(recipient, amount)
    }

    /// Claim exports for every recipient, in recipient order.
    pub fn claim_exports(&self) -> CompilerResult<Vec<ClaimExport>> {
        self.entries
            .iter()
            .map(|entry| self.export(&entry.recipient, entry.amount))
            .collect()
    }

    pub fn claims_file(&self) -> CompilerResult<ClaimsFile> {
        Ok(ClaimsFile {
            tranche: self.name.clone(),
            merkle_root: self.merkle_root,
            claims: self.claim_exports()?,
        })
    }

    pub fn manifest(&self) -> TrancheManifest {
        TrancheManifest {
            name: self.name.clone(),
            merkle_root: self.merkle_root,
            total_allocation: self.total_allocation,
            total_allocation_display: format_token_amount(self.total_allocation, self.decimals),
            decimals: self.decimals,
            recipient_count: self.recipient_count(),
        }
    }

    /// Write `<name>.claims.json` and `<name>.manifest.json` into `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> CompilerResult<TrancheOutputs> {
        std::fs::create_dir_all(dir)?;

        let outputs = TrancheOutputs {
            claims_path: dir.join(format!("{}.claims.json", self.name)),
            manifest_path: dir.join(format!("{}.manifest.json", self.name)),
        };

        write_claims_json(&outputs.claims_path, &self.claims_file()?)?;
        write_manifest_json(&outputs.manifest_path, &self.manifest())?;

        info!(
            tranche = %self.name,
            claims = %outputs.claims_path.display(),
            manifest = %outputs.manifest_path.display(),
            "Wrote tranche outputs"
        );

        Ok(outputs)
    }

    fn export(&self, recipient: &Pubkey, amount: u128) -> CompilerResult<ClaimExport> {
        let proof = self.tree.proof(recipient, amount)?;

        if !verify_allocation_proof(&self.merkle_root, recipient, amount, &proof) {
            return Err(CompilerError::ProofSelfCheck(*recipient));
        }

        debug!(tranche = %self.name, %recipient, proof_len = proof.len(), "Exported claim");

        Ok(ClaimExport {
            recipient: *recipient,
            amount,
            proof,
        })
    }
}
