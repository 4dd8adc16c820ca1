/*!
# Prism Tranche Registry

The claim side of a tranche distribution: an append-only list of tranches, each
committing to an allocation tree by its merkle root, and a claimed-flag table
that lets every (tranche, recipient) pair redeem at most once.

Token movement is delegated to a [`TokenLedger`] and admin capability checks to
an [`Authorizer`], so the registry itself holds no funds and knows no roles.

```rust
use prism_tranche_merkle::AllocationTree;
use prism_tranche_registry::{LedgerError, TokenLedger, TrancheRegistry};
use solana_pubkey::Pubkey;

struct Treasury;

impl TokenLedger for Treasury {
    fn available_balance(&self) -> u128 {
        1_000
    }

    fn transfer(&self, _recipient: &Pubkey, _amount: u128) -> Result<(), LedgerError> {
        Ok(())
    }
}

let admin = Pubkey::new_from_array([9; 32]);
let alice = Pubkey::new_from_array([1; 32]);
let bob = Pubkey::new_from_array([2; 32]);

let tree = AllocationTree::from_allocations([(alice, 100), (bob, 200)]).unwrap();
let registry = TrancheRegistry::new(Treasury, admin);
let tranche = registry.seed(&admin, tree.root(), 300).unwrap();

let proof = tree.proof(&alice, 100).unwrap();
let transfer = registry.claim(&alice, tranche, 100, &proof).unwrap();
assert_eq!(transfer.amount, 100);
assert!(registry.claim(&alice, tranche, 100, &proof).is_err());
```
*/

mod authority;
mod config;
mod error;
mod ledger;
mod registry;
mod state;

pub use authority::Authorizer;
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use ledger::{LedgerError, TokenLedger};
pub use registry::TrancheRegistry;
pub use state::{ClaimKey, Tranche, TrancheClaim, TrancheStatus, TransferInstruction};
