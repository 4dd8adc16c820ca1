use prism_tranche_registry::{LedgerError, TokenLedger};
use solana_pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct LedgerState {
    balance: u128,
    recipient_balances: HashMap<Pubkey, u128>,
    transfers: Vec<(Pubkey, u128)>,
    failure: Option<String>,
}

/// In-memory token ledger: one funding balance, per-recipient balances and a
/// log of every transfer made.
///
/// Failures can be injected with [`MemoryLedger::fail_transfers`] to test that
/// a claim whose transfer fails leaves no trace in the registry.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    pub fn new(balance: u128) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                balance,
                ..Default::default()
            }),
        }
    }

    pub fn fund(&self, amount: u128) {
        let mut state = self.state.lock().unwrap();
        state.balance += amount;
    }

    /// Remaining funding balance
    pub fn balance(&self) -> u128 {
        self.state.lock().unwrap().balance
    }

    /// Total received by `recipient`
    pub fn balance_of(&self, recipient: &Pubkey) -> u128 {
        self.state
            .lock()
            .unwrap()
            .recipient_balances
            .get(recipient)
            .copied()
            .unwrap_or(0)
    }

    pub fn transfers(&self) -> Vec<(Pubkey, u128)> {
        self.state.lock().unwrap().transfers.clone()
    }

    /// Make every subsequent transfer fail with `reason`, or succeed again with `None`.
    pub fn fail_transfers(&self, reason: Option<&str>) {
        self.state.lock().unwrap().failure = reason.map(str::to_string);
    }
}

impl TokenLedger for MemoryLedger {
    fn available_balance(&self) -> u128 {
        self.balance()
    }

    fn transfer(&self, recipient: &Pubkey, amount: u128) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();

        if let Some(reason) = &state.failure {
            return Err(LedgerError::TransferFailed(reason.clone()));
        }

        if state.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: state.balance,
            });
        }

        state.balance -= amount;
        *state.recipient_balances.entry(*recipient).or_default() += amount;
        state.transfers.push((*recipient, amount));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_moves_balance() {
        let ledger = MemoryLedger::new(100);
        let recipient = Pubkey::new_from_array([1; 32]);

        ledger.transfer(&recipient, 40).unwrap();

        assert_eq!(ledger.balance(), 60);
        assert_eq!(ledger.balance_of(&recipient), 40);
        assert_eq!(ledger.transfers(), vec![(recipient, 40)]);
    }

    #[test]
    fn test_transfer_failures() {
        let ledger = MemoryLedger::new(10);
        let recipient = Pubkey::new_from_array([1; 32]);

        assert_eq!(
            ledger.transfer(&recipient, 11),
            Err(LedgerError::InsufficientFunds {
                required: 11,
                available: 10
            })
        );

        ledger.fail_transfers(Some("offline"));
        assert_eq!(
            ledger.transfer(&recipient, 1),
            Err(LedgerError::TransferFailed("offline".to_string()))
        );

        ledger.fail_transfers(None);
        ledger.transfer(&recipient, 1).unwrap();
        assert_eq!(ledger.balance(), 9);
    }
}
