use solana_pubkey::Pubkey;
use std::collections::HashSet;

/// Capability check for administrative actions (`seed`, `expire`).
///
/// Injected into the registry so role management stays outside the claim
/// logic.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, caller: &Pubkey) -> bool;
}

/// A single admin key.
impl Authorizer for Pubkey {
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self == caller
    }
}

/// Any key in the set.
impl Authorizer for HashSet<Pubkey> {
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self.contains(caller)
    }
}

impl<F> Authorizer for F
where
    F: Fn(&Pubkey) -> bool + Send + Sync,
{
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_admin() {
        let admin = Pubkey::new_from_array([1; 32]);
        assert!(admin.is_authorized(&admin));
        assert!(!admin.is_authorized(&Pubkey::new_from_array([2; 32])));
    }

    #[test]
    fn test_admin_set() {
        let admins: HashSet<Pubkey> = [[1; 32], [2; 32]]
            .into_iter()
            .map(Pubkey::new_from_array)
            .collect();

        assert!(admins.is_authorized(&Pubkey::new_from_array([2; 32])));
        assert!(!admins.is_authorized(&Pubkey::new_from_array([3; 32])));
    }

    #[test]
    fn test_predicate() {
        let nobody = |_: &Pubkey| false;
        assert!(!nobody.is_authorized(&Pubkey::new_from_array([1; 32])));
    }
}
