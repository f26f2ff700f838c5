//! Proptest generators for property-based testing.

use proptest::prelude::*;

use starledger_core::{Keypair, Star, WalletAddress};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate an arbitrary address string, usually not a valid key.
pub fn loose_address() -> impl Strategy<Value = WalletAddress> {
    "[1-9A-HJ-NP-Za-km-z]{26,35}".prop_map(WalletAddress::new)
}

/// Generate a star.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-9]{1,2}h [0-9]{1,2}m [0-9]{1,2}\\.[0-9]s",
        "-?[0-9]{1,2}° [0-9]{1,2}'",
        "[ -~]{0,64}",
        proptest::option::of("[0-9]\\.[0-9]{1,2}"),
        proptest::option::of("[A-Z][a-z]{2,11}"),
    )
        .prop_map(|(ra, dec, story, magnitude, constellation)| Star {
            ra,
            dec,
            story,
            magnitude,
            constellation,
        })
}

/// Elapsed seconds between issue and submission, around the default window.
pub fn elapsed_secs() -> impl Strategy<Value = i64> {
    prop_oneof![0i64..=300, 301i64..=10_000, Just(300), Just(301)]
}

/// A sequence of claims: which of `wallets` owns each one, plus the star.
#[derive(Debug, Clone)]
pub struct ClaimPlan {
    pub claims: Vec<(usize, Star)>,
}

impl ClaimPlan {
    /// Claims made by wallet `index`, in plan order.
    pub fn stories_of(&self, index: usize) -> Vec<String> {
        self.claims
            .iter()
            .filter(|(owner, _)| *owner == index)
            .map(|(_, star)| star.story.clone())
            .collect()
    }
}

/// Generate a claim plan over `wallets` wallets with up to `max_claims` claims.
pub fn claim_plan(wallets: usize, max_claims: usize) -> impl Strategy<Value = ClaimPlan> {
    prop::collection::vec((0..wallets, star()), 0..=max_claims)
        .prop_map(|claims| ClaimPlan { claims })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn plan_owners_in_range(plan in claim_plan(3, 8)) {
            prop_assert!(plan.claims.len() <= 8);
            for (owner, _) in &plan.claims {
                prop_assert!(*owner < 3);
            }
            let total: usize = (0..3).map(|i| plan.stories_of(i).len()).sum();
            prop_assert_eq!(total, plan.claims.len());
        }

        #[test]
        fn keypair_address_is_hex(kp in keypair()) {
            let address = kp.address();
            prop_assert_eq!(address.as_str().len(), 64);
            prop_assert!(address.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
