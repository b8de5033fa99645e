//! Checker flipping a fair coin for each well-formed identity.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::reject_malformed;
use crate::domain::Cpf;
use crate::domain::ports::{Eligibility, EligibilityCheckError, EligibilityChecker};

/// Approves roughly half of the well-formed identities it sees.
///
/// The verdict is drawn per call, so the same identity may be approved on one
/// request and rejected on the next.
#[derive(Debug)]
pub struct RandomEligibilityChecker {
    rng: Mutex<SmallRng>,
}

impl RandomEligibilityChecker {
    /// Seed from operating-system entropy.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Use a deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn lock_rng(&self) -> MutexGuard<'_, SmallRng> {
        // A poisoned lock still holds a usable generator.
        self.rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for RandomEligibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EligibilityChecker for RandomEligibilityChecker {
    async fn check(&self, cpf: &Cpf) -> Result<Eligibility, EligibilityCheckError> {
        if let Some(verdict) = reject_malformed(cpf) {
            return Ok(verdict);
        }
        let verdict = if self.lock_rng().gen_bool(0.5) {
            Eligibility::Eligible
        } else {
            Eligibility::Ineligible
        };
        debug!(?verdict, "random eligibility verdict");
        Ok(verdict)
    }
}
