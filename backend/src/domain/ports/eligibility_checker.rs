//! Driven port for the external identity-eligibility check.

use async_trait::async_trait;

use crate::domain::Cpf;

use super::define_port_error;

/// Verdict returned by the eligibility checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The identity may vote.
    Eligible,
    /// The identity may not vote.
    Ineligible,
}

define_port_error! {
    /// Errors surfaced while consulting the eligibility checker.
    pub enum EligibilityCheckError {
        /// The checker could not be reached or timed out.
        Unavailable { message: String } =>
            "eligibility checker unavailable: {message}",
        /// The checker answered with something we cannot interpret.
        InvalidResponse { message: String } =>
            "eligibility checker returned an invalid response: {message}",
    }
}

/// Port deciding whether an identity may vote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EligibilityChecker: Send + Sync {
    /// Return the verdict for `cpf`.
    async fn check(&self, cpf: &Cpf) -> Result<Eligibility, EligibilityCheckError>;
}

/// Fixture checker that approves every identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEligibilityChecker;

#[async_trait]
impl EligibilityChecker for FixtureEligibilityChecker {
    async fn check(&self, _cpf: &Cpf) -> Result<Eligibility, EligibilityCheckError> {
        Ok(Eligibility::Eligible)
    }
}
