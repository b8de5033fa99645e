//! Checker approving every well-formed identity.

use async_trait::async_trait;

use super::reject_malformed;
use crate::domain::Cpf;
use crate::domain::ports::{Eligibility, EligibilityCheckError, EligibilityChecker};

/// Approves any CPF whose check digits are valid.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysEligibleChecker;

#[async_trait]
impl EligibilityChecker for AlwaysEligibleChecker {
    async fn check(&self, cpf: &Cpf) -> Result<Eligibility, EligibilityCheckError> {
        Ok(reject_malformed(cpf).unwrap_or(Eligibility::Eligible))
    }
}
