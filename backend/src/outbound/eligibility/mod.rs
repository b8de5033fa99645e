//! Eligibility checker adapters.
//!
//! Every adapter first rejects identities that are not structurally valid
//! CPFs, then applies its own verdict:
//!
//! - [`AlwaysEligibleChecker`]: structure check only.
//! - [`RandomEligibilityChecker`]: a fair coin flip, mirroring the public
//!   demo service the API was designed against.
//! - [`HttpEligibilityChecker`]: asks a remote `GET {base}/users/{cpf}`
//!   endpoint.

mod always;
mod http;
mod random;

pub use always::AlwaysEligibleChecker;
pub use http::HttpEligibilityChecker;
pub use random::RandomEligibilityChecker;

use crate::domain::Cpf;
use crate::domain::ports::Eligibility;

/// Verdict for identities that fail the structure check, `None` otherwise.
fn reject_malformed(cpf: &Cpf) -> Option<Eligibility> {
    (!cpf.is_well_formed()).then_some(Eligibility::Ineligible)
}
