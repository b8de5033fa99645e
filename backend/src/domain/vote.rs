//! Votes and the voter identity they are keyed by.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Voter identity (CPF) reduced to its digits.
///
/// # Examples
/// ```
/// use voting_backend::domain::Cpf;
///
/// let cpf = Cpf::normalize("529.982.247-25");
/// assert_eq!(cpf.as_str(), "52998224725");
/// assert!(cpf.is_well_formed());
/// assert!(!Cpf::normalize("111.111.111-11").is_well_formed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

impl Cpf {
    /// Strip every non-digit character from `raw`.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter(char::is_ascii_digit).collect())
    }

    /// Rebuild from a value already stored in normalised form.
    pub fn from_normalized(digits: impl Into<String>) -> Self {
        Self::normalize(&digits.into())
    }

    /// Digits as text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check length, reject repeated digits, and verify both check digits.
    pub fn is_well_formed(&self) -> bool {
        let digits: Vec<u32> = self.0.chars().filter_map(|c| c.to_digit(10)).collect();
        let [body @ .., first_check, second_check] = digits.as_slice() else {
            return false;
        };
        if digits.len() != CPF_LEN || digits.iter().all(|d| Some(d) == digits.first()) {
            return false;
        }
        let first = check_digit(body);
        let mut extended = body.to_vec();
        extended.push(first);
        first == *first_check && check_digit(&extended) == *second_check
    }
}

fn check_digit(digits: &[u32]) -> u32 {
    let weights = (2..=u32::try_from(digits.len() + 1).unwrap_or(u32::MAX)).rev();
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yes/no choice carried by a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Vote in favour (`true` on the wire).
    Favorable,
    /// Vote against (`false` on the wire).
    Against,
}

impl From<bool> for Choice {
    fn from(value: bool) -> Self {
        if value {
            Self::Favorable
        } else {
            Self::Against
        }
    }
}

impl From<Choice> for bool {
    fn from(value: Choice) -> Self {
        matches!(value, Choice::Favorable)
    }
}

/// A cast vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// Vote identifier.
    pub id: Uuid,
    /// Session the vote was cast in.
    pub session_id: Uuid,
    /// Topic of that session.
    pub topic_id: Uuid,
    /// Normalised voter identity.
    pub cpf: Cpf,
    /// Choice recorded.
    pub choice: Choice,
    /// Instant the vote was accepted.
    pub voted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("529.982.247-25", "52998224725")]
    #[case(" 529 982 247 25 ", "52998224725")]
    #[case("abc", "")]
    fn normalize_keeps_digits_only(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Cpf::normalize(raw).as_str(), expected);
    }

    #[rstest]
    #[case("52998224725", true)]
    #[case("11144477735", true)]
    #[case("52998224724", false)]
    #[case("00000000000", false)]
    #[case("5299822472", false)]
    #[case("529982247250", false)]
    #[case("", false)]
    fn well_formed_checks_digits(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(Cpf::normalize(raw).is_well_formed(), expected);
    }

    #[rstest]
    fn choice_maps_from_wire_boolean() {
        assert_eq!(Choice::from(true), Choice::Favorable);
        assert_eq!(Choice::from(false), Choice::Against);
        assert!(bool::from(Choice::Favorable));
    }
}
