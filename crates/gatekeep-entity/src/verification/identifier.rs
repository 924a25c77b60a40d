//! Verification purpose enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Purpose a verification token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationIdentifier {
    /// Confirm the address of a newly signed-up user.
    BasicAuthSignup,
    /// Passwordless login link.
    MagicLinkLogin,
    /// Password reset link.
    ForgotPassword,
    /// Confirm a changed email address.
    UpdateEmail,
}

impl VerificationIdentifier {
    /// Every purpose, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::BasicAuthSignup,
        Self::MagicLinkLogin,
        Self::ForgotPassword,
        Self::UpdateEmail,
    ];

    /// Return the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicAuthSignup => "basic_auth_signup",
            Self::MagicLinkLogin => "magic_link_login",
            Self::ForgotPassword => "forgot_password",
            Self::UpdateEmail => "update_email",
        }
    }
}

impl fmt::Display for VerificationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationIdentifier {
    type Err = gatekeep_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                gatekeep_core::AppError::validation(format!(
                    "Invalid verification identifier: '{s}'"
                ))
            })
    }
}

/// Whether `s` names a known verification purpose.
pub fn is_valid_identifier(s: &str) -> bool {
    s.parse::<VerificationIdentifier>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "magic_link_login".parse::<VerificationIdentifier>().unwrap(),
            VerificationIdentifier::MagicLinkLogin
        );
        assert!("MAGIC_LINK_LOGIN".parse::<VerificationIdentifier>().is_err());
    }

    #[test]
    fn test_is_valid_identifier() {
        for id in VerificationIdentifier::ALL {
            assert!(is_valid_identifier(id.as_str()));
            assert_eq!(id.to_string(), id.as_str());
        }
        assert!(!is_valid_identifier("reset"));
        assert!(!is_valid_identifier(""));
    }
}
