//! Demo login.
//!
//! A single hardcoded credential pair gates the wizard. There is no account
//! store and nothing is persisted.

use crate::errors::AuthError;

pub const DEMO_EMAIL: &str = "teste@email.com";
pub const DEMO_PASSWORD: &str = "senha123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Check the submitted pair against the demo account.
pub fn authenticate(credentials: &Credentials) -> Result<(), AuthError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_account_accepted() {
        assert_eq!(
            authenticate(&Credentials::new("teste@email.com", "senha123")),
            Ok(())
        );
    }

    #[test]
    fn test_wrong_pairs_rejected() {
        for (email, password) in [
            ("teste@email.com", "senha1234"),
            ("outro@email.com", "senha123"),
            ("TESTE@email.com", "senha123"),
            (" teste@email.com", "senha123"),
        ] {
            assert_eq!(
                authenticate(&Credentials::new(email, password)),
                Err(AuthError::InvalidCredentials),
                "{email}/{password} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_fields_rejected_first() {
        assert_eq!(
            authenticate(&Credentials::new("", "senha123")),
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            authenticate(&Credentials::new("teste@email.com", "")),
            Err(AuthError::MissingFields)
        );
    }
}
