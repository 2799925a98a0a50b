//! User name validation

use thiserror::Error;

/// Maximum length for user names
const MAX_USER_NAME_LEN: usize = 128;

/// Why a submitted user name was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Blank,

    #[error("User name exceeds maximum length of {max} characters")]
    TooLong { max: usize },
}

/// Validated user name: non-blank, trimmed, bounded length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(s: &str) -> Result<Self, UserNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UserNameError::Blank);
        }

        if trimmed.chars().count() > MAX_USER_NAME_LEN {
            return Err(UserNameError::TooLong {
                max: MAX_USER_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
