//! Master password format rules.

use crate::domain::errors::PasswordError;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Check a candidate master password. Rules are applied in order and the
/// first violation is reported. Length counts characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::PasswordTooLong {
            max: MAX_PASSWORD_LENGTH,
        });
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(PasswordError::PasswordMissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::PasswordMissingDigit);
    }
    Ok(())
}
