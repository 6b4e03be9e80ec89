//! Account field rules shared by signup and profile edits.

use validator::{ValidateEmail, ValidationError};

use crate::domain::DomainError;

pub const USERNAME_MAX: usize = 150;
pub const PASSWORD_MIN: usize = 8;

/// Letters, digits and `@ . + - _`, 1 to 150 characters.
pub fn check_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX {
        return Err(ValidationError::new("username_length")
            .with_message("username must be 1-150 characters".into()));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(ValidationError::new("username_chars")
            .with_message("username may contain only letters, digits and @/./+/-/_".into()));
    }
    Ok(())
}

/// At least 8 characters and not entirely numeric.
pub fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::new("password_length")
            .with_message("password must be at least 8 characters".into()));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_numeric")
            .with_message("password must not be entirely numeric".into()));
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("invalid email format".into()))
    }
}

/// Convert a rule failure into a domain validation error.
pub fn to_domain(field: &str, err: ValidationError) -> DomainError {
    let message = err
        .message
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string());
    DomainError::Validation(format!("{}: {}", field, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(check_username("hanako.y+1@site_-").is_ok());
        assert!(check_username("山田").is_ok());
        assert!(check_username("").is_err());
        assert!(check_username("has space").is_err());
        assert!(check_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn password_rules() {
        assert!(check_password("s3cret-pass").is_ok());
        assert!(check_password("short1").is_err());
        assert!(check_password("12345678").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(check_email("a@example.com").is_ok());
        assert!(check_email("not-an-email").is_err());
    }
}
