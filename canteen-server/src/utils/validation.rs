//! Input validation helpers
//!
//! Centralized length limits and checks shared by the handlers and services.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: menu items, offers, people
pub const MAX_NAME_LEN: usize = 200;

/// User ids (roll numbers, staff ids)
pub const MAX_USER_ID_LEN: usize = 64;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 4;

/// Largest quantity of one item in a single order
pub const MAX_LINE_QTY: i64 = 99;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a password's length
pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }
    Ok(())
}

/// Validate a money amount: finite and not negative
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(
            AppError::validation(format!("{field} must be a non-negative number"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Tea", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert!(err.message.contains("too long"));
    }

    #[test]
    fn test_password() {
        assert!(validate_password("abcd").is_ok());
        assert!(validate_password("abc").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }

    #[test]
    fn test_amount() {
        assert!(validate_amount(0.0, "price").is_ok());
        assert!(validate_amount(12.5, "price").is_ok());
        assert!(validate_amount(-1.0, "price").is_err());
        assert!(validate_amount(f64::NAN, "price").is_err());
        assert!(validate_amount(f64::INFINITY, "price").is_err());
    }
}
