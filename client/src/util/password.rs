//! Password strength scoring for the profile editor.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

pub const MAX_SCORE: u8 = 4;
/// Lowest score accepted for a new password.
pub const MIN_ACCEPTED_SCORE: u8 = 2;

const LABELS: [&str; 5] = ["Very weak", "Weak", "Fair", "Good", "Strong"];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Password is too weak.")]
    TooWeak,
    #[error("Passwords do not match.")]
    Mismatch,
}

/// 0..=4: one point each for length >= 8, length >= 12, mixed case, a digit,
/// and a symbol, capped at [`MAX_SCORE`].
#[must_use]
pub fn score(password: &str) -> u8 {
    let len = password.chars().count();
    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    let points = [len >= 8, len >= 12, has_lower && has_upper, has_digit, has_symbol]
        .into_iter()
        .filter(|hit| *hit)
        .count();
    u8::try_from(points).unwrap_or(MAX_SCORE).min(MAX_SCORE)
}

#[must_use]
pub fn label(score: u8) -> &'static str {
    LABELS[usize::from(score.min(MAX_SCORE))]
}

/// Check a new password against its confirmation.
///
/// # Errors
///
/// [`PasswordError::TooWeak`] below [`MIN_ACCEPTED_SCORE`], otherwise
/// [`PasswordError::Mismatch`] when the confirmation differs.
pub fn validate(password: &str, confirmation: &str) -> Result<(), PasswordError> {
    if score(password) < MIN_ACCEPTED_SCORE {
        return Err(PasswordError::TooWeak);
    }
    if password != confirmation {
        return Err(PasswordError::Mismatch);
    }
    Ok(())
}
