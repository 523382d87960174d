//! Password rules of the registration form.

use form_framework::{GroupValidator, ValidationError, Validator};

/// Symbols that count towards password strength.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const WEAK_PASSWORD: &str = "weakPassword";
pub const PASSWORD_MISMATCH: &str = "passwordMismatch";

/// `true` when `password` has an uppercase letter, a lowercase letter, a digit
/// and one of [`PASSWORD_SYMBOLS`]. Length is checked separately.
pub fn is_strong_password(password: &str) -> bool {
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    upper && lower && digit && symbol
}

/// Field rule failing with `weakPassword`. An empty password passes.
pub fn password_strength() -> Validator {
    Validator::custom(
        WEAK_PASSWORD,
        "Must include uppercase, lowercase, a digit and a symbol",
        |value| value.is_empty() || is_strong_password(&value.to_text()),
    )
}

/// Group rule failing with `passwordMismatch` whenever the two password fields differ.
pub fn password_match() -> GroupValidator {
    GroupValidator::new(PASSWORD_MISMATCH, |value| {
        (value.get("password") != value.get("confirmPassword"))
            .then(|| ValidationError::new(PASSWORD_MISMATCH, "Passwords do not match"))
    })
}
