//! Phone number normalization.
//!
//! The identity service expects canonical international-format numbers. The
//! heuristic here optimizes for the common cases (domestic numbers, numbers
//! already carrying a leading `1`) and degrades gracefully instead of
//! rejecting input client-side; hard validation stays on the server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A phone number in canonical `+<digits>` form.
///
/// Produced only by [`PhoneNumber::normalize`]; never edited directly.
/// Serializes as the plain string, so it can be used as a GraphQL variable
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw user-entered phone text. Pure and total; idempotent on
    /// its own output.
    pub fn normalize(raw: &str) -> Self {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        let canonical = if digits.len() == 11 && digits.starts_with('1') {
            // Already carries the country code.
            format!("+{digits}")
        } else if digits.len() == 10 {
            // Domestic number missing its country code.
            format!("+1{digits}")
        } else if digits.len() > 11 {
            // Extra noise (pasted extension, carrier prefix): assume a
            // domestic number and keep the last ten digits.
            format!("+1{}", &digits[digits.len() - 10..])
        } else {
            // Too short, or an 11-digit layout we cannot classify. Pass
            // through and let the server validate.
            format!("+{digits}")
        };

        PhoneNumber(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digit_number_gets_country_code() {
        assert_eq!(PhoneNumber::normalize("4155551234").as_str(), "+14155551234");
    }

    #[test]
    fn test_eleven_digit_number_starting_with_one() {
        assert_eq!(PhoneNumber::normalize("14155551234").as_str(), "+14155551234");
    }

    #[test]
    fn test_formatting_characters_are_stripped() {
        assert_eq!(
            PhoneNumber::normalize("(415) 555-1234").as_str(),
            "+14155551234"
        );
        assert_eq!(
            PhoneNumber::normalize("+1 415.555.1234").as_str(),
            "+14155551234"
        );
    }

    #[test]
    fn test_noisy_long_input_keeps_last_ten_digits() {
        assert_eq!(
            PhoneNumber::normalize("314155551234").as_str(),
            "+14155551234"
        );
    }

    #[test]
    fn test_eleven_digits_not_starting_with_one_pass_through() {
        assert_eq!(
            PhoneNumber::normalize("44155551234").as_str(),
            "+44155551234"
        );
    }

    #[test]
    fn test_short_input_passes_through() {
        assert_eq!(PhoneNumber::normalize("555-1234").as_str(), "+5551234");
        assert_eq!(PhoneNumber::normalize("").as_str(), "+");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "4155551234",
            "14155551234",
            "314155551234",
            "44155551234",
            "(415) 555-1234",
            "555-1234",
            "",
        ];
        for raw in inputs {
            let once = PhoneNumber::normalize(raw);
            let twice = PhoneNumber::normalize(once.as_str());
            assert_eq!(twice, once, "normalize should be idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let phone = PhoneNumber::normalize("4155551234");
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+14155551234\"");
    }
}
