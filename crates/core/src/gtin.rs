//! GTIN format validation and linear symbology selection.
//!
//! A GTIN is accepted when it is all decimal digits and one of the four
//! standard lengths. No check-digit verification is performed here; the
//! EAN symbologies enforce theirs at encoding time (see
//! [`crate::symbol::encode_linear`]).

use crate::error::CoreError;

/// Accepted GTIN lengths (GTIN-8, GTIN-12, GTIN-13, GTIN-14).
pub const GTIN_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// The single user-facing message for every rejected identifier.
pub const GTIN_FORMAT_MESSAGE: &str = "GTIN must be 8, 12, 13, or 14 digits";

/// True iff `gtin` is all ASCII digits with an accepted length.
pub fn is_valid_gtin(gtin: &str) -> bool {
    GTIN_LENGTHS.contains(&gtin.len()) && gtin.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a GTIN, rejecting with [`GTIN_FORMAT_MESSAGE`].
///
/// The message deliberately does not distinguish which rule failed.
pub fn validate_gtin(gtin: &str) -> Result<(), CoreError> {
    if is_valid_gtin(gtin) {
        Ok(())
    } else {
        Err(CoreError::Validation(GTIN_FORMAT_MESSAGE.to_string()))
    }
}

/// Linear symbology family, chosen by identifier length.
///
/// EAN-8 and EAN-13 are fixed-length retail symbologies and only fit
/// their exact digit count; 12- and 14-digit identifiers fall back to
/// the variable-length Code 128.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GtinFamily {
    Ean8,
    Ean13,
    Code128,
}

impl GtinFamily {
    /// Classify a valid GTIN into its linear symbology family.
    pub fn for_gtin(gtin: &str) -> Result<Self, CoreError> {
        validate_gtin(gtin)?;
        Ok(match gtin.len() {
            8 => Self::Ean8,
            13 => Self::Ean13,
            _ => Self::Code128,
        })
    }

    /// Symbology tag as reported on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ean8 => "EAN8",
            Self::Ean13 => "EAN13",
            Self::Code128 => "CODE128",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_all_four_lengths() {
        for gtin in ["40123456", "401234567890", "8499383300123", "10401234567891"] {
            assert!(is_valid_gtin(gtin), "{gtin} should be valid");
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        for gtin in ["", "1234567", "123456789", "1234567890", "12345678901", "104012345678912"] {
            assert!(!is_valid_gtin(gtin), "{gtin} should be invalid");
        }
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_valid_gtin("4012345A"));
        assert!(!is_valid_gtin("84993833001-3"));
        assert!(!is_valid_gtin("   40123456   "));
    }

    #[test]
    fn validation_message_is_fixed() {
        let err = validate_gtin("123").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == GTIN_FORMAT_MESSAGE);
    }

    #[test]
    fn family_by_length() {
        assert_eq!(GtinFamily::for_gtin("40123456").unwrap(), GtinFamily::Ean8);
        assert_eq!(GtinFamily::for_gtin("8499383300123").unwrap(), GtinFamily::Ean13);
        assert_eq!(GtinFamily::for_gtin("401234567890").unwrap(), GtinFamily::Code128);
        assert_eq!(GtinFamily::for_gtin("10401234567891").unwrap(), GtinFamily::Code128);
    }

    #[test]
    fn family_rejects_invalid_input() {
        assert!(GtinFamily::for_gtin("104012345678912").is_err());
    }
}
