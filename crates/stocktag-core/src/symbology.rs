//! # Symbology Validation
//!
//! Per-symbology format checks and check-digit arithmetic.
//!
//! ## Validation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Symbology │ Length   │ Charset                  │ Checksum            │
//! │  ──────────┼──────────┼──────────────────────────┼──────────────────   │
//! │  EAN-13    │ 13 digits│ 0-9                      │ mod-10 over 12      │
//! │  EAN-8     │ 8 digits │ 0-9                      │ mod-10 over 7       │
//! │  UPC-A     │ 12 digits│ 0-9                      │ mod-10 over 11      │
//! │  ITF-14    │ 14 digits│ 0-9                      │ mod-10 over 13      │
//! │  CODE-128  │ 1-48     │ printable ASCII          │ none                │
//! │  CODE-39   │ 1-43     │ 0-9 A-Z - . / + % $ spc  │ none                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Check-Digit Algorithm (EAN/UPC/ITF family)
//! Sum each payload digit multiplied alternately by weight 1 (even
//! index, 0-based) and weight 3 (odd index); the check digit is
//! `(10 − sum mod 10) mod 10`.
//!
//! ## Usage
//! ```rust
//! use stocktag_core::symbology::{check_digit, generate_sample, validate};
//! use stocktag_core::types::Symbology;
//!
//! validate("4007817327326", Symbology::Ean13).unwrap();
//! assert_eq!(check_digit(&[4, 0, 0, 7, 8, 1, 7, 3, 2, 7, 3, 2]), 6);
//!
//! // Sample data always round-trips through the validator
//! let sample = generate_sample(Symbology::UpcA);
//! assert!(validate(&sample, Symbology::UpcA).is_ok());
//! ```

use rand::Rng;

use crate::error::SymbologyError;
use crate::types::Symbology;

/// Result type for validation operations.
pub type SymbologyResult<T> = Result<T, SymbologyError>;

/// Maximum data length for CODE-128.
pub const CODE128_MAX_LEN: usize = 48;

/// Maximum data length for CODE-39.
pub const CODE39_MAX_LEN: usize = 43;

// =============================================================================
// Check Digit
// =============================================================================

/// Computes the weighted mod-10 check digit over a digit payload.
///
/// Shared by the EAN/UPC/ITF family. Weights alternate 1, 3, 1, 3, ...
/// starting with 1 at index 0.
///
/// ## Example
/// ```rust
/// use stocktag_core::symbology::check_digit;
///
/// // EAN-13 payload 400781732732 → check digit 6
/// assert_eq!(check_digit(&[4, 0, 0, 7, 8, 1, 7, 3, 2, 7, 3, 2]), 6);
/// ```
pub fn check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a data string against a symbology's rules.
///
/// ## Failure Modes
/// - [`SymbologyError::Format`] - wrong length or charset
/// - [`SymbologyError::Checksum`] - trailing check digit mismatch
///   (numeric symbologies only)
pub fn validate(data: &str, symbology: Symbology) -> SymbologyResult<()> {
    match symbology {
        Symbology::Ean13 => validate_numeric(data, symbology, 13),
        Symbology::Ean8 => validate_numeric(data, symbology, 8),
        Symbology::UpcA => validate_numeric(data, symbology, 12),
        Symbology::Itf14 => validate_numeric(data, symbology, 14),
        Symbology::Code128 => validate_code128(data),
        Symbology::Code39 => validate_code39(data),
    }
}

/// Fixed-length digits with trailing check digit.
fn validate_numeric(data: &str, symbology: Symbology, len: usize) -> SymbologyResult<()> {
    let digits = match parse_digits(data, len) {
        Some(digits) => digits,
        None => {
            return Err(SymbologyError::format(
                symbology,
                format!("must be exactly {} numeric digits", len),
            ));
        }
    };

    let (payload, check) = digits.split_at(len - 1);
    if check[0] != check_digit(payload) {
        return Err(SymbologyError::checksum(symbology));
    }

    Ok(())
}

/// Parses `data` into exactly `len` decimal digits, or None.
fn parse_digits(data: &str, len: usize) -> Option<Vec<u8>> {
    if data.len() != len {
        return None;
    }
    data.chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

fn validate_code128(data: &str) -> SymbologyResult<()> {
    if data.is_empty() || data.len() > CODE128_MAX_LEN {
        return Err(SymbologyError::format(
            Symbology::Code128,
            format!("must be between 1 and {} characters", CODE128_MAX_LEN),
        ));
    }

    // Printable ASCII range 0x20-0x7F, matching what rasterizers accept.
    if !data.chars().all(|c| ('\x20'..='\x7f').contains(&c)) {
        return Err(SymbologyError::format(
            Symbology::Code128,
            "may only contain printable ASCII characters",
        ));
    }

    Ok(())
}

fn validate_code39(data: &str) -> SymbologyResult<()> {
    if data.is_empty() || data.len() > CODE39_MAX_LEN {
        return Err(SymbologyError::format(
            Symbology::Code39,
            format!("must be between 1 and {} characters", CODE39_MAX_LEN),
        ));
    }

    let allowed = |c: char| {
        c.is_ascii_digit() || c.is_ascii_uppercase() || "-./+%$ ".contains(c)
    };
    if !data.chars().all(allowed) {
        return Err(SymbologyError::format(
            Symbology::Code39,
            "may only contain digits, uppercase letters and - . / + % $ space",
        ));
    }

    Ok(())
}

// =============================================================================
// Sample Data
// =============================================================================

/// Produces a structurally valid example for a symbology.
///
/// Numeric symbologies get random payload digits plus the computed
/// check digit; the text symbologies get a fixed literal. The output
/// always passes [`validate`] for the same symbology (round-trip
/// property, covered by tests).
///
/// Used for demos and for synthesizing placeholder codes during
/// catalog generation.
pub fn generate_sample(symbology: Symbology) -> String {
    match symbology {
        Symbology::Ean13 => random_numeric(13),
        Symbology::Ean8 => random_numeric(8),
        Symbology::UpcA => random_numeric(12),
        Symbology::Itf14 => random_numeric(14),
        Symbology::Code128 => "SAMPLE123".to_string(),
        Symbology::Code39 => "SAMPLE-123".to_string(),
    }
}

/// Random digit payload of `len - 1` digits plus its check digit.
fn random_numeric(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let payload: Vec<u8> = (0..len - 1).map(|_| rng.gen_range(0..10)).collect();
    let check = check_digit(&payload);

    let mut out = String::with_capacity(len);
    for d in payload.iter().chain(std::iter::once(&check)) {
        out.push(char::from(b'0' + d));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_known_vector() {
        // 400781732732 → 6 (full code 4007817327326)
        assert_eq!(check_digit(&[4, 0, 0, 7, 8, 1, 7, 3, 2, 7, 3, 2]), 6);
    }

    #[test]
    fn test_check_digit_zero_remainder() {
        // Sum divisible by 10 must yield 0, not 10.
        assert_eq!(check_digit(&[0, 0, 0, 0, 0, 0, 0]), 0);
    }

    #[test]
    fn test_ean13_valid() {
        assert!(validate("4007817327326", Symbology::Ean13).is_ok());
    }

    #[test]
    fn test_ean13_non_digit_is_format_error() {
        let err = validate("123456789012X", Symbology::Ean13).unwrap_err();
        assert!(matches!(err, SymbologyError::Format { .. }));
        assert!(err.to_string().contains("EAN-13"));
    }

    #[test]
    fn test_ean13_wrong_length_is_format_error() {
        let err = validate("400781732733", Symbology::Ean13).unwrap_err();
        assert!(matches!(err, SymbologyError::Format { .. }));
    }

    #[test]
    fn test_ean13_wrong_check_digit_is_checksum_error() {
        // Correct code ends in 6; flip the last digit.
        let err = validate("4007817327325", Symbology::Ean13).unwrap_err();
        assert_eq!(err, SymbologyError::checksum(Symbology::Ean13));
    }

    #[test]
    fn test_ean8_valid_and_invalid() {
        // Payload 4007817 → check digit 7
        assert_eq!(check_digit(&[4, 0, 0, 7, 8, 1, 7]), 7);
        assert!(validate("40078177", Symbology::Ean8).is_ok());
        assert!(matches!(
            validate("40078170", Symbology::Ean8),
            Err(SymbologyError::Checksum { .. })
        ));
    }

    #[test]
    fn test_upca_length() {
        assert!(matches!(
            validate("4007817327326", Symbology::UpcA),
            Err(SymbologyError::Format { .. })
        ));
    }

    #[test]
    fn test_itf14_valid() {
        // Payload 4007817327324 → check digit 2
        assert_eq!(
            check_digit(&[4, 0, 0, 7, 8, 1, 7, 3, 2, 7, 3, 2, 4]),
            2
        );
        assert!(validate("40078173273242", Symbology::Itf14).is_ok());
    }

    #[test]
    fn test_code128_bounds_and_charset() {
        assert!(validate("LAPTOP-GAMING-001", Symbology::Code128).is_ok());
        assert!(validate("", Symbology::Code128).is_err());
        assert!(validate(&"A".repeat(49), Symbology::Code128).is_err());
        // Control characters are outside the printable range.
        assert!(validate("AB\u{7}", Symbology::Code128).is_err());
    }

    #[test]
    fn test_code39_charset() {
        assert!(validate("EQUIP-001", Symbology::Code39).is_ok());
        assert!(validate("ABC $%+./123", Symbology::Code39).is_ok());
        // Lowercase is outside the CODE-39 charset.
        assert!(validate("equip-001", Symbology::Code39).is_err());
        assert!(validate(&"A".repeat(44), Symbology::Code39).is_err());
    }

    #[test]
    fn test_appended_check_digit_round_trip() {
        // For any payload, appending its computed check digit validates.
        let payloads: [&[u8]; 3] = [
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2],
            &[9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9],
            &[0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        ];
        for payload in payloads {
            let check = check_digit(payload);
            let code: String = payload
                .iter()
                .chain(std::iter::once(&check))
                .map(|d| char::from(b'0' + d))
                .collect();
            assert!(validate(&code, Symbology::Ean13).is_ok(), "code {}", code);
        }
    }

    #[test]
    fn test_generate_sample_round_trips_for_all_symbologies() {
        for symbology in Symbology::all() {
            for _ in 0..20 {
                let sample = generate_sample(symbology);
                assert!(
                    validate(&sample, symbology).is_ok(),
                    "{} sample '{}' failed validation",
                    symbology,
                    sample
                );
            }
        }
    }
}
