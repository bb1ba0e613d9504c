//! # Commercial Prefix Registry
//!
//! Maps registered GS1-style company prefixes to issuing-company
//! metadata, and validates/produces "commercial" codes.
//!
//! ## Code Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                EAN-13: 4007817327326                                    │
//! │                                                                         │
//! │        400781          732732              6                            │
//! │   ┌──────────────┐ ┌──────────────┐ ┌──────────────┐                   │
//! │   │  GS1 prefix  │ │ product code │ │ check digit  │                   │
//! │   │  (6 digits)  │ │  (6 digits)  │ │  (1 digit)   │                   │
//! │   └──────────────┘ └──────────────┘ └──────────────┘                   │
//! │                                                                         │
//! │   Prefix widths: EAN-13/UPC-A/ITF-14 → 6, EAN-8 → 4                    │
//! │   CODE-128 / CODE-39 have no commercial-registry concept.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The registry owns an immutable prefix map injected at construction.
//! `CommercialRegistry::default()` carries a small built-in demo table;
//! tests and alternative deployments construct their own via
//! [`CommercialRegistry::with_prefixes`].

use std::collections::HashMap;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RegistryError;
use crate::symbology::{self, check_digit};
use crate::types::{CommercialCodeInfo, Symbology};

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// Company Info
// =============================================================================

/// Issuing-company metadata behind a registered prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub company: String,
    pub country: String,
}

impl CompanyInfo {
    pub fn new(company: impl Into<String>, country: impl Into<String>) -> Self {
        CompanyInfo {
            company: company.into(),
            country: country.into(),
        }
    }
}

// =============================================================================
// Commercial Registry
// =============================================================================

/// Immutable lookup of registered company prefixes.
///
/// Only the four numeric, checksum-bearing symbologies participate;
/// [`CommercialRegistry::prefix_len`] returns None for the text
/// symbologies and every operation rejects them with
/// [`RegistryError::Unsupported`].
#[derive(Debug, Clone)]
pub struct CommercialRegistry {
    prefixes: HashMap<String, CompanyInfo>,
}

impl Default for CommercialRegistry {
    /// The built-in demo table. Real deployments load prefixes obtained
    /// by registering with GS1.
    fn default() -> Self {
        CommercialRegistry::with_prefixes([
            ("400781", CompanyInfo::new("TechStorePlus", "Germany")),
            ("049000", CompanyInfo::new("Coca-Cola", "United States")),
            ("750100", CompanyInfo::new("Bimbo", "Mexico")),
            ("789123", CompanyInfo::new("Example Corp", "Brazil")),
        ])
    }
}

impl CommercialRegistry {
    /// Builds a registry from an explicit prefix table.
    pub fn with_prefixes<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = (P, CompanyInfo)>,
        P: Into<String>,
    {
        CommercialRegistry {
            prefixes: prefixes
                .into_iter()
                .map(|(prefix, info)| (prefix.into(), info))
                .collect(),
        }
    }

    /// Company prefix width for a symbology; None for CODE-128/CODE-39.
    pub const fn prefix_len(symbology: Symbology) -> Option<usize> {
        match symbology {
            Symbology::Ean13 | Symbology::UpcA | Symbology::Itf14 => Some(6),
            Symbology::Ean8 => Some(4),
            Symbology::Code128 | Symbology::Code39 => None,
        }
    }

    /// Slices the leading company prefix out of a full code.
    pub fn extract_prefix(code: &str, symbology: Symbology) -> Option<&str> {
        let len = Self::prefix_len(symbology)?;
        code.get(..len)
    }

    /// Company metadata for a prefix, if registered.
    pub fn company(&self, prefix: &str) -> Option<&CompanyInfo> {
        self.prefixes.get(prefix)
    }

    /// Resolves an extracted prefix against the table.
    ///
    /// EAN-8 extracts only the first 4 digits of a company prefix, so a
    /// shorter extracted prefix also matches a registered entry that
    /// begins with it.
    fn lookup(&self, prefix: &str) -> Option<&CompanyInfo> {
        self.prefixes.get(prefix).or_else(|| {
            self.prefixes
                .iter()
                .find_map(|(key, info)| key.starts_with(prefix).then_some(info))
        })
    }

    /// All registered prefixes with their company metadata, sorted by
    /// prefix (for selection UIs and demos).
    pub fn prefixes(&self) -> Vec<(&str, &CompanyInfo)> {
        let mut entries: Vec<_> = self
            .prefixes
            .iter()
            .map(|(prefix, info)| (prefix.as_str(), info))
            .collect();
        entries.sort_by_key(|(prefix, _)| *prefix);
        entries
    }

    /// True iff the code validates AND its prefix is registered.
    pub fn is_registered(&self, code: &str, symbology: Symbology) -> bool {
        if symbology::validate(code, symbology).is_err() {
            return false;
        }
        Self::extract_prefix(code, symbology)
            .map(|prefix| self.lookup(prefix).is_some())
            .unwrap_or(false)
    }

    /// Decomposes a registered commercial code into its fields.
    ///
    /// Returns None when the code is invalid, the symbology has no
    /// commercial concept, or the prefix is not registered.
    pub fn info(&self, code: &str, symbology: Symbology) -> Option<CommercialCodeInfo> {
        if symbology::validate(code, symbology).is_err() {
            return None;
        }

        let prefix = Self::extract_prefix(code, symbology)?;
        self.lookup(prefix)?;

        Some(Self::decompose(code, prefix.to_string(), true))
    }

    /// Composes validation and registration into one pass/fail decision.
    ///
    /// Failure reasons are distinguishable: a format/checksum problem
    /// surfaces as [`RegistryError::Invalid`], an unknown prefix as
    /// [`RegistryError::Unregistered`]. Callers must reject COMMERCIAL
    /// source codes on either, but only the former applies to
    /// internal-source codes.
    pub fn validate_commercial(
        &self,
        code: &str,
        symbology: Symbology,
    ) -> RegistryResult<CommercialCodeInfo> {
        if Self::prefix_len(symbology).is_none() {
            return Err(RegistryError::Unsupported { symbology });
        }

        symbology::validate(code, symbology)?;

        // prefix_len is Some here, and the code length already checked out
        let prefix = Self::extract_prefix(code, symbology).unwrap_or_default();
        if self.lookup(prefix).is_none() {
            return Err(RegistryError::Unregistered {
                prefix: prefix.to_string(),
            });
        }

        Ok(Self::decompose(code, prefix.to_string(), true))
    }

    /// Produces a self-consistent demo code under a random registered
    /// prefix.
    ///
    /// The result round-trips through [`CommercialRegistry::validate_commercial`].
    /// Demonstration only: a sampled code is NOT a real registration.
    pub fn generate_sample(&self, symbology: Symbology) -> RegistryResult<CommercialCodeInfo> {
        let total_len = match symbology.digit_count() {
            Some(len) => len,
            None => return Err(RegistryError::Unsupported { symbology }),
        };
        // prefix_len is Some for every numeric symbology
        let prefix_len = Self::prefix_len(symbology).unwrap_or_default();

        let mut rng = rand::thread_rng();
        let keys: Vec<&String> = self.prefixes.keys().collect();
        let prefix_source = keys
            .choose(&mut rng)
            .map(|s| s.as_str())
            .unwrap_or("000000");
        // EAN-8 prefixes are the first 4 digits of a 6-digit entry
        let prefix: String = prefix_source.chars().take(prefix_len).collect();

        let mut digits: Vec<u8> = prefix.bytes().map(|b| b - b'0').collect();
        while digits.len() < total_len - 1 {
            digits.push(rng.gen_range(0..10));
        }
        let check = check_digit(&digits);
        digits.push(check);

        let full_code: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        let registered = self.lookup(&prefix).is_some();
        Ok(Self::decompose(&full_code, prefix, registered))
    }

    /// Slices a validated full code into prefix / product code / check
    /// digit per the symbology's fixed field widths.
    fn decompose(code: &str, prefix: String, is_registered: bool) -> CommercialCodeInfo {
        let prefix_len = prefix.len();
        let product_code = code
            .get(prefix_len..code.len() - 1)
            .unwrap_or_default()
            .to_string();
        let check_digit = code.get(code.len() - 1..).unwrap_or_default().to_string();

        CommercialCodeInfo {
            gs1_prefix: prefix,
            product_code,
            check_digit,
            full_code: code.to_string(),
            is_registered,
            registration_date: is_registered.then(Utc::now),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
