//! SIDC validation and the validated [`Sidc`] value type.
//!
//! A code is valid iff it has exactly 15 characters and, upper-cased,
//! matches the master grammar:
//!
//! ```text
//! ^[SGWIOE][PUAFNSHGWMDLJKO\-][PAGSUFXTMOEVLIRNZ\-][APCDXF\-][A-Z0-9\-]{6}[A-Z\-]{2}[A-Z0-9\-]{2}[AECGNSX\-]$
//! ```

use crate::affiliation::{Affiliation, CodingScheme};
use crate::sidc_regex;
use milsym_core::FeatureError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Number of characters in a SIDC.
pub const SIDC_LEN: usize = 15;

/// Padding character for unused positions.
pub const BLANK: char = '-';

fn master_grammar() -> &'static Regex {
    sidc_regex!(
        r"^[SGWIOE][PUAFNSHGWMDLJKO\-][PAGSUFXTMOEVLIRNZ\-][APCDXF\-][A-Z0-9\-]{6}[A-Z\-]{2}[A-Z0-9\-]{2}[AECGNSX\-]$"
    )
}

/// Returns true if `code` is a valid SIDC.
#[inline]
pub fn is_valid(code: &str) -> bool {
    is_matching(code, master_grammar())
}

/// Returns true if `code` is a valid SIDC that also matches `expr`.
///
/// A code that fails the grammar never matches, whatever `expr` says.
pub fn is_matching(code: &str, expr: &Regex) -> bool {
    if code.is_empty() || code.chars().count() != SIDC_LEN {
        return false;
    }
    let upper = code.to_ascii_uppercase();
    expr.is_match(&upper) && master_grammar().is_match(&upper)
}

/// A validated, upper-cased SIDC.
///
/// Every position is a single ASCII byte, so positional access never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sidc(String);

impl Sidc {
    /// Validates and upper-cases `code`.
    pub fn parse(code: &str) -> Option<Self> {
        if is_valid(code) {
            Some(Self(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// The code as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character at a 0-indexed position.
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.0.as_bytes()[index] as char
    }

    /// Substring over a byte range.
    #[inline]
    pub fn slice(&self, range: std::ops::Range<usize>) -> &str {
        &self.0[range]
    }

    /// Coding scheme character (position 0).
    #[inline]
    pub fn scheme_char(&self) -> char {
        self.char_at(0)
    }

    /// Coding scheme (position 0).
    pub fn scheme(&self) -> CodingScheme {
        // The grammar restricts position 0 to the six coding schemes.
        CodingScheme::from_char(self.scheme_char()).unwrap_or(CodingScheme::Warfighting)
    }

    /// Raw affiliation character (position 1).
    #[inline]
    pub fn affiliation_char(&self) -> char {
        self.char_at(1)
    }

    /// Affiliation (position 1), if it is a standard identity.
    pub fn affiliation(&self) -> Option<Affiliation> {
        Affiliation::from_char(self.affiliation_char())
    }

    /// Returns true if this code matches a positional guard.
    #[inline]
    pub fn matches(&self, expr: &Regex) -> bool {
        expr.is_match(&self.0)
    }
}

impl FromStr for Sidc {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sidc::parse(s).ok_or_else(|| FeatureError::InvalidSidc {
            sidc: s.to_string(),
        })
    }
}

impl fmt::Display for Sidc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sidc {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
