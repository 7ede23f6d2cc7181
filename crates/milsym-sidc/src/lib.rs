//! SIDC decoding for MIL-STD-2525 symbol identification codes.
//!
//! This crate provides:
//!
//! - Validation against the 15-character master grammar
//! - Category predicates (affiliation, unit, equipment, METOC, tactical graphics, ...)
//! - Positional field decoding: echelon, country code, mobility, operational condition
//! - Canonical symbol names and render layer lists built from an ordered
//!   modifier table over a loaded symbol library
//! - Fixed representation rule IDs for tactical graphics and METOC symbols
//!
//! All decoding is pure. Invalid codes produce empty results and a log line,
//! never a panic.
//!
//! # Examples
//!
//! ```rust
//! use milsym_sidc::{is_valid, country_code, echelon_ordinal};
//! use milsym_sidc::{SymbolComposer, SymbolEntry, SymbolLibrary};
//!
//! assert!(is_valid("SFGPUCI---AAUSG"));
//! assert_eq!(country_code("SFGPUCI---AAUSG"), "US");
//! assert_eq!(echelon_ordinal("SFGPUCI----CUSG"), 11);
//!
//! let library = SymbolLibrary::from_entries(vec![
//!     SymbolEntry::new("Infantry", "Friend;SFGPUCI-----***"),
//! ]);
//! let composer = SymbolComposer::new(library);
//! assert_eq!(composer.rule_name_from_sidc("SFGPUCI----CUSG"), "Infantry~Section");
//! ```

pub mod macros;

pub mod affiliation;
pub mod code;
pub mod compose;
pub mod fields;
pub mod graphics;
pub mod library;
pub mod modifiers;
pub mod predicates;
pub mod report;

// Re-export commonly used types
pub use affiliation::{generic_frame_char, Affiliation, CodingScheme};
pub use code::{is_matching, is_valid, Sidc, SIDC_LEN};
pub use compose::{SymbolComposer, SymbolComposition};
pub use fields::{country_code, echelon_ordinal, has_valid_echelon, Echelon};
pub use graphics::{masked_graphic_code, rule_id_from_sidc};
pub use library::{Symbol, SymbolEntry, SymbolLibrary, SymbolSource, YamlSymbolSource};
pub use modifiers::{ModifierCategory, DASHED_FRAME, NAME_SEPARATOR};
pub use predicates::Category;
pub use report::SidcReport;
