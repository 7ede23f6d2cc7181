//! Everything the decoder can say about one code.

use crate::code::is_valid;
use crate::compose::{SymbolComposer, SymbolComposition};
use crate::fields::{country_code, echelon_ordinal, has_valid_echelon};
use crate::graphics::rule_id_from_sidc;
use crate::predicates::Category;
use serde::Serialize;

/// Decoded view of a SIDC.
#[derive(Debug, Clone, Serialize)]
pub struct SidcReport {
    pub sidc: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generic_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<SymbolComposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echelon: Option<i32>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic_rule_id: Option<i32>,
}

impl SidcReport {
    pub fn new(composer: &SymbolComposer, code: &str) -> Self {
        let valid = is_valid(code);
        if !valid {
            return Self {
                sidc: code.to_string(),
                valid,
                categories: Vec::new(),
                generic_name: String::new(),
                rule_name: String::new(),
                composition: None,
                echelon: None,
                country_code: country_code(code),
                graphic_rule_id: None,
            };
        }

        let code = code.to_ascii_uppercase();
        let graphic_rule_id = Some(rule_id_from_sidc(&code)).filter(|id| *id != 0);
        Self {
            valid,
            categories: Category::of(&code).iter().map(|c| c.to_string()).collect(),
            generic_name: composer.generic_symbol_name(&code),
            rule_name: composer.rule_name_from_sidc(&code),
            composition: composer.symbol_layers(&code),
            echelon: has_valid_echelon(&code).then(|| echelon_ordinal(&code)),
            country_code: country_code(&code),
            graphic_rule_id,
            sidc: code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{SymbolEntry, SymbolLibrary};

    #[test]
    fn test_report_for_unit() {
        let composer = SymbolComposer::new(SymbolLibrary::from_entries(vec![SymbolEntry::new(
            "Infantry",
            "SFGPUCI--------",
        )]));
        let report = SidcReport::new(&composer, "sfgpuci----cusg");
        assert!(report.valid);
        assert_eq!(report.sidc, "SFGPUCI----CUSG");
        assert_eq!(report.generic_name, "Infantry");
        assert_eq!(report.rule_name, "Infantry~Section");
        assert_eq!(report.echelon, Some(11));
        assert_eq!(report.country_code, "US");
        assert!(report.categories.contains(&"Unit".to_string()));
    }

    #[test]
    fn test_report_for_invalid_code() {
        let composer = SymbolComposer::new(SymbolLibrary::new());
        let report = SidcReport::new(&composer, "BOGUS");
        assert!(!report.valid);
        assert!(report.rule_name.is_empty());
        assert_eq!(report.country_code, "--");
    }
}
