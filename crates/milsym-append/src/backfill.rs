//! Derived attribute backfill.
//!
//! Fills unique designation, echelon and country code on output records
//! from the SIDC. What may be overwritten depends on the [`BackfillPolicy`];
//! the values written for the previous record are carried in an explicit
//! [`BackfillState`] owned by the feature loop.

use crate::mapping::{COUNTRY_CODE_FIELD, ECHELON_FIELD, UNIQUE_DESIGNATION_FIELD};
use crate::store::{ClassInfo, Feature, FieldValue};
use milsym_core::BackfillPolicy;
use milsym_sidc::{country_code, echelon_ordinal, has_valid_echelon, SymbolComposer};

/// Values written for the previous record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillState {
    pub unique_designation: Option<String>,
    pub echelon: Option<i64>,
    pub country_code: Option<String>,
}

/// Backfills derived attributes over a sequence of records.
#[derive(Debug, Clone)]
pub struct Backfill {
    policy: BackfillPolicy,
    state: BackfillState,
}

impl Backfill {
    pub fn new(policy: BackfillPolicy) -> Self {
        Self {
            policy,
            state: BackfillState::default(),
        }
    }

    pub fn state(&self) -> &BackfillState {
        &self.state
    }

    /// Fills the derived fields present on `output` for one record.
    pub fn apply(
        &mut self,
        target: &mut Feature,
        output: &ClassInfo,
        sidc: &str,
        composer: &SymbolComposer,
    ) {
        if let Some(field) = output.find_field(UNIQUE_DESIGNATION_FIELD) {
            let current = target.get(&field.name);
            if self.may_overwrite_text(current, self.state.unique_designation.as_deref()) {
                let mut name = composer.generic_symbol_name(sidc);
                if let Some(max) = field.max_length {
                    truncate_chars(&mut name, max);
                }
                target.set(&field.name, FieldValue::String(name.clone()));
                self.state.unique_designation = Some(name);
            }
        }

        if let Some(field) = output.find_field(ECHELON_FIELD) {
            if has_valid_echelon(sidc) {
                let current = target.get(&field.name);
                let overwrite = current.is_empty()
                    || (self.policy == BackfillPolicy::EmptyOrLastWritten
                        && current.as_i64().is_some()
                        && current.as_i64() == self.state.echelon);
                if overwrite {
                    let ordinal = i64::from(echelon_ordinal(sidc));
                    target.set(&field.name, FieldValue::Integer(ordinal));
                    self.state.echelon = Some(ordinal);
                }
            }
        }

        if let Some(field) = output.find_field(COUNTRY_CODE_FIELD) {
            let current = target.get(&field.name);
            if self.may_overwrite_text(current, self.state.country_code.as_deref()) {
                let code = country_code(sidc);
                target.set(&field.name, FieldValue::String(code.clone()));
                self.state.country_code = Some(code);
            }
        }
    }

    fn may_overwrite_text(&self, current: &FieldValue, last: Option<&str>) -> bool {
        if current.is_empty() {
            return true;
        }
        self.policy == BackfillPolicy::EmptyOrLastWritten
            && last.is_some_and(|last| current.to_text() == last)
    }
}

fn truncate_chars(s: &mut String, max: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
}
