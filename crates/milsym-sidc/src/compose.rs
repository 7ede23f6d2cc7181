//! Canonical symbol names and render layer lists.

use crate::affiliation::generic_frame_char;
use crate::code::{Sidc, BLANK};
use crate::library::SymbolLibrary;
use crate::modifiers::{
    has_dashed_frame, modifier_names, DASHED_FRAME, LAYER_ORDER, NAME_ORDER, NAME_SEPARATOR,
};
use crate::predicates::is_installation;
use crate::sidc_regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Base symbol plus the modifier layers to stack over it, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolComposition {
    pub base: String,
    pub layers: Vec<String>,
}

/// Decodes SIDCs against a loaded symbol library.
#[derive(Debug, Clone)]
pub struct SymbolComposer {
    library: SymbolLibrary,
}

impl SymbolComposer {
    pub fn new(library: SymbolLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &SymbolLibrary {
        &self.library
    }

    /// Canonical symbol name: the generic base name followed by every
    /// applicable modifier, `~`-separated.
    ///
    /// Tactical graphics and METOC codes get the base name only. Returns an
    /// empty string for invalid codes and codes without a library entry.
    pub fn rule_name_from_sidc(&self, code: &str) -> String {
        let Some(sidc) = Sidc::parse(code) else {
            warn!(sidc = %code, "Invalid SIDC passed to rule name lookup");
            return String::new();
        };
        let Some(mut name) = self.generic_name(&sidc) else {
            return String::new();
        };

        if !sidc.scheme().takes_modifiers() {
            return name;
        }

        for modifier in modifier_names(&sidc, &NAME_ORDER) {
            name.push(NAME_SEPARATOR);
            name.push_str(modifier);
        }
        if has_dashed_frame(&sidc) {
            name.push(NAME_SEPARATOR);
            name.push_str(DASHED_FRAME);
        }
        name
    }

    /// Name of the generic symbol for `code`, or an empty string.
    pub fn generic_symbol_name(&self, code: &str) -> String {
        match Sidc::parse(code) {
            Some(sidc) => self.generic_name(&sidc).unwrap_or_default(),
            None => {
                warn!(sidc = %code, "Invalid SIDC passed to generic name lookup");
                String::new()
            }
        }
    }

    /// Base symbol and ordered modifier layers for a renderer.
    ///
    /// Layers missing from the library are left out. The planning frame,
    /// when one applies, is always the last layer.
    pub fn symbol_layers(&self, code: &str) -> Option<SymbolComposition> {
        let Some(sidc) = Sidc::parse(code) else {
            warn!(sidc = %code, "Invalid SIDC passed to symbol layer lookup");
            return None;
        };
        let base = self.generic_name(&sidc)?;
        let mut composition = SymbolComposition {
            base,
            layers: Vec::new(),
        };
        if !sidc.scheme().takes_modifiers() {
            return Some(composition);
        }

        for name in modifier_names(&sidc, &LAYER_ORDER) {
            self.push_layer(&mut composition.layers, name);
        }
        if let Some(frame) = self.dashed_frame_name(&sidc) {
            self.push_layer(&mut composition.layers, &frame);
        }
        Some(composition)
    }

    fn push_layer(&self, layers: &mut Vec<String>, name: &str) {
        if self.library.by_name(name).is_some() {
            layers.push(name.to_string());
        } else {
            warn!(layer = %name, "Modifier layer not found in symbol library");
        }
    }

    fn generic_name(&self, sidc: &Sidc) -> Option<String> {
        let key = self.generic_key(sidc);
        match self.library.by_masked_code(&key) {
            Some(name) => Some(name.to_string()),
            None => {
                warn!(sidc = %sidc, key = %key, "Symbol library has no entry for masked code");
                None
            }
        }
    }

    /// Masks a code to the form generic library entries are keyed by.
    fn generic_key(&self, sidc: &Sidc) -> String {
        let code = sidc.as_str();
        let tail = if is_installation(code) { "H----" } else { "-----" };
        let mut key: Vec<u8> = format!("{}{}", &code[..10], tail).into_bytes();

        match sidc.scheme_char() {
            'G' => {
                // graphics are listed under "-", the real affiliation, or "F"
                let mut masked = format!("G{}{}----X", BLANK, &code[2..10]).into_bytes();
                for fallback in [sidc.affiliation_char(), 'F'] {
                    if self.library.contains_code(&ascii(&masked)) {
                        break;
                    }
                    masked[1] = fallback as u8;
                }
                return ascii(&masked).replace('*', "-");
            }
            'E' if sidc.char_at(2) == 'N' => key[1] = BLANK as u8,
            'W' => {}
            _ => key[1] = generic_frame_char(sidc.affiliation_char()) as u8,
        }
        if sidc.scheme_char() != 'W' {
            key[3] = b'P';
        }
        ascii(&key)
    }

    /// Planning frame layer name, looked up through a synthetic frame code.
    ///
    /// Frames exist in the library only as `S` + planning affiliation +
    /// battle dimension + `P`/`A` (+ `U`/`E` for friendly ground), so the
    /// code is remapped onto that shape first.
    fn dashed_frame_name(&self, sidc: &Sidc) -> Option<String> {
        let planning = sidc.matches(sidc_regex!(r"^[SIOE][AGMPS].{13}$"))
            || sidc.matches(sidc_regex!(r"^[SIOE].{2}[A].{11}$"));
        if !planning {
            return None;
        }

        let scheme = sidc.scheme_char();
        let Some(affiliation) = sidc.affiliation().map(|a| a.planning_code()) else {
            warn!(sidc = %sidc, "No planning frame for affiliation");
            return None;
        };
        let mut dimension = sidc.char_at(2);
        let mut ground_or_equipment = sidc.char_at(4);

        match scheme {
            'O' => dimension = 'G',
            'E' if dimension == 'I' => dimension = 'G',
            'E' => return None,
            _ => {}
        }
        match dimension {
            'F' => dimension = 'G',
            'S' => {
                dimension = 'G';
                ground_or_equipment = 'E';
            }
            _ => {}
        }

        let mut key = String::with_capacity(5);
        key.push('S');
        key.push(affiliation);
        key.push(if dimension == 'A' { 'P' } else { dimension });
        key.push(if affiliation == 'N' { 'A' } else { 'P' });
        if affiliation == 'A' && dimension == 'G' {
            let equipment = ground_or_equipment == 'E' || scheme == 'I';
            key.push(if equipment { 'E' } else { 'U' });
        }

        match self.library.by_masked_code(&key) {
            Some(name) => Some(name.to_string()),
            None => {
                warn!(sidc = %sidc, lookup = %key, "Could not find planning frame");
                None
            }
        }
    }
}

fn ascii(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SymbolEntry;

    fn composer() -> SymbolComposer {
        SymbolComposer::new(SymbolLibrary::from_entries(vec![
            SymbolEntry::new("Infantry", "SFGPUCI--------"),
            SymbolEntry::new("Hostile Infantry", "SHGPUCI--------"),
            SymbolEntry::new("Armor Unknown", "SUGPUCA--------"),
            SymbolEntry::new("Airfield", "SFGPIBA---H----"),
            SymbolEntry::new("Delay F", "G-TPL---------X"),
            SymbolEntry::new("Axis of Advance", "GFGPOLAGM-----X"),
            SymbolEntry::new("Flood", "E-NPAC---------"),
            SymbolEntry::new("Hail", "WAS-PHT--------"),
            SymbolEntry::new("Friend Ground Unit Planned", "SAGPU"),
            SymbolEntry::new("Hostile Ground Planned", "SSGP"),
            SymbolEntry::new("Company/Battery/Troop", "Echelon;ECH-E"),
            SymbolEntry::new("Headquarters Staff F", "HQF"),
            SymbolEntry::new("Task Force", "TF"),
            SymbolEntry::new("Damaged", "DMG"),
        ]))
    }

    #[test]
    fn test_generic_name_forces_friend_present() {
        let c = composer();
        // assumed friend, anticipated, echelon and country all masked away
        assert_eq!(c.generic_symbol_name("SAGAUCI---EEUSG"), "Infantry");
        assert_eq!(c.generic_symbol_name("SJGPUCI--------"), "Hostile Infantry");
        assert_eq!(c.generic_symbol_name("SGGPUCA--------"), "Armor Unknown");
    }

    #[test]
    fn test_generic_name_old_style_installation() {
        let c = composer();
        assert_eq!(c.generic_symbol_name("SFGPIBA---AAUSG"), "Airfield");
    }

    #[test]
    fn test_generic_name_tactical_fallbacks() {
        let c = composer();
        // listed under "-"
        assert_eq!(c.generic_symbol_name("GHTPL---------X"), "Delay");
        // listed under the real affiliation
        assert_eq!(c.generic_symbol_name("GFGPOLAGM-----X"), "Axis of Advance");
        // listed under "F" only
        assert_eq!(c.generic_symbol_name("GHGPOLAGM-----X"), "Axis of Advance");
    }

    #[test]
    fn test_generic_name_natural_event_and_metoc() {
        let c = composer();
        assert_eq!(c.generic_symbol_name("EFNPAC---------"), "Flood");
        // METOC keeps its affiliation and status
        assert_eq!(c.generic_symbol_name("WAS-PHT---P----"), "Hail");
    }

    #[test]
    fn test_missing_library_entry_is_empty() {
        let c = composer();
        assert_eq!(c.generic_symbol_name("SFAPMF---------"), "");
        assert_eq!(c.rule_name_from_sidc("SFAPMF---------"), "");
        assert!(c.symbol_layers("SFAPMF---------").is_none());
    }

    #[test]
    fn test_rule_name_modifier_order() {
        let c = composer();
        assert_eq!(
            c.rule_name_from_sidc("SFGDUCI---AEUSG"),
            "Infantry~Company/Battery/Troop~Damaged~Headquarters Staff F"
        );
    }

    #[test]
    fn test_rule_name_graphics_have_no_modifiers() {
        let c = composer();
        assert_eq!(c.rule_name_from_sidc("GHTPL------E--X"), "Delay");
        assert_eq!(c.rule_name_from_sidc("WAS-PHT---P----"), "Hail");
    }

    #[test]
    fn test_rule_name_dashed_frame_last() {
        let c = composer();
        let name = c.rule_name_from_sidc("SAGPUCI---BE---");
        assert_eq!(
            name,
            "Infantry~Company/Battery/Troop~Task Force~Headquarters Staff F~Dashed Frame"
        );
    }

    #[test]
    fn test_rule_name_invalid() {
        let c = composer();
        assert_eq!(c.rule_name_from_sidc(""), "");
        assert_eq!(c.rule_name_from_sidc("SFGPUCI"), "");
    }

    #[test]
    fn test_symbol_layers() {
        let c = composer();
        let composition = c.symbol_layers("SAGDUCI---BE---").unwrap();
        assert_eq!(composition.base, "Infantry");
        assert_eq!(
            composition.layers,
            vec![
                "Damaged".to_string(),
                "Company/Battery/Troop".to_string(),
                "Task Force".to_string(),
                "Headquarters Staff F".to_string(),
                "Friend Ground Unit Planned".to_string(),
            ]
        );
    }

    #[test]
    fn test_dashed_frame_remap() {
        let c = composer();
        let hostile = Sidc::parse("SSGPUCI--------").unwrap();
        assert_eq!(c.dashed_frame_name(&hostile).as_deref(), Some("Hostile Ground Planned"));

        // stability operations map onto the ground frame
        let ops = Sidc::parse("OSVPA----------").unwrap();
        assert_eq!(c.dashed_frame_name(&ops).as_deref(), Some("Hostile Ground Planned"));

        // only emergency incidents have a frame
        let flood = Sidc::parse("EANPAC---------").unwrap();
        assert_eq!(c.dashed_frame_name(&flood), None);

        let present = Sidc::parse("SFGPUCI--------").unwrap();
        assert_eq!(c.dashed_frame_name(&present), None);
    }
}
