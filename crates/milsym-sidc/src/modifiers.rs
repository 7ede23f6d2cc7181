//! Modifier decoding as ordered tables of guarded lookups.
//!
//! Each modifier category pairs a positional guard with a name lookup. The
//! canonical name and the render layer list walk the same lookups in two
//! different fixed orders, [`NAME_ORDER`] and [`LAYER_ORDER`].

use crate::affiliation::generic_frame_char;
use crate::code::Sidc;
use crate::fields::{damage_name, echelon_context, has_valid_echelon, mobility_name, Echelon};
use crate::sidc_regex;
use std::fmt;

/// Token appended for planning ("dashed") frames.
pub const DASHED_FRAME: &str = "Dashed Frame";

/// Separator between the base name and each modifier in a canonical name.
pub const NAME_SEPARATOR: char = '~';

/// Modifier categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierCategory {
    Echelon,
    Frame,
    Damaged,
    FeintDummy,
    TaskForce,
    Mobility,
    Installation,
    Headquarters,
}

impl fmt::Display for ModifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierCategory::Echelon => "echelon",
            ModifierCategory::Frame => "frame",
            ModifierCategory::Damaged => "damaged",
            ModifierCategory::FeintDummy => "feint/dummy",
            ModifierCategory::TaskForce => "task force",
            ModifierCategory::Mobility => "mobility",
            ModifierCategory::Installation => "installation",
            ModifierCategory::Headquarters => "headquarters",
        };
        f.write_str(name)
    }
}

/// Guarded lookup for one modifier category.
pub type ModifierFn = fn(&Sidc) -> Option<&'static str>;

/// A modifier category and its lookup.
#[derive(Clone, Copy)]
pub struct ModifierRule {
    pub category: ModifierCategory,
    pub lookup: ModifierFn,
}

impl ModifierRule {
    const fn new(category: ModifierCategory, lookup: ModifierFn) -> Self {
        Self { category, lookup }
    }
}

impl fmt::Debug for ModifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierRule")
            .field("category", &self.category)
            .finish()
    }
}

/// Order of modifiers in a canonical symbol name.
pub const NAME_ORDER: [ModifierRule; 8] = [
    ModifierRule::new(ModifierCategory::Echelon, echelon),
    ModifierRule::new(ModifierCategory::Frame, frame),
    ModifierRule::new(ModifierCategory::Damaged, damaged),
    ModifierRule::new(ModifierCategory::FeintDummy, feint_dummy),
    ModifierRule::new(ModifierCategory::TaskForce, task_force),
    ModifierRule::new(ModifierCategory::Mobility, mobility),
    ModifierRule::new(ModifierCategory::Installation, installation),
    ModifierRule::new(ModifierCategory::Headquarters, headquarters),
];

/// Order in which a renderer stacks modifier layers over the base symbol.
pub const LAYER_ORDER: [ModifierRule; 8] = [
    ModifierRule::new(ModifierCategory::Damaged, damaged),
    ModifierRule::new(ModifierCategory::Frame, frame),
    ModifierRule::new(ModifierCategory::Echelon, echelon_layer),
    ModifierRule::new(ModifierCategory::FeintDummy, feint_dummy),
    ModifierRule::new(ModifierCategory::TaskForce, task_force),
    ModifierRule::new(ModifierCategory::Headquarters, headquarters),
    ModifierRule::new(ModifierCategory::Mobility, mobility),
    ModifierRule::new(ModifierCategory::Installation, installation),
];

/// Applicable modifier names for `sidc`, walking `order`.
pub fn modifier_names(sidc: &Sidc, order: &[ModifierRule]) -> Vec<&'static str> {
    order.iter().filter_map(|rule| (rule.lookup)(sidc)).collect()
}

/// Planning indicator: pending-style affiliations or anticipated status.
pub fn has_dashed_frame(sidc: &Sidc) -> bool {
    sidc.matches(sidc_regex!(r"^.[AGMPS].{13}$")) || sidc.matches(sidc_regex!(r"^.{3}[A].{11}$"))
}

fn echelon(sidc: &Sidc) -> Option<&'static str> {
    let indicator = sidc.char_at(10);
    let letter = sidc.char_at(11);
    // installations and short towed sonar reuse these positions
    if indicator == 'H' || (indicator == 'N' && letter == 'L') {
        return None;
    }
    if !sidc.matches(echelon_context()) {
        return None;
    }
    Echelon::from_char(letter).map(|e| e.name())
}

fn echelon_layer(sidc: &Sidc) -> Option<&'static str> {
    if !has_valid_echelon(sidc.as_str()) {
        return None;
    }
    echelon(sidc)
}

fn frame(sidc: &Sidc) -> Option<&'static str> {
    if !sidc.matches(sidc_regex!(r"^[SIOE][DGJKLMW].{13}$")) {
        return None;
    }
    match sidc.affiliation_char() {
        'G' | 'W' | 'D' | 'L' | 'M' => Some("Exercise Modifier F"),
        'J' => Some("Joker"),
        'K' => Some("Faker"),
        _ => None,
    }
}

fn damaged(sidc: &Sidc) -> Option<&'static str> {
    if !sidc.matches(sidc_regex!(r"^[SIO].{2}[DCXF].{11}$")) {
        return None;
    }
    damage_name(sidc.char_at(3))
}

fn feint_dummy(sidc: &Sidc) -> Option<&'static str> {
    let applies = sidc.matches(sidc_regex!(r"^[SIO].{9}[H][B].{3}$"))
        || sidc.matches(sidc_regex!(r"^[SIO].{9}[CDFG].{4}$"));
    applies.then_some("Feint/Dummy")
}

fn task_force(sidc: &Sidc) -> Option<&'static str> {
    sidc.matches(sidc_regex!(r"^[SIO][A-Z0-9\-]{9}[BDEG][A-Z0-9\-]{4}$"))
        .then_some("Task Force")
}

fn mobility(sidc: &Sidc) -> Option<&'static str> {
    if !sidc.matches(sidc_regex!(r"^[SIOE][A-Z0-9\-]{9}[MN][LOPQRSTUVWXY].{3}$")) {
        return None;
    }
    mobility_name(sidc.char_at(10), sidc.char_at(11))
}

fn installation(sidc: &Sidc) -> Option<&'static str> {
    if !sidc.matches(sidc_regex!(r"^[SOE][A-Z0-9\-]{9}[H][A-Z0-9\-]{4}$")) {
        return None;
    }
    match generic_frame_char(sidc.affiliation_char()) {
        'F' => Some("Installation Modifier F"),
        'H' => Some("Installation Modifier H"),
        'N' => Some("Installation Modifier N"),
        'U' => Some("Installation Modifier U"),
        _ => None,
    }
}

fn headquarters(sidc: &Sidc) -> Option<&'static str> {
    if !matches!(sidc.scheme_char(), 'S' | 'I' | 'O') {
        return None;
    }
    if !matches!(sidc.char_at(10), 'A' | 'B' | 'C' | 'D') {
        return None;
    }
    match generic_frame_char(sidc.affiliation_char()) {
        'F' => Some("Headquarters Staff F"),
        'H' => Some("Headquarters Staff H"),
        'N' => Some("Headquarters Staff N"),
        'U' => Some("Headquarters Staff U"),
        _ => None,
    }
}
