//! Positional field decoding.
//!
//! Pure functions over the SIDC string and static tables.

use crate::code::{is_matching, Sidc};
use crate::sidc_regex;
use regex::Regex;

/// Echelon letters at position 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Echelon {
    TeamCrew,
    Squad,
    Section,
    PlatoonDetachment,
    CompanyBatteryTroop,
    BattalionSquadron,
    RegimentGroup,
    Brigade,
    Division,
    Corps,
    Army,
    ArmyGroupFront,
    Region,
    Command,
}

impl Echelon {
    /// Parse an echelon letter (A through N).
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Echelon::TeamCrew),
            'B' => Some(Echelon::Squad),
            'C' => Some(Echelon::Section),
            'D' => Some(Echelon::PlatoonDetachment),
            'E' => Some(Echelon::CompanyBatteryTroop),
            'F' => Some(Echelon::BattalionSquadron),
            'G' => Some(Echelon::RegimentGroup),
            'H' => Some(Echelon::Brigade),
            'I' => Some(Echelon::Division),
            'J' => Some(Echelon::Corps),
            'K' => Some(Echelon::Army),
            'L' => Some(Echelon::ArmyGroupFront),
            'M' => Some(Echelon::Region),
            'N' => Some(Echelon::Command),
            _ => None,
        }
    }

    /// Value stored in the output echelon field.
    ///
    /// Not contiguous: the digits encode the size ranking used by renderers.
    pub const fn ordinal(&self) -> i32 {
        match self {
            Echelon::TeamCrew => 0,
            Echelon::Squad => 1,
            Echelon::Section => 11,
            Echelon::PlatoonDetachment => 111,
            Echelon::CompanyBatteryTroop => 2,
            Echelon::BattalionSquadron => 22,
            Echelon::RegimentGroup => 222,
            Echelon::Brigade => 3,
            Echelon::Division => 33,
            Echelon::Corps => 333,
            Echelon::Army => 3333,
            Echelon::ArmyGroupFront => 33333,
            Echelon::Region => 333333,
            Echelon::Command => 44,
        }
    }

    /// Modifier symbol name.
    pub const fn name(&self) -> &'static str {
        match self {
            Echelon::TeamCrew => "Team/Crew",
            Echelon::Squad => "Squad",
            Echelon::Section => "Section",
            Echelon::PlatoonDetachment => "Platoon/Detachment",
            Echelon::CompanyBatteryTroop => "Company/Battery/Troop",
            Echelon::BattalionSquadron => "Battalion/Squadron",
            Echelon::RegimentGroup => "Regiment/Group",
            Echelon::Brigade => "Brigade",
            Echelon::Division => "Division",
            Echelon::Corps => "Corps",
            Echelon::Army => "Army",
            Echelon::ArmyGroupFront => "Army Group/Front",
            Echelon::Region => "Region",
            Echelon::Command => "Command",
        }
    }
}

/// Units and stability-operations codes with an echelon letter.
pub(crate) fn echelon_context() -> &'static Regex {
    sidc_regex!(r"^[SO][A-Z0-9\-]{10}[A-N][A-Z0-9\-]{3}$")
}

/// Echelon ordinal, or 0 if the code carries no echelon.
///
/// 0 is also the ordinal of Team/Crew; use [`has_valid_echelon`] to tell
/// them apart.
pub fn echelon_ordinal(code: &str) -> i32 {
    Sidc::parse(code)
        .filter(|sidc| sidc.matches(echelon_context()))
        .and_then(|sidc| Echelon::from_char(sidc.char_at(11)))
        .map_or(0, |e| e.ordinal())
}

/// True iff position 11 of a valid code is an echelon letter.
pub fn has_valid_echelon(code: &str) -> bool {
    is_matching(code, sidc_regex!(r".{11}[A-N].{3}"))
}

/// The two-character country code at positions 12 and 13, upper-cased, or
/// `--` when the code is too short.
pub fn country_code(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 14 {
        return "--".to_string();
    }
    chars[12..14].iter().map(|c| c.to_ascii_uppercase()).collect()
}

/// Mobility modifier names keyed by positions 10 and 11.
pub const MOBILITY_NAMES: [(&str, &str); 13] = [
    ("NL", "Towed Sonar (Short)"),
    ("NS", "Towed Sonar (Long)"),
    ("MO", "Wheeled (Limited Cross Country)"),
    ("MP", "Wheeled (Cross Country)"),
    ("MQ", "Tracked"),
    ("MR", "Wheeled and Tracked"),
    ("MS", "Towed"),
    ("MT", "Railway"),
    ("MU", "Over Snow"),
    ("MV", "Sled"),
    ("MW", "Pack Animals"),
    ("MX", "Barge"),
    ("MY", "Amphibious"),
];

/// Mobility modifier name for a position 10/11 pair.
pub fn mobility_name(indicator: char, kind: char) -> Option<&'static str> {
    let applicable = (indicator == 'N' && matches!(kind, 'L' | 'S'))
        || (indicator == 'M' && ('O'..='Y').contains(&kind));
    if !applicable {
        return None;
    }
    MOBILITY_NAMES
        .iter()
        .find(|(code, _)| {
            let mut chars = code.chars();
            chars.next() == Some(indicator) && chars.next() == Some(kind)
        })
        .map(|(_, name)| *name)
}

/// Operational condition name for position 3.
pub const fn damage_name(condition: char) -> Option<&'static str> {
    match condition {
        'D' => Some("Damaged"),
        'C' => Some("Fully Capable"),
        'X' => Some("Destroyed"),
        'F' => Some("Full to Capacity"),
        _ => None,
    }
}
