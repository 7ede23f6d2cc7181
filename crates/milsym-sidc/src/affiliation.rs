//! MIL-STD-2525 affiliation and coding scheme codes
//!
//! Position 0 of a SIDC is the coding scheme, position 1 the affiliation
//! (standard identity). Both are single characters.
//!
//! Symbol libraries only carry frames for the four basic identities, so every
//! affiliation collapses onto one of them for lookup. Planning ("dashed")
//! frames use a different set of library codes: A, S, P and N.

use std::fmt;

/// Affiliation codes from MIL-STD-2525
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affiliation {
    /// Pending (P)
    Pending,
    /// Unknown (U)
    Unknown,
    /// Assumed Friend (A)
    AssumedFriend,
    /// Friend (F)
    Friend,
    /// Neutral (N)
    Neutral,
    /// Suspect (S)
    Suspect,
    /// Hostile (H)
    Hostile,
    /// Exercise Pending (G)
    ExercisePending,
    /// Exercise Unknown (W)
    ExerciseUnknown,
    /// Exercise Assumed Friend (M)
    ExerciseAssumedFriend,
    /// Exercise Friend (D)
    ExerciseFriend,
    /// Exercise Neutral (L)
    ExerciseNeutral,
    /// Joker (J)
    Joker,
    /// Faker (K)
    Faker,
}

impl Affiliation {
    /// Parse affiliation from a single character
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'p' | 'P' => Some(Affiliation::Pending),
            'u' | 'U' => Some(Affiliation::Unknown),
            'a' | 'A' => Some(Affiliation::AssumedFriend),
            'f' | 'F' => Some(Affiliation::Friend),
            'n' | 'N' => Some(Affiliation::Neutral),
            's' | 'S' => Some(Affiliation::Suspect),
            'h' | 'H' => Some(Affiliation::Hostile),
            'g' | 'G' => Some(Affiliation::ExercisePending),
            'w' | 'W' => Some(Affiliation::ExerciseUnknown),
            'm' | 'M' => Some(Affiliation::ExerciseAssumedFriend),
            'd' | 'D' => Some(Affiliation::ExerciseFriend),
            'l' | 'L' => Some(Affiliation::ExerciseNeutral),
            'j' | 'J' => Some(Affiliation::Joker),
            'k' | 'K' => Some(Affiliation::Faker),
            _ => None,
        }
    }

    /// The SIDC character for this affiliation
    #[inline]
    pub const fn as_char(&self) -> char {
        match self {
            Affiliation::Pending => 'P',
            Affiliation::Unknown => 'U',
            Affiliation::AssumedFriend => 'A',
            Affiliation::Friend => 'F',
            Affiliation::Neutral => 'N',
            Affiliation::Suspect => 'S',
            Affiliation::Hostile => 'H',
            Affiliation::ExercisePending => 'G',
            Affiliation::ExerciseUnknown => 'W',
            Affiliation::ExerciseAssumedFriend => 'M',
            Affiliation::ExerciseFriend => 'D',
            Affiliation::ExerciseNeutral => 'L',
            Affiliation::Joker => 'J',
            Affiliation::Faker => 'K',
        }
    }

    /// Basic identity whose frame this affiliation is drawn with.
    ///
    /// Joker and Faker are drawn with the hostile frame.
    #[inline]
    pub const fn generic(&self) -> Affiliation {
        match self {
            Affiliation::Friend
            | Affiliation::AssumedFriend
            | Affiliation::ExerciseAssumedFriend
            | Affiliation::ExerciseFriend => Affiliation::Friend,
            Affiliation::Hostile | Affiliation::Suspect | Affiliation::Joker | Affiliation::Faker => {
                Affiliation::Hostile
            }
            Affiliation::Unknown
            | Affiliation::Pending
            | Affiliation::ExercisePending
            | Affiliation::ExerciseUnknown => Affiliation::Unknown,
            Affiliation::Neutral | Affiliation::ExerciseNeutral => Affiliation::Neutral,
        }
    }

    /// Library affiliation code of the planning frame for this affiliation.
    #[inline]
    pub const fn planning_code(&self) -> char {
        match self.generic() {
            Affiliation::Friend => 'A',
            Affiliation::Hostile => 'S',
            Affiliation::Neutral => 'N',
            _ => 'P',
        }
    }

    /// Check if this affiliation is considered friendly
    #[inline]
    pub const fn is_friendly(&self) -> bool {
        matches!(self.generic(), Affiliation::Friend)
    }

    /// Check if this affiliation is considered hostile
    #[inline]
    pub const fn is_hostile(&self) -> bool {
        matches!(self.generic(), Affiliation::Hostile)
    }

    /// Check if this affiliation is neutral
    #[inline]
    pub const fn is_neutral(&self) -> bool {
        matches!(self.generic(), Affiliation::Neutral)
    }

    /// Check if this is an exercise affiliation
    #[inline]
    pub const fn is_exercise(&self) -> bool {
        matches!(
            self,
            Affiliation::ExercisePending
                | Affiliation::ExerciseUnknown
                | Affiliation::ExerciseAssumedFriend
                | Affiliation::ExerciseFriend
                | Affiliation::ExerciseNeutral
                | Affiliation::Joker
                | Affiliation::Faker
        )
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affiliation::Pending => write!(f, "Pending"),
            Affiliation::Unknown => write!(f, "Unknown"),
            Affiliation::AssumedFriend => write!(f, "Assumed Friend"),
            Affiliation::Friend => write!(f, "Friend"),
            Affiliation::Neutral => write!(f, "Neutral"),
            Affiliation::Suspect => write!(f, "Suspect"),
            Affiliation::Hostile => write!(f, "Hostile"),
            Affiliation::ExercisePending => write!(f, "Exercise Pending"),
            Affiliation::ExerciseUnknown => write!(f, "Exercise Unknown"),
            Affiliation::ExerciseAssumedFriend => write!(f, "Exercise Assumed Friend"),
            Affiliation::ExerciseFriend => write!(f, "Exercise Friend"),
            Affiliation::ExerciseNeutral => write!(f, "Exercise Neutral"),
            Affiliation::Joker => write!(f, "Joker"),
            Affiliation::Faker => write!(f, "Faker"),
        }
    }
}

/// Generic frame character for a raw affiliation character, `-` if unmapped.
#[inline]
pub fn generic_frame_char(c: char) -> char {
    Affiliation::from_char(c).map_or('-', |a| a.generic().as_char())
}

/// Coding scheme codes from MIL-STD-2525
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodingScheme {
    /// Warfighting units, equipment and installations (S)
    Warfighting,
    /// Tactical graphics (G)
    TacticalGraphics,
    /// Meteorological and oceanographic (W)
    Metoc,
    /// Signals intelligence (I)
    Intelligence,
    /// Stability operations (O)
    StabilityOperations,
    /// Emergency management (E)
    EmergencyManagement,
}

impl CodingScheme {
    /// Parse coding scheme from a single character
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'S' | 's' => Some(CodingScheme::Warfighting),
            'G' | 'g' => Some(CodingScheme::TacticalGraphics),
            'W' | 'w' => Some(CodingScheme::Metoc),
            'I' | 'i' => Some(CodingScheme::Intelligence),
            'O' | 'o' => Some(CodingScheme::StabilityOperations),
            'E' | 'e' => Some(CodingScheme::EmergencyManagement),
            _ => None,
        }
    }

    /// Tactical graphics and METOC symbols carry no modifiers.
    #[inline]
    pub const fn takes_modifiers(&self) -> bool {
        !matches!(self, CodingScheme::TacticalGraphics | CodingScheme::Metoc)
    }
}

impl fmt::Display for CodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodingScheme::Warfighting => write!(f, "Warfighting"),
            CodingScheme::TacticalGraphics => write!(f, "Tactical Graphics"),
            CodingScheme::Metoc => write!(f, "METOC"),
            CodingScheme::Intelligence => write!(f, "Signals Intelligence"),
            CodingScheme::StabilityOperations => write!(f, "Stability Operations"),
            CodingScheme::EmergencyManagement => write!(f, "Emergency Management"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_frame_map() {
        let cases = [
            ('F', 'F'),
            ('H', 'H'),
            ('U', 'U'),
            ('N', 'N'),
            ('M', 'F'),
            ('A', 'F'),
            ('D', 'F'),
            ('S', 'H'),
            ('J', 'H'),
            ('K', 'H'),
            ('P', 'U'),
            ('G', 'U'),
            ('W', 'U'),
            ('L', 'N'),
            ('O', '-'),
            ('-', '-'),
        ];
        for (raw, expected) in cases {
            assert_eq!(generic_frame_char(raw), expected, "affiliation {}", raw);
        }
    }

    #[test]
    fn test_planning_codes() {
        let cases = [
            ('F', 'A'),
            ('H', 'S'),
            ('U', 'P'),
            ('N', 'N'),
            ('M', 'A'),
            ('A', 'A'),
            ('D', 'A'),
            ('S', 'S'),
            ('J', 'S'),
            ('K', 'S'),
            ('P', 'P'),
            ('G', 'P'),
            ('W', 'P'),
            ('L', 'N'),
        ];
        for (raw, expected) in cases {
            let aff = Affiliation::from_char(raw).unwrap();
            assert_eq!(aff.planning_code(), expected, "affiliation {}", raw);
        }
    }

    #[test]
    fn test_joker_and_faker_use_hostile_frame() {
        assert!(Affiliation::Joker.is_hostile());
        assert!(Affiliation::Faker.is_hostile());
        assert!(Affiliation::Joker.is_exercise());
        assert!(!Affiliation::Hostile.is_exercise());
    }

    #[test]
    fn test_char_round_trip() {
        for c in "PUAFNSHGWMDLJK".chars() {
            assert_eq!(Affiliation::from_char(c).unwrap().as_char(), c);
        }
        assert!(Affiliation::from_char('O').is_none());
    }

    #[test]
    fn test_coding_scheme_parsing() {
        assert_eq!(CodingScheme::from_char('S'), Some(CodingScheme::Warfighting));
        assert_eq!(CodingScheme::from_char('g'), Some(CodingScheme::TacticalGraphics));
        assert_eq!(CodingScheme::from_char('X'), None);
        assert!(!CodingScheme::Metoc.takes_modifiers());
        assert!(CodingScheme::EmergencyManagement.takes_modifiers());
    }
}
