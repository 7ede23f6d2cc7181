//! Symbol category predicates.
//!
//! Each [`Category`] is "valid SIDC AND matches a sub-pattern". Failing the
//! sub-pattern means "not of this category", never "malformed".

use crate::code::{is_matching, is_valid};
use crate::{sidc_regex, sidc_regex_set};
use regex::RegexSet;
use std::fmt;

/// A classification a SIDC may fall into. Categories overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Friendly,
    Hostile,
    Neutral,
    Unknown,
    Pending,
    AssumedFriend,
    Suspect,
    ExercisePending,
    ExerciseUnknown,
    ExerciseAssumedFriend,
    ExerciseFriend,
    ExerciseNeutral,
    Unit,
    Equipment,
    Installation,
    MetocPoint,
    MetocLine,
    MetocArea,
    Sigint,
    TacticalPoint,
    TacticalLine,
    TacticalArea,
    ViolentActivities,
    Locations,
    Operations,
    Items,
    Individual,
    Nonmilitary,
    Rape,
    Incident,
    NaturalEvents,
    EmergencyOperations,
    Infrastructure,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 33] = [
        Category::Friendly,
        Category::Hostile,
        Category::Neutral,
        Category::Unknown,
        Category::Pending,
        Category::AssumedFriend,
        Category::Suspect,
        Category::ExercisePending,
        Category::ExerciseUnknown,
        Category::ExerciseAssumedFriend,
        Category::ExerciseFriend,
        Category::ExerciseNeutral,
        Category::Unit,
        Category::Equipment,
        Category::Installation,
        Category::MetocPoint,
        Category::MetocLine,
        Category::MetocArea,
        Category::Sigint,
        Category::TacticalPoint,
        Category::TacticalLine,
        Category::TacticalArea,
        Category::ViolentActivities,
        Category::Locations,
        Category::Operations,
        Category::Items,
        Category::Individual,
        Category::Nonmilitary,
        Category::Rape,
        Category::Incident,
        Category::NaturalEvents,
        Category::EmergencyOperations,
        Category::Infrastructure,
    ];

    /// Returns true if `code` is a valid SIDC of this category.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Category::Friendly => is_matching(code, sidc_regex!(r"^.[F].{13}$")),
            Category::Hostile => is_matching(code, sidc_regex!(r"^.[H].{13}$")),
            Category::Neutral => is_matching(code, sidc_regex!(r"^.[N].{13}$")),
            Category::Unknown => is_matching(code, sidc_regex!(r"^.[U].{13}$")),
            Category::Pending => is_matching(code, sidc_regex!(r"^.[P].{13}$")),
            Category::AssumedFriend => is_matching(code, sidc_regex!(r"^.[A].{13}$")),
            Category::Suspect => is_matching(code, sidc_regex!(r"^.[S].{13}$")),
            Category::ExercisePending => is_matching(code, sidc_regex!(r"^.[G].{13}$")),
            Category::ExerciseUnknown => is_matching(code, sidc_regex!(r"^.[W].{13}$")),
            Category::ExerciseAssumedFriend => is_matching(code, sidc_regex!(r"^.[M].{13}$")),
            Category::ExerciseFriend => is_matching(code, sidc_regex!(r"^.[D].{13}$")),
            Category::ExerciseNeutral => is_matching(code, sidc_regex!(r"^.[L].{13}$")),
            Category::Unit => {
                is_matching(code, sidc_regex!(r"^[S][FHNUPASGWMDL][AFGPSUXZ][APCDXF].{11}$"))
                    && ground_requires(code, 'U')
            }
            Category::Equipment => {
                is_matching(code, sidc_regex!(r"^[S][FHNUPASGWMDL][PAGSU][APCDXF].{11}$"))
                    && ground_requires(code, 'E')
            }
            Category::Installation => is_installation(code),
            Category::MetocPoint => is_matching(code, sidc_regex!(r"^[W].{9}[P][-][-].{2}$")),
            Category::MetocLine => is_matching(code, sidc_regex!(r"^[W].{9}[-][L][-].{2}$")),
            Category::MetocArea => is_matching(code, sidc_regex!(r"^[W].{9}[-][-][A].{2}$")),
            Category::Sigint => is_matching(code, sidc_regex!(r"^[I].{14}$")),
            Category::TacticalPoint => matches_any(code, tactical_points()),
            Category::TacticalLine => matches_any(code, tactical_lines()),
            Category::TacticalArea => matches_any(code, tactical_areas()),
            Category::ViolentActivities => is_matching(code, sidc_regex!(r"^[O].[V].{12}$")),
            Category::Locations => is_matching(code, sidc_regex!(r"^[O].[L].{12}$")),
            Category::Operations => is_matching(code, sidc_regex!(r"^[O].[O].{12}$")),
            Category::Items => is_matching(code, sidc_regex!(r"^[O].[I].{12}$")),
            Category::Individual => is_matching(code, sidc_regex!(r"^[O].[P].{12}$")),
            Category::Nonmilitary => is_matching(code, sidc_regex!(r"^[O].[G].{12}$")),
            Category::Rape => is_matching(code, sidc_regex!(r"^[O].[R].{12}$")),
            Category::Incident => is_matching(code, sidc_regex!(r"^[E].[I].{12}$")),
            Category::NaturalEvents => is_matching(code, sidc_regex!(r"^[E].[N].{12}$")),
            Category::EmergencyOperations => is_matching(code, sidc_regex!(r"^[E].[O].{12}$")),
            Category::Infrastructure => is_matching(code, sidc_regex!(r"^[E].[F].{12}$")),
        }
    }

    /// All categories `code` falls into.
    pub fn of(code: &str) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| c.matches(code))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Friendly => "Friendly",
            Category::Hostile => "Hostile",
            Category::Neutral => "Neutral",
            Category::Unknown => "Unknown",
            Category::Pending => "Pending",
            Category::AssumedFriend => "Assumed Friend",
            Category::Suspect => "Suspect",
            Category::ExercisePending => "Exercise Pending",
            Category::ExerciseUnknown => "Exercise Unknown",
            Category::ExerciseAssumedFriend => "Exercise Assumed Friend",
            Category::ExerciseFriend => "Exercise Friend",
            Category::ExerciseNeutral => "Exercise Neutral",
            Category::Unit => "Unit",
            Category::Equipment => "Equipment",
            Category::Installation => "Installation",
            Category::MetocPoint => "METOC Point",
            Category::MetocLine => "METOC Line",
            Category::MetocArea => "METOC Area",
            Category::Sigint => "SIGINT",
            Category::TacticalPoint => "Tactical Graphic Point",
            Category::TacticalLine => "Tactical Graphic Line",
            Category::TacticalArea => "Tactical Graphic Area",
            Category::ViolentActivities => "Violent Activities",
            Category::Locations => "Locations",
            Category::Operations => "Operations",
            Category::Items => "Items",
            Category::Individual => "Individual",
            Category::Nonmilitary => "Nonmilitary Group or Organization",
            Category::Rape => "Rape",
            Category::Incident => "Incident",
            Category::NaturalEvents => "Natural Events",
            Category::EmergencyOperations => "Emergency Operations",
            Category::Infrastructure => "Infrastructure",
        };
        f.write_str(name)
    }
}

/// Old-style installation codes: ground dimension with `I` at position 4.
pub fn is_installation(code: &str) -> bool {
    is_matching(code, sidc_regex!(r"^[S].[G].[I].{10}$"))
}

/// Ground-dimension codes must carry `required` at position 4.
fn ground_requires(code: &str, required: char) -> bool {
    let upper = code.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    bytes[2] != b'G' || bytes[4] as char == required
}

fn matches_any(code: &str, set: &RegexSet) -> bool {
    is_valid(code) && set.is_match(&code.to_ascii_uppercase())
}

fn tactical_points() -> &'static RegexSet {
    sidc_regex_set!(
        r"^[G].[T][ASPK][DIN].{10}$",
        r"^[G].[G][ASPK][GADOS][P].{9}$",
        r"^[G].[G][ASPK][P][N].{9}$",
        r"^[G].[M][ASPK][O][A][O].{8}$",
        r"^[G].[M][ASPK][O][BM].{9}$",
        r"^[G].[M][ASPK][O][F][S].{8}$",
        r"^[G].[M][ASPK][S][EFSU].{9}$",
        r"^[G].[M][ASPK][N][ZFED].{9}$",
        r"^[G].[M][ASPK].[H][T].{8}$",
        r"^[G].[M][ASPK].[C][P].{8}$",
        r"^[G].[F][ASPK][P].{10}$",
        r"^[G].[S][ASPK][P].{10}$",
        r"^[G].[O][ASPK][ESF].{10}$",
        r"^[G].[O][ASPK][H][MIO].{9}$",
    )
}

fn tactical_lines() -> &'static RegexSet {
    sidc_regex_set!(
        r"^[G].[T][ASPK][^DIN].{10}$",
        r"^[G].[G][ASPK][GADOS][L].{9}$",
        r"^[G].[G][ASPK][P][DAF].{9}$",
        r"^[G].[M][ASPK][O][G][L].{8}$",
        r"^[G].[M][ASPK][O][A][DRW].{8}$",
        r"^[G].[M][ASPK][O][SEWTR].{9}$",
        r"^[G].[M][ASPK][O][F][G].{8}$",
        r"^[G].[M][ASPK].[H][O].{8}$",
        r"^[G].[M][ASPK][S][LW].{9}$",
        r"^[G].[M][ASPK].[C][ABFEDLR].{8}$",
        r"^[G].[F][ASPK][L].{10}$",
        r"^[G].[S][ASPK][L].{10}$",
        r"^[G].[O][ASPK][B].{10}$",
        r"^[G].[O][ASPK][H][N].{9}$",
    )
}

fn tactical_areas() -> &'static RegexSet {
    sidc_regex_set!(
        r"^[G].[G][ASPK][GADOS][A].{9}$",
        r"^[G].[G][ASPK][P][MYN].{9}$",
        r"^[G].[M][ASPK][O][G][BZFR].{8}$",
        r"^[G].[M][ASPK][O][U].{9}$",
        r"^[G].[M][ASPK][O][F][DA].{8}$",
        r"^[G].[M][ASPK][S][P].{9}$",
        r"^[G].[M][ASPK][N][RBCL].{9}$",
        r"^[G].[F][ASPK][A].{10}$",
        r"^[G].[S][ASPK][A].{10}$",
    )
}
