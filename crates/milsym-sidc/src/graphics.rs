//! Fixed representation rule IDs for tactical graphics and METOC symbols.
//!
//! Keys are masked codes as produced by [`masked_graphic_code`].

use crate::code::{Sidc, BLANK};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

/// Masked code to rule ID, in table order.
pub const GRAPHIC_RULE_IDS: &[(&str, i32)] = &[
    ("WA--BAIF----A--", 1),
    ("WA--BAMV----A--", 2),
    ("WA--BATB----A--", 3),
    ("WA--BAI-----A--", 4),
    ("WA--BALPNC--A--", 5),
    ("WA--BALPC---A--", 6),
    ("WA--BAFP----A--", 7),
    ("WA--BAT-----A--", 8),
    ("WA--BAFG----A--", 9),
    ("WA--BAD-----A--", 10),
    ("WA--BAFF----A--", 11),
    ("WO--HDDA----A--", 13),
    ("WO--HCI-----A--", 14),
    ("WO--HCB-----A--", 15),
    ("WO--HCW-----A--", 16),
    ("WO--HCF-----A--", 17),
    ("WO--HPBA----A--", 18),
    ("WO--HPFF----A--", 19),
    ("WO--HPMD----A--", 20),
    ("WO--HPMO----A--", 21),
    ("WO--HABP----A--", 22),
    ("WO--HHD-----A--", 23),
    ("WO--HHDF----A--", 24),
    ("WO--HHDK----A--", 25),
    ("WO--HHDD----A--", 26),
    ("WO--OBVA----A--", 27),
    ("WO--OBVB----A--", 28),
    ("WO--OBVC----A--", 29),
    ("WO--OBVD----A--", 30),
    ("WO--OBVE----A--", 31),
    ("WO--OBVF----A--", 32),
    ("WO--OBVG----A--", 33),
    ("WO--OBVH----A--", 34),
    ("WO--OBVI----A--", 35),
    ("WO--BSF-----A--", 36),
    ("WO--BSG-----A--", 37),
    ("WO--BSM-----A--", 38),
    ("WO--BST-----A--", 39),
    ("WO--GMSR----A--", 40),
    ("WO--GMSC----A--", 41),
    ("WO--GMSSVS--A--", 42),
    ("WO--GMSSC---A--", 43),
    ("WO--GMSSM---A--", 44),
    ("WO--GMSSF---A--", 45),
    ("WO--GMSSVF--A--", 46),
    ("WO--GMSIVF--A--", 47),
    ("WO--GMSIF---A--", 48),
    ("WO--GMSIM---A--", 49),
    ("WO--GMSIC---A--", 50),
    ("WO--GMSB----A--", 51),
    ("WO--GMS-CO--A--", 52),
    ("WO--GMS-PH--A--", 53),
    ("WO--GMS-SH--A--", 54),
    ("WO--GML-----A--", 55),
    ("WO--GMN-----A--", 56),
    ("WO--GMRS----A--", 57),
    ("WO--GMRM----A--", 58),
    ("WO--GMRR----A--", 59),
    ("WO--GMCL----A--", 60),
    ("WO--GMCM----A--", 61),
    ("WO--GMCH----A--", 62),
    ("WO--GMIBA---A--", 63),
    ("WO--GMIBB---A--", 64),
    ("WO--GMIBC---A--", 65),
    ("WO--GMIBD---A--", 66),
    ("WO--GMIBE---A--", 67),
    ("WO--GMBCA---A--", 68),
    ("WO--GMBCB---A--", 69),
    ("WO--GMBCC---A--", 70),
    ("WO--GMBTA---A--", 71),
    ("WO--GMBTB---A--", 72),
    ("WO--GMBTC---A--", 73),
    ("WO--GMBTD---A--", 74),
    ("WO--GMBTE---A--", 75),
    ("WO--GMBTF---A--", 76),
    ("WO--GMBTG---A--", 77),
    ("WO--GMBTH---A--", 78),
    ("WO--GMBTI---A--", 79),
    ("WO--L-MA----A--", 80),
    ("WO--L-SA----A--", 81),
    ("WO--L-TA----A--", 82),
    ("WO--L-O-----A--", 83),
    ("WO--MCC-----A--", 84),
    ("WO--MOA-----A--", 85),
    ("G-GPGAG-------X", 13),
    ("G-GPGAA-------X", 10),
    ("G-GPGAE-------X", 12),
    ("G-GPGAF-------X", 51),
    ("G-GPGAD-------X", 11),
    ("G-GPGAX-------X", 50),
    ("G-GPGAL-------X", 22),
    ("G-GPGAP-------X", 18),
    ("G-GPGAY-------X", 52),
    ("G-GPGAZ-------X", 53),
    ("G-GPAAR-------X", 19),
    ("G-GPAAF-------X", 20),
    ("G-GPAAH-------X", 14),
    ("G-GPAAM-------X", 15),
    ("G-GPAAML------X", 17),
    ("G-GPAAMH------X", 16),
    ("G-GPAAW-------X", 21),
    ("G-GPPM--------X", 77),
    ("G-GPPY--------X", 78),
    ("G-GPPC--------X", 79),
    ("G-GPDAB-------X", 9),
    ("G-GPDABP------X", 81),
    ("G-GPDAE-------X", 12),
    ("G-GPOAA-------X", 5),
    ("G-GPOAK-------X", 6),
    ("G-GPOAO-------X", 7),
    ("G-GPOAP-------X", 73),
    ("G-GPSAO-------X", 74),
    ("G-GPSAA-------X", 75),
    ("G-GPSAE-------X", 54),
    ("G-GPSAN-------X", 25),
    ("G-GPSAT-------X", 26),
    ("G-MPOGB-------X", 38),
    ("G-MPOGZ-------X", 39),
    ("G-MPOGF-------X", 76),
    ("G-MPOGR-------X", 82),
    ("G-MPOFD-------X", 83),
    ("G-MPOFA-------X", 84),
    ("G-MPOU--------X", 40),
    ("G-MPSP--------X", 24),
    ("G-MPNR--------X", 43),
    ("G-MPNB--------X", 41),
    ("G-MPNC--------X", 42),
    ("G-MPNL--------X", 85),
    ("G-FPAT--------X", 30),
    ("G-FPATG-------X", 31),
    ("G-FPATS-------X", 58),
    ("G-FPATB-------X", 59),
    ("G-FPACAI------X", 27),
    ("G-FPACSI------X", 60),
    ("G-FPACFI------X", 28),
    ("G-FPACNI------X", 29),
    ("G-FPACRI------X", 33),
    ("G-FPACEI------X", 61),
    ("G-FPACDI------X", 62),
    ("G-FPACZI------X", 63),
    ("G-FPACBI------X", 64),
    ("G-FPACVI------X", 65),
    ("G-FPACT-------X", 66),
    ("G-FPAZII------X", 67),
    ("G-FPAZXI------X", 68),
    ("G-FPAZCI------X", 69),
    ("G-FPAZFI------X", 70),
    ("G-F-AKBI------X", 71),
    ("G-F-AKPI------X", 72),
    ("G-SPAD--------X", 55),
    ("G-SPAE--------X", 56),
    ("G-SPAR--------X", 34),
    ("G-SPAH--------X", 57),
    ("G-SPASB-------X", 35),
    ("G-SPASD-------X", 36),
    ("G-SPASR-------X", 37),
    ("G-GPPD--------X", 128),
    ("G-GPDLP-------X", 129),
    ("G-GPOLI-------X", 140),
    ("G-MPORP-------X", 113),
    ("G-MPORS-------X", 114),
    ("G-MPORA-------X", 115),
    ("G-MPORC-------X", 116),
    ("G-MPOT--------X", 119),
    ("G-MPBCE-------X", 55),
    ("G-MPBCD-------X", 56),
    ("G-GPOAS-------X", 145),
    ("G-MPOFG-------X", 118),
    ("G-MPBCA-------X", 120),
    ("G-MPBCB-------X", 70),
    ("G-GPOAF-------X", 144),
    ("G-GPSLA-------X", 136),
    ("G-TPF---------X", 84),
    ("G-TPA---------X", 89),
    ("G-TPAS--------X", 90),
    ("G-TPE---------X", 85),
    ("G-TPO---------X", 91),
    ("G-TPQ---------X", 92),
    ("G-TPS---------X", 93),
    ("G-GPPF--------X", 127),
    ("G-GPOLKA------X", 2),
    ("G-GPOLKGM-----X", 3),
    ("G-GPOLKGS-----X", 4),
    ("G-MPOEF-------X", 57),
    ("G-SPLCM-------X", 58),
    ("G-SPLCH-------X", 59),
    ("G-GPDLF-------X", 10),
    ("G-MPBCF-------X", 122),
    ("G-MPBCL-------X", 23),
    ("G-MPBCR-------X", 121),
    ("G-MPSW--------X", 103),
    ("G-FPLT--------X", 16),
    ("G-FPLTS-------X", 123),
    ("G-FPLTF-------X", 124),
    ("G-OPHN--------X", 126),
    ("G-OPB---------X", 131),
    ("G-OPBE--------X", 132),
    ("G-OPBA--------X", 133),
    ("G-OPBT--------X", 134),
    ("G-OPBO--------X", 135),
    ("G-GPGLB-------X", 29),
    ("G-GPGLF-------X", 22),
    ("G-GPGLC-------X", 24),
    ("G-GPGLP-------X", 9),
    ("G-GPGLL-------X", 97),
    ("G-GPOLF-------X", 5),
    ("G-GPOLL-------X", 6),
    ("G-GPOLT-------X", 7),
    ("G-GPOLC-------X", 8),
    ("G-GPOLP-------X", 141),
    ("G-GPSLR-------X", 139),
    ("G-MPOGL-------X", 67),
    ("G-MPOS--------X", 111),
    ("G-MPOADU------X", 100),
    ("G-MPOADC------X", 19),
    ("G-MPOAR-------X", 101),
    ("G-MPOAW-------X", 112),
    ("G-MPOWU-------X", 28),
    ("G-MPOWS-------X", 104),
    ("G-MPOWD-------X", 105),
    ("G-MPOWA-------X", 106),
    ("G-MPOWL-------X", 107),
    ("G-MPOWH-------X", 108),
    ("G-MPOWCS------X", 109),
    ("G-MPOWCD------X", 110),
    ("G-MPOWCT------X", 27),
    ("G-MPOHO-------X", 117),
    ("G-MPSL--------X", 102),
    ("G-FPLCF-------X", 14),
    ("G-FPLCC-------X", 12),
    ("G-FPLCN-------X", 17),
    ("G-FPLCR-------X", 18),
    ("G-SPLRM-------X", 25),
    ("G-SPLRA-------X", 60),
    ("G-SPLRO-------X", 61),
    ("G-SPLRT-------X", 63),
    ("G-SPLRW-------X", 62),
    ("WA--PFC----L---", 1),
    ("WA--PFCU---L---", 2),
    ("WA--PFC-FG-L---", 3),
    ("WA--PFC-FY-L---", 4),
    ("WA--PFW----L---", 5),
    ("WA--PFWU---L---", 6),
    ("WA--PFW-FG-L---", 7),
    ("WA--PFW-FY-L---", 8),
    ("WA--PFO----L---", 9),
    ("WA--PFOU---L---", 10),
    ("WA--PFO-FY-L---", 11),
    ("WA--PFS----L---", 12),
    ("WA--PFSU---L---", 13),
    ("WA--PFS-FG-L---", 14),
    ("WA--PFS-FY-L---", 15),
    ("WA--PXT----L---", 16),
    ("WA--PXR----L---", 17),
    ("WA--PXSQ---L---", 18),
    ("WA--PXIL---L---", 19),
    ("WA--PXSH---L---", 20),
    ("WA--PXITCZ-L---", 21),
    ("WA--PXCV---L---", 22),
    ("WA--PXITD--L---", 23),
    ("WA--IPIB---L---", 28),
    ("WA--IPCO---L---", 29),
    ("WA--IPIS---L---", 30),
    ("WA--IPIT---L---", 31),
    ("WA--IPID---L---", 32),
    ("WA--IPTH---L---", 33),
    ("WA--IPFF---L---", 34),
    ("WO--IDID---L---", 36),
    ("WO--ILOV---L---", 37),
    ("WO--ILUC---L---", 38),
    ("WO--ILOR---L---", 39),
    ("WO--ILIEO--L---", 40),
    ("WO--ILIEE--L---", 41),
    ("WO--ILIER--L---", 42),
    ("WO--IOC----L---", 43),
    ("WO--IOCS---L---", 44),
    ("WO--IOL----L---", 45),
    ("WO--IOLF---L---", 46),
    ("WO--HDDL---L---", 47),
    ("WO--HDDC---L---", 48),
    ("WO--HCC----L---", 49),
    ("WO--HCF----L---", 50),
    ("WO--HPBA---L---", 51),
    ("WO--HPBP---L---", 52),
    ("WO--HPMRA--L---", 54),
    ("WO--HPMRB--L---", 55),
    ("WO--HPSPA--L---", 56),
    ("WO--HPSPB--L---", 57),
    ("WO--HPSPS--L---", 58),
    ("WO--HALLA--L---", 59),
    ("WO--HHDB---L---", 60),
    ("WO--TCCCFE-L---", 61),
    ("WO--TCCCFF-L---", 62),
    ("WO--L-ML---L---", 63),
    ("WO--L-RA---L---", 64),
    ("WO--MCA----L---", 65),
    ("WO--MCD----L---", 66),
    ("WO--MPA----L---", 67),
    ("G-GPSLH-------X", 138),
    ("G-GPSLB-------X", 137),
    ("G-TPB---------X", 80),
    ("G-TPH---------X", 86),
    ("G-TPY---------X", 87),
    ("G-TPC---------X", 81),
    ("G-TPX---------X", 88),
    ("G-TPJ---------X", 82),
    ("G-TPP---------X", 76),
    ("G-MPOEB-------X", 26),
    ("G-MPBDE-------X", 21),
    ("G-MPBDD-------X", 53),
    ("G-MPBDI-------X", 54),
    ("G-TPL---------X", 73),
    ("G-TPM---------X", 78),
    ("G-TPW---------X", 79),
    ("G-TPWP--------X", 95),
    ("G-GPALC-------X", 49),
    ("G-GPALM-------X", 51),
    ("G-GPOLAA------X", 37),
];

static GRAPHIC_RULE_INDEX: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| GRAPHIC_RULE_IDS.iter().copied().collect());

/// Masks a code for graphic rule lookup.
///
/// Tactical graphics become `G-` + positions 2..10 + `----X`; METOC codes
/// blank positions 2 and 3; other codes are unchanged. `*` reads as `-`.
pub fn masked_graphic_code(sidc: &Sidc) -> String {
    let code = sidc.as_str();
    let masked = match sidc.scheme_char() {
        'G' => format!("G{}{}----X", BLANK, &code[2..10]),
        'W' => format!("W{}--{}", &code[1..2], &code[4..15]),
        _ => code.to_string(),
    };
    masked.replace('*', "-")
}

/// Fixed rule ID for a tactical graphic or METOC code, 0 if none.
pub fn rule_id_from_sidc(code: &str) -> i32 {
    let Some(sidc) = Sidc::parse(code) else {
        return 0;
    };
    let masked = masked_graphic_code(&sidc);
    match GRAPHIC_RULE_INDEX.get(masked.as_str()) {
        Some(id) => *id,
        None => {
            warn!(sidc = %sidc, masked = %masked, "No tactical graphic rule ID");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_graphic_code() {
        let tg = Sidc::parse("GHTPL---------X").unwrap();
        assert_eq!(masked_graphic_code(&tg), "G-TPL---------X");

        let metoc = Sidc::parse("WAS-BAIF----A--").unwrap();
        assert_eq!(masked_graphic_code(&metoc), "WA--BAIF----A--");

        let unit = Sidc::parse("SFGPUCI---AAUSG").unwrap();
        assert_eq!(masked_graphic_code(&unit), "SFGPUCI---AAUSG");
    }

    #[test]
    fn test_rule_id_lookup() {
        assert_eq!(rule_id_from_sidc("WA--BAIF----A--"), 1);
        assert_eq!(rule_id_from_sidc("GFTPL---------X"), 73);
        assert_eq!(rule_id_from_sidc("ghtpwp--------x"), 95);
    }

    #[test]
    fn test_rule_id_unknown_or_invalid() {
        assert_eq!(rule_id_from_sidc("SFGPUCI---AAUSG"), 0);
        assert_eq!(rule_id_from_sidc("not a sidc"), 0);
    }

    #[test]
    fn test_table_keys_are_unique() {
        assert_eq!(GRAPHIC_RULE_INDEX.len(), GRAPHIC_RULE_IDS.len());
    }
}
