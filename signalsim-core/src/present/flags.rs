//! Country flag badges for currency pairs.

/// Plain RGB triple; the front end maps it to its own color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const WHITE: Rgb = Rgb(255, 255, 255);
const BLACK: Rgb = Rgb(0, 0, 0);
const RED: Rgb = Rgb(220, 38, 38);
const BLUE: Rgb = Rgb(37, 99, 235);
const LIGHT_BLUE: Rgb = Rgb(59, 130, 246);
const NAVY: Rgb = Rgb(30, 64, 175);
const YELLOW: Rgb = Rgb(250, 204, 21);
const GREEN: Rgb = Rgb(22, 163, 74);
const ORANGE: Rgb = Rgb(234, 88, 12);
const PURPLE: Rgb = Rgb(147, 51, 234);
const GRAY: Rgb = Rgb(75, 85, 99);
const LIGHT_GRAY: Rgb = Rgb(156, 163, 175);

/// Two-tone badge for one country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagBadge {
    pub code: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub symbol: Option<char>,
}

impl FlagBadge {
    /// Neutral badge for codes not in the table.
    pub const PLACEHOLDER: FlagBadge = FlagBadge {
        code: "??",
        primary: GRAY,
        secondary: LIGHT_GRAY,
        symbol: None,
    };

    pub fn is_placeholder(&self) -> bool {
        *self == Self::PLACEHOLDER
    }
}

const fn badge(code: &'static str, primary: Rgb, secondary: Rgb, symbol: Option<char>) -> FlagBadge {
    FlagBadge {
        code,
        primary,
        secondary,
        symbol,
    }
}

const FLAGS: [FlagBadge; 39] = [
    badge("EU", BLUE, YELLOW, Some('★')),
    badge("US", RED, WHITE, None),
    badge("GB", NAVY, RED, Some('+')),
    badge("JP", WHITE, RED, Some('●')),
    badge("AU", NAVY, WHITE, Some('★')),
    badge("CH", RED, WHITE, Some('+')),
    badge("CA", RED, WHITE, None),
    badge("NZ", NAVY, WHITE, None),
    badge("AE", RED, GREEN, None),
    badge("CN", RED, YELLOW, None),
    badge("RU", BLUE, RED, None),
    badge("KE", BLACK, RED, None),
    badge("UA", BLUE, YELLOW, None),
    badge("BD", GREEN, RED, None),
    badge("EG", RED, WHITE, None),
    badge("IN", ORANGE, WHITE, None),
    badge("PH", BLUE, RED, None),
    badge("YE", RED, WHITE, None),
    badge("ZA", GREEN, YELLOW, None),
    badge("MX", GREEN, RED, None),
    badge("BH", RED, WHITE, None),
    badge("HU", RED, WHITE, None),
    badge("JO", BLACK, RED, None),
    badge("LB", RED, WHITE, None),
    badge("OM", RED, WHITE, None),
    badge("QA", PURPLE, WHITE, None),
    badge("SA", GREEN, WHITE, None),
    badge("TN", RED, WHITE, None),
    badge("AR", LIGHT_BLUE, WHITE, None),
    badge("BR", GREEN, YELLOW, None),
    badge("CL", BLUE, RED, None),
    badge("CO", YELLOW, BLUE, None),
    badge("DZ", GREEN, WHITE, None),
    badge("ID", RED, WHITE, None),
    badge("MY", RED, BLUE, None),
    badge("PK", GREEN, WHITE, None),
    badge("SG", RED, WHITE, None),
    badge("TH", RED, WHITE, None),
    badge("VN", RED, YELLOW, None),
];

pub fn flag_badge(code: &str) -> FlagBadge {
    FLAGS
        .iter()
        .find(|f| f.code.eq_ignore_ascii_case(code))
        .copied()
        .unwrap_or(FlagBadge::PLACEHOLDER)
}

/// Badges for both sides of a pair, front badge first.
pub fn flag_pair(codes: [&str; 2]) -> [FlagBadge; 2] {
    [flag_badge(codes[0]), flag_badge(codes[1])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CURRENCY_PAIRS;

    #[test]
    fn known_codes_resolve() {
        let eu = flag_badge("EU");
        assert_eq!(eu.primary, BLUE);
        assert_eq!(eu.symbol, Some('★'));
        assert_eq!(flag_badge("jp").code, "JP");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert!(flag_badge("XX").is_placeholder());
        assert!(flag_badge("").is_placeholder());
    }

    #[test]
    fn every_catalog_pair_has_real_flags() {
        for pair in CURRENCY_PAIRS {
            for badge in flag_pair(pair.flags) {
                assert!(!badge.is_placeholder(), "{} missing", pair.symbol);
            }
        }
    }

    #[test]
    fn table_codes_are_unique() {
        for (i, a) in FLAGS.iter().enumerate() {
            assert!(FLAGS[i + 1..].iter().all(|b| b.code != a.code), "{}", a.code);
        }
    }
}
