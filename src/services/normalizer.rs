//! Conference name normalization.
//!
//! Listing titles look like `ACRONYM YEAR : <full name>`, where the full
//! name itself often carries an edition ordinal, a leading or trailing year,
//! and a parenthesized acronym. [`normalize`] strips those markers in four
//! passes, each applied to the output of the previous one and skipped when
//! its pattern does not match.

use std::sync::LazyLock;

use regex::Regex;

/// `2024 <name> (ACRONYM 2024)`
static PARENTHETICAL_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(.*)\(.*\)$").expect("valid regex"));

/// `9th <name>`
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}(?:st|nd|rd|th)\s+(.*)$").expect("valid regex"));

/// `<name> 2023`
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\s+\d{4}$").expect("valid regex"));

/// Reduce a listing title to its canonical conference name.
///
/// Total and deterministic: titles that match none of the passes come back
/// unchanged.
pub fn normalize(title: &str) -> String {
    let name = strip_acronym_prefix(title);
    let name = replace_with_group(&PARENTHETICAL_YEAR, name);
    let name = replace_with_group(&ORDINAL_PREFIX, name);
    let name = replace_with_group(&TRAILING_YEAR, name);
    name.to_string()
}

/// Keep the text after the last colon.
fn strip_acronym_prefix(title: &str) -> &str {
    match title.rfind(':') {
        Some(idx) => title[idx + 1..].trim(),
        None => title,
    }
}

/// On a whole-string match, keep only the first capture group, trimmed.
fn replace_with_group<'a>(pattern: &Regex, text: &'a str) -> &'a str {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIG_DATA: &str = "International Conference on Big Data and Computing";

    #[test]
    fn test_full_listing_title() {
        assert_eq!(
            normalize(
                "ICBDC 2024 : 2024 9th International Conference on Big Data and Computing (ICBDC 2024)"
            ),
            BIG_DATA
        );
    }

    #[test]
    fn test_colon_rule_matches_suffix() {
        let suffix = "4th International Conference on Education and Integrating Technology";
        let title = format!("EDTECH 2023 : {suffix}");
        assert_eq!(normalize(&title), normalize(suffix.trim()));
        assert_eq!(
            normalize(&title),
            "International Conference on Education and Integrating Technology"
        );
    }

    #[test]
    fn test_last_colon_wins() {
        assert_eq!(
            normalize("A 2024 : Workshop: Secure Systems"),
            "Secure Systems"
        );
    }

    #[test]
    fn test_parenthetical_year() {
        assert_eq!(
            normalize("2024 9th International Conference on Big Data and Computing (ICBDC 2024)"),
            BIG_DATA
        );
    }

    #[test]
    fn test_ordinal_strip() {
        assert_eq!(
            normalize("9th International Conference on Big Data and Computing"),
            BIG_DATA
        );
        assert_eq!(normalize("21st Symposium on Networks"), "Symposium on Networks");
        assert_eq!(normalize("2nd Workshop on Chains"), "Workshop on Chains");
        assert_eq!(normalize("3rd Meeting"), "Meeting");
    }

    #[test]
    fn test_ordinal_needs_one_or_two_digits() {
        assert_eq!(normalize("100th Anniversary Forum"), "100th Anniversary Forum");
    }

    #[test]
    fn test_trailing_year_strip() {
        assert_eq!(
            normalize(
                "International Japan-Africa Conference on Electronics, Communications and Computations 2023"
            ),
            "International Japan-Africa Conference on Electronics, Communications and Computations"
        );
    }

    #[test]
    fn test_all_passes_compose() {
        assert_eq!(
            normalize("SEC 2025 : 12th Conference on Security 2025"),
            "Conference on Security"
        );
    }

    #[test]
    fn test_no_match_is_unchanged() {
        for title in ["", "   ", "Plain Name", "Conference (SEC)", "2024"] {
            assert_eq!(normalize(title), title);
        }
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        for title in [
            BIG_DATA,
            "Symposium on Networks",
            "International Japan-Africa Conference on Electronics, Communications and Computations",
        ] {
            let once = normalize(title);
            assert_eq!(normalize(&once), once);
            assert_eq!(once, title);
        }
    }

    #[test]
    fn test_colon_only_title() {
        assert_eq!(normalize("ACRONYM 2024 :"), "");
    }
}
