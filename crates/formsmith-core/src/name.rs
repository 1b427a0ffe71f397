//! Free-text personal name parsing.
//!
//! Splits a single "full name" string into honorific, first, middle, last
//! and suffix components. The parser is heuristic and never fails: any input,
//! including an empty string, yields a [`ParsedName`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Honorifics recognized as a leading prefix (compared without the trailing
/// period, case-insensitively).
const PREFIXES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "rev", "fr", "sir", "dame", "hon", "capt",
    "lt", "col", "gen", "sgt",
];

/// Generational and credential suffixes recognized as a trailing token.
const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "esq", "phd", "md", "dds", "cpa", "rn",
];

/// Lowercase particles that belong to the surname when they sit directly
/// before the final token ("van Beethoven", "de la Cruz").
const SURNAME_PARTICLES: &[&str] = &[
    "van", "von", "de", "del", "della", "der", "den", "di", "da", "du", "dos", "la", "le",
    "st", "st.", "ter", "bin", "ibn", "al",
];

/// A name split into its components. Empty strings mean "not present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    pub prefix: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl ParsedName {
    /// `true` when no component was recognized.
    pub fn is_empty(&self) -> bool {
        self.components().all(str::is_empty)
    }

    /// Non-empty components joined with single spaces, in name order.
    pub fn full_name(&self) -> String {
        join_non_empty(self.components())
    }

    fn components(&self) -> impl Iterator<Item = &str> {
        [
            self.prefix.as_str(),
            self.first.as_str(),
            self.middle.as_str(),
            self.last.as_str(),
            self.suffix.as_str(),
        ]
        .into_iter()
    }
}

impl fmt::Display for ParsedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Parse a free-text full name.
///
/// A leading honorific becomes `prefix` and a trailing generational or
/// credential token becomes `suffix`, as long as at least one other token
/// remains. Of the remaining tokens the first is `first`, the last is `last`
/// and anything between is `middle`. Surname particles directly before the
/// final token are folded into `last`. A lone token is always `first`.
pub fn parse_name(raw: &str) -> ParsedName {
    // Commas only separate components ("Public, Jr.", "Smith, John").
    let mut tokens: Vec<&str> = raw
        .split_whitespace()
        .map(|t| t.trim_matches(','))
        .filter(|t| !t.is_empty())
        .collect();
    let mut name = ParsedName::default();

    if tokens.len() > 1 && is_prefix(tokens[0]) {
        name.prefix = tokens.remove(0).to_string();
    }

    if tokens.len() > 1 && tokens.last().is_some_and(|t| is_suffix(t)) {
        if let Some(suffix) = tokens.pop() {
            name.suffix = suffix.to_string();
        }
    }

    match tokens.as_slice() {
        [] => {}
        [only] => name.first = (*only).to_string(),
        [first, rest @ ..] => {
            name.first = (*first).to_string();
            let (between, last) = rest.split_at(rest.len() - 1);
            let particles = between
                .iter()
                .rev()
                .take_while(|t| is_surname_particle(t))
                .count();
            let (middle, surname_head) = between.split_at(between.len() - particles);
            name.middle = middle.join(" ");
            name.last = surname_head
                .iter()
                .chain(last.iter())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    name
}

/// Join the stored sub-inputs of a full-name field into one display string.
///
/// `values` is keyed the way stored entries are: the bare field id holds a
/// simple single-input value, and `"<id>.2"` (prefix), `.3` (first), `.4`
/// (middle), `.6` (last), `.8` (suffix) and `.9` (full) hold the parts. A
/// non-empty bare value wins; otherwise the trimmed parts are joined.
pub fn compose_stored_name(values: &BTreeMap<String, String>, field_id: u32) -> String {
    if let Some(simple) = values.get(&field_id.to_string()) {
        if !simple.is_empty() {
            return simple.clone();
        }
    }

    let parts = ["2", "3", "4", "6", "8", "9"].map(|sub| {
        values
            .get(&format!("{field_id}.{sub}"))
            .map(|v| v.trim())
            .unwrap_or_default()
    });
    join_non_empty(parts.into_iter())
}

fn join_non_empty<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalized(token: &str) -> String {
    token.trim_end_matches([',', '.']).to_lowercase()
}

fn is_prefix(token: &str) -> bool {
    PREFIXES.contains(&normalized(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&normalized(token).replace('.', "").as_str())
}

fn is_surname_particle(token: &str) -> bool {
    SURNAME_PARTICLES.contains(&token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(prefix: &str, first: &str, middle: &str, last: &str, suffix: &str) -> ParsedName {
        ParsedName {
            prefix: prefix.into(),
            first: first.into(),
            middle: middle.into(),
            last: last.into(),
            suffix: suffix.into(),
        }
    }

    #[test]
    fn parses_every_component() {
        assert_eq!(
            parse_name("Dr. Jane Q. Public Jr."),
            name("Dr.", "Jane", "Q.", "Public", "Jr.")
        );
    }

    #[test]
    fn single_token_is_first_name() {
        assert_eq!(parse_name("Madonna"), name("", "Madonna", "", "", ""));
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_name("").is_empty());
        assert!(parse_name("   \t\n ").is_empty());
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        assert_eq!(
            parse_name("  John    Ronald  Reuel   Tolkien "),
            name("", "John", "Ronald Reuel", "Tolkien", "")
        );
    }

    #[test]
    fn two_tokens_are_first_and_last() {
        assert_eq!(parse_name("Ada Lovelace"), name("", "Ada", "", "Lovelace", ""));
    }

    #[test]
    fn prefix_and_suffix_are_case_insensitive() {
        assert_eq!(
            parse_name("MRS Grace Hopper III"),
            name("MRS", "Grace", "", "Hopper", "III")
        );
        assert_eq!(
            parse_name("prof. Alan Turing esq."),
            name("prof.", "Alan", "", "Turing", "esq.")
        );
    }

    #[test]
    fn comma_before_suffix_is_dropped() {
        assert_eq!(
            parse_name("Martin Luther King, Jr."),
            name("", "Martin", "Luther", "King", "Jr.")
        );
        assert_eq!(parse_name("Sammy Davis Jr.,"), name("", "Sammy", "", "Davis", "Jr."));
    }

    #[test]
    fn stray_commas_are_removed_from_every_component() {
        assert_eq!(parse_name("Jane Public,"), name("", "Jane", "", "Public", ""));
        assert_eq!(parse_name("Smith, John"), name("", "Smith", "", "John", ""));
        assert_eq!(parse_name("Mr., John Smith"), name("Mr.", "John", "", "Smith", ""));
        assert_eq!(parse_name("Jane Doe ,Jr."), name("", "Jane", "", "Doe", "Jr."));
        assert_eq!(
            parse_name("Ada, Augusta, King"),
            name("", "Ada", "Augusta", "King", "")
        );
    }

    #[test]
    fn lone_prefix_is_kept_as_core_name() {
        assert_eq!(parse_name("Dr."), name("", "Dr.", "", "", ""));
        assert_eq!(parse_name("Jr"), name("", "Jr", "", "", ""));
    }

    #[test]
    fn prefix_and_suffix_never_consume_the_last_core_token() {
        assert_eq!(parse_name("Mr Jr"), name("Mr", "Jr", "", "", ""));
        assert_eq!(parse_name("Dr. Who"), name("Dr.", "Who", "", "", ""));
    }

    #[test]
    fn hyphenated_names_stay_whole() {
        assert_eq!(
            parse_name("Mary-Kate Smith-Jones"),
            name("", "Mary-Kate", "", "Smith-Jones", "")
        );
    }

    #[test]
    fn surname_particles_join_last_name() {
        assert_eq!(
            parse_name("Ludwig van Beethoven"),
            name("", "Ludwig", "", "van Beethoven", "")
        );
        assert_eq!(
            parse_name("Juan Carlos de la Cruz"),
            name("", "Juan", "Carlos", "de la Cruz", "")
        );
        assert_eq!(
            parse_name("Robert De Niro Sr."),
            name("", "Robert", "", "De Niro", "Sr.")
        );
    }

    #[test]
    fn reassembly_preserves_component_order() {
        for input in [
            "Dr. Jane Q. Public Jr.",
            "Ludwig van Beethoven",
            "  Ada   King Lovelace ",
            "Cher",
            "Martin Luther King, Jr.",
            "Smith ,  John,",
        ] {
            let collapsed = input
                .split_whitespace()
                .map(|t| t.trim_matches(','))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(parse_name(input).full_name(), collapsed, "input: {input:?}");
        }
    }

    #[test]
    fn fields_are_trimmed_and_never_longer_than_input() {
        for input in [
            "",
            " x ",
            "Mr.  A  B  C  D  Esq.",
            "Ms. Ünïcödé Nâmé",
            ",,, ,,",
            "Dr. , Jr.",
        ] {
            let parsed = parse_name(input);
            for field in [
                &parsed.prefix,
                &parsed.first,
                &parsed.middle,
                &parsed.last,
                &parsed.suffix,
            ] {
                assert!(field.len() <= input.len(), "input: {input:?}");
                assert_eq!(field.trim(), field.as_str(), "input: {input:?}");
            }
        }
    }

    #[test]
    fn display_matches_full_name() {
        let parsed = parse_name("Sir Isaac Newton");
        assert_eq!(parsed.to_string(), "Sir Isaac Newton");
    }

    #[test]
    fn compose_prefers_simple_value() {
        let mut values = BTreeMap::new();
        values.insert("1".to_string(), "Jane Public".to_string());
        values.insert("1.3".to_string(), "Ignored".to_string());
        assert_eq!(compose_stored_name(&values, 1), "Jane Public");
    }

    #[test]
    fn compose_joins_trimmed_parts() {
        let mut values = BTreeMap::new();
        values.insert("1".to_string(), String::new());
        values.insert("1.3".to_string(), " Jane ".to_string());
        values.insert("1.6".to_string(), "Public".to_string());
        values.insert("1.9".to_string(), "Jane Public".to_string());
        values.insert("2.3".to_string(), "Other".to_string());
        assert_eq!(compose_stored_name(&values, 1), "Jane Public Jane Public");
        assert_eq!(compose_stored_name(&values, 3), "");
    }
}
