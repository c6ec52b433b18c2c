// TOML picks file, the offline stand-in for the submission form:
//
//   name = "Alice"
//   email = "alice@example.com"
//
//   [picks]
//   "1" = ["Georgia"]
//   "2" = ["Oregon", "Penn State"]

use std::collections::{BTreeMap, HashMap};

use pickem_core::validate::Submission;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicksFileError {
    #[error("failed to parse picks file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("picks key `{0}` is not a tier number")]
    BadTierKey(String),
}

#[derive(Debug, Deserialize)]
struct RawPicksFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picks: HashMap<String, Vec<String>>,
}

/// Parse a picks file into a `Submission`. Tier keys must be integers; the
/// validator decides whether each number is a real tier.
pub fn parse_picks_file(text: &str) -> Result<Submission, PicksFileError> {
    let raw: RawPicksFile = toml::from_str(text)?;
    let mut picks = BTreeMap::new();
    for (key, teams) in raw.picks {
        let tier = key
            .trim()
            .parse::<u8>()
            .map_err(|_| PicksFileError::BadTierKey(key.clone()))?;
        picks.insert(tier, teams);
    }
    Ok(Submission {
        name: raw.name,
        email: raw.email,
        picks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identity_and_tiers() {
        let sub = parse_picks_file(
            r#"
name = "Alice"
email = "alice@example.com"

[picks]
"1" = ["Georgia"]
"2" = ["Oregon", "Penn State"]
"#,
        )
        .unwrap();
        assert_eq!(sub.name, "Alice");
        assert_eq!(sub.picks[&1], vec!["Georgia".to_string()]);
        assert_eq!(sub.picks[&2].len(), 2);
    }

    #[test]
    fn out_of_range_tier_is_left_for_the_validator() {
        let sub = parse_picks_file("name = \"A\"\nemail = \"a@b.c\"\n[picks]\n\"7\" = [\"X\"]\n").unwrap();
        assert!(sub.picks.contains_key(&7));
    }

    #[test]
    fn non_numeric_key_is_an_error() {
        let err = parse_picks_file("[picks]\ntop = [\"X\"]\n").unwrap_err();
        assert!(matches!(err, PicksFileError::BadTierKey(k) if k == "top"));
    }

    #[test]
    fn missing_identity_parses_as_empty() {
        let sub = parse_picks_file("[picks]\n").unwrap();
        assert!(sub.name.is_empty());
        assert!(sub.email.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            parse_picks_file("name = "),
            Err(PicksFileError::Parse(_))
        ));
    }
}
