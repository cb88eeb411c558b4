//! Language resolution for the bilingual catalog columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_TAG_LEN: usize = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    /// Resolves a BCP 47-ish tag by its primary subtag: `fr`, `fr-CA` and `FR`
    /// are French, any other well-formed tag is English, and no tag is English.
    pub fn from_tag(tag: Option<&str>) -> Result<Self> {
        let Some(tag) = tag else {
            return Ok(Language::English);
        };
        let well_formed = !tag.is_empty()
            && tag.len() <= MAX_TAG_LEN
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(Error::invalid_parameter(format!(
                "malformed language tag {tag:?}"
            )));
        }

        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("fr") {
            Ok(Language::French)
        } else {
            Ok(Language::English)
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Picks the value for this language. A blank French value falls back to
    /// English.
    pub fn pick<'a>(self, en: &'a str, fr: &'a str) -> &'a str {
        match self {
            Language::French if !fr.trim().is_empty() => fr,
            _ => en,
        }
    }

    pub fn pick_opt<'a>(self, en: Option<&'a str>, fr: Option<&'a str>) -> Option<&'a str> {
        match self {
            Language::French => fr.filter(|s| !s.trim().is_empty()).or(en),
            Language::English => en,
        }
    }

    pub fn pick_list<'a, T>(self, en: &'a [T], fr: &'a [T]) -> &'a [T] {
        match self {
            Language::French if !fr.is_empty() => fr,
            _ => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
