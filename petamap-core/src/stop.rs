//! Planned route stops produced by the itinerary generator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator characters that join a neighborhood prefix to a shop name,
/// "渋谷×ロフト" style.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[×xX*＊]").expect("separator pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[serde(rename = "walk")]
    Walk,
    #[serde(rename = "train")]
    Train,
}

/// One planned visit in a route. Produced upstream, consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    /// Explicit hint for how to reach this stop, when the generator knows.
    pub travel_mode: Option<TravelMode>,
}

impl Stop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            travel_mode: None,
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = Some(mode);
        self
    }

    /// Display name with any neighborhood prefix stripped: the part after
    /// the first separator, or the whole name when there is none.
    pub fn short_name(&self) -> &str {
        match SEPARATORS.find(&self.name) {
            Some(m) => self.name[m.end()..].trim(),
            None => self.name.trim(),
        }
    }
}

/// Replace every separator with a space, collapse runs of whitespace,
/// and trim.
pub(crate) fn strip_separators(name: &str) -> String {
    let spaced = SEPARATORS.replace_all(name, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}
