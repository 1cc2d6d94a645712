//! List query parameters
//!
//! Round-trips the UI's query-string contract exactly:
//! `area`, `genre`, `keyword`, `showTakemachelin` (`"0"` hides
//! flagged listings, any other value or absence shows them).
//! Malformed or missing parameters fall back to their neutral value
//! rather than erroring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Neutral token for area/genre filters.
pub const ALL: &str = "all";

/// Query parameters for the list filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopQuery {
    pub area: String,
    pub genre: String,
    pub keyword: String,
    pub show_takemachelin: bool,
}

impl Default for ShopQuery {
    fn default() -> Self {
        Self {
            area: ALL.to_string(),
            genre: ALL.to_string(),
            keyword: String::new(),
            show_takemachelin: true,
        }
    }
}

impl ShopQuery {
    /// Parse from raw query-string parameters. Blank values are
    /// treated the same as absent ones.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let pick = |key: &str, neutral: &str| -> String {
            match params.get(key) {
                Some(v) if !v.is_empty() => v.clone(),
                _ => neutral.to_string(),
            }
        };
        Self {
            area: pick("area", ALL),
            genre: pick("genre", ALL),
            keyword: params.get("keyword").cloned().unwrap_or_default(),
            show_takemachelin: params.get("showTakemachelin").map(String::as_str) != Some("0"),
        }
    }

    /// Whether any of the recognized filter parameters is present.
    pub fn mentioned_in(params: &HashMap<String, String>) -> bool {
        ["area", "genre", "keyword", "showTakemachelin"]
            .iter()
            .any(|k| params.contains_key(*k))
    }
}
