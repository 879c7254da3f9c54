//! Inbound request payloads.
//!
//! Body fields are kept as raw [`Value`]s so that a wrong JSON type (e.g. `"text": 42`) is
//! reported by route validation with the route's own message instead of a generic
//! deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /excuses` body: `{ "text": "..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExcuseRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

impl CreateExcuseRequest {
    /// Returns the submitted text trimmed of surrounding whitespace.
    ///
    /// `None` when the field is missing, not a string, or blank after trimming.
    pub fn trimmed_text(&self) -> Option<&str> {
        match &self.text {
            Some(Value::String(s)) => {
                Some(s.trim_matches(is_trimmable)).filter(|t| !t.is_empty())
            }
            _ => None,
        }
    }
}

/// ECMAScript `WhiteSpace` and `LineTerminator`: Unicode whitespace plus the BOM, minus NEL.
fn is_trimmable(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// `POST /excuses/{id}/vote` body: `{ "delta": 1 | -1 }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub delta: Option<Value>,
}

impl VoteRequest {
    pub fn vote_delta(&self) -> Option<VoteDelta> {
        self.delta.as_ref().and_then(VoteDelta::from_json)
    }
}

/// A signed unit change applied to an excuse's tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelta {
    Up,
    Down,
}

impl VoteDelta {
    /// Accepts the JSON numbers `1` and `-1` (including `1.0` / `-1.0`); anything else is rejected.
    #[allow(clippy::float_cmp)]
    pub fn from_json(value: &Value) -> Option<Self> {
        let Value::Number(n) = value else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            return Self::from_i64(i);
        }
        match n.as_f64() {
            Some(f) if f == 1.0 => Some(Self::Up),
            Some(f) if f == -1.0 => Some(Self::Down),
            _ => None,
        }
    }

    pub fn from_i64(delta: i64) -> Option<Self> {
        match delta {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Requested ordering for `GET /excuses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest tally first, newest first among equal tallies.
    #[default]
    Votes,
    /// Newest first.
    Recent,
}

impl SortKey {
    /// Lenient parse used for query strings: unknown or missing values fall back to [`SortKey::Votes`].
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("recent") => Self::Recent,
            _ => Self::Votes,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Votes => "votes",
            Self::Recent => "recent",
        }
    }
}

/// Query string of `GET /excuses` and `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_query(self.sort.as_deref())
    }
}
