use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted excuse and its running vote tally.
///
/// Wire shape: `{ "id": 1, "text": "...", "votes": 0, "created_at": "<RFC3339>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excuse {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}
