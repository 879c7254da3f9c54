//! SQL DDL and the fixed queries run against the `excuses` table.

use excuse_schema::SortKey;

/// SQLite schema includes:
/// - `excuses` table (one submitted excuse per row, never deleted)
/// - indexes backing both list orderings
///
/// `AUTOINCREMENT` keeps ids monotonic and never reused, even after the highest row is gone.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS excuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    text TEXT NOT NULL,
    votes INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f+00:00', 'now')) -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_excuses_votes ON excuses(votes DESC, created_at DESC);

CREATE INDEX IF NOT EXISTS idx_excuses_created_at ON excuses(created_at DESC);
"#;

const LIST_BY_VOTES: &str = r#"
SELECT id, text, votes, created_at
FROM excuses
ORDER BY votes DESC, created_at DESC, id DESC
"#;

const LIST_BY_RECENT: &str = r#"
SELECT id, text, votes, created_at
FROM excuses
ORDER BY created_at DESC, id DESC
"#;

pub(crate) const INSERT_EXCUSE: &str = r#"
INSERT INTO excuses (text, votes, created_at)
VALUES (?, 0, ?)
RETURNING id, text, votes, created_at
"#;

pub(crate) const APPLY_VOTE: &str = r#"
UPDATE excuses
SET votes = votes + ?
WHERE id = ?
RETURNING id, text, votes, created_at
"#;

/// Each sort key is bound to one fixed statement; nothing from the request reaches the SQL text.
pub(crate) fn list_query(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Votes => LIST_BY_VOTES,
        SortKey::Recent => LIST_BY_RECENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_queries_order_as_documented() {
        assert!(list_query(SortKey::Votes).contains("ORDER BY votes DESC, created_at DESC"));
        assert!(list_query(SortKey::Recent).contains("ORDER BY created_at DESC"));
        assert!(!list_query(SortKey::Recent).contains("votes DESC"));
    }
}
