use chrono::{DateTime, Utc};
use excuse_schema::Excuse;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DbExcuse {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbExcuse> for Excuse {
    fn from(row: DbExcuse) -> Self {
        Excuse {
            id: row.id,
            text: row.text,
            votes: row.votes,
            created_at: row.created_at,
        }
    }
}
