//! Portfolio records — resumes and GitHub-derived projects, skills and
//! contributions. Each kind is a single table keyed by its own id and owned by
//! a user; list/delete are shared, insert/update are per kind.

pub mod handlers;
pub mod kinds;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

/// One table of per-user records.
#[async_trait]
pub trait Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    type Input: DeserializeOwned + Send + Sync + 'static;

    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    /// Human label used in response messages, e.g. "Resume".
    const LABEL: &'static str;

    /// Primary key of this row.
    fn id(&self) -> Uuid;

    /// Checks a request body before it reaches the database.
    fn validate(input: &Self::Input) -> Result<(), String>;

    async fn insert(pool: &PgPool, input: &Self::Input) -> Result<Self, sqlx::Error>;

    /// Returns `None` when no row has this id.
    async fn update(pool: &PgPool, id: Uuid, input: &Self::Input)
        -> Result<Option<Self>, sqlx::Error>;
}

pub async fn list_for_user<R: Record>(pool: &PgPool, user_id: Uuid) -> Result<Vec<R>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM {} WHERE user_id = $1 ORDER BY {}",
        R::TABLE,
        R::ID_COLUMN
    );
    sqlx::query_as::<_, R>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Returns `false` when nothing was deleted.
pub async fn delete<R: Record>(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE {} = $1", R::TABLE, R::ID_COLUMN);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}
