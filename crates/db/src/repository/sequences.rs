//! Named counters backing identifier assignment.

use sqlx::PgPool;

use crate::DbError;

/// Atomically advance the counter `name` and return its new value.
///
/// A counter that does not exist yet is created at `1`.
pub async fn next_value(pool: &PgPool, name: &str) -> Result<i64, DbError> {
    let value = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO sequences (name, value)
        VALUES ($1, 1)
        ON CONFLICT (name) DO UPDATE SET value = sequences.value + 1
        RETURNING value
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(value)
}
