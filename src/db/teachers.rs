use async_trait::async_trait;
use sqlx::PgPool;

use crate::ports::CredentialGate;

/// Credential lookup against the `teachers` table.
pub struct PgCredentialGate {
    pool: PgPool,
}

impl PgCredentialGate {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a teacher username. Returns `false` if it already existed.
    pub async fn register(
        &self,
        username: &str,
        display_name: Option<&str>,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT INTO teachers (username, display_name) VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(display_name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl CredentialGate for PgCredentialGate {
    async fn lookup(&self, identifier: &str) -> anyhow::Result<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE username = $1)")
                .bind(identifier)
                .fetch_one(&self.pool)
                .await?;
        Ok(found)
    }
}
