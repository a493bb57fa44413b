use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::announcement::{
        Announcement, AnnouncementChanges, AnnouncementFilter, FieldUpdate, NewAnnouncement,
    },
    ports::AnnouncementStore,
};

const COLUMNS: &str =
    "id, title, message, expiration_date, start_date, created_by, created_at, updated_at";

pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn find(&self, filter: AnnouncementFilter) -> anyhow::Result<Vec<Announcement>> {
        let rows = match filter {
            AnnouncementFilter::All => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {COLUMNS} FROM announcements ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            AnnouncementFilter::ActiveOn(today) => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {COLUMNS} FROM announcements
                     WHERE (start_date IS NULL OR start_date <= $1)
                       AND expiration_date >= $1
                     ORDER BY created_at"
                ))
                .bind(today)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_one(&self, announcement: &NewAnnouncement) -> anyhow::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO announcements
                 (title, message, expiration_date, start_date, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&announcement.title)
        .bind(&announcement.message)
        .bind(announcement.expiration_date)
        .bind(announcement.start_date)
        .bind(&announcement.created_by)
        .bind(announcement.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_one(&self, id: Uuid, changes: &AnnouncementChanges) -> anyhow::Result<u64> {
        // $4 selects whether start_date is replaced by $5 (which may be NULL).
        let (replace_start, start_date) = match changes.start_date {
            FieldUpdate::Unchanged => (false, None),
            FieldUpdate::Cleared => (true, None),
            FieldUpdate::Set(date) => (true, Some(date)),
        };

        let result = sqlx::query(
            "UPDATE announcements
             SET title = COALESCE($1, title),
                 message = COALESCE($2, message),
                 expiration_date = COALESCE($3, expiration_date),
                 start_date = CASE WHEN $4 THEN $5 ELSE start_date END,
                 updated_at = $6
             WHERE id = $7",
        )
        .bind(&changes.title)
        .bind(&changes.message)
        .bind(changes.expiration_date)
        .bind(replace_start)
        .bind(start_date)
        .bind(changes.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
