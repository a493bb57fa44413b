//! Contracts the announcement service depends on.
//!
//! Adapters live in `db`: PostgreSQL for production, in-memory for tests and
//! the `memory` backend.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, SubsecRound, Utc};
use uuid::Uuid;

use crate::models::announcement::{
    Announcement, AnnouncementChanges, AnnouncementFilter, NewAnnouncement,
};

/// Document collection holding announcements.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn find(&self, filter: AnnouncementFilter) -> anyhow::Result<Vec<Announcement>>;
    async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<Announcement>>;
    /// Persists the document and returns the identifier the store generated.
    async fn insert_one(&self, announcement: &NewAnnouncement) -> anyhow::Result<Uuid>;
    /// Returns the number of documents modified (0 or 1).
    async fn update_one(&self, id: Uuid, changes: &AnnouncementChanges) -> anyhow::Result<u64>;
    /// Returns the number of documents deleted (0 or 1).
    async fn delete_one(&self, id: Uuid) -> anyhow::Result<u64>;

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// "Is this identifier a known teacher?"
///
/// Only an existence check: no secret is verified. Swap the implementation to
/// move to token or session auth without touching the service.
#[async_trait]
pub trait CredentialGate: Send + Sync {
    async fn lookup(&self, identifier: &str) -> anyhow::Result<bool>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" follows the server's local calendar.
///
/// Timestamps are truncated to microseconds to match `TIMESTAMPTZ`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Frozen clock for tests; `today` is the UTC date of `now`.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self(DateTime::from_naive_utc_and_offset(noon, Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}
