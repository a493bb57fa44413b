use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AnnouncementError, AnnouncementResult},
    models::announcement::{
        Announcement, AnnouncementChanges, AnnouncementFilter, CreateAnnouncementRequest,
        FieldUpdate, NewAnnouncement, UpdateAnnouncementRequest,
    },
    ports::{AnnouncementStore, Clock, CredentialGate},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` field, naming the field in the error.
///
/// Only the zero-padded fixed-width form is accepted; chrono alone would also
/// take `2025-6-1` or a signed year.
pub fn parse_date(field: &'static str, value: &str) -> AnnouncementResult<NaiveDate> {
    let invalid = || AnnouncementError::InvalidDateFormat { field };
    if value.len() != 10 {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}

fn check_range(start: Option<NaiveDate>, expiration: NaiveDate) -> AnnouncementResult<()> {
    match start {
        Some(start) if start > expiration => Err(AnnouncementError::InvalidDateRange),
        _ => Ok(()),
    }
}

/// Blank strings on update mean "not supplied".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
    gate: Arc<dyn CredentialGate>,
    clock: Arc<dyn Clock>,
}

impl AnnouncementService {
    pub fn new(
        store: Arc<dyn AnnouncementStore>,
        gate: Arc<dyn CredentialGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, gate, clock }
    }

    /// Resolve the caller to a known teacher username.
    pub async fn authorize(&self, caller: Option<&str>) -> AnnouncementResult<String> {
        let username = caller
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(AnnouncementError::Unauthenticated)?;

        if !self.gate.lookup(username).await? {
            warn!(username, "Rejected unknown announcement caller");
            return Err(AnnouncementError::InvalidCredentials);
        }
        Ok(username.to_string())
    }

    fn parse_id(id: &str) -> AnnouncementResult<Uuid> {
        Uuid::parse_str(id.trim()).map_err(|_| AnnouncementError::InvalidId)
    }

    /// Announcements that have started and not yet expired, in store order.
    pub async fn list_active(&self) -> AnnouncementResult<Vec<Announcement>> {
        let today = self.clock.today();
        Ok(self.store.find(AnnouncementFilter::ActiveOn(today)).await?)
    }

    /// Every announcement regardless of dates. Teachers only.
    pub async fn list_all(&self, caller: Option<&str>) -> AnnouncementResult<Vec<Announcement>> {
        self.authorize(caller).await?;
        Ok(self.store.find(AnnouncementFilter::All).await?)
    }

    pub async fn create(
        &self,
        caller: Option<&str>,
        req: CreateAnnouncementRequest,
    ) -> AnnouncementResult<Announcement> {
        let username = self.authorize(caller).await?;

        let expiration_date = parse_date("expiration_date", &req.expiration_date)?;
        let start_date = match non_blank(req.start_date) {
            Some(raw) => Some(parse_date("start_date", &raw)?),
            None => None,
        };
        check_range(start_date, expiration_date)?;

        if req.title.trim().is_empty() {
            return Err(AnnouncementError::MissingTitle);
        }

        let new = NewAnnouncement {
            title: req.title,
            message: req.message,
            expiration_date,
            start_date,
            created_by: username,
            created_at: self.clock.now(),
        };
        let id = self.store.insert_one(&new).await?;
        info!(%id, created_by = %new.created_by, "Announcement created");

        Ok(new.into_announcement(id))
    }

    pub async fn update(
        &self,
        caller: Option<&str>,
        id: &str,
        req: UpdateAnnouncementRequest,
    ) -> AnnouncementResult<Announcement> {
        let username = self.authorize(caller).await?;
        let id = Self::parse_id(id)?;

        let existing = self
            .store
            .find_one(id)
            .await?
            .ok_or(AnnouncementError::NotFound)?;

        let expiration_date = match non_blank(req.expiration_date) {
            Some(raw) => Some(parse_date("expiration_date", &raw)?),
            None => None,
        };
        let start_date = match req.start_date {
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
            FieldUpdate::Cleared => FieldUpdate::Cleared,
            FieldUpdate::Set(raw) if raw.trim().is_empty() => FieldUpdate::Cleared,
            FieldUpdate::Set(raw) => FieldUpdate::Set(parse_date("start_date", &raw)?),
        };

        check_range(
            start_date.resolve(existing.start_date),
            expiration_date.unwrap_or(existing.expiration_date),
        )?;

        let changes = AnnouncementChanges {
            title: non_blank(req.title),
            message: non_blank(req.message),
            expiration_date,
            start_date,
            updated_at: self.clock.now(),
        };

        if self.store.update_one(id, &changes).await? == 0 {
            return Err(AnnouncementError::UpdateFailed);
        }
        info!(%id, updated_by = %username, "Announcement updated");

        self.store
            .find_one(id)
            .await?
            .ok_or(AnnouncementError::NotFound)
    }

    pub async fn delete(&self, caller: Option<&str>, id: &str) -> AnnouncementResult<()> {
        let username = self.authorize(caller).await?;
        let id = Self::parse_id(id)?;

        if self.store.delete_one(id).await? == 0 {
            return Err(AnnouncementError::NotFound);
        }
        info!(%id, deleted_by = %username, "Announcement deleted");
        Ok(())
    }

    /// Counts (all, active today) for the metrics collector.
    pub async fn counts(&self) -> anyhow::Result<(usize, usize)> {
        let today = self.clock.today();
        let all = self.store.find(AnnouncementFilter::All).await?;
        let active = all.iter().filter(|a| a.is_active_on(today)).count();
        Ok((all.len(), active))
    }

    pub async fn ping_store(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
