use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub expiration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Username of the teacher who posted it
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Announcement {
    /// Visible to the public listing: already started and not yet expired.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= today) && self.expiration_date >= today
    }

    /// Apply validated changes in place, the way the store does on `update_one`.
    pub fn apply(&mut self, changes: &AnnouncementChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(message) = &changes.message {
            self.message = message.clone();
        }
        if let Some(expiration_date) = changes.expiration_date {
            self.expiration_date = expiration_date;
        }
        self.start_date = changes.start_date.resolve(self.start_date);
        self.updated_at = Some(changes.updated_at);
    }
}

/// A validated announcement not yet persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub expiration_date: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewAnnouncement {
    pub fn into_announcement(self, id: Uuid) -> Announcement {
        Announcement {
            id,
            title: self.title,
            message: self.message,
            expiration_date: self.expiration_date,
            start_date: self.start_date,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Validated field set for `update_one`. `None` leaves a field untouched.
#[derive(Debug, Clone)]
pub struct AnnouncementChanges {
    pub title: Option<String>,
    pub message: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub start_date: FieldUpdate<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Store-side selection for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementFilter {
    All,
    ActiveOn(NaiveDate),
}

impl AnnouncementFilter {
    pub fn matches(&self, announcement: &Announcement) -> bool {
        match self {
            AnnouncementFilter::All => true,
            AnnouncementFilter::ActiveOn(today) => announcement.is_active_on(*today),
        }
    }
}

/// Update of a clearable field.
///
/// Deserializes from JSON as: key absent → `Unchanged` (needs `#[serde(default)]`
/// on the field), `null` → `Cleared`, any value → `Set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Cleared,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T: Clone> FieldUpdate<T> {
    /// The value the field holds once this update is applied to `current`.
    pub fn resolve(&self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::Cleared => None,
            FieldUpdate::Set(value) => Some(value.clone()),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Cleared,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub message: String,
    /// YYYY-MM-DD
    pub expiration_date: String,
    /// YYYY-MM-DD; absent means visible right away
    pub start_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub expiration_date: Option<String>,
    /// `null` or `""` clears the start date
    #[serde(default)]
    pub start_date: FieldUpdate<String>,
}
