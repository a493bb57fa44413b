//! In-process adapters, used by tests and the `memory` store backend.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::announcement::{
        Announcement, AnnouncementChanges, AnnouncementFilter, NewAnnouncement,
    },
    ports::{AnnouncementStore, CredentialGate},
};

/// Announcements kept in insertion order.
#[derive(Default)]
pub struct MemoryAnnouncementStore {
    documents: RwLock<Vec<Announcement>>,
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn find(&self, filter: AnnouncementFilter) -> anyhow::Result<Vec<Announcement>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_one(&self, announcement: &NewAnnouncement) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.documents
            .write()
            .await
            .push(announcement.clone().into_announcement(id));
        Ok(id)
    }

    async fn update_one(&self, id: Uuid, changes: &AnnouncementChanges) -> anyhow::Result<u64> {
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|a| a.id == id) {
            Some(announcement) => {
                announcement.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: Uuid) -> anyhow::Result<u64> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|a| a.id != id);
        Ok((before - documents.len()) as u64)
    }
}

/// A fixed set of teacher usernames.
#[derive(Debug, Default)]
pub struct StaticCredentialGate {
    usernames: HashSet<String>,
}

impl StaticCredentialGate {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl CredentialGate for StaticCredentialGate {
    async fn lookup(&self, identifier: &str) -> anyhow::Result<bool> {
        Ok(self.usernames.contains(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::announcement::FieldUpdate;
    use chrono::{NaiveDate, Utc};

    fn new_announcement(expiration: NaiveDate) -> NewAnnouncement {
        NewAnnouncement {
            title: "Picture day".into(),
            message: "Wear your best".into(),
            expiration_date: expiration,
            start_date: None,
            created_by: "mr_smith".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_report_counts() {
        let store = MemoryAnnouncementStore::default();
        let expiration = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let id = store.insert_one(&new_announcement(expiration)).await.unwrap();

        let changes = AnnouncementChanges {
            title: Some("Picture day (moved)".into()),
            message: None,
            expiration_date: None,
            start_date: FieldUpdate::Unchanged,
            updated_at: Utc::now(),
        };
        assert_eq!(store.update_one(id, &changes).await.unwrap(), 1);
        assert_eq!(store.update_one(Uuid::new_v4(), &changes).await.unwrap(), 0);

        let stored = store.find_one(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Picture day (moved)");
        assert_eq!(stored.message, "Wear your best");

        assert_eq!(store.delete_one(id).await.unwrap(), 1);
        assert_eq!(store.delete_one(id).await.unwrap(), 0);
        assert!(store.find_one(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_gate() {
        let gate = StaticCredentialGate::new(["ms_jones", "mr_smith"]);
        assert!(gate.lookup("ms_jones").await.unwrap());
        assert!(!gate.lookup("student_42").await.unwrap());
    }
}
