use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{error, warn};

use crate::codec;
use crate::error::{PersistenceError, StoreError};
use crate::record::StoredNotification;

/// Preference-store key under which the serialized inbox lives.
pub const STORAGE_KEY: &str = "notificationInbox";

/// Key/value blob store the inbox loads from at startup and writes to
/// after every mutation. Platform adapters implement this trait.
pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Receives the unread count after every mutation.
pub trait BadgeSink: Send + Sync {
    fn set_count(&self, unread: usize);
}

/// The ordered log of received notifications.
///
/// Mutations hold the write lock across the mutate, persist and badge
/// steps, so concurrent callers observe them as a single step.
pub struct NotificationInbox {
    storage_key: String,
    notifications: RwLock<Vec<StoredNotification>>,
    prefs: Box<dyn PreferenceStore>,
    badge: Option<Box<dyn BadgeSink>>,
}

pub struct NotificationInboxBuilder {
    storage_key: String,
    prefs: Option<Box<dyn PreferenceStore>>,
    badge: Option<Box<dyn BadgeSink>>,
}

impl NotificationInboxBuilder {
    pub fn new() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            prefs: None,
            badge: None,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_preference_store(mut self, prefs: Box<dyn PreferenceStore>) -> Self {
        self.prefs = Some(prefs);
        self
    }

    pub fn with_badge_sink(mut self, badge: Box<dyn BadgeSink>) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn build(self) -> Result<NotificationInbox> {
        let prefs = self
            .prefs
            .ok_or_else(|| anyhow!("a preference store is required"))?;
        let inbox = NotificationInbox {
            storage_key: self.storage_key,
            notifications: RwLock::new(Vec::new()),
            prefs,
            badge: self.badge,
        };
        inbox.reload();
        Ok(inbox)
    }
}

impl NotificationInbox {
    pub fn builder() -> NotificationInboxBuilder {
        NotificationInboxBuilder::new()
    }

    pub fn count(&self) -> usize {
        self.notifications.read().len()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.read().iter().filter(|n| !n.read).count()
    }

    pub fn get(&self, index: usize) -> Result<StoredNotification, StoreError> {
        let list = self.notifications.read();
        list.get(index).cloned().ok_or(StoreError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }

    pub fn snapshot(&self) -> Vec<StoredNotification> {
        self.notifications.read().clone()
    }

    /// Decodes an inbound payload and appends it to the log.
    ///
    /// An undecodable payload is dropped: nothing is appended, nothing is
    /// written, the failure only shows up in the log.
    pub fn add_payload(&self, json: &str) {
        self.add_payload_at(json, Utc::now());
    }

    pub fn add_payload_at(&self, json: &str, received_at: DateTime<Utc>) {
        let mut list = self.notifications.write();
        match codec::decode_notification(json, received_at) {
            Ok(notification) => {
                list.push(notification);
                self.sync(&list);
            }
            Err(err) => warn!(%err, "discarding undecodable notification payload"),
        }
    }

    pub fn remove(&self, index: usize) -> Result<StoredNotification, StoreError> {
        let mut list = self.notifications.write();
        if index >= list.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        let removed = list.remove(index);
        self.sync(&list);
        Ok(removed)
    }

    /// Marks the notification at `index` as read. A second call on the
    /// same record is a no-op.
    pub fn mark_read(&self, index: usize) -> Result<(), StoreError> {
        let mut list = self.notifications.write();
        let len = list.len();
        let entry = list
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        if entry.read {
            return Ok(());
        }
        entry.read = true;
        self.sync(&list);
        Ok(())
    }

    /// Replaces the in-memory log wholesale from the preference store.
    /// An absent blob reads as the empty list.
    pub fn reload(&self) {
        let mut list = self.notifications.write();
        let blob = self
            .prefs
            .read(&self.storage_key)
            .unwrap_or_else(|| "[]".to_string());
        *list = codec::decode_stored_list(&blob);
        self.push_badge(&list);
    }

    fn sync(&self, list: &[StoredNotification]) {
        self.persist(list);
        self.push_badge(list);
    }

    fn persist(&self, list: &[StoredNotification]) {
        match codec::encode_stored_list(list) {
            Ok(blob) => {
                // A failed write is logged and swallowed; the in-memory
                // state stays authoritative and the next save rewrites
                // the whole collection.
                if let Err(err) = self.prefs.write(&self.storage_key, &blob) {
                    error!(%err, "failed to persist notification inbox");
                }
            }
            Err(err) => error!(%err, "failed to serialize notification inbox"),
        }
    }

    fn push_badge(&self, list: &[StoredNotification]) {
        if let Some(badge) = &self.badge {
            badge.set_count(list.iter().filter(|n| !n.read).count());
        }
    }
}
