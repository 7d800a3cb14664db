//! Feedback Service - list, tag, archive and seed feedback records
//!
//! Translates request-level parameters into store filters and patches. Holds
//! no state of its own besides the shared store handle.

use crate::configuration::ListingSettings;
use crate::db::FeedbackStore;
use crate::errors::FeedbackError;
use crate::forms::ListQuery;
use crate::models::{
    ConversationMessage, FeedbackPatch, FeedbackRecord, FeedbackValue, NewFeedbackRecord,
};
use std::sync::Arc;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, FeedbackError>;

#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStore>,
    listing: ListingSettings,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn FeedbackStore>, listing: ListingSettings) -> Self {
        Self { store, listing }
    }

    #[tracing::instrument(name = "List feedback records.", skip(self))]
    pub async fn list_feedback(&self, query: &ListQuery) -> Result<Vec<FeedbackRecord>> {
        let filter = query.to_filter()?;
        let limit = query.limit(&self.listing);
        tracing::debug!(?filter, limit, "Resolved feedback filter");

        self.store.find(&filter, limit).await
    }

    #[tracing::instrument(name = "Set feedback tag.", skip(self))]
    pub async fn set_feedback(&self, id: &str, value: FeedbackValue) -> Result<FeedbackRecord> {
        let id = parse_id(id)?;
        self.store
            .update_field(id, FeedbackPatch::Feedback(value))
            .await
    }

    #[tracing::instrument(name = "Set hidden flag.", skip(self))]
    pub async fn set_hidden(&self, id: &str, hidden: bool) -> Result<FeedbackRecord> {
        let id = parse_id(id)?;
        self.store.update_field(id, FeedbackPatch::Hidden(hidden)).await
    }

    /// Insert the demonstration record. Every call adds another copy.
    #[tracing::instrument(name = "Seed demo feedback.", skip(self))]
    pub async fn seed(&self) -> Result<Vec<FeedbackRecord>> {
        let inserted = self.store.insert_many(vec![demo_record()]).await?;
        tracing::info!("Seed inserted {} records", inserted.len());
        Ok(inserted)
    }

    #[tracing::instrument(name = "Seed minimal feedback.", skip(self))]
    pub async fn seed_minimal(&self) -> Result<Vec<FeedbackRecord>> {
        self.store.insert_many(vec![minimal_record()]).await
    }

    pub async fn schemas(&self) -> Result<Vec<String>> {
        self.store.schemas().await
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

// Ids that are not UUIDs cannot name a stored record.
fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|_| FeedbackError::NotFound(format!("feedback {} not found", id)))
}

pub fn demo_record() -> NewFeedbackRecord {
    NewFeedbackRecord {
        schema: "mesai".to_string(),
        question: "bu haftaki çalışma süremi getir".to_string(),
        query: "Bu hafta toplamda 35.3 saat çalıştınız".to_string(),
        feedback: FeedbackValue::Unset,
        hidden: false,
        conversation: vec![
            ConversationMessage::user("bu haftaki çalışma süremi getir"),
            ConversationMessage::assistant("isteğinizi işleme alıyorum. "),
            ConversationMessage::assistant("Bu hafta toplamda 35.3 saat çalıştınız."),
        ],
    }
}

pub fn minimal_record() -> NewFeedbackRecord {
    NewFeedbackRecord {
        schema: "test".to_string(),
        question: "test".to_string(),
        query: "test".to_string(),
        feedback: FeedbackValue::Unset,
        hidden: false,
        conversation: vec![ConversationMessage::user("test")],
    }
}
