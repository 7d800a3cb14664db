use super::{FeedbackFilter, FeedbackStore};
use crate::errors::FeedbackError;
use crate::models::{FeedbackPatch, FeedbackRecord, NewFeedbackRecord};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store. Records are kept in insertion order.
#[derive(Default)]
pub struct InMemoryFeedbackStore {
    records: RwLock<Vec<FeedbackRecord>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from fully formed records, timestamps included.
    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn insert_many(
        &self,
        records: Vec<NewFeedbackRecord>,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        let created_at = Utc::now();
        let inserted: Vec<FeedbackRecord> = records
            .into_iter()
            .map(|record| record.into_record(Uuid::new_v4(), created_at))
            .collect();

        self.records.write().await.extend(inserted.iter().cloned());
        tracing::debug!("Inserted {} feedback records in memory", inserted.len());

        Ok(inserted)
    }

    async fn find(
        &self,
        filter: &FeedbackFilter,
        limit: i64,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        let records = self.records.read().await;
        // newest insert first among equal timestamps
        let mut found: Vec<FeedbackRecord> = records
            .iter()
            .rev()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));

        Ok(found)
    }

    async fn update_field(
        &self,
        id: Uuid,
        patch: FeedbackPatch,
    ) -> Result<FeedbackRecord, FeedbackError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| FeedbackError::NotFound(format!("feedback {} not found", id)))?;

        patch.apply(record);
        Ok(record.clone())
    }

    async fn schemas(&self) -> Result<Vec<String>, FeedbackError> {
        let mut schemas: Vec<String> = self
            .records
            .read()
            .await
            .iter()
            .map(|record| record.schema.clone())
            .collect();
        schemas.sort();
        schemas.dedup();

        Ok(schemas)
    }

    async fn ping(&self) -> Result<(), FeedbackError> {
        Ok(())
    }

    async fn close(&self) {}
}
