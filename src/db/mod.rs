//! Feedback persistence.
//!
//! [`FeedbackStore`] is the seam between the service and the database.
//! [`PgFeedbackStore`] is the production implementation; [`InMemoryFeedbackStore`]
//! keeps everything in process and backs the tests and database-less runs.

use crate::errors::FeedbackError;
use crate::models::{FeedbackPatch, FeedbackRecord, FeedbackValue, NewFeedbackRecord};
use async_trait::async_trait;
use uuid::Uuid;

pub mod feedback;
pub mod memory;

pub use feedback::PgFeedbackStore;
pub use memory::InMemoryFeedbackStore;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Store every record and return them with their assigned ids.
    async fn insert_many(
        &self,
        records: Vec<NewFeedbackRecord>,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError>;

    /// Matching records, newest first, at most `limit` of them.
    async fn find(
        &self,
        filter: &FeedbackFilter,
        limit: i64,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError>;

    /// Overwrite one field of a record, returning the updated record.
    async fn update_field(
        &self,
        id: Uuid,
        patch: FeedbackPatch,
    ) -> Result<FeedbackRecord, FeedbackError>;

    /// Distinct schema labels, ascending.
    async fn schemas(&self) -> Result<Vec<String>, FeedbackError>;

    async fn ping(&self) -> Result<(), FeedbackError>;

    async fn close(&self);
}

/// Conjunction of list constraints. `None` means "no constraint", except for
/// hidden records which are excluded unless `include_hidden` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub schema: Option<String>,
    pub feedback: Option<FeedbackValue>,
    pub include_hidden: bool,
    pub search: Option<String>,
}

impl FeedbackFilter {
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(schema) = &self.schema {
            if &record.schema != schema {
                return false;
            }
        }

        if let Some(feedback) = self.feedback {
            if record.feedback != feedback {
                return false;
            }
        }

        if !self.include_hidden && record.hidden {
            return false;
        }

        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                record.question.to_lowercase().contains(&needle)
                    || record.query.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Turn free text into an ILIKE pattern that matches it literally anywhere.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
