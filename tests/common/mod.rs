#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use feedback_api::configuration::ListingSettings;
use feedback_api::db::InMemoryFeedbackStore;
use feedback_api::models::{ConversationMessage, FeedbackRecord, NewFeedbackRecord};
use feedback_api::services::FeedbackService;
use std::sync::Arc;
use uuid::Uuid;

/// Record created `minutes` after a fixed base time.
pub fn record(schema: &str, question: &str, query: &str, hidden: bool, minutes: i64) -> FeedbackRecord {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    NewFeedbackRecord {
        schema: schema.to_string(),
        question: question.to_string(),
        query: query.to_string(),
        hidden,
        conversation: vec![
            ConversationMessage::user(question),
            ConversationMessage::assistant(query),
        ],
        ..Default::default()
    }
    .into_record(Uuid::new_v4(), base + Duration::minutes(minutes))
}

pub fn service_with(records: Vec<FeedbackRecord>) -> FeedbackService {
    FeedbackService::new(
        Arc::new(InMemoryFeedbackStore::with_records(records)),
        ListingSettings::default(),
    )
}
