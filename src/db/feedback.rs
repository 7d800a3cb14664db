use super::{like_pattern, FeedbackFilter, FeedbackStore};
use crate::configuration::DatabaseSettings;
use crate::errors::FeedbackError;
use crate::models::{ConversationMessage, FeedbackPatch, FeedbackRecord, FeedbackValue, NewFeedbackRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

const COLUMNS: &str = "id, schema, question, query, feedback, hidden, conversation, created_at";

#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    schema: String,
    question: String,
    query: String,
    feedback: Option<String>,
    hidden: bool,
    conversation: Json<Vec<ConversationMessage>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for FeedbackRecord {
    type Error = FeedbackError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let feedback = FeedbackValue::from_tag(row.feedback.as_deref())
            .map_err(|err| FeedbackError::Persistence(format!("row {}: {}", row.id, err)))?;

        Ok(FeedbackRecord {
            id: row.id,
            schema: row.schema,
            question: row.question,
            query: row.query,
            feedback,
            hidden: row.hidden,
            conversation: row.conversation.0,
            created_at: row.created_at,
        })
    }
}

fn into_records(rows: Vec<FeedbackRow>) -> Result<Vec<FeedbackRecord>, FeedbackError> {
    rows.into_iter().map(FeedbackRecord::try_from).collect()
}

pub async fn insert_many(
    pool: &PgPool,
    records: Vec<NewFeedbackRecord>,
) -> Result<Vec<FeedbackRecord>, FeedbackError> {
    if records.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Saving feedback records into the database", count = records.len());
    let created_at = Utc::now();

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO feedback (id, schema, question, query, feedback, hidden, conversation, created_at) ",
    );
    builder.push_values(records, |mut row, record| {
        row.push_bind(Uuid::new_v4())
            .push_bind(record.schema)
            .push_bind(record.question)
            .push_bind(record.query)
            .push_bind(record.feedback.as_str())
            .push_bind(record.hidden)
            .push_bind(Json(record.conversation))
            .push_bind(created_at);
    });
    builder.push(" RETURNING ").push(COLUMNS);

    let rows = builder
        .build_query_as::<FeedbackRow>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to insert feedback: {:?}", err);
            FeedbackError::from(err)
        })?;

    into_records(rows)
}

pub async fn find(
    pool: &PgPool,
    filter: &FeedbackFilter,
    limit: i64,
) -> Result<Vec<FeedbackRecord>, FeedbackError> {
    let query_span = tracing::info_span!("Fetch feedback list.", ?filter, limit);

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    builder.push(COLUMNS).push(" FROM feedback WHERE TRUE");

    if let Some(schema) = &filter.schema {
        builder.push(" AND schema = ").push_bind(schema.clone());
    }

    if let Some(feedback) = filter.feedback {
        match feedback.as_str() {
            Some(tag) => {
                builder.push(" AND feedback = ").push_bind(tag);
            }
            None => {
                builder.push(" AND feedback IS NULL");
            }
        }
    }

    if !filter.include_hidden {
        builder.push(" AND hidden = FALSE");
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder
            .push(" AND (question ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR query ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    builder.push(" ORDER BY created_at DESC LIMIT ").push_bind(limit);

    let rows = builder
        .build_query_as::<FeedbackRow>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch feedback: {:?}", err);
            FeedbackError::from(err)
        })?;

    into_records(rows)
}

pub async fn update_field(
    pool: &PgPool,
    id: Uuid,
    patch: FeedbackPatch,
) -> Result<FeedbackRecord, FeedbackError> {
    let query_span = tracing::info_span!("Updating feedback record", %id, ?patch);

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE feedback SET ");
    match patch {
        FeedbackPatch::Feedback(value) => {
            builder.push("feedback = ").push_bind(value.as_str());
        }
        FeedbackPatch::Hidden(hidden) => {
            builder.push("hidden = ").push_bind(hidden);
        }
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(COLUMNS);

    let row = builder
        .build_query_as::<FeedbackRow>()
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to update feedback {}: {:?}", id, err);
            FeedbackError::from(err)
        })?
        .ok_or_else(|| FeedbackError::NotFound(format!("feedback {} not found", id)))?;

    FeedbackRecord::try_from(row)
}

pub async fn schemas(pool: &PgPool) -> Result<Vec<String>, FeedbackError> {
    let query_span = tracing::info_span!("Fetch distinct feedback schemas.");
    sqlx::query_scalar::<_, String>("SELECT DISTINCT schema FROM feedback ORDER BY schema")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch schemas: {:?}", err);
            FeedbackError::from(err)
        })
}

/// Postgres-backed store. Records live in the `feedback` table, the
/// conversation as a JSONB array.
#[derive(Clone)]
pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, FeedbackError> {
        let connect_options = settings.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect_with(connect_options)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), FeedbackError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn insert_many(
        &self,
        records: Vec<NewFeedbackRecord>,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        insert_many(&self.pool, records).await
    }

    async fn find(
        &self,
        filter: &FeedbackFilter,
        limit: i64,
    ) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        find(&self.pool, filter, limit).await
    }

    async fn update_field(
        &self,
        id: Uuid,
        patch: FeedbackPatch,
    ) -> Result<FeedbackRecord, FeedbackError> {
        update_field(&self.pool, id, patch).await
    }

    async fn schemas(&self) -> Result<Vec<String>, FeedbackError> {
        schemas(&self.pool).await
    }

    async fn ping(&self) -> Result<(), FeedbackError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        tracing::info!("Closing PostgreSQL pool");
        self.pool.close().await;
    }
}
