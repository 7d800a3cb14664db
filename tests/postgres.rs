// Runs against a real PostgreSQL; skipped when none is reachable.
// test me: cargo t --test postgres -- --nocapture --show-output
use chrono::{Duration, TimeZone, Utc};
use feedback_api::configuration::{get_configuration, DatabaseSettings};
use feedback_api::db::{FeedbackFilter, FeedbackStore, PgFeedbackStore};
use feedback_api::errors::FeedbackError;
use feedback_api::models::{ConversationMessage, FeedbackPatch, FeedbackValue, NewFeedbackRecord};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    PgPool::connect(&config.connection_string()).await
}

async fn spawn_store() -> Option<PgFeedbackStore> {
    let mut configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(err) => {
            eprintln!("Skipping tests: failed to read configuration: {}", err);
            return None;
        }
    };
    configuration.database.url = None;
    configuration.database.database_name = Uuid::new_v4().to_string();

    let pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let store = PgFeedbackStore::new(pool);
    store.migrate().await.expect("Failed to migrate database");
    Some(store)
}

fn new_record(schema: &str, question: &str, query: &str, hidden: bool) -> NewFeedbackRecord {
    NewFeedbackRecord {
        schema: schema.to_string(),
        question: question.to_string(),
        query: query.to_string(),
        hidden,
        conversation: vec![
            ConversationMessage::user(question),
            ConversationMessage::assistant("isteğinizi işleme alıyorum. "),
            ConversationMessage::assistant(query),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn insert_find_and_update_round_trip() {
    let Some(store) = spawn_store().await else {
        return;
    };

    let inserted = store
        .insert_many(vec![
            new_record("mesai", "bu haftaki çalışma süremi getir", "35.3 saat", false),
            new_record("mesai", "geçen ay", "100%_done", true),
            new_record("izin", "kalan izin", "12 gün", false),
        ])
        .await
        .unwrap();
    assert_eq!(inserted.len(), 3);
    assert_eq!(inserted[0].conversation.len(), 3);

    let visible = store.find(&FeedbackFilter::default(), 20).await.unwrap();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|r| !r.hidden));

    let search = FeedbackFilter {
        search: Some("HAFTA".to_string()),
        ..Default::default()
    };
    let found = store.find(&search, 20).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, inserted[0].id);
    assert_eq!(found[0].conversation, inserted[0].conversation);

    // wildcards in the search text are literal
    let literal = FeedbackFilter {
        search: Some("%_".to_string()),
        include_hidden: true,
        ..Default::default()
    };
    let found = store.find(&literal, 20).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, inserted[1].id);

    let updated = store
        .update_field(inserted[2].id, FeedbackPatch::Feedback(FeedbackValue::Positive))
        .await
        .unwrap();
    assert_eq!(updated.feedback, FeedbackValue::Positive);
    assert_eq!(updated.schema, "izin");

    let tagged = FeedbackFilter {
        feedback: Some(FeedbackValue::Positive),
        ..Default::default()
    };
    assert_eq!(store.find(&tagged, 20).await.unwrap().len(), 1);

    let untagged = FeedbackFilter {
        feedback: Some(FeedbackValue::Unset),
        include_hidden: true,
        ..Default::default()
    };
    assert_eq!(store.find(&untagged, 20).await.unwrap().len(), 2);

    assert_eq!(store.schemas().await.unwrap(), vec!["izin", "mesai"]);

    let missing = store
        .update_field(Uuid::new_v4(), FeedbackPatch::Hidden(true))
        .await;
    assert!(matches!(missing, Err(FeedbackError::NotFound(_))));

    store.close().await;
}

#[tokio::test]
async fn find_orders_newest_first_and_honours_limit() {
    let Some(store) = spawn_store().await else {
        return;
    };

    let inserted = store
        .insert_many(vec![
            new_record("mesai", "a", "a", false),
            new_record("mesai", "b", "b", true),
            new_record("izin", "c", "c", false),
        ])
        .await
        .unwrap();
    let (a, b, c) = (inserted[0].id, inserted[1].id, inserted[2].id);

    // one batch shares a timestamp; spread them out: a < b < c
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    for (minutes, id) in [(1, a), (2, b), (3, c)] {
        sqlx::query("UPDATE feedback SET created_at = $1 WHERE id = $2")
            .bind(base + Duration::minutes(minutes))
            .bind(id)
            .execute(store.pool())
            .await
            .unwrap();
    }

    let everything = FeedbackFilter {
        include_hidden: true,
        ..Default::default()
    };
    let all: Vec<Uuid> = store
        .find(&everything, 20)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(all, vec![c, b, a]);

    let newest = store.find(&everything, 1).await.unwrap();
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].id, c);

    let mesai = FeedbackFilter {
        schema: Some("mesai".to_string()),
        ..Default::default()
    };
    let visible: Vec<Uuid> = store
        .find(&mesai, 20)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(visible, vec![a]);

    let with_hidden = FeedbackFilter {
        include_hidden: true,
        ..mesai
    };
    let listed: Vec<Uuid> = store
        .find(&with_hidden, 20)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, vec![b, a]);

    store.close().await;
}
