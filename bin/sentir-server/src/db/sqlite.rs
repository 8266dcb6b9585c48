//! SQLite implementation of [`FeedbackStore`].
//!
//! Uses [`sqlx`] with the `sqlite` feature.  Migrations are run
//! automatically on startup via [`SqliteStore::connect`].
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path **at compile time**
//! relative to `CARGO_MANIFEST_DIR` (the crate root), so the directory is
//! embedded into the binary.  The database file location is determined at
//! runtime by the `SENTIR_DATABASE_URL` environment variable and is
//! **not** related to the current working directory at runtime.
//!
//! # Queries
//!
//! The `sqlx::query` (runtime-verified) form is used deliberately so that
//! no `DATABASE_URL` environment variable is needed at compile time.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use super::{FeedbackRecord, FeedbackStore, NewFeedback};

/// SQLite-backed feedback store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://sentir.db"` or `"sqlite::memory:"` for tests.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Close the connection pool, waiting for in-flight operations.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl FeedbackStore for SqliteStore {
    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<i64, sqlx::Error> {
        let created_at = Utc::now().to_rfc3339();
        // Explicit transaction: dropping `tx` on an error path rolls the
        // insert back before the error propagates to the handler.
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO sentiment_analysis_feedback (text, predicted_label, correct_label, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&feedback.text)
        .bind(feedback.predicted_label)
        .bind(feedback.correct_label)
        .bind(&created_at)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();
        tx.commit().await?;
        Ok(id)
    }

    async fn get_feedback(&self, id: i64) -> Result<Option<FeedbackRecord>, sqlx::Error> {
        let row: Option<(i64, String, i64, i64, String)> = sqlx::query_as(
            "SELECT id, text, predicted_label, correct_label, created_at \
             FROM sentiment_analysis_feedback WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(id, text, predicted_label, correct_label, created_at)| FeedbackRecord {
                id,
                text,
                predicted_label,
                correct_label,
                created_at: created_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|e| {
                        tracing::warn!(raw = %created_at, error = %e, "failed to parse feedback created_at; using now");
                        Utc::now()
                    }),
            },
        ))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect")
    }

    fn feedback(text: &str) -> NewFeedback {
        NewFeedback {
            text: text.to_owned(),
            predicted_label: 1,
            correct_label: 2,
        }
    }

    #[tokio::test]
    async fn insert_assigns_strictly_increasing_ids() {
        let store = store().await;
        let first = store.insert_feedback(feedback("bom dia")).await.unwrap();
        let second = store.insert_feedback(feedback("boa noite")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn inserted_row_reads_back_within_the_same_request() {
        let store = store().await;
        let id = store.insert_feedback(feedback("que filme ótimo")).await.unwrap();

        let record = store.get_feedback(id).await.unwrap().expect("row exists");
        assert_eq!(record.id, id);
        assert_eq!(record.text, "que filme ótimo");
        assert_eq!(record.predicted_label, 1);
        assert_eq!(record.correct_label, 2);
    }

    #[tokio::test]
    async fn get_feedback_returns_none_for_unknown_id() {
        let store = store().await;
        assert!(store.get_feedback(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn check_constraint_rejects_out_of_range_label() {
        // Defense in depth: even bypassing the API validation, the table
        // refuses labels outside 0..=3.
        let store = store().await;
        let result = store
            .insert_feedback(NewFeedback {
                text: "x".to_owned(),
                predicted_label: 9,
                correct_label: 1,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn check_constraint_rejects_empty_text() {
        let store = store().await;
        let result = store
            .insert_feedback(NewFeedback {
                text: String::new(),
                predicted_label: 0,
                correct_label: 0,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_cleanly() {
        let store = store().await;
        let bad = store
            .insert_feedback(NewFeedback {
                text: "x".to_owned(),
                predicted_label: 9,
                correct_label: 1,
            })
            .await;
        assert!(bad.is_err());

        // The store stays usable and the next id shows no phantom row.
        let id = store.insert_feedback(feedback("tudo bem")).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn ping_succeeds_on_a_live_store() {
        assert!(store().await.ping().await.is_ok());
    }

    #[tokio::test]
    async fn ping_fails_once_the_pool_is_closed() {
        let store = store().await;
        store.close().await;
        assert!(store.ping().await.is_err());
    }
}
