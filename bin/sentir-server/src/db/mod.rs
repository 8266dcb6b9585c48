//! Database abstraction layer.
//!
//! [`FeedbackStore`] defines the interface for persisting user correction
//! feedback.  The default implementation is [`sqlite::SqliteStore`].  To
//! swap to another database (Postgres, MySQL, …), implement
//! [`FeedbackStore`] for your new type and change the concrete type in
//! [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since
//! Rust 1.75) so no extra `async-trait` crate is required.

pub mod sqlite;

use chrono::{DateTime, Utc};

/// A validated feedback submission, not yet persisted.
///
/// `text` is already trimmed and NFC-normalized and the labels already
/// range-checked by the validation layer; the store's CHECK constraints
/// re-enforce both as defense in depth.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub text: String,
    pub predicted_label: i64,
    pub correct_label: i64,
}

/// A single row in the `sentiment_analysis_feedback` table.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    /// Surrogate primary key, assigned by the store on insert.
    pub id: i64,
    pub text: String,
    pub predicted_label: i64,
    pub correct_label: i64,
    /// Server-assigned insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// Trait for persisting feedback records.
pub trait FeedbackStore: Send + Sync + 'static {
    /// Insert a new feedback row inside a transaction and return the
    /// assigned id.  The id is visible to the calling request immediately
    /// (read-your-writes).
    fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Retrieve a single record by id.
    fn get_feedback(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<FeedbackRecord>, sqlx::Error>> + Send;

    /// Trivial round-trip query, used by the readiness probe.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}
