use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use super::user::User;

pub mod manager;

/// Trait for managing sessions.
#[async_trait]
pub trait Manager {
    /// Find the user owning a session token, if the session was created at or after `not_before`.
    async fn find_user_by_token(&self, token: &str, not_before: &str)
        -> anyhow::Result<Option<User>>;
}

/// Trait for managing transactions on sessions.
#[async_trait]
pub trait TxManager {
    /// Open a session for a user.
    async fn create(&mut self, token: &str, user_id: i64, created_at: &str)
        -> anyhow::Result<()>;
    /// Close a session.
    async fn delete(&mut self, token: &str) -> anyhow::Result<u64>;
    /// Delete every session created before `not_before`.
    async fn delete_expired(&mut self, not_before: &str) -> anyhow::Result<u64>;
}

/// Format a `created_at` timestamp.
/// Always UTC with whole seconds, so stored timestamps order as strings.
#[must_use]
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Oldest `created_at` of a session still valid at `now`.
#[must_use]
pub fn expiry_cutoff(now: DateTime<Utc>, max_age_secs: i64) -> String {
    let oldest = TimeDelta::try_seconds(max_age_secs)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    timestamp(oldest)
}
