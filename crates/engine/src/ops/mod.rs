use chrono::Duration;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{EngineError, ResultEngine};

mod auth;
mod categories;
mod clients;
mod orders;
mod products;
mod stock;

pub use auth::Identity;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The persistence gateway.
///
/// Holds the process-wide connection pool; each operation opens its own
/// transaction scope on it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    session_ttl: Duration,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Map a store-level uniqueness violation to [`EngineError::DuplicateName`].
///
/// The pre-check done before each insert is racy: a concurrent writer can
/// take the same value between the check and the insert, and the store then
/// rejects the row.
fn unique_violation(err: DbErr, value: &str) -> EngineError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return EngineError::DuplicateName(value.to_string());
    }
    EngineError::Database(err)
}

/// Sessions older than this resolve to anonymous unless the builder says
/// otherwise.
fn default_session_ttl() -> Duration {
    Duration::hours(12)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    session_ttl: Option<Duration>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// How long a session stays valid after sign-in.
    pub fn session_ttl(mut self, ttl: Duration) -> EngineBuilder {
        self.session_ttl = Some(ttl);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let session_ttl = self.session_ttl.unwrap_or_else(default_session_ttl);
        if session_ttl <= Duration::zero() {
            return Err(EngineError::InvalidInput(
                "session lifetime must be positive".to_string(),
            ));
        }
        // Fail early on a dead connection instead of on the first request.
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
            session_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(
            normalize_required_text("  Hammer ", "product name").unwrap(),
            "Hammer"
        );
    }

    #[test]
    fn blank_required_text_is_rejected() {
        let err = normalize_required_text("   ", "client name").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput("client name must not be empty".to_string())
        );
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(
            normalize_optional_text(Some(" Via Roma 1 ")),
            Some("Via Roma 1".to_string())
        );
    }

    #[tokio::test]
    async fn non_positive_session_ttl_is_rejected() {
        let err = Engine::builder()
            .session_ttl(Duration::zero())
            .build()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput("session lifetime must be positive".to_string())
        );
    }

    #[test]
    fn non_unique_errors_stay_database_errors() {
        let err = unique_violation(DbErr::Custom("boom".to_string()), "alice");
        assert!(matches!(err, EngineError::Database(_)));
    }
}
