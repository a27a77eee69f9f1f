//! Store-layer error type and classification of `sqlx` failures.

use projects_core::error::CoreError;
use projects_core::types::DbId;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for `check_violation`.
const CHECK_VIOLATION: &str = "23514";
/// PostgreSQL SQLSTATE for `cardinality_violation`, raised when one upsert
/// statement touches the same row twice.
const CARDINALITY_VIOLATION: &str = "21000";
/// SQLSTATE class 22 covers data exceptions (value too long, bad encoding, ...).
const DATA_EXCEPTION_CLASS: &str = "22";

/// Which kind of integrity constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unique => f.write_str("unique"),
            Self::ForeignKey => f.write_str("foreign key"),
        }
    }
}

/// Error returned by every repository operation, tagged with the operation name.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{op}: {entity} not found{}", .id.map(|id| format!(" (id {id})")).unwrap_or_default())]
    NotFound {
        op: &'static str,
        entity: &'static str,
        id: Option<DbId>,
    },

    #[error("{op}: {message}")]
    Validation { op: &'static str, message: String },

    #[error("{op}: {kind} constraint {constraint} violated")]
    ConstraintViolation {
        op: &'static str,
        kind: ConstraintKind,
        constraint: String,
    },

    #[error("{op}: store unavailable: {source}")]
    StoreUnavailable {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A domain error other than validation, kept with its original kind.
    #[error("{op}: {source}")]
    Domain {
        op: &'static str,
        #[source]
        source: CoreError,
    },
}

impl StoreError {
    pub fn not_found(op: &'static str, entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            op,
            entity,
            id: Some(id),
        }
    }

    /// Attach the operation name to a domain error.
    ///
    /// Validation failures become [`StoreError::Validation`]. Every other kind
    /// is wrapped unchanged in [`StoreError::Domain`].
    pub fn from_core(op: &'static str, err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => Self::Validation { op, message },
            source => Self::Domain { op, source },
        }
    }

    /// Classify a `sqlx` error.
    ///
    /// - `RowNotFound` becomes `NotFound`.
    /// - Unique and foreign-key violations become `ConstraintViolation`.
    /// - Check violations, data exceptions (SQLSTATE class 22) and repeated
    ///   keys inside one upsert become `Validation`.
    /// - Pool, IO and TLS failures become `StoreUnavailable`.
    /// - Everything else is `Internal`.
    pub fn classify(op: &'static str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound {
                op,
                entity: "row",
                id: None,
            },
            sqlx::Error::Database(ref db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                match code.as_str() {
                    UNIQUE_VIOLATION => Self::ConstraintViolation {
                        op,
                        kind: ConstraintKind::Unique,
                        constraint,
                    },
                    FOREIGN_KEY_VIOLATION => Self::ConstraintViolation {
                        op,
                        kind: ConstraintKind::ForeignKey,
                        constraint,
                    },
                    CHECK_VIOLATION | CARDINALITY_VIOLATION => Self::Validation {
                        op,
                        message: db_err.message().to_string(),
                    },
                    c if c.starts_with(DATA_EXCEPTION_CLASS) => Self::Validation {
                        op,
                        message: db_err.message().to_string(),
                    },
                    _ => Self::Internal { op, source: err },
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::StoreUnavailable { op, source: err },
            other => Self::Internal { op, source: other },
        }
    }

    /// Operation that produced this error.
    pub fn op(&self) -> &'static str {
        match self {
            Self::NotFound { op, .. }
            | Self::Validation { op, .. }
            | Self::ConstraintViolation { op, .. }
            | Self::StoreUnavailable { op, .. }
            | Self::Internal { op, .. }
            | Self::Domain { op, .. } => op,
        }
    }
}

/// Adapter for `map_err` that classifies a `sqlx` error under `op`.
pub fn store_err(op: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| StoreError::classify(op, err)
}
