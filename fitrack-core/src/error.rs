//! Error types for the data-access layer.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// A row, or the parent a write refers to, does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The store rejected a write (unique, foreign key, not null or check).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A read-function parameter could not be parsed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A payload was rejected before reaching the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(DieselError),

    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Error::Constraint(_))
    }
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => {
                    Error::Constraint(info.message().to_string())
                }
                // SQLite reports some constraint failures without an extended code.
                _ if info.message().contains("constraint failed") => {
                    Error::Constraint(info.message().to_string())
                }
                _ => Error::Database(DieselError::DatabaseError(kind, info)),
            },
            other => Error::Database(other),
        }
    }
}
