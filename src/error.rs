use thiserror::Error;

pub type CassandraResult<T> = Result<T, CassandraError>;

/// Error type for adapter operations.
///
/// Every failure reported by the underlying driver is surfaced to the
/// caller unchanged; the variant only records which operation failed.
#[derive(Error, Debug)]
pub enum CassandraError {
    /// Cluster build or session open failed. Also covers invalid
    /// configuration rejected before the driver is involved.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement preparation failed (malformed CQL, unknown table).
    #[error("Statement error: {0}")]
    Statement(String),

    /// Query execution failed (timeout, unavailable, syntax, authorization).
    #[error("Execution error: {0}")]
    Execution(String),
}

impl CassandraError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn statement(msg: impl Into<String>) -> Self {
        Self::Statement(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

impl From<scylla::transport::errors::NewSessionError> for CassandraError {
    fn from(err: scylla::transport::errors::NewSessionError) -> Self {
        Self::Connection(err.to_string())
    }
}
