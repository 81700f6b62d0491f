use std::time::Duration;

use bytes::Bytes;
use scylla::query::Query;

use crate::consistencies::{Consistency, SerialConsistency};

/// A parsed, reusable query template returned by `prepare`.
///
/// Wraps the driver's prepared statement; the adapter never looks inside.
#[derive(Clone, Debug)]
pub struct PreparedStatement {
    inner: scylla::prepared_statement::PreparedStatement,
}

impl PreparedStatement {
    pub(crate) fn inner(&self) -> &scylla::prepared_statement::PreparedStatement {
        &self.inner
    }
}

impl From<scylla::prepared_statement::PreparedStatement> for PreparedStatement {
    fn from(value: scylla::prepared_statement::PreparedStatement) -> Self {
        Self { inner: value }
    }
}

impl From<PreparedStatement> for scylla::prepared_statement::PreparedStatement {
    fn from(value: PreparedStatement) -> Self {
        value.inner
    }
}

/// A statement accepted by `execute`: raw CQL text or a prepared statement.
#[derive(Clone, Debug)]
pub enum Statement {
    Simple(String),
    Prepared(PreparedStatement),
}

impl Statement {
    pub fn simple(cql: impl Into<String>) -> Self {
        Self::Simple(cql.into())
    }
}

impl From<&str> for Statement {
    fn from(value: &str) -> Self {
        Self::Simple(value.to_string())
    }
}

impl From<String> for Statement {
    fn from(value: String) -> Self {
        Self::Simple(value)
    }
}

impl From<PreparedStatement> for Statement {
    fn from(value: PreparedStatement) -> Self {
        Self::Prepared(value)
    }
}

/// Per-call overrides passed to `prepare`/`execute`.
///
/// Unset fields leave whatever the statement or the session defaults
/// already carry. Timeouts are in seconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionOptions {
    pub consistency: Option<Consistency>,
    pub serial_consistency: Option<SerialConsistency>,
    pub page_size: Option<i32>,
    pub request_timeout: Option<u64>,
    pub timestamp: Option<i64>,
    pub is_idempotent: Option<bool>,
    pub tracing: Option<bool>,
    pub paging_state: Option<Bytes>,
}

impl ExecutionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    #[must_use]
    pub fn with_serial_consistency(mut self, serial_consistency: SerialConsistency) -> Self {
        self.serial_consistency = Some(serial_consistency);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: u64) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_is_idempotent(mut self, is_idempotent: bool) -> Self {
        self.is_idempotent = Some(is_idempotent);
        self
    }

    #[must_use]
    pub fn with_tracing(mut self, tracing: bool) -> Self {
        self.tracing = Some(tracing);
        self
    }

    #[must_use]
    pub fn with_paging_state(mut self, paging_state: Bytes) -> Self {
        self.paging_state = Some(paging_state);
        self
    }

    /// Apply the set overrides onto a driver query.
    pub(crate) fn apply_to_query(&self, query: &mut Query) {
        if let Some(consistency) = self.consistency {
            query.set_consistency(consistency.into());
        }
        if let Some(serial_consistency) = self.serial_consistency {
            query.set_serial_consistency(Some(serial_consistency.into()));
        }
        if let Some(page_size) = self.page_size {
            query.set_page_size(page_size);
        }
        if let Some(request_timeout) = self.request_timeout {
            query.set_request_timeout(Some(Duration::from_secs(request_timeout)));
        }
        if let Some(timestamp) = self.timestamp {
            query.set_timestamp(Some(timestamp));
        }
        if let Some(is_idempotent) = self.is_idempotent {
            query.set_is_idempotent(is_idempotent);
        }
        if let Some(tracing) = self.tracing {
            query.set_tracing(tracing);
        }
    }

    /// Apply the set overrides onto a driver prepared statement.
    pub(crate) fn apply_to_prepared(
        &self,
        statement: &mut scylla::prepared_statement::PreparedStatement,
    ) {
        if let Some(consistency) = self.consistency {
            statement.set_consistency(consistency.into());
        }
        if let Some(serial_consistency) = self.serial_consistency {
            statement.set_serial_consistency(Some(serial_consistency.into()));
        }
        if let Some(page_size) = self.page_size {
            statement.set_page_size(page_size);
        }
        if let Some(request_timeout) = self.request_timeout {
            statement.set_request_timeout(Some(Duration::from_secs(request_timeout)));
        }
        if let Some(timestamp) = self.timestamp {
            statement.set_timestamp(Some(timestamp));
        }
        if let Some(is_idempotent) = self.is_idempotent {
            statement.set_is_idempotent(is_idempotent);
        }
        if let Some(tracing) = self.tracing {
            statement.set_tracing(tracing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_from_cql_text() {
        let statement = Statement::from("SELECT * FROM t");
        match statement {
            Statement::Simple(cql) => assert_eq!(cql, "SELECT * FROM t"),
            Statement::Prepared(_) => panic!("expected a simple statement"),
        }
    }

    #[test]
    fn options_builders_set_only_named_fields() {
        let options = ExecutionOptions::new()
            .with_consistency(Consistency::LocalQuorum)
            .with_page_size(250)
            .with_is_idempotent(true);
        assert_eq!(options.consistency, Some(Consistency::LocalQuorum));
        assert_eq!(options.page_size, Some(250));
        assert_eq!(options.is_idempotent, Some(true));
        assert_eq!(options.serial_consistency, None);
        assert_eq!(options.request_timeout, None);
        assert_eq!(options.timestamp, None);
        assert_eq!(options.tracing, None);
        assert_eq!(options.paging_state, None);
    }

    #[test]
    fn default_options_are_all_unset() {
        assert_eq!(ExecutionOptions::new(), ExecutionOptions::default());
        let mut query = Query::new("SELECT * FROM t");
        // Applying empty options must not touch the query.
        ExecutionOptions::default().apply_to_query(&mut query);
        assert_eq!(query.contents, "SELECT * FROM t");
    }
}
