use async_trait::async_trait;
use scylla::query::Query;
use scylla::{QueryResult, Session};

use crate::driver::CqlSession;
use crate::error::{CassandraError, CassandraResult};
use crate::statement::{ExecutionOptions, PreparedStatement, Statement};

/// A live keyspace-bound session backed by the scylla driver.
///
/// Holds the configured default page size so that statements without an
/// explicit one pick it up below the adapter; everything else is
/// forwarded to the driver untouched.
pub struct ScyllaSession {
    session: Session,
    default_page_size: Option<i32>,
}

impl ScyllaSession {
    pub(crate) fn new(session: Session, default_page_size: Option<i32>) -> Self {
        Self {
            session,
            default_page_size,
        }
    }

    /// Access the native driver session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn simple_query(&self, cql: &str, options: Option<&ExecutionOptions>) -> Query {
        let mut query = Query::new(cql);
        if let Some(options) = options {
            options.apply_to_query(&mut query);
        }
        if let Some(page_size) = effective_page_size(self.default_page_size, options) {
            query.set_page_size(page_size);
        }
        query
    }
}

/// Page size for a call: an explicit per-call override wins, otherwise
/// the configured session default, otherwise the driver's own default.
fn effective_page_size(
    default_page_size: Option<i32>,
    options: Option<&ExecutionOptions>,
) -> Option<i32> {
    match options.and_then(|options| options.page_size) {
        // The override was already applied with the rest of the options.
        Some(_) => None,
        None => default_page_size,
    }
}

#[async_trait]
impl CqlSession for ScyllaSession {
    type Statement = Statement;
    type Prepared = PreparedStatement;
    type Options = ExecutionOptions;
    type Rows = QueryResult;

    async fn prepare(&self, cql: &str) -> CassandraResult<Self::Prepared> {
        let mut prepared = self
            .session
            .prepare(cql)
            .await
            .map_err(|err| CassandraError::statement(err.to_string()))?;
        if let Some(page_size) = self.default_page_size {
            prepared.set_page_size(page_size);
        }
        Ok(prepared.into())
    }

    async fn prepare_with(
        &self,
        cql: &str,
        options: &Self::Options,
    ) -> CassandraResult<Self::Prepared> {
        let mut prepared = self
            .session
            .prepare(cql)
            .await
            .map_err(|err| CassandraError::statement(err.to_string()))?;
        if let Some(page_size) = effective_page_size(self.default_page_size, Some(options)) {
            prepared.set_page_size(page_size);
        }
        options.apply_to_prepared(&mut prepared);
        Ok(prepared.into())
    }

    async fn execute(&self, statement: &Self::Statement) -> CassandraResult<Self::Rows> {
        let result = match statement {
            Statement::Simple(cql) => {
                let query = self.simple_query(cql, None);
                self.session.query(query, ()).await
            }
            Statement::Prepared(prepared) => self.session.execute(prepared.inner(), ()).await,
        };
        let rows = result.map_err(|err| CassandraError::execution(err.to_string()))?;
        log::debug!("Query executed.");
        Ok(rows)
    }

    async fn execute_with(
        &self,
        statement: &Self::Statement,
        options: &Self::Options,
    ) -> CassandraResult<Self::Rows> {
        let result = match statement {
            Statement::Simple(cql) => {
                let query = self.simple_query(cql, Some(options));
                match options.paging_state.clone() {
                    Some(paging_state) => {
                        self.session.query_paged(query, (), Some(paging_state)).await
                    }
                    None => self.session.query(query, ()).await,
                }
            }
            Statement::Prepared(prepared) => {
                let mut statement = prepared.inner().clone();
                options.apply_to_prepared(&mut statement);
                match options.paging_state.clone() {
                    Some(paging_state) => {
                        self.session
                            .execute_paged(&statement, (), Some(paging_state))
                            .await
                    }
                    None => self.session.execute(&statement, ()).await,
                }
            }
        };
        let rows = result.map_err(|err| CassandraError::execution(err.to_string()))?;
        log::debug!("Query executed.");
        Ok(rows)
    }
}

impl std::fmt::Debug for ScyllaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScyllaSession")
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_call_page_size_beats_the_session_default() {
        let override_options = ExecutionOptions::new().with_page_size(10);
        assert_eq!(effective_page_size(Some(500), Some(&override_options)), None);
    }

    #[test]
    fn session_default_fills_in_when_no_override() {
        assert_eq!(effective_page_size(Some(500), None), Some(500));
        let plain_options = ExecutionOptions::new();
        assert_eq!(effective_page_size(Some(500), Some(&plain_options)), Some(500));
    }

    #[test]
    fn driver_default_is_left_alone_when_nothing_configured() {
        assert_eq!(effective_page_size(None, None), None);
        let plain_options = ExecutionOptions::new();
        assert_eq!(effective_page_size(None, Some(&plain_options)), None);
    }
}
