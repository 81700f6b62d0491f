//! The native-driver surface the adapter is written against.
//!
//! The adapter owns no protocol, pooling or retry logic; everything
//! below these traits belongs to the wrapped driver. The production
//! implementation lives in [`crate::cluster`] and [`crate::session`];
//! tests substitute recording implementations to observe exactly which
//! builder setters and call shapes the adapter uses.

use std::time::Duration;

use async_trait::async_trait;

use crate::consistencies::Consistency;
use crate::error::CassandraResult;

/// Fluent cluster builder. Setters consume and return the builder, the
/// way the native driver's do; a setter that is never called leaves the
/// driver default for that option untouched.
pub trait ClusterBuilder: Sized {
    type Cluster: Cluster;

    #[must_use]
    fn with_port(self, port: u16) -> Self;

    #[must_use]
    fn with_default_page_size(self, page_size: i32) -> Self;

    #[must_use]
    fn with_default_consistency(self, consistency: Consistency) -> Self;

    #[must_use]
    fn with_default_timeout(self, timeout: Duration) -> Self;

    #[must_use]
    fn with_connect_timeout(self, timeout: Duration) -> Self;

    /// Restrict the driver to the given hosts, comma-joined.
    #[must_use]
    fn with_whitelist_hosts(self, hosts: &str) -> Self;

    #[must_use]
    fn with_protocol_version(self, version: i32) -> Self;

    #[must_use]
    fn with_credentials(self, username: &str, password: &str) -> Self;

    /// Initial node addresses, comma-joined. Always applied.
    #[must_use]
    fn with_contact_points(self, contact_points: &str) -> Self;

    /// Finalize the configuration into a cluster handle.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the accumulated configuration is
    /// rejected by the driver.
    fn build(self) -> CassandraResult<Self::Cluster>;
}

/// A built cluster, from which keyspace-bound sessions are derived.
#[async_trait]
pub trait Cluster {
    type Session: CqlSession;

    /// Open a session bound to `keyspace`.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the contact points are
    /// unreachable, the keyspace does not exist or authentication fails.
    async fn connect(&self, keyspace: &str) -> CassandraResult<Self::Session>;
}

/// A live session. Prepare and execute each come in two shapes, with
/// and without options; the shapes stay distinct because some driver
/// bindings treat an explicitly absent options argument differently
/// from an omitted one.
#[async_trait]
pub trait CqlSession {
    type Statement;
    type Prepared;
    type Options;
    type Rows;

    async fn prepare(&self, cql: &str) -> CassandraResult<Self::Prepared>;

    async fn prepare_with(
        &self,
        cql: &str,
        options: &Self::Options,
    ) -> CassandraResult<Self::Prepared>;

    async fn execute(&self, statement: &Self::Statement) -> CassandraResult<Self::Rows>;

    async fn execute_with(
        &self,
        statement: &Self::Statement,
        options: &Self::Options,
    ) -> CassandraResult<Self::Rows>;
}

pub type ClusterOf<B> = <B as ClusterBuilder>::Cluster;
pub type SessionOf<B> = <ClusterOf<B> as Cluster>::Session;
pub type StatementOf<B> = <SessionOf<B> as CqlSession>::Statement;
pub type PreparedOf<B> = <SessionOf<B> as CqlSession>::Prepared;
pub type OptionsOf<B> = <SessionOf<B> as CqlSession>::Options;
pub type RowsOf<B> = <SessionOf<B> as CqlSession>::Rows;
