use std::time::Duration;

use crate::cluster::ScyllaClusterBuilder;
use crate::config::CassandraConfig;
use crate::driver::{
    Cluster, ClusterBuilder, ClusterOf, CqlSession, OptionsOf, PreparedOf, RowsOf, SessionOf,
    StatementOf,
};
use crate::error::{CassandraError, CassandraResult};

/// The connection adapter.
///
/// Translates a [`CassandraConfig`] into driver builder calls, builds
/// the cluster once, opens one session bound to the configured keyspace
/// and forwards `prepare`/`execute` to it for the rest of its lifetime.
/// Generic over the driver seam; [`Cassandra::connect`] picks the
/// scylla-backed implementation.
pub struct Cassandra<B: ClusterBuilder> {
    cluster: ClusterOf<B>,
    session: SessionOf<B>,
    config: CassandraConfig,
}

impl Cassandra<ScyllaClusterBuilder> {
    /// Connect using the scylla driver.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the configuration is invalid,
    /// the contact points are unreachable, the keyspace does not exist
    /// or authentication fails.
    pub async fn connect(config: CassandraConfig) -> CassandraResult<Self> {
        Self::connect_with(ScyllaClusterBuilder::new(), config).await
    }
}

impl<B: ClusterBuilder> Cassandra<B> {
    /// Connect through the given driver builder.
    ///
    /// Fails fast: on any error nothing of the adapter is retained.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cassandra::connect`].
    pub async fn connect_with(builder: B, config: CassandraConfig) -> CassandraResult<Self> {
        config.validate()?;
        log::debug!("Initializing cluster connection.");
        let builder = apply_config(builder, &config);
        let cluster = builder.build()?;
        let keyspace = config
            .keyspace
            .as_deref()
            .ok_or_else(|| CassandraError::connection("Keyspace is not configured."))?;
        let session = cluster.connect(keyspace).await?;
        Ok(Self {
            cluster,
            session,
            config,
        })
    }

    /// Create a prepared statement.
    ///
    /// # Errors
    ///
    /// Returns a statement error when the driver rejects the CQL.
    pub async fn prepare(
        &self,
        cql: &str,
        options: Option<&OptionsOf<B>>,
    ) -> CassandraResult<PreparedOf<B>> {
        // The two call shapes stay distinct: some driver bindings treat
        // an explicitly absent options argument differently from an
        // omitted one.
        match options {
            None => self.session.prepare(cql).await,
            Some(options) => self.session.prepare_with(cql, options).await,
        }
    }

    /// Execute a statement.
    ///
    /// # Errors
    ///
    /// Returns an execution error on any driver-reported query failure
    /// (timeout, unavailable, syntax, authorization). Failures are not
    /// retried and the driver's detail is passed along unchanged.
    pub async fn execute(
        &self,
        statement: &StatementOf<B>,
        options: Option<&OptionsOf<B>>,
    ) -> CassandraResult<RowsOf<B>> {
        match options {
            None => self.session.execute(statement).await,
            Some(options) => self.session.execute_with(statement, options).await,
        }
    }

    /// The cluster handle this adapter was built from.
    #[must_use]
    pub fn cluster(&self) -> &ClusterOf<B> {
        &self.cluster
    }

    /// The session every call is forwarded to.
    #[must_use]
    pub fn session(&self) -> &SessionOf<B> {
        &self.session
    }

    /// The configuration the adapter was constructed with.
    #[must_use]
    pub fn config(&self) -> &CassandraConfig {
        &self.config
    }
}

impl<B: ClusterBuilder> std::fmt::Debug for Cassandra<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cassandra")
            .field("keyspace", &self.config.keyspace)
            .field("contact_points", &self.config.contact_points)
            .finish()
    }
}

/// Apply every configured option to the builder, in a fixed order,
/// contact points last. Mirrors the `!empty()` reading of the original
/// configuration surface: zero and empty values leave the driver
/// default untouched.
fn apply_config<B: ClusterBuilder>(mut builder: B, config: &CassandraConfig) -> B {
    if let Some(port) = config.port.filter(|port| *port != 0) {
        builder = builder.with_port(port);
    }
    if let Some(page_size) = config.default_page_size.filter(|size| *size > 0) {
        builder = builder.with_default_page_size(page_size);
    }
    if let Some(consistency) = config.default_consistency {
        builder = builder.with_default_consistency(consistency);
    }
    if let Some(timeout) = config.default_timeout.filter(|secs| *secs != 0) {
        builder = builder.with_default_timeout(Duration::from_secs(timeout));
    }
    if let Some(timeout) = config.connect_timeout.filter(|secs| *secs != 0) {
        builder = builder.with_connect_timeout(Duration::from_secs(timeout));
    }
    if config.policy.as_deref() == Some("whitelist") {
        if let Some(whitelist) = config.whitelist.as_ref().filter(|hosts| !hosts.is_empty()) {
            builder = builder.with_whitelist_hosts(&whitelist.joined());
        }
    }
    if let Some(version) = config.protocol_version.filter(|version| *version != 0) {
        builder = builder.with_protocol_version(version);
    }
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        builder = builder.with_credentials(username, password);
    }
    if let Some(contact_points) = &config.contact_points {
        builder = builder.with_contact_points(&contact_points.joined());
    }
    builder
}
