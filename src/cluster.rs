use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scylla::transport::host_filter::AllowListHostFilter;
use scylla::{ExecutionProfile, SessionBuilder};

use crate::config::DEFAULT_PORT;
use crate::consistencies::Consistency;
use crate::driver::{Cluster, ClusterBuilder};
use crate::error::{CassandraError, CassandraResult};
use crate::session::ScyllaSession;

/// Options accumulated by the builder and kept by the cluster handle.
#[derive(Clone, Debug, Default)]
struct ClusterSettings {
    port: Option<u16>,
    default_page_size: Option<i32>,
    default_consistency: Option<Consistency>,
    default_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    whitelist: Option<String>,
    protocol_version: Option<i32>,
    credentials: Option<(String, String)>,
    contact_points: Option<String>,
}

/// Cluster builder backed by the scylla driver.
///
/// Setters only record options; nothing touches the network until the
/// cluster's `connect` assembles the real session builder.
#[derive(Clone, Debug, Default)]
pub struct ScyllaClusterBuilder {
    settings: ClusterSettings,
}

impl ScyllaClusterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClusterBuilder for ScyllaClusterBuilder {
    type Cluster = ScyllaCluster;

    fn with_port(mut self, port: u16) -> Self {
        self.settings.port = Some(port);
        self
    }

    fn with_default_page_size(mut self, page_size: i32) -> Self {
        self.settings.default_page_size = Some(page_size);
        self
    }

    fn with_default_consistency(mut self, consistency: Consistency) -> Self {
        self.settings.default_consistency = Some(consistency);
        self
    }

    fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.settings.default_timeout = Some(timeout);
        self
    }

    fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = Some(timeout);
        self
    }

    fn with_whitelist_hosts(mut self, hosts: &str) -> Self {
        self.settings.whitelist = Some(hosts.to_string());
        self
    }

    fn with_protocol_version(mut self, version: i32) -> Self {
        self.settings.protocol_version = Some(version);
        self
    }

    fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.settings.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    fn with_contact_points(mut self, contact_points: &str) -> Self {
        self.settings.contact_points = Some(contact_points.to_string());
        self
    }

    fn build(self) -> CassandraResult<Self::Cluster> {
        let has_contact_points = self
            .settings
            .contact_points
            .as_deref()
            .map_or(false, |points| !points.trim().is_empty());
        if !has_contact_points {
            return Err(CassandraError::connection(
                "Cannot build a cluster without contact points.",
            ));
        }
        Ok(ScyllaCluster {
            settings: self.settings,
        })
    }
}

/// A configured cluster handle. Immutable after build; sessions are
/// derived from it, one per adapter.
#[derive(Clone, Debug)]
pub struct ScyllaCluster {
    settings: ClusterSettings,
}

#[async_trait]
impl Cluster for ScyllaCluster {
    type Session = ScyllaSession;

    async fn connect(&self, keyspace: &str) -> CassandraResult<Self::Session> {
        log::debug!("Opening session bound to keyspace {keyspace}.");
        let settings = &self.settings;
        let port = settings.port.unwrap_or(DEFAULT_PORT);

        let mut session_builder = SessionBuilder::new();
        if let Some(contact_points) = &settings.contact_points {
            for known_node in hosts_with_port(contact_points, port) {
                session_builder = session_builder.known_node(known_node);
            }
        }
        if let Some((username, password)) = &settings.credentials {
            session_builder = session_builder.user(username.clone(), password.clone());
        }
        session_builder = session_builder.use_keyspace(keyspace, true);
        if let Some(connect_timeout) = settings.connect_timeout {
            session_builder = session_builder.connection_timeout(connect_timeout);
        }
        // Only install a default profile when something overrides the
        // driver defaults, so an untouched option stays untouched.
        if settings.default_consistency.is_some() || settings.default_timeout.is_some() {
            let mut profile_builder = ExecutionProfile::builder();
            if let Some(consistency) = settings.default_consistency {
                profile_builder = profile_builder.consistency(consistency.into());
            }
            if let Some(default_timeout) = settings.default_timeout {
                profile_builder = profile_builder.request_timeout(Some(default_timeout));
            }
            session_builder = session_builder
                .default_execution_profile_handle(profile_builder.build().into_handle());
        }
        if let Some(whitelist) = &settings.whitelist {
            let allowed = hosts_with_port(whitelist, port);
            let filter = AllowListHostFilter::new(allowed.iter().map(String::as_str))
                .map_err(|err| CassandraError::connection(err.to_string()))?;
            session_builder = session_builder.host_filter(Arc::new(filter));
        }
        if let Some(version) = settings.protocol_version {
            log::warn!(
                "Protocol version {version} is configured, but the driver negotiates \
                 the protocol itself; the option is ignored."
            );
        }

        let session = session_builder.build().await?;
        log::debug!("Session established.");
        Ok(ScyllaSession::new(session, settings.default_page_size))
    }
}

/// Split a comma-joined host list, attaching `port` to hosts that carry
/// no explicit one.
fn hosts_with_port(joined: &str, port: u16) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(|host| {
            if host.contains(':') {
                host.to_string()
            } else {
                format!("{host}:{port}")
            }
        })
        .collect()
}
