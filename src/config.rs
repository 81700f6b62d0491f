use serde::{Deserialize, Serialize};

use crate::consistencies::Consistency;
use crate::error::{CassandraError, CassandraResult};

/// Port assumed for hosts configured without an explicit one.
pub const DEFAULT_PORT: u16 = 9042;

/// A host list as it appears in configuration: either an ordered
/// sequence of host strings or a single comma-joined string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hosts {
    List(Vec<String>),
    Joined(String),
}

impl Hosts {
    /// Render the list as the comma-joined form the driver builder takes.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Hosts::List(hosts) => hosts.join(","),
            Hosts::Joined(joined) => joined.clone(),
        }
    }

    /// True if the list holds no usable host at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Hosts::List(hosts) => hosts.iter().all(|host| host.trim().is_empty()),
            Hosts::Joined(joined) => joined.split(',').all(|host| host.trim().is_empty()),
        }
    }
}

impl From<&str> for Hosts {
    fn from(value: &str) -> Self {
        Hosts::Joined(value.to_string())
    }
}

impl From<Vec<String>> for Hosts {
    fn from(value: Vec<String>) -> Self {
        Hosts::List(value)
    }
}

impl<const N: usize> From<[&str; N]> for Hosts {
    fn from(value: [&str; N]) -> Self {
        Hosts::List(value.iter().map(ToString::to_string).collect())
    }
}

/// Connection configuration, read once when the adapter is constructed.
///
/// Every key except `keyspace` and `contact_points` is optional; absent,
/// zero or empty values leave the corresponding driver default untouched.
/// Timeouts are in seconds. Several keys accept the legacy builder-method
/// spellings (`withDefaultTimeout`, `contactpoints`, ...) still found in
/// older configuration files.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CassandraConfig {
    pub port: Option<u16>,
    #[serde(alias = "defaultPageSize")]
    pub default_page_size: Option<i32>,
    #[serde(alias = "defaultConsistency", alias = "withDefaultConsistency")]
    pub default_consistency: Option<Consistency>,
    #[serde(alias = "defaultTimeout", alias = "withDefaultTimeout")]
    pub default_timeout: Option<u64>,
    #[serde(alias = "connectTimeout", alias = "withConnectTimeout")]
    pub connect_timeout: Option<u64>,
    pub policy: Option<String>,
    pub whitelist: Option<Hosts>,
    #[serde(alias = "protocolVersion", alias = "withProtocolVersion")]
    pub protocol_version: Option<i32>,
    #[serde(alias = "contactPoints", alias = "contactpoints")]
    pub contact_points: Option<Hosts>,
    pub keyspace: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CassandraConfig {
    /// Config with the two required keys set and every optional key absent.
    pub fn new(contact_points: impl Into<Hosts>, keyspace: impl Into<String>) -> Self {
        Self {
            contact_points: Some(contact_points.into()),
            keyspace: Some(keyspace.into()),
            ..Self::default()
        }
    }

    /// Check the required keys and credential pairing.
    ///
    /// # Errors
    ///
    /// Returns a connection error if contact points or keyspace are
    /// missing or empty, or if only one half of the credentials is set.
    pub fn validate(&self) -> CassandraResult<()> {
        match &self.contact_points {
            Some(points) if !points.is_empty() => {}
            _ => {
                return Err(CassandraError::connection(
                    "Contact points are not configured.",
                ));
            }
        }
        if self.keyspace.as_deref().map_or(true, |ks| ks.trim().is_empty()) {
            return Err(CassandraError::connection("Keyspace is not configured."));
        }
        match (&self.username, &self.password) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            _ => Err(CassandraError::connection(
                "Cannot use username without a password and vice versa.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosts_accept_both_encodings() {
        let listed: Hosts = serde_json::from_str(r#"["10.0.0.1", "10.0.0.2"]"#).unwrap();
        assert_eq!(listed.joined(), "10.0.0.1,10.0.0.2");
        let joined: Hosts = serde_json::from_str(r#""10.0.0.1,10.0.0.2""#).unwrap();
        assert_eq!(joined.joined(), "10.0.0.1,10.0.0.2");
    }

    #[test]
    fn blank_hosts_count_as_empty() {
        assert!(Hosts::Joined(String::new()).is_empty());
        assert!(Hosts::List(vec![" ".into(), String::new()]).is_empty());
        assert!(!Hosts::Joined("node1".into()).is_empty());
    }

    #[test]
    fn config_parses_canonical_keys() {
        let config: CassandraConfig = serde_json::from_str(
            r#"{
                "port": 9142,
                "default_page_size": 500,
                "default_consistency": "LOCAL_QUORUM",
                "default_timeout": 12,
                "connect_timeout": 5,
                "policy": "whitelist",
                "whitelist": ["a", "b"],
                "protocol_version": 4,
                "contact_points": ["node1", "node2"],
                "keyspace": "app"
            }"#,
        )
        .unwrap();
        assert_eq!(config.port, Some(9142));
        assert_eq!(config.default_consistency, Some(Consistency::LocalQuorum));
        assert_eq!(config.whitelist.unwrap().joined(), "a,b");
        assert_eq!(config.contact_points.unwrap().joined(), "node1,node2");
    }

    #[test]
    fn config_accepts_legacy_key_spellings() {
        let config: CassandraConfig = serde_json::from_str(
            r#"{
                "defaultPageSize": 100,
                "withDefaultConsistency": "QUORUM",
                "withDefaultTimeout": 30,
                "withConnectTimeout": 10,
                "withProtocolVersion": 3,
                "contactpoints": "node1,node2",
                "keyspace": "legacy"
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_page_size, Some(100));
        assert_eq!(config.default_consistency, Some(Consistency::Quorum));
        assert_eq!(config.default_timeout, Some(30));
        assert_eq!(config.connect_timeout, Some(10));
        assert_eq!(config.protocol_version, Some(3));
        assert_eq!(config.contact_points.unwrap().joined(), "node1,node2");
    }

    #[test]
    fn validate_requires_contact_points_and_keyspace() {
        let missing_points = CassandraConfig {
            keyspace: Some("app".into()),
            ..CassandraConfig::default()
        };
        assert!(matches!(
            missing_points.validate(),
            Err(CassandraError::Connection(_))
        ));

        let missing_keyspace = CassandraConfig {
            contact_points: Some("node1".into()),
            ..CassandraConfig::default()
        };
        assert!(matches!(
            missing_keyspace.validate(),
            Err(CassandraError::Connection(_))
        ));

        assert!(CassandraConfig::new("node1", "app").validate().is_ok());
    }

    #[test]
    fn validate_rejects_half_configured_credentials() {
        let mut config = CassandraConfig::new("node1", "app");
        config.username = Some("cassandra".into());
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Connection error: Cannot use username without a password and vice versa."
        );

        config.password = Some("cassandra".into());
        assert!(config.validate().is_ok());
    }
}
