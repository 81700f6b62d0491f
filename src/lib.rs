//! Configuration-driven Cassandra connection adapter.
//!
//! Translates a flat configuration map into driver builder calls,
//! builds the cluster once, opens a single keyspace-bound session and
//! re-exposes the driver's `prepare` and `execute` on it. Connection
//! pooling, retries and load balancing all stay inside the wrapped
//! [scylla](https://crates.io/crates/scylla) driver; this crate only
//! does the plumbing.
//!
//! ```rust,no_run
//! use cassandra_bridge::{Cassandra, CassandraConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = CassandraConfig::new(["127.0.0.1", "10.0.0.7"], "app");
//!     config.connect_timeout = Some(5);
//!
//!     let cassandra = Cassandra::connect(config).await?;
//!
//!     let prepared = cassandra.prepare("SELECT * FROM users", None).await?;
//!     let rows = cassandra.execute(&prepared.into(), None).await?;
//!     # drop(rows);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod cluster;
pub mod config;
pub mod consistencies;
pub mod driver;
pub mod error;
pub mod session;
pub mod statement;

pub use adapter::Cassandra;
pub use cluster::{ScyllaCluster, ScyllaClusterBuilder};
pub use config::{CassandraConfig, Hosts, DEFAULT_PORT};
pub use consistencies::{Consistency, SerialConsistency};
pub use driver::{Cluster, ClusterBuilder, CqlSession};
pub use error::{CassandraError, CassandraResult};
pub use session::ScyllaSession;
pub use statement::{ExecutionOptions, PreparedStatement, Statement};
