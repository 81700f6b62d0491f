use serde::{Deserialize, Serialize};

/// Consistency levels for queries.
///
/// Configuration files and execution options spell these the way CQL
/// does (`QUORUM`, `LOCAL_ONE`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consistency {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    LocalOne,
    Serial,
    LocalSerial,
}

/// Serial consistency levels for lightweight transactions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SerialConsistency {
    Serial,
    LocalSerial,
}

/// Here we define how to convert our Consistency,
/// to the type that is used by the scylla library.
impl From<Consistency> for scylla::statement::Consistency {
    fn from(value: Consistency) -> Self {
        match value {
            Consistency::Any => Self::Any,
            Consistency::One => Self::One,
            Consistency::Two => Self::Two,
            Consistency::Three => Self::Three,
            Consistency::Quorum => Self::Quorum,
            Consistency::All => Self::All,
            Consistency::LocalQuorum => Self::LocalQuorum,
            Consistency::EachQuorum => Self::EachQuorum,
            Consistency::LocalOne => Self::LocalOne,
            Consistency::Serial => Self::Serial,
            Consistency::LocalSerial => Self::LocalSerial,
        }
    }
}

/// Convertion between config serial consistency
/// and scylla serial consistency.
impl From<SerialConsistency> for scylla::statement::SerialConsistency {
    fn from(value: SerialConsistency) -> Self {
        match value {
            SerialConsistency::Serial => Self::Serial,
            SerialConsistency::LocalSerial => Self::LocalSerial,
        }
    }
}
