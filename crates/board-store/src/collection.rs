//! Collection Names

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// The collections this deployment knows about.
///
/// Names are closed: anything else coming in over the wire is an
/// [`StoreError::UnknownCollection`], not a silently empty view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Operator configuration and flags.
    Admin,
    /// Agent conversation transcripts.
    AgentChat,
    /// Dashboard tiles and status documents.
    Dashboard,
    /// Generated reports.
    Reports,
    /// File change history entries.
    FileHistory,
    /// User records, including the plan-upgrade fields written by billing.
    Users,
}

impl Collection {
    /// Every collection, in the order stores initialize them.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::AgentChat,
        Self::Dashboard,
        Self::Reports,
        Self::FileHistory,
        Self::Users,
    ];

    /// Wire name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::AgentChat => "agentchat",
            Self::Dashboard => "dashboard",
            Self::Reports => "reports",
            Self::FileHistory => "filehistory",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "agentchat" => Ok(Self::AgentChat),
            "dashboard" => Ok(Self::Dashboard),
            "reports" => Ok(Self::Reports),
            "filehistory" => Ok(Self::FileHistory),
            "users" => Ok(Self::Users),
            other => Err(StoreError::UnknownCollection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), collection);
        }
    }

    #[test]
    fn test_unknown_collection_rejected() {
        let err = "invoices".parse::<Collection>().unwrap_err();
        assert!(matches!(err, StoreError::UnknownCollection(name) if name == "invoices"));
    }
}
