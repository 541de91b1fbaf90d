//! Plan Tiers and the Plan-Upgrade Record

use board_store::Fields;
use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Team,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Team => "team",
        }
    }

    /// Command quota included in the tier.
    pub fn commands_limit(&self) -> u32 {
        match self {
            Plan::Free => 25,
            Plan::Team => 1000,
        }
    }
}

/// The record merged into a user's document when a paid checkout
/// completes.
///
/// Merged, never written whole: fields the user document already carries
/// and this record does not name stay untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanUpgrade {
    pub plan: Plan,
    pub commands_limit: u32,
}

impl PlanUpgrade {
    /// The team-tier upgrade applied on checkout completion.
    pub fn team() -> Self {
        Self {
            plan: Plan::Team,
            commands_limit: Plan::Team.commands_limit(),
        }
    }

    /// Field mapping to merge into the user's document.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("plan".into(), self.plan.as_str().into());
        fields.insert("commands_limit".into(), self.commands_limit.into());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Plan::Team).unwrap(), "team");
        assert_eq!(serde_json::to_value(Plan::Free).unwrap(), "free");
    }

    #[test]
    fn test_team_upgrade_fields() {
        let fields = PlanUpgrade::team().to_fields();
        assert_eq!(fields["plan"], "team");
        assert_eq!(fields["commands_limit"], 1000);
        assert_eq!(fields.len(), 2);
    }
}
