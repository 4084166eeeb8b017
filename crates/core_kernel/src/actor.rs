//! Authenticated actors
//!
//! Every mutating operation in the system records who performed it. The
//! `Actor` value is built once at the authentication boundary and passed
//! explicitly into Claim Store and HITL Gate calls; there is no ambient
//! logged-in-user state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of actor performing a change
///
/// Serialized forms match the `role` column of the claim history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    /// Automated claim-processing agent
    #[serde(rename = "AI Agent")]
    AiAgent,
    /// Human reviewer working the HITL queue
    Reviewer,
    /// Regular dashboard user
    User,
    /// Administrator
    Admin,
}

impl ActorRole {
    /// Returns the role as recorded in history rows
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::AiAgent => "AI Agent",
            ActorRole::Reviewer => "Reviewer",
            ActorRole::User => "User",
            ActorRole::Admin => "Admin",
        }
    }

    /// Parses a role from its stored form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AI Agent" => Some(ActorRole::AiAgent),
            "Reviewer" => Some(ActorRole::Reviewer),
            "User" => Some(ActorRole::User),
            "Admin" => Some(ActorRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The identity behind a change: a name plus its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor name, recorded as `changed_by` (agent name or username)
    pub name: String,
    /// Actor kind, recorded as `role`
    pub role: ActorRole,
}

impl Actor {
    /// Creates an actor
    pub fn new(name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// The automated claim-processing agent identity
    pub fn ai_agent() -> Self {
        Self::new("claim_processing_agent", ActorRole::AiAgent)
    }

    /// A human reviewer identity
    pub fn reviewer(username: impl Into<String>) -> Self {
        Self::new(username, ActorRole::Reviewer)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_matches_history_column() {
        let json = serde_json::to_string(&ActorRole::AiAgent).unwrap();
        assert_eq!(json, "\"AI Agent\"");

        let back: ActorRole = serde_json::from_str("\"Reviewer\"").unwrap();
        assert_eq!(back, ActorRole::Reviewer);
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [
            ActorRole::AiAgent,
            ActorRole::Reviewer,
            ActorRole::User,
            ActorRole::Admin,
        ] {
            assert_eq!(ActorRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ActorRole::parse("Intruder"), None);
    }

    #[test]
    fn test_actor_constructors() {
        let agent = Actor::ai_agent();
        assert_eq!(agent.role, ActorRole::AiAgent);

        let reviewer = Actor::reviewer("mwilson");
        assert_eq!(reviewer.name, "mwilson");
        assert_eq!(reviewer.role, ActorRole::Reviewer);
    }
}
