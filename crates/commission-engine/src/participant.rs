//! People on the fee side of an operation: profile roles and which advisor
//! slots an operation actually has filled.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::operation::Operation;

// ── Roles ───────────────────────────────────────────────────────────────

/// Role attached to a user profile.
///
/// Profiles predating the role field deserialize as `Unspecified`, which
/// the fee resolver treats exactly like `Advisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    TeamLeader,
    Advisor,
    Unspecified,
}

impl UserRole {
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "team_leader" | "team leader" => UserRole::TeamLeader,
            "advisor" => UserRole::Advisor,
            _ => UserRole::Unspecified,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::TeamLeader => "team_leader",
            UserRole::Advisor => "advisor",
            UserRole::Unspecified => "unspecified",
        };
        write!(f, "{}", s)
    }
}

/// A user profile, reduced to what fee resolution needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default = "default_role", deserialize_with = "role_lossy")]
    pub role: UserRole,
}

impl Participant {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Participant { id: id.into(), role }
    }
}

fn default_role() -> UserRole {
    UserRole::Unspecified
}

fn role_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<UserRole, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(match raw {
        Some(s) => UserRole::from_str_lossy(&s),
        None => UserRole::Unspecified,
    })
}

// ── Advisor assignment ──────────────────────────────────────────────────

/// Which advisor slots an operation has filled, resolved once up front so
/// fee allocation never re-inspects raw slot fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorAssignment {
    /// No advisor on the operation; the team leader keeps the whole fee.
    None,
    Single { primary_id: String },
    Dual { primary_id: String, additional_id: String },
}

impl AdvisorAssignment {
    /// Classify an operation's advisor slots.
    ///
    /// An additional advisor with an empty primary slot still counts as a
    /// single assignment; legacy records were entered both ways.
    pub fn for_operation(op: &Operation) -> Self {
        match (op.primary_advisor(), op.additional_advisor()) {
            (None, None) => AdvisorAssignment::None,
            (Some(primary), None) => AdvisorAssignment::Single { primary_id: primary.to_string() },
            (None, Some(additional)) => {
                AdvisorAssignment::Single { primary_id: additional.to_string() }
            }
            (Some(primary), Some(additional)) => AdvisorAssignment::Dual {
                primary_id: primary.to_string(),
                additional_id: additional.to_string(),
            },
        }
    }
}
