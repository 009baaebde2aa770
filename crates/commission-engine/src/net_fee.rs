//! Net fee resolution: what one participant actually earns on an operation.
//!
//! Team leaders keep the base left after advisor shares, plus any advisor
//! share for a slot they personally occupy. Advisors earn only the share of
//! the slot that names them. Profiles without a role earn like advisors.

use crate::discounts::operation_gross;
use crate::operation::Operation;
use crate::participant::{AdvisorAssignment, Participant, UserRole};
use crate::split::{FeeShares, allocate};

/// Net fee the given participant earns on this operation.
///
/// A missing participant profile resolves to zero so batch totals never
/// fail on an orphaned operation.
pub fn net_fee(op: &Operation, participant: Option<&Participant>) -> f64 {
    let Some(participant) = participant else {
        return 0.0;
    };

    let gross = operation_gross(op);
    let assignment = AdvisorAssignment::for_operation(op);
    let shares = allocate(
        gross,
        &assignment,
        op.primary_advisor_percent,
        op.additional_advisor_percent.unwrap_or(0.0),
    );

    match participant.role {
        UserRole::TeamLeader => team_leader_fee(&shares, &assignment, &participant.id),
        UserRole::Advisor | UserRole::Unspecified => {
            advisor_fee(&shares, &assignment, &participant.id)
        }
    }
}

fn slot_matches(assignment: &AdvisorAssignment, id: &str) -> (bool, bool) {
    match assignment {
        AdvisorAssignment::None => (false, false),
        AdvisorAssignment::Single { primary_id } => (primary_id == id, false),
        AdvisorAssignment::Dual { primary_id, additional_id } => {
            (primary_id == id, additional_id == id)
        }
    }
}

fn team_leader_fee(shares: &FeeShares, assignment: &AdvisorAssignment, id: &str) -> f64 {
    let (primary, additional) = slot_matches(assignment, id);
    let mut fee = shares.team_leader_base;
    if primary {
        fee += shares.primary_advisor;
    }
    if additional {
        fee += shares.additional_advisor;
    }
    fee
}

fn advisor_fee(shares: &FeeShares, assignment: &AdvisorAssignment, id: &str) -> f64 {
    let (primary, additional) = slot_matches(assignment, id);
    if primary {
        shares.primary_advisor
    } else if additional {
        shares.additional_advisor
    } else {
        0.0
    }
}
