//! Splitting a post-discount gross fee between the team leader's base and
//! the advisor slots.
//!
//! With two advisors the operation's fee pool is halved before either
//! advisor's percentage applies, so a 50/50 dual split pays each advisor a
//! quarter of the gross.

use crate::participant::AdvisorAssignment;

/// Absolute fee amounts carved out of one operation's gross.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeShares {
    /// What remains for the team leader after advisor shares.
    pub team_leader_base: f64,
    pub primary_advisor: f64,
    pub additional_advisor: f64,
}

/// Allocate a gross fee across the filled advisor slots.
///
/// Percentages are whole numbers (50 means half). Nothing is clamped; a
/// percentage over 100 drives the team leader base negative, which the
/// ledger should surface rather than hide.
pub fn allocate(
    gross: f64,
    assignment: &AdvisorAssignment,
    primary_percent: f64,
    additional_percent: f64,
) -> FeeShares {
    match assignment {
        AdvisorAssignment::None => FeeShares { team_leader_base: gross, ..FeeShares::default() },
        AdvisorAssignment::Single { .. } => {
            let primary = gross * (primary_percent / 100.0);
            FeeShares {
                team_leader_base: gross - primary,
                primary_advisor: primary,
                additional_advisor: 0.0,
            }
        }
        AdvisorAssignment::Dual { .. } => {
            let pool = gross * 0.5;
            let primary = pool * (primary_percent / 100.0);
            let additional = pool * (additional_percent / 100.0);
            FeeShares {
                team_leader_base: gross - primary - additional,
                primary_advisor: primary,
                additional_advisor: additional,
            }
        }
    }
}
