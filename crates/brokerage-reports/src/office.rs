//! Office-level rollups across teams.

use std::collections::HashMap;

use commission_engine::discounts::operation_gross;
use commission_engine::net_fee::net_fee;
use commission_engine::operation::{Operation, OperationType};
use commission_engine::participant::Participant;

/// Bucket key for operations missing a team id.
const UNASSIGNED_TEAM: &str = "unassigned";

fn team_key(op: &Operation) -> &str {
    op.team_id.as_deref().filter(|s| !s.is_empty()).unwrap_or(UNASSIGNED_TEAM)
}

/// Group operations by team id.
pub fn group_by_team(ops: &[Operation]) -> HashMap<String, Vec<&Operation>> {
    let mut groups: HashMap<String, Vec<&Operation>> = HashMap::new();
    for op in ops {
        groups.entry(team_key(op).to_string()).or_default().push(op);
    }
    groups
}

/// One operation kind's rollup within a team.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub kind: OperationType,
    pub reservation_value: f64,
    /// Mean of buyer plus seller side percentages.
    pub average_side_percent: f64,
    /// Pipeline-recomputed gross fees.
    pub gross_fees: f64,
    /// Net fees resolved against the team's leader.
    pub net_fees: f64,
    /// Share of operations flagged exclusive.
    pub exclusive_percent: f64,
    pub operation_count: usize,
}

/// Rollups per operation kind present in one team's operations, sorted by
/// operation count descending.
pub fn type_summaries(ops: &[&Operation], leader: Option<&Participant>) -> Vec<TypeSummary> {
    let mut kinds: Vec<OperationType> = Vec::new();
    for op in ops {
        if !kinds.contains(&op.kind) {
            kinds.push(op.kind);
        }
    }

    let mut summaries: Vec<TypeSummary> = kinds
        .into_iter()
        .map(|kind| {
            let of_kind: Vec<&&Operation> = ops.iter().filter(|op| op.kind == kind).collect();
            let count = of_kind.len();

            let reservation_value: f64 = of_kind.iter().map(|op| op.reservation_value).sum();
            let side_total: f64 = of_kind.iter().map(|op| op.combined_side_percent()).sum();
            let gross_fees: f64 = of_kind.iter().map(|op| operation_gross(op)).sum();
            let net_fees: f64 = of_kind.iter().map(|op| net_fee(op, leader)).sum();
            let exclusive = of_kind.iter().filter(|op| op.exclusive == Some(true)).count();

            TypeSummary {
                kind,
                reservation_value,
                average_side_percent: side_total / count as f64,
                gross_fees,
                net_fees,
                exclusive_percent: exclusive as f64 / count as f64 * 100.0,
                operation_count: count,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.operation_count
            .cmp(&a.operation_count)
            .then_with(|| a.kind.to_string().cmp(&b.kind.to_string()))
    });
    summaries
}

/// Totals across every office.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalSummary {
    pub reservation_value: f64,
    /// Pipeline-recomputed gross fees.
    pub gross_fees: f64,
    /// Net fees, each operation resolved against its own team's leader.
    pub net_fees: f64,
    pub operation_count: usize,
    /// Distinct team ids, the unassigned bucket counting as one.
    pub office_count: usize,
}

/// Office-wide totals. `leaders` maps team id to that team's leader; an
/// operation whose team has no entry contributes zero net fees.
pub fn global_summary(ops: &[Operation], leaders: &HashMap<String, Participant>) -> GlobalSummary {
    let mut summary = GlobalSummary { operation_count: ops.len(), ..GlobalSummary::default() };

    for op in ops {
        summary.reservation_value += op.reservation_value;
        summary.gross_fees += operation_gross(op);
        summary.net_fees += net_fee(op, leaders.get(team_key(op)));
    }

    summary.office_count = group_by_team(ops).len();
    summary
}
