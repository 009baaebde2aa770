//! Report assembly on top of the commission engine.
//!
//! Each module maps to one report surface: dashboard totals, agent
//! production, monthly fee series, the annual report, office rollups, and
//! the shared-operation widget. Everything is a pure function over operation
//! slices; the only I/O is loading `report.toml`.

pub mod agents;
pub mod annual;
pub mod config;
pub mod office;
pub mod series;
pub mod sharing;
pub mod totals;

pub use annual::{AnnualReport, Expense, MonthlyRow, TypeBreakdown, annual_report, type_counts};
pub use config::ReportConfig;
pub use office::{GlobalSummary, TypeSummary, global_summary, group_by_team, type_summaries};
pub use series::{cumulative_closed_fees, monthly_gross_fee_totals, open_fee_total};
pub use sharing::{SharedOperationCounts, shared_operation_counts};
pub use totals::{DashboardTotals, ExclusivityCount, dashboard_totals, exclusivity_count};
