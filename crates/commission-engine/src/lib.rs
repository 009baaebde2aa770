//! Commission computation and temporal aggregation for brokerage
//! operations.
//!
//! The pipeline runs reservation value through the fee percentage, the
//! discount chain, and the advisor split, then resolves what a given
//! participant earns. Calendar resolution decides which year and month an
//! operation counts toward, including the in-progress records that have no
//! settled date yet.

pub mod calendar;
pub mod discounts;
pub mod filters;
pub mod monthly;
pub mod net_fee;
pub mod operation;
pub mod participant;
pub mod profitability;
pub mod split;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use discounts::{Discounts, operation_gross, post_discount_gross};
pub use filters::{MonthFilter, StatusFilter, YearFilter, filter_operations, operations_in_year};
pub use monthly::monthly_side_percent_average;
pub use net_fee::net_fee;
pub use operation::{Operation, OperationStatus, OperationType, operations_from_json};
pub use participant::{AdvisorAssignment, Participant, UserRole};
pub use profitability::{OperationProfit, operation_profit, profit_for_operation};
pub use split::{FeeShares, allocate};
