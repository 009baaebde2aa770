//! Per-operation profitability: gross fee against assigned expenses.

use crate::discounts::operation_gross;
use crate::operation::Operation;

/// Profit figures for one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationProfit {
    pub gross_fee: f64,
    pub assigned_expenses: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of the gross fee, 0 when there is no fee.
    pub profitability_percent: f64,
}

/// Profit on a gross fee after assigned expenses. Missing expenses count
/// as zero, which reads as fully profitable.
pub fn operation_profit(gross_fee: f64, assigned_expenses: Option<f64>) -> OperationProfit {
    let assigned = assigned_expenses.unwrap_or(0.0);
    let net = gross_fee - assigned;
    let percent = if gross_fee == 0.0 { 0.0 } else { (net / gross_fee) * 100.0 };
    OperationProfit {
        gross_fee,
        assigned_expenses: assigned,
        net_profit: net,
        profitability_percent: percent,
    }
}

/// Profitability of an operation record, gross computed through the
/// discount chain.
pub fn profit_for_operation(op: &Operation) -> OperationProfit {
    operation_profit(operation_gross(op), op.assigned_expenses)
}

/// Render a profitability percentage for display, two decimals.
pub fn format_profitability_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expenses_reduce_the_fee() {
        let profit = operation_profit(3000.0, Some(500.0));
        assert_eq!(profit.net_profit, 2500.0);
        assert!((profit.profitability_percent - 83.33333333333334).abs() < 1e-9);
    }

    #[test]
    fn expenses_above_the_fee_go_negative() {
        let profit = operation_profit(300.0, Some(400.0));
        assert_eq!(profit.net_profit, -100.0);
        assert!((profit.profitability_percent - (-33.33333333333333)).abs() < 1e-9);
    }

    #[test]
    fn round_figures() {
        assert_eq!(operation_profit(2500.0, Some(200.0)).profitability_percent, 92.0);
        let p = operation_profit(2700.0, Some(100.0)).profitability_percent;
        assert!((p - 96.29629629629629).abs() < 1e-9);
    }

    #[test]
    fn missing_expenses_read_as_fully_profitable() {
        let profit = operation_profit(3000.0, None);
        assert_eq!(profit.assigned_expenses, 0.0);
        assert_eq!(profit.profitability_percent, 100.0);
    }

    #[test]
    fn zero_fee_reports_zero_percent() {
        let profit = operation_profit(0.0, Some(500.0));
        assert_eq!(profit.profitability_percent, 0.0);
        assert_eq!(profit.net_profit, -500.0);
    }

    #[test]
    fn record_profit_runs_the_discount_chain() {
        let op: Operation = serde_json::from_value(json!({
            "status": "closed",
            "reservation_value": 100000,
            "gross_fee_percent": 3,
            "referred_percent": 10,
            "assigned_expenses": 100,
        }))
        .unwrap();
        let profit = profit_for_operation(&op);
        assert_eq!(profit.gross_fee, 2700.0);
        assert_eq!(profit.net_profit, 2600.0);
    }

    #[test]
    fn percent_formats_with_two_decimals() {
        assert_eq!(format_profitability_percent(83.33333333333334), "83.33%");
        assert_eq!(format_profitability_percent(-33.33333333333333), "-33.33%");
        assert_eq!(format_profitability_percent(100.0), "100.00%");
    }
}
