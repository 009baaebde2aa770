//! Gross fee computation: headline fee minus the discount chain.
//!
//! Order matters. The sharing deduction is a percentage of the reservation
//! value itself, while referral, franchise, and internal split each shave a
//! percentage off the running gross, applied in that sequence.

use crate::operation::Operation;

/// Discount percentages attached to an operation. `None` means the
/// deduction does not apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Discounts {
    /// Percent of the reservation value ceded to a sharing brokerage.
    pub shared_percent: Option<f64>,
    /// Percent of the running gross ceded to a referring party.
    pub referred_percent: Option<f64>,
    /// Percent of the running gross taken by the franchise.
    pub franchise_percent: Option<f64>,
    /// Percent of the running gross for an internal office split.
    pub internal_split_percent: Option<f64>,
}

impl Discounts {
    pub fn from_operation(op: &Operation) -> Self {
        Discounts {
            shared_percent: op.shared_percent,
            referred_percent: op.referred_percent,
            franchise_percent: op.franchise_discount_percent,
            internal_split_percent: op.internal_split_percent,
        }
    }
}

/// Fee left for the brokerage after the full discount chain.
///
/// The result is not floored at zero: a data-entry error that discounts past
/// 100% should surface as a negative figure, not vanish.
pub fn post_discount_gross(
    reservation_value: f64,
    gross_fee_percent: f64,
    discounts: &Discounts,
) -> f64 {
    let mut gross = reservation_value * (gross_fee_percent / 100.0);

    if let Some(shared) = discounts.shared_percent {
        gross -= reservation_value * (shared / 100.0);
    }
    if let Some(referred) = discounts.referred_percent {
        gross -= gross * (referred / 100.0);
    }
    if let Some(franchise) = discounts.franchise_percent {
        gross -= gross * (franchise / 100.0);
    }
    if let Some(split) = discounts.internal_split_percent {
        gross -= gross * (split / 100.0);
    }

    gross
}

/// Post-discount gross for an operation record.
pub fn operation_gross(op: &Operation) -> f64 {
    post_discount_gross(op.reservation_value, op.gross_fee_percent, &Discounts::from_operation(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gross(value: f64, percent: f64, discounts: Discounts) -> f64 {
        post_discount_gross(value, percent, &discounts)
    }

    #[test]
    fn headline_fee_without_discounts() {
        assert_eq!(gross(100_000.0, 3.0, Discounts::default()), 3000.0);
        assert_eq!(gross(165_000.0, 6.0, Discounts::default()), 9900.0);
    }

    #[test]
    fn zero_value_or_zero_percent_yields_zero() {
        assert_eq!(gross(0.0, 3.0, Discounts::default()), 0.0);
        assert_eq!(gross(100_000.0, 0.0, Discounts::default()), 0.0);

        // A referral discount of nothing is still nothing.
        let d = Discounts { referred_percent: Some(10.0), ..Discounts::default() };
        assert_eq!(gross(0.0, 3.0, d), 0.0);
    }

    #[test]
    fn sharing_deducts_from_reservation_value() {
        let d = Discounts { shared_percent: Some(0.5), ..Discounts::default() };
        assert_eq!(gross(100_000.0, 3.0, d), 2500.0);
    }

    #[test]
    fn referral_deducts_from_running_gross() {
        let d = Discounts { referred_percent: Some(10.0), ..Discounts::default() };
        assert_eq!(gross(100_000.0, 3.0, d), 2700.0);
    }

    #[test]
    fn sharing_then_referral_compound() {
        let d = Discounts {
            shared_percent: Some(0.5),
            referred_percent: Some(10.0),
            ..Discounts::default()
        };
        assert_eq!(gross(100_000.0, 3.0, d), 2250.0);
    }

    #[test]
    fn franchise_applies_to_running_gross() {
        let d = Discounts { franchise_percent: Some(20.0), ..Discounts::default() };
        assert_eq!(gross(100_000.0, 3.0, d), 2400.0);
    }

    #[test]
    fn internal_split_applies_to_running_gross() {
        let d = Discounts { internal_split_percent: Some(10.0), ..Discounts::default() };
        assert_eq!(gross(100_000.0, 3.0, d), 2700.0);
    }

    #[test]
    fn over_discounting_goes_negative() {
        let d = Discounts { shared_percent: Some(4.0), ..Discounts::default() };
        assert_eq!(gross(100_000.0, 3.0, d), -1000.0);
    }

    #[test]
    fn operation_gross_reads_record_fields() {
        let op: Operation = serde_json::from_value(json!({
            "status": "closed",
            "reservation_value": 100000,
            "gross_fee_percent": 3,
            "referred_percent": 10,
        }))
        .unwrap();
        assert_eq!(operation_gross(&op), 2700.0);
    }
}
