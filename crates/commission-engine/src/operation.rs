//! Operation records as they arrive from the document store.
//!
//! Field values come from years of hand-entered data, so deserialization is
//! deliberately lenient: numbers may arrive as JSON numbers or numeric
//! strings, booleans as booleans or 0/1, and unknown operation types fold
//! into [`OperationType::Other`] instead of failing the whole batch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ── Status ──────────────────────────────────────────────────────────────

/// Lifecycle state of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    InProgress,
    Closed,
    Fallen,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationStatus::InProgress => "in_progress",
            OperationStatus::Closed => "closed",
            OperationStatus::Fallen => "fallen",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for OperationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" | "in progress" => Ok(OperationStatus::InProgress),
            "closed" => Ok(OperationStatus::Closed),
            "fallen" => Ok(OperationStatus::Fallen),
            _ => anyhow::bail!("Invalid operation status: {}", s),
        }
    }
}

// ── Operation type ──────────────────────────────────────────────────────

/// Business category of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Sale,
    Purchase,
    TraditionalRental,
    TemporaryRental,
    CommercialRental,
    PropertyDevelopment,
    Garage,
    GoingConcern,
    LandSubdivision,
    Other,
}

impl OperationType {
    /// Parse from stored text, folding anything unrecognized into `Other`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sale" => OperationType::Sale,
            "purchase" => OperationType::Purchase,
            "traditional_rental" | "traditional rental" => OperationType::TraditionalRental,
            "temporary_rental" | "temporary rental" => OperationType::TemporaryRental,
            "commercial_rental" | "commercial rental" => OperationType::CommercialRental,
            "property_development" | "property development" => OperationType::PropertyDevelopment,
            "garage" => OperationType::Garage,
            "going_concern" | "going concern" => OperationType::GoingConcern,
            "land_subdivision" | "land subdivision" => OperationType::LandSubdivision,
            _ => OperationType::Other,
        }
    }

    pub fn is_rental(&self) -> bool {
        matches!(
            self,
            OperationType::TraditionalRental
                | OperationType::TemporaryRental
                | OperationType::CommercialRental
        )
    }

    /// Sale-like types carry a meaningful reservation value for averages.
    pub fn is_sale_like(&self) -> bool {
        matches!(
            self,
            OperationType::Sale | OperationType::Purchase | OperationType::PropertyDevelopment
        )
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationType::Sale => "sale",
            OperationType::Purchase => "purchase",
            OperationType::TraditionalRental => "traditional_rental",
            OperationType::TemporaryRental => "temporary_rental",
            OperationType::CommercialRental => "commercial_rental",
            OperationType::PropertyDevelopment => "property_development",
            OperationType::Garage => "garage",
            OperationType::GoingConcern => "going_concern",
            OperationType::LandSubdivision => "land_subdivision",
            OperationType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

// ── Operation record ────────────────────────────────────────────────────

/// One brokerage operation document.
///
/// Monetary fields default to 0.0 when absent so a record missing half its
/// fields still aggregates as zero instead of poisoning report totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub id: Option<String>,

    /// Advisor holding the primary assignment slot.
    #[serde(default)]
    pub primary_advisor_id: Option<String>,
    /// Second advisor on shared operations.
    #[serde(default)]
    pub additional_advisor_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,

    // Dates stay as stored text ("YYYY-MM-DD" when well-formed). Parsing is
    // deferred to the calendar module so a garbage date degrades to "no
    // period" rather than a load failure.
    #[serde(default)]
    pub operation_date: Option<String>,
    #[serde(default)]
    pub reservation_date: Option<String>,
    #[serde(default)]
    pub capture_date: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub reservation_value: f64,
    /// Whole-number percentage of the reservation value billed as fee.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gross_fee_percent: f64,
    /// Primary advisor's cut of the allocation pool, whole-number percent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub primary_advisor_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub additional_advisor_percent: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub buyer_side_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub seller_side_percent: f64,

    // Stored fee figures written back at close time. Reports that trust the
    // ledger read these; recomputing flows ignore them.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gross_fee: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub advisor_fee: f64,

    /// Fraction (0.0..=1.0) of the fee ceded to a sharing brokerage.
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub shared_percent: Option<f64>,
    /// Whole-number percent ceded to a referring party.
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub referred_percent: Option<f64>,
    /// Whole-number percent taken by the franchise.
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub franchise_discount_percent: Option<f64>,
    /// Whole-number percent for an internal office split.
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub internal_split_percent: Option<f64>,

    /// Expenses attributed to this operation, in local currency.
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub assigned_expenses: Option<f64>,

    pub status: OperationStatus,
    #[serde(default = "default_kind", deserialize_with = "kind_lossy")]
    pub kind: OperationType,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub buyer_side: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub seller_side: bool,

    // Tri-state: some records carry neither flag and stay unclassified.
    #[serde(default, deserialize_with = "exclusivity_flag")]
    pub exclusive: Option<bool>,
    #[serde(default, deserialize_with = "exclusivity_flag")]
    pub non_exclusive: Option<bool>,
}

impl Operation {
    /// Buyer plus seller side percentages, the "sides" weight of the deal.
    pub fn combined_side_percent(&self) -> f64 {
        self.buyer_side_percent + self.seller_side_percent
    }

    /// Primary advisor id, treating empty strings as unassigned.
    pub fn primary_advisor(&self) -> Option<&str> {
        self.primary_advisor_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Additional advisor id, treating empty strings as unassigned.
    pub fn additional_advisor(&self) -> Option<&str> {
        self.additional_advisor_id.as_deref().filter(|s| !s.is_empty())
    }

    /// True when two different advisors hold the two assignment slots.
    pub fn has_distinct_advisors(&self) -> bool {
        match (self.primary_advisor(), self.additional_advisor()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }
}

fn default_kind() -> OperationType {
    OperationType::Other
}

// ── Lenient field deserializers ─────────────────────────────────────────

/// A numeric field as it may appear in stored documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
}

impl RawNumber {
    fn coerce(self) -> Option<f64> {
        match self {
            RawNumber::Num(n) if n.is_finite() => Some(n),
            RawNumber::Num(_) => None,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = Option::<RawNumber>::deserialize(d)?;
    Ok(raw.and_then(RawNumber::coerce).unwrap_or(0.0))
}

fn lenient_f64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<RawNumber>::deserialize(d)?;
    Ok(raw.and_then(RawNumber::coerce))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Bit(f64),
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = Option::<RawFlag>::deserialize(d)?;
    Ok(match raw {
        Some(RawFlag::Flag(b)) => b,
        Some(RawFlag::Bit(n)) => n != 0.0,
        None => false,
    })
}

/// Exclusivity flags keep their absent state; a stray string counts as unset.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExclusivity {
    Flag(bool),
    Text(String),
}

fn exclusivity_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let raw = Option::<RawExclusivity>::deserialize(d)?;
    Ok(match raw {
        Some(RawExclusivity::Flag(b)) => Some(b),
        _ => None,
    })
}

fn kind_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<OperationType, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(match raw {
        Some(s) => OperationType::from_str_lossy(&s),
        None => OperationType::Other,
    })
}

/// Parse a JSON array of operation documents.
pub fn operations_from_json(json: &str) -> anyhow::Result<Vec<Operation>> {
    use anyhow::Context;
    serde_json::from_str(json).context("Failed to parse operation documents")
}

// ── Tests ───────────────────────────────────────────────────────────────
