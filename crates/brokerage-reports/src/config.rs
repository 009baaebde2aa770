//! Report configuration loaded from report.toml.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Objectives and replay settings for report assembly.
///
/// Every field is optional in the file; a missing file section simply means
/// no objective was set and percentages against it read as zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Flat yearly fee objective, used when no per-year entry applies.
    #[serde(default)]
    pub annual_objective: f64,
    /// Per-year objective overrides, keyed by year ("2024").
    #[serde(default)]
    pub objectives: HashMap<String, f64>,
    /// Pin in-progress operations to this year instead of the clock's.
    #[serde(default)]
    pub effective_year: Option<i32>,
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse report config")
    }

    /// Objective for a given year. A per-year entry wins unless it is zero,
    /// in which case the flat objective applies; zero means no target set.
    pub fn objective_for(&self, year: i32) -> f64 {
        match self.objectives.get(&year.to_string()) {
            Some(&objective) if objective != 0.0 => objective,
            _ => self.annual_objective,
        }
    }
}
