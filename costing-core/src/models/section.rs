use serde::{Deserialize, Serialize};

/// The three line-item groups of an income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Revenue,
    VariableCosts,
    FixedCosts,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[Section::Revenue, Section::VariableCosts, Section::FixedCosts]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::VariableCosts => "Variable costs",
            Self::FixedCosts => "Fixed costs",
        }
    }

    /// Accepts the names used in line-item files: `revenue`, `variable`,
    /// `variable_costs`, `fixed`, `fixed_costs`. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" => Some(Self::Revenue),
            "variable" | "variable_costs" => Some(Self::VariableCosts),
            "fixed" | "fixed_costs" => Some(Self::FixedCosts),
            _ => None,
        }
    }
}
