use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three aggregate inputs of the costing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostingTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_variable_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_fixed_costs: Decimal,
}

impl CostingTotals {
    pub fn new(
        total_sales: Decimal,
        total_variable_costs: Decimal,
        total_fixed_costs: Decimal,
    ) -> Self {
        Self {
            total_sales,
            total_variable_costs,
            total_fixed_costs,
        }
    }
}

/// Names one of the three numeric inputs, for validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalField {
    Sales,
    VariableCosts,
    FixedCosts,
}

impl TotalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::VariableCosts => "variable_costs",
            Self::FixedCosts => "fixed_costs",
        }
    }
}

impl fmt::Display for TotalField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
