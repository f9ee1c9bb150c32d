//! Costing calculator for direct and absorption income statements.
//!
//! | Method     | Intermediate                          | Result                          |
//! |------------|---------------------------------------|---------------------------------|
//! | Direct     | contribution margin = sales - variable | contribution margin - fixed     |
//! | Absorption | production cost = variable + fixed     | sales - production cost         |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use costing_core::{CostingMethod, CostingTotals, calculate};
//!
//! let totals = CostingTotals::new(dec!(1000), dec!(400), dec!(200));
//!
//! let direct = calculate(&totals, CostingMethod::Direct).unwrap();
//! assert_eq!(direct.intermediate, dec!(600));
//! assert_eq!(direct.result, dec!(400));
//!
//! let absorption = calculate(&totals, CostingMethod::Absorption).unwrap();
//! assert_eq!(absorption.intermediate, dec!(600));
//! assert_eq!(absorption.result, dec!(400));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::validation::RawCostingInput;
use crate::{CostingMethod, CostingTotals, TotalField};

/// Errors that stop a costing calculation. No partial result is ever
/// produced alongside one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CostingError {
    /// One or more numeric inputs are missing or not a finite number.
    #[error("invalid numeric fields: {}", join_fields(.fields))]
    InvalidInput { fields: Vec<TotalField> },

    /// The inputs are numbers, but they or a figure derived from them do not
    /// fit in a decimal.
    #[error("values out of range: {}", join_fields(.fields))]
    OutOfRange { fields: Vec<TotalField> },

    /// The method selector is not one of the recognised methods.
    #[error("invalid costing method '{0}'")]
    InvalidMethod(String),
}

impl CostingError {
    /// True for the numeric-input class of errors.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::OutOfRange { .. })
    }
}

fn join_fields(fields: &[TotalField]) -> String {
    fields
        .iter()
        .map(TotalField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a costing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostingResult {
    pub method: CostingMethod,

    /// Net income (direct) or gross profit (absorption). Negative for a loss.
    #[serde(with = "rust_decimal::serde::float")]
    pub result: Decimal,

    /// Contribution margin (direct) or total production cost (absorption).
    #[serde(with = "rust_decimal::serde::float")]
    pub intermediate: Decimal,
}

impl CostingResult {
    pub fn is_loss(&self) -> bool {
        self.result < Decimal::ZERO
    }
}

/// Applies `method` to `totals`.
///
/// # Errors
///
/// Returns [`CostingError::OutOfRange`] naming the totals a figure was
/// derived from when that figure does not fit in a decimal.
pub fn calculate(
    totals: &CostingTotals,
    method: CostingMethod,
) -> Result<CostingResult, CostingError> {
    use TotalField::{FixedCosts, Sales, VariableCosts};

    let out_of_range = |fields: &[TotalField]| CostingError::OutOfRange {
        fields: fields.to_vec(),
    };

    let (intermediate, result) = match method {
        CostingMethod::Direct => {
            let margin =
                contribution_margin(totals.total_sales, totals.total_variable_costs)
                    .ok_or_else(|| out_of_range(&[Sales, VariableCosts]))?;
            let net_income = margin
                .checked_sub(totals.total_fixed_costs)
                .ok_or_else(|| out_of_range(&[Sales, VariableCosts, FixedCosts]))?;
            (margin, net_income)
        }
        CostingMethod::Absorption => {
            let cost = production_cost(totals.total_variable_costs, totals.total_fixed_costs)
                .ok_or_else(|| out_of_range(&[VariableCosts, FixedCosts]))?;
            let gross_profit = totals
                .total_sales
                .checked_sub(cost)
                .ok_or_else(|| out_of_range(&[Sales, VariableCosts, FixedCosts]))?;
            (cost, gross_profit)
        }
    };

    debug!(%method, %intermediate, %result, "costing calculated");

    Ok(CostingResult {
        method,
        result,
        intermediate,
    })
}

/// Validates raw inputs and calculates.
///
/// # Errors
///
/// Returns [`CostingError::InvalidInput`], [`CostingError::OutOfRange`] or
/// [`CostingError::InvalidMethod`] from validation, or
/// [`CostingError::OutOfRange`] from [`calculate`].
pub fn calculate_raw(input: &RawCostingInput<'_>) -> Result<CostingResult, CostingError> {
    let (totals, method) = input.validate()?;
    calculate(&totals, method)
}

/// Sales minus variable costs.
fn contribution_margin(
    sales: Decimal,
    variable_costs: Decimal,
) -> Option<Decimal> {
    sales.checked_sub(variable_costs)
}

/// Variable plus fixed costs.
fn production_cost(
    variable_costs: Decimal,
    fixed_costs: Decimal,
) -> Option<Decimal> {
    variable_costs.checked_add(fixed_costs)
}
