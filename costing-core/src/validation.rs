//! Strict validation of raw costing inputs.
//!
//! Unlike section aggregation, which silently counts unusable amounts as
//! zero, pre-summed totals must all parse or the request is rejected.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::CostingError;
use crate::calculations::common::{AmountError, read_amount};
use crate::{CostingMethod, CostingTotals, TotalField};

/// Unparsed inputs as received from a client. `None` means the field was
/// absent or not something that can be read as text (e.g. `null`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawCostingInput<'a> {
    pub sales: Option<&'a str>,
    pub variable_costs: Option<&'a str>,
    pub fixed_costs: Option<&'a str>,
    pub method: Option<&'a str>,
}

impl RawCostingInput<'_> {
    /// Parses the three totals, then the method.
    ///
    /// # Errors
    ///
    /// - [`CostingError::InvalidInput`] listing every numeric field that is
    ///   missing or unparsable. Checked first.
    /// - [`CostingError::OutOfRange`] listing every finite field too large
    ///   for a decimal.
    /// - [`CostingError::InvalidMethod`] when the method is missing or not a
    ///   recognised wire name.
    pub fn validate(&self) -> Result<(CostingTotals, CostingMethod), CostingError> {
        let mut invalid = Vec::new();
        let mut out_of_range = Vec::new();
        let mut field = |name: TotalField, raw: Option<&str>| -> Decimal {
            match raw.map(read_amount) {
                Some(Ok(value)) => value,
                Some(Err(AmountError::OutOfRange)) => {
                    out_of_range.push(name);
                    Decimal::ZERO
                }
                Some(Err(AmountError::Invalid)) | None => {
                    invalid.push(name);
                    Decimal::ZERO
                }
            }
        };

        let totals = CostingTotals {
            total_sales: field(TotalField::Sales, self.sales),
            total_variable_costs: field(TotalField::VariableCosts, self.variable_costs),
            total_fixed_costs: field(TotalField::FixedCosts, self.fixed_costs),
        };

        if !invalid.is_empty() {
            debug!(fields = ?invalid, "rejected costing input");
            return Err(CostingError::InvalidInput { fields: invalid });
        }
        if !out_of_range.is_empty() {
            debug!(fields = ?out_of_range, "costing input out of range");
            return Err(CostingError::OutOfRange {
                fields: out_of_range,
            });
        }

        let method = self.method.and_then(CostingMethod::parse).ok_or_else(|| {
            CostingError::InvalidMethod(self.method.unwrap_or_default().to_string())
        })?;

        Ok((totals, method))
    }
}
