//! Labelled statement breakdown and chart series.
//!
//! Both are derived from a [`CostingResult`] so the displayed figures can
//! never disagree with the computed result.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::format_amount;
use crate::calculations::costing::CostingResult;
use crate::{ChartPoint, CostingMethod, CostingTotals};

/// How a statement line relates to the lines above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOperator {
    /// A starting figure.
    Total,
    /// Subtracted from the running figure.
    Minus,
    /// The running figure after the preceding subtractions.
    Equals,
}

impl LineOperator {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Total => "",
            Self::Minus => "(-) ",
            Self::Equals => "(=) ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub operator: LineOperator,
    pub label: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl StatementLine {
    fn new(
        operator: LineOperator,
        label: &'static str,
        amount: Decimal,
    ) -> Self {
        Self {
            operator,
            label,
            amount,
        }
    }
}

impl fmt::Display for StatementLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}: {}",
            self.operator.prefix(),
            self.label,
            format_amount(self.amount)
        )
    }
}

/// Statement lines for `result`, top to bottom.
///
/// Direct costing yields revenue, variable costs, contribution margin, fixed
/// costs and net income. Absorption costing yields revenue, production costs
/// and gross profit.
pub fn statement_lines(
    totals: &CostingTotals,
    result: &CostingResult,
) -> Vec<StatementLine> {
    use LineOperator::{Equals, Minus, Total};

    match result.method {
        CostingMethod::Direct => vec![
            StatementLine::new(Total, "Total revenue", totals.total_sales),
            StatementLine::new(Minus, "Variable costs", totals.total_variable_costs),
            StatementLine::new(Equals, "Contribution margin", result.intermediate),
            StatementLine::new(Minus, "Fixed costs", totals.total_fixed_costs),
            StatementLine::new(Equals, "Net income", result.result),
        ],
        CostingMethod::Absorption => vec![
            StatementLine::new(Total, "Total revenue", totals.total_sales),
            StatementLine::new(Minus, "Production costs", result.intermediate),
            StatementLine::new(Equals, "Gross profit", result.result),
        ],
    }
}

/// Bar-chart series for `result`: one point per statement line.
pub fn chart_series(
    totals: &CostingTotals,
    result: &CostingResult,
) -> Vec<ChartPoint> {
    statement_lines(totals, result)
        .into_iter()
        .map(|line| ChartPoint {
            label: line.label,
            value: line.amount,
        })
        .collect()
}
