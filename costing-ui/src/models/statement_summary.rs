use std::fmt;

use costing_core::calculations::{StatementLine, chart_series, statement_lines};
use costing_core::{ChartPoint, CostingResult, CostingTotals};
use serde::Serialize;

/// Everything shown after a successful submission: the totals it was based
/// on, the calculator output, and the derived statement and chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSummary {
    pub totals: CostingTotals,
    pub result: CostingResult,
    pub lines: Vec<StatementLine>,
    pub chart: Vec<ChartPoint>,
}

impl StatementSummary {
    pub fn new(
        totals: CostingTotals,
        result: CostingResult,
    ) -> Self {
        Self {
            lines: statement_lines(&totals, &result),
            chart: chart_series(&totals, &result),
            totals,
            result,
        }
    }
}

impl fmt::Display for StatementSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Income statement ({})", self.result.method.label())?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
