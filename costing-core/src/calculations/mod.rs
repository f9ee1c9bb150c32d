//! Income-statement calculations.
//!
//! Aggregation turns line items into section totals; the costing calculator
//! turns the three totals and a method into a result; the statement module
//! derives the labelled breakdown and chart series from that result.

pub mod aggregation;
pub mod common;
pub mod costing;
pub mod statement;

pub use aggregation::aggregate;
pub use costing::{CostingError, CostingResult, calculate, calculate_raw};
pub use statement::{LineOperator, StatementLine, chart_series, statement_lines};
