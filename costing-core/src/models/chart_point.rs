use rust_decimal::Decimal;
use serde::Serialize;

/// One named bar of the statement breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}
