mod chart_point;
mod costing_method;
mod costing_totals;
mod line_item;
mod section;

pub use chart_point::ChartPoint;
pub use costing_method::{CostingMethod, UnknownMethod};
pub use costing_totals::{CostingTotals, TotalField};
pub use line_item::{LineItem, LineItemId};
pub use section::Section;
