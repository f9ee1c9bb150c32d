pub mod costing;
pub mod health;
