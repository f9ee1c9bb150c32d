pub mod app;
pub mod csv_loader;
pub mod logging;
pub mod models;
pub mod state;

pub use state::{FormError, StatementForm};
