mod line_item_list;
mod statement_summary;

pub use line_item_list::{LineItemDraft, LineItemList};
pub use statement_summary::StatementSummary;
