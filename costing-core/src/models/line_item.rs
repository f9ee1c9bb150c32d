use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a line item within one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineItemId(pub u64);

impl fmt::Display for LineItemId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One editable row of a statement section.
///
/// `amount` is kept exactly as typed; it is only interpreted when the
/// section is aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub name: String,
    pub amount: String,
}

impl LineItem {
    /// A blank row, as created by "add item".
    pub fn empty(id: LineItemId) -> Self {
        Self {
            id,
            name: String::new(),
            amount: String::new(),
        }
    }

    pub fn new(
        id: LineItemId,
        name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount: amount.into(),
        }
    }
}
