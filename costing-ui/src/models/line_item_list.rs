use costing_core::{LineItem, LineItemId, Section, aggregate};
use rust_decimal::Decimal;

use crate::state::FormError;

/// A row to be added to a form, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemDraft {
    pub section: Section,
    pub name: String,
    pub amount: String,
}

/// Ordered rows of one statement section.
///
/// Never empty once handed out by a form: the last row cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemList {
    section: Section,
    items: Vec<LineItem>,
}

impl LineItemList {
    pub(crate) fn new(
        section: Section,
        items: Vec<LineItem>,
    ) -> Self {
        Self { section, items }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the remove control for a row should be enabled.
    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    pub fn get(
        &self,
        id: LineItemId,
    ) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Section total; unusable amounts count as zero. `None` when the total
    /// does not fit in a decimal.
    pub fn total(&self) -> Option<Decimal> {
        aggregate(&self.items)
    }

    pub(crate) fn push(
        &mut self,
        item: LineItem,
    ) {
        self.items.push(item);
    }

    pub(crate) fn remove(
        &mut self,
        id: LineItemId,
    ) -> Result<LineItem, FormError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(FormError::UnknownItem {
                section: self.section,
                id,
            })?;

        if !self.can_remove() {
            return Err(FormError::LastItem {
                section: self.section,
            });
        }

        Ok(self.items.remove(position))
    }

    pub(crate) fn get_mut(
        &mut self,
        id: LineItemId,
    ) -> Result<&mut LineItem, FormError> {
        let section = self.section;
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(FormError::UnknownItem { section, id })
    }
}
