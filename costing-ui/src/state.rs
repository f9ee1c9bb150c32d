//! Form state for one income-statement session.
//!
//! Holds the editable rows of each section and the selected method, and the
//! summary of the last successful submission. State is owned by a single
//! view; nothing here is shared or persisted.

use costing_core::{
    ChartPoint, CostingError, CostingMethod, CostingTotals, LineItem, LineItemId, Section,
    TotalField, calculate,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{LineItemDraft, LineItemList, StatementSummary};

/// Inline message shown when the totals cannot be calculated.
pub const INVALID_AMOUNTS_MESSAGE: &str = "Check that all amounts are numeric values.";

/// Errors from editing rows. State is left untouched when one is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no line item {id} in {}", .section.label())]
    UnknownItem { section: Section, id: LineItemId },

    #[error("{} must keep at least one line item", .section.label())]
    LastItem { section: Section },
}

#[derive(Debug, Clone)]
pub struct StatementForm {
    revenue: LineItemList,
    variable_costs: LineItemList,
    fixed_costs: LineItemList,
    method: CostingMethod,
    next_id: u64,
    summary: Option<StatementSummary>,
    error: Option<String>,
}

impl Default for StatementForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementForm {
    /// One blank row per section, direct costing selected.
    pub fn new() -> Self {
        Self::from_items(std::iter::empty())
    }

    /// Builds a form from imported rows, keeping file order within each
    /// section. Sections without rows get one blank row.
    pub fn from_items(drafts: impl IntoIterator<Item = LineItemDraft>) -> Self {
        let mut form = Self {
            revenue: LineItemList::new(Section::Revenue, Vec::new()),
            variable_costs: LineItemList::new(Section::VariableCosts, Vec::new()),
            fixed_costs: LineItemList::new(Section::FixedCosts, Vec::new()),
            method: CostingMethod::default(),
            next_id: 0,
            summary: None,
            error: None,
        };

        for draft in drafts {
            let id = form.allocate_id();
            form.section_mut(draft.section)
                .push(LineItem::new(id, draft.name, draft.amount));
        }

        for section in Section::all() {
            if form.section(*section).is_empty() {
                form.add_item(*section);
            }
        }

        form
    }

    pub fn section(
        &self,
        section: Section,
    ) -> &LineItemList {
        match section {
            Section::Revenue => &self.revenue,
            Section::VariableCosts => &self.variable_costs,
            Section::FixedCosts => &self.fixed_costs,
        }
    }

    fn section_mut(
        &mut self,
        section: Section,
    ) -> &mut LineItemList {
        match section {
            Section::Revenue => &mut self.revenue,
            Section::VariableCosts => &mut self.variable_costs,
            Section::FixedCosts => &mut self.fixed_costs,
        }
    }

    fn allocate_id(&mut self) -> LineItemId {
        let id = LineItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a blank row to `section` and returns its id.
    pub fn add_item(
        &mut self,
        section: Section,
    ) -> LineItemId {
        let id = self.allocate_id();
        self.section_mut(section).push(LineItem::empty(id));
        debug!(section = section.label(), %id, "line item added");
        id
    }

    /// Removes a row. The last row of a section cannot be removed.
    pub fn remove_item(
        &mut self,
        section: Section,
        id: LineItemId,
    ) -> Result<(), FormError> {
        self.section_mut(section).remove(id)?;
        debug!(section = section.label(), %id, "line item removed");
        Ok(())
    }

    pub fn update_name(
        &mut self,
        section: Section,
        id: LineItemId,
        name: impl Into<String>,
    ) -> Result<(), FormError> {
        self.section_mut(section).get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Stores the amount exactly as typed; it is interpreted on aggregation.
    pub fn update_amount(
        &mut self,
        section: Section,
        id: LineItemId,
        amount: impl Into<String>,
    ) -> Result<(), FormError> {
        self.section_mut(section).get_mut(id)?.amount = amount.into();
        Ok(())
    }

    pub fn method(&self) -> CostingMethod {
        self.method
    }

    pub fn set_method(
        &mut self,
        method: CostingMethod,
    ) {
        self.method = method;
    }

    /// `None` when the section's amounts add up to more than a decimal holds.
    pub fn section_total(
        &self,
        section: Section,
    ) -> Option<Decimal> {
        self.section(section).total()
    }

    /// Current totals of the three sections.
    ///
    /// # Errors
    ///
    /// [`CostingError::OutOfRange`] naming every section whose total does not
    /// fit in a decimal.
    pub fn totals(&self) -> Result<CostingTotals, CostingError> {
        let mut out_of_range = Vec::new();
        let mut total = |section: Section, field: TotalField| {
            self.section_total(section).unwrap_or_else(|| {
                out_of_range.push(field);
                Decimal::ZERO
            })
        };

        let totals = CostingTotals::new(
            total(Section::Revenue, TotalField::Sales),
            total(Section::VariableCosts, TotalField::VariableCosts),
            total(Section::FixedCosts, TotalField::FixedCosts),
        );

        if out_of_range.is_empty() {
            Ok(totals)
        } else {
            Err(CostingError::OutOfRange {
                fields: out_of_range,
            })
        }
    }

    /// Calculates the statement for the current rows and method.
    ///
    /// On success the summary replaces the previous one and any inline error
    /// is cleared. On failure the inline error is set and the previous
    /// summary is kept.
    pub fn submit(&mut self) -> Result<&StatementSummary, CostingError> {
        let calculated = self
            .totals()
            .and_then(|totals| Ok((totals, calculate(&totals, self.method)?)));

        match calculated {
            Ok((totals, result)) => {
                self.error = None;
                Ok(&*self.summary.insert(StatementSummary::new(totals, result)))
            }
            Err(error) => {
                warn!(%error, "statement submission rejected");
                self.error = Some(INVALID_AMOUNTS_MESSAGE.to_string());
                Err(error)
            }
        }
    }

    pub fn summary(&self) -> Option<&StatementSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Chart series of the last successful submission; empty before one.
    pub fn chart_series(&self) -> &[ChartPoint] {
        self.summary
            .as_ref()
            .map(|summary| summary.chart.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn first_id(
        form: &StatementForm,
        section: Section,
    ) -> LineItemId {
        form.section(section).items()[0].id
    }

    fn fill(
        form: &mut StatementForm,
        section: Section,
        amounts: &[&str],
    ) {
        let first = first_id(form, section);
        for (idx, amount) in amounts.iter().enumerate() {
            let id = if idx == 0 {
                first
            } else {
                form.add_item(section)
            };
            form.update_amount(section, id, *amount).unwrap();
        }
    }

    // =========================================================================
    // row editing
    // =========================================================================

    #[test]
    fn new_form_has_one_blank_row_per_section() {
        let form = StatementForm::new();

        for section in Section::all() {
            let list = form.section(*section);
            assert_eq!(list.len(), 1);
            assert_eq!(list.items()[0].name, "");
            assert_eq!(list.items()[0].amount, "");
            assert!(!list.can_remove());
        }
        assert_eq!(form.method(), CostingMethod::Direct);
        assert!(form.summary().is_none());
    }

    #[test]
    fn row_ids_are_unique_across_sections() {
        let mut form = StatementForm::new();
        let a = form.add_item(Section::Revenue);
        let b = form.add_item(Section::FixedCosts);

        let mut ids: Vec<LineItemId> = Section::all()
            .iter()
            .flat_map(|s| form.section(*s).items().iter().map(|item| item.id))
            .collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 5);
        assert_ne!(a, b);
    }

    #[test]
    fn add_item_appends_blank_row() {
        let mut form = StatementForm::new();

        let id = form.add_item(Section::VariableCosts);

        let list = form.section(Section::VariableCosts);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[1], LineItem::empty(id));
    }

    #[test]
    fn remove_item_deletes_only_that_row() {
        let mut form = StatementForm::new();
        let keep = first_id(&form, Section::Revenue);
        let drop = form.add_item(Section::Revenue);

        form.remove_item(Section::Revenue, drop).unwrap();

        let list = form.section(Section::Revenue);
        assert_eq!(list.len(), 1);
        assert!(list.get(keep).is_some());
        assert!(list.get(drop).is_none());
    }

    #[test]
    fn remove_last_item_is_refused() {
        let mut form = StatementForm::new();
        let only = first_id(&form, Section::FixedCosts);

        let result = form.remove_item(Section::FixedCosts, only);

        assert_eq!(
            result,
            Err(FormError::LastItem {
                section: Section::FixedCosts
            })
        );
        assert_eq!(form.section(Section::FixedCosts).len(), 1);
    }

    #[test]
    fn edits_in_wrong_section_report_unknown_item() {
        let mut form = StatementForm::new();
        let revenue_id = first_id(&form, Section::Revenue);

        let result = form.update_amount(Section::FixedCosts, revenue_id, "5");

        assert_eq!(
            result,
            Err(FormError::UnknownItem {
                section: Section::FixedCosts,
                id: revenue_id
            })
        );
    }

    #[test]
    fn update_name_and_amount_mutate_in_place() {
        let mut form = StatementForm::new();
        let id = first_id(&form, Section::Revenue);

        form.update_name(Section::Revenue, id, "Product sales").unwrap();
        form.update_amount(Section::Revenue, id, "1500").unwrap();

        let item = form.section(Section::Revenue).get(id).unwrap();
        assert_eq!(item.name, "Product sales");
        assert_eq!(item.amount, "1500");
    }

    // =========================================================================
    // totals
    // =========================================================================

    #[test]
    fn totals_coerce_unusable_amounts_to_zero() {
        let mut form = StatementForm::new();
        fill(&mut form, Section::Revenue, &["", "10", "abc"]);

        assert_eq!(form.section_total(Section::Revenue), Some(dec!(10)));
        assert_eq!(form.section_total(Section::FixedCosts), Some(Decimal::ZERO));
    }

    #[test]
    fn totals_are_unchanged_by_row_order() {
        let mut forward = StatementForm::new();
        fill(&mut forward, Section::VariableCosts, &["100.10", "0.20", "50"]);
        let mut backward = StatementForm::new();
        fill(&mut backward, Section::VariableCosts, &["50", "0.20", "100.10"]);

        assert_eq!(forward.totals(), backward.totals());
    }

    // =========================================================================
    // submission
    // =========================================================================

    #[test]
    fn submit_direct_produces_summary() {
        let mut form = StatementForm::new();
        fill(&mut form, Section::Revenue, &["600", "400"]);
        fill(&mut form, Section::VariableCosts, &["400"]);
        fill(&mut form, Section::FixedCosts, &["150", "50"]);

        let summary = form.submit().unwrap();

        assert_eq!(summary.result.result, dec!(400));
        assert_eq!(summary.result.intermediate, dec!(600));
        assert_eq!(summary.lines.len(), 5);
        assert!(form.error().is_none());
        assert_eq!(form.chart_series().len(), 5);
    }

    #[test]
    fn submit_uses_selected_method() {
        let mut form = StatementForm::new();
        fill(&mut form, Section::Revenue, &["1000"]);
        fill(&mut form, Section::VariableCosts, &["400"]);
        fill(&mut form, Section::FixedCosts, &["200"]);
        form.set_method(CostingMethod::Absorption);

        let summary = form.submit().unwrap();

        assert_eq!(summary.result.method, CostingMethod::Absorption);
        assert_eq!(summary.result.intermediate, dec!(600));
        assert_eq!(form.chart_series().len(), 3);
    }

    #[test]
    fn summary_persists_until_next_submit() {
        let mut form = StatementForm::new();
        fill(&mut form, Section::Revenue, &["100"]);
        form.submit().unwrap();

        let id = first_id(&form, Section::Revenue);
        form.update_amount(Section::Revenue, id, "999").unwrap();

        assert_eq!(form.summary().unwrap().totals.total_sales, dec!(100));
        form.submit().unwrap();
        assert_eq!(form.summary().unwrap().totals.total_sales, dec!(999));
    }

    #[test]
    fn out_of_range_totals_set_inline_error() {
        let max = Decimal::MAX.to_string();
        let mut form = StatementForm::new();
        fill(&mut form, Section::VariableCosts, &[max.as_str()]);
        fill(&mut form, Section::FixedCosts, &[max.as_str()]);
        form.set_method(CostingMethod::Absorption);

        let result = form.submit();

        assert!(result.unwrap_err().is_invalid_input());
        assert_eq!(form.error(), Some(INVALID_AMOUNTS_MESSAGE));
        assert!(form.summary().is_none());
        assert!(form.chart_series().is_empty());
    }

    #[test]
    fn from_items_fills_sections_in_order() {
        let drafts = vec![
            LineItemDraft {
                section: Section::Revenue,
                name: "Sales".to_string(),
                amount: "1000".to_string(),
            },
            LineItemDraft {
                section: Section::Revenue,
                name: "Services".to_string(),
                amount: "250".to_string(),
            },
        ];

        let form = StatementForm::from_items(drafts);

        let names: Vec<&str> = form
            .section(Section::Revenue)
            .items()
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Sales", "Services"]);
        assert_eq!(form.section(Section::VariableCosts).len(), 1);
        assert_eq!(form.section(Section::FixedCosts).len(), 1);
        assert_eq!(form.section_total(Section::Revenue), Some(dec!(1250)));
    }

    #[test]
    fn overflowing_section_sets_inline_error_in_any_row_order() {
        let max = Decimal::MAX.to_string();
        let orders = [
            [max.as_str(), "1", "-1"],
            ["1", max.as_str(), "-1"],
            ["-1", "1", max.as_str()],
        ];

        for order in orders {
            let mut form = StatementForm::new();
            fill(&mut form, Section::Revenue, &order);
            fill(&mut form, Section::VariableCosts, &["400"]);

            let error = form.submit().unwrap_err();

            assert_eq!(
                error,
                CostingError::OutOfRange {
                    fields: vec![TotalField::Sales]
                }
            );
            assert_eq!(form.section_total(Section::Revenue), None);
            assert_eq!(form.error(), Some(INVALID_AMOUNTS_MESSAGE));
            assert!(form.summary().is_none());
        }
    }
}
