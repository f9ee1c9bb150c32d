//! Section aggregation.

use rust_decimal::Decimal;
use tracing::warn;

use crate::LineItem;
use crate::calculations::common::{AmountError, read_amount};

/// Sums the amounts of `items`.
///
/// An item whose amount is empty or not a number contributes zero; this is
/// a normalization rule, never an error. Returns `None` when an amount or
/// the sum falls outside the decimal range.
///
/// Credits and debits are summed apart before being combined, so whether a
/// section overflows does not depend on the order of its rows.
///
/// # Examples
///
/// ```
/// use costing_core::{LineItem, LineItemId, aggregate};
/// use rust_decimal_macros::dec;
///
/// let items = [
///     LineItem::new(LineItemId(1), "Consulting", ""),
///     LineItem::new(LineItemId(2), "Sales", "10"),
/// ];
/// assert_eq!(aggregate(&items), Some(dec!(10)));
/// ```
pub fn aggregate(items: &[LineItem]) -> Option<Decimal> {
    let mut positive = Decimal::ZERO;
    let mut negative = Decimal::ZERO;

    for item in items {
        let amount = match read_amount(&item.amount) {
            Ok(amount) => amount,
            Err(AmountError::Invalid) => continue,
            Err(AmountError::OutOfRange) => {
                warn!(item = %item.id, amount = %item.amount, "line item out of range");
                return None;
            }
        };
        let part = if amount.is_sign_negative() {
            &mut negative
        } else {
            &mut positive
        };
        let Some(sum) = part.checked_add(amount) else {
            warn!(item = %item.id, "section total out of range");
            return None;
        };
        *part = sum;
    }

    positive.checked_add(negative)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::LineItemId;

    fn items(amounts: &[&str]) -> Vec<LineItem> {
        amounts
            .iter()
            .enumerate()
            .map(|(idx, amount)| LineItem::new(LineItemId(idx as u64), "", *amount))
            .collect()
    }

    #[test]
    fn aggregate_sums_amounts() {
        assert_eq!(aggregate(&items(&["100", "250.50", "49.50"])), Some(dec!(400)));
    }

    #[test]
    fn aggregate_treats_empty_amount_as_zero() {
        assert_eq!(aggregate(&items(&["", "10"])), Some(dec!(10)));
    }

    #[test]
    fn aggregate_treats_non_numeric_amount_as_zero() {
        assert_eq!(aggregate(&items(&["abc", "10", "1,5", "1_0"])), Some(dec!(10)));
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        assert_eq!(aggregate(&[]), Some(Decimal::ZERO));
    }

    #[test]
    fn aggregate_keeps_negative_amounts() {
        assert_eq!(aggregate(&items(&["100", "-30"])), Some(dec!(70)));
    }

    #[test]
    fn aggregate_is_order_independent() {
        let forward = items(&["0.1", "0.2", "1000000.03", "-5"]);
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(aggregate(&forward), aggregate(&backward));
        assert_eq!(aggregate(&forward), Some(dec!(999995.33)));
    }

    #[test]
    fn aggregate_overflow_does_not_depend_on_row_order() {
        let max = Decimal::MAX.to_string();
        let orders = [
            [max.as_str(), "1", "-1"],
            ["1", max.as_str(), "-1"],
            ["-1", "1", max.as_str()],
        ];

        for order in orders {
            assert_eq!(aggregate(&items(&order)), None, "order {order:?}");
        }
    }

    #[test]
    fn aggregate_rejects_amount_beyond_decimal_range() {
        assert_eq!(aggregate(&items(&["10", "1e30"])), None);
    }

    #[test]
    fn aggregate_of_opposite_extremes_fits() {
        let max = Decimal::MAX.to_string();
        let min = Decimal::MIN.to_string();

        assert_eq!(aggregate(&items(&[max.as_str(), min.as_str()])), Some(Decimal::ZERO));
    }
}
