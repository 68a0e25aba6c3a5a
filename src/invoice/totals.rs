use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{InvoiceError, Result};

/// One billable row, with quantity and rate already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Everything derived from the item arrays and the tax/discount settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// Per-item `quantity * rate`, in item order.
    pub amounts: Vec<f64>,
    /// Sum of all item amounts.
    pub subtotal: f64,
    /// Subtotal as printed: with tax backed out when rates include it.
    pub displayed_subtotal: f64,
    pub total_hours: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

impl Totals {
    /// A tax row is printed whenever a tax rate is set, even on a zero subtotal.
    pub fn shows_tax(&self) -> bool {
        self.tax_rate > 0.0
    }

    pub fn shows_discount(&self) -> bool {
        self.discount > 0.0
    }
}

/// Quantity for item `i`; items without one count as 1.
fn quantity_at(quantities: &[f64], i: usize) -> f64 {
    quantities.get(i).copied().unwrap_or(1.0)
}

/// Rate for item `i`; items without one use the first rate.
fn rate_at(rates: &[f64], i: usize) -> Result<f64> {
    rates
        .get(i)
        .or_else(|| rates.first())
        .copied()
        .ok_or(InvoiceError::NoRates)
}

/// Resolve the parallel arrays into line items.
pub fn line_items(
    items: &[String],
    quantities: &[f64],
    rates: &[f64],
    dates: &[NaiveDate],
) -> Result<Vec<LineItem>> {
    items
        .iter()
        .enumerate()
        .map(|(i, description)| {
            let quantity = quantity_at(quantities, i);
            let rate = rate_at(rates, i)?;
            Ok(LineItem {
                date: dates.get(i).copied(),
                description: description.clone(),
                quantity,
                rate,
                amount: quantity * rate,
            })
        })
        .collect()
}

/// Compute subtotal, tax, discount and grand total.
///
/// With `tax_inclusive` the rates already contain tax: the printed subtotal has
/// it backed out and the grand total does not add it again.
pub fn compute_totals(
    items: &[String],
    quantities: &[f64],
    rates: &[f64],
    tax_rate: f64,
    tax_inclusive: bool,
    discount_rate: f64,
) -> Result<Totals> {
    let mut amounts = Vec::with_capacity(items.len());
    let mut total_hours = 0.0;
    for i in 0..items.len() {
        let quantity = quantity_at(quantities, i);
        amounts.push(quantity * rate_at(rates, i)?);
        total_hours += quantity;
    }

    let subtotal: f64 = amounts.iter().sum();
    let tax = subtotal * tax_rate;
    let discount = subtotal * discount_rate;

    let (displayed_subtotal, total) = if tax_inclusive {
        (subtotal * (1.0 - tax_rate), subtotal - discount)
    } else {
        (subtotal, subtotal - discount + tax)
    };

    Ok(Totals {
        amounts,
        subtotal,
        displayed_subtotal,
        total_hours,
        tax_rate,
        tax,
        discount,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_rate_is_broadcast() {
        let totals = compute_totals(&names(&["A", "B"]), &[2.0, 3.0], &[10.0], 0.0, false, 0.0)
            .unwrap();

        assert_eq!(totals.amounts, vec![20.0, 30.0]);
        assert_eq!(totals.subtotal, 50.0);
        assert_eq!(totals.total_hours, 5.0);
        assert_eq!(totals.total, 50.0);
    }

    #[test]
    fn broadcast_uses_first_not_last_rate() {
        let totals = compute_totals(
            &names(&["A", "B", "C"]),
            &[1.0, 1.0, 1.0],
            &[10.0, 20.0],
            0.0,
            false,
            0.0,
        )
        .unwrap();

        assert_eq!(totals.amounts, vec![10.0, 20.0, 10.0]);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let totals =
            compute_totals(&names(&["A", "B", "C"]), &[4.0], &[5.0], 0.0, false, 0.0).unwrap();

        assert_eq!(totals.amounts, vec![20.0, 5.0, 5.0]);
        assert_eq!(totals.total_hours, 6.0);
    }

    #[test]
    fn exclusive_tax_and_discount() {
        let totals = compute_totals(&names(&["A"]), &[1.0], &[100.0], 0.1, false, 0.05).unwrap();

        assert!(close(totals.displayed_subtotal, 100.0));
        assert!(close(totals.tax, 10.0));
        assert!(close(totals.discount, 5.0));
        assert!(close(totals.total, 105.0));
        assert!(totals.shows_tax());
        assert!(totals.shows_discount());
    }

    #[test]
    fn inclusive_tax_is_not_added_again() {
        let totals = compute_totals(&names(&["A"]), &[1.0], &[100.0], 0.1, true, 0.0).unwrap();

        assert!(close(totals.displayed_subtotal, 90.0));
        assert!(close(totals.tax, 10.0));
        assert!(close(totals.total, 100.0));
    }

    #[test]
    fn inclusive_and_exclusive_differ_by_tax() {
        let items = names(&["A", "B"]);
        let exclusive = compute_totals(&items, &[3.0, 1.5], &[40.0, 80.0], 0.2, false, 0.1).unwrap();
        let inclusive = compute_totals(&items, &[3.0, 1.5], &[40.0, 80.0], 0.2, true, 0.1).unwrap();

        assert!(close(
            exclusive.total - inclusive.total,
            exclusive.subtotal * 0.2
        ));
    }

    #[test]
    fn zero_rates_hide_tax_and_discount() {
        let totals = compute_totals(&names(&["A"]), &[1.0], &[100.0], 0.0, false, 0.0).unwrap();

        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.discount, 0.0);
        assert!(!totals.shows_tax());
        assert!(!totals.shows_discount());
    }

    #[test]
    fn empty_rates_are_rejected_when_items_exist() {
        assert!(matches!(
            compute_totals(&names(&["A"]), &[1.0], &[], 0.0, false, 0.0),
            Err(InvoiceError::NoRates)
        ));
        let empty = compute_totals(&[], &[], &[], 0.0, false, 0.0).unwrap();
        assert_eq!(empty.subtotal, 0.0);
    }

    #[test]
    fn line_items_match_totals() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let items = names(&["Design", "Build"]);
        let rows = line_items(&items, &[2.0], &[50.0, 70.0], &[date]).unwrap();
        let totals = compute_totals(&items, &[2.0], &[50.0, 70.0], 0.0, false, 0.0).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, Some(date));
        assert_eq!(rows[1].date, None);
        assert_eq!(rows[1].quantity, 1.0);
        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, totals.amounts);
    }
}
