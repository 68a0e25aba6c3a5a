use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::party::Party;
use crate::error::{InvoiceError, Result};

const DEFAULT_ID_PREFIX: &str = "INV";
const DEFAULT_TITLE: &str = "INVOICE";
const DEFAULT_LOGO_SIZE: f64 = 100.0;
const DEFAULT_DUE_DAYS: i64 = 14;
const DEFAULT_TAX_NAME: &str = "VAT";
const DEFAULT_CURRENCY: &str = "USD";

/// Display format for issue and due dates.
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Partial invoice settings, as read from a config file or from CLI flags.
///
/// Every field is optional so layers can be stacked with [`InvoiceConfig::merge`].
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceConfig {
    pub id: Option<String>,
    pub id_prefix: Option<String>,
    pub title: Option<String>,

    pub logo: Option<PathBuf>,
    pub logo_size: Option<f64>,

    pub from: Option<String>,
    pub from_details: Option<HashMap<String, String>>,
    pub from_address: Option<Vec<String>>,

    pub to: Option<String>,
    pub to_details: Option<HashMap<String, String>>,
    pub to_address: Option<Vec<String>>,

    pub dates: Option<Vec<NaiveDate>>,
    pub date: Option<String>,
    pub due: Option<String>,
    pub due_days: Option<i64>,

    pub items: Option<Vec<String>>,
    pub quantities: Option<Vec<f64>>,
    pub rates: Option<Vec<f64>>,
    pub rates_tax_inclusive: Option<bool>,

    pub tax: Option<f64>,
    pub tax_name: Option<String>,
    pub discount: Option<f64>,
    pub currency: Option<String>,

    pub note: Option<String>,
}

impl InvoiceConfig {
    /// Layer `other` on top of `self`. Values set in `other` win; detail maps are merged key by key.
    pub fn merge(self, other: InvoiceConfig) -> InvoiceConfig {
        InvoiceConfig {
            id: other.id.or(self.id),
            id_prefix: other.id_prefix.or(self.id_prefix),
            title: other.title.or(self.title),
            logo: other.logo.or(self.logo),
            logo_size: other.logo_size.or(self.logo_size),
            from: other.from.or(self.from),
            from_details: merge_details(self.from_details, other.from_details),
            from_address: other.from_address.or(self.from_address),
            to: other.to.or(self.to),
            to_details: merge_details(self.to_details, other.to_details),
            to_address: other.to_address.or(self.to_address),
            dates: other.dates.or(self.dates),
            date: other.date.or(self.date),
            due: other.due.or(self.due),
            due_days: other.due_days.or(self.due_days),
            items: other.items.or(self.items),
            quantities: other.quantities.or(self.quantities),
            rates: other.rates.or(self.rates),
            rates_tax_inclusive: other.rates_tax_inclusive.or(self.rates_tax_inclusive),
            tax: other.tax.or(self.tax),
            tax_name: other.tax_name.or(self.tax_name),
            discount: other.discount.or(self.discount),
            currency: other.currency.or(self.currency),
            note: other.note.or(self.note),
        }
    }
}

fn merge_details(
    base: Option<HashMap<String, String>>,
    over: Option<HashMap<String, String>>,
) -> Option<HashMap<String, String>> {
    match (base, over) {
        (Some(mut base), Some(over)) => {
            base.extend(over);
            Some(base)
        }
        (base, over) => over.or(base),
    }
}

/// When payment is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    /// A date string printed as given.
    Explicit(String),
    /// A number of days after the generation date.
    Offset(i64),
}

/// A fully resolved invoice, ready to render. Built once and never mutated during rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    /// Prefix and sequence joined, e.g. `INV202610`.
    pub id: String,
    pub title: String,
    pub logo: Option<PathBuf>,
    pub logo_size: f64,
    pub issuer: Party,
    pub recipient: Party,
    pub date: String,
    pub due: Option<DueDate>,
    pub items: Vec<String>,
    pub quantities: Vec<f64>,
    pub rates: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub rates_tax_inclusive: bool,
    pub tax_rate: f64,
    pub tax_name: String,
    pub discount_rate: f64,
    pub currency: String,
    pub note: String,
    /// The day the invoice is generated; due offsets count from here.
    pub generated_on: NaiveDate,
}

impl InvoiceDocument {
    /// Fill every unset field of `config` with its default.
    pub fn from_config(config: InvoiceConfig, today: NaiveDate) -> Self {
        let id = config
            .id
            .unwrap_or_else(|| today.format("%Y%m").to_string());
        let id_prefix = config
            .id_prefix
            .unwrap_or_else(|| DEFAULT_ID_PREFIX.to_string());

        let due = match config.due.filter(|d| !d.is_empty()) {
            Some(explicit) => Some(DueDate::Explicit(explicit)),
            None => match config.due_days.unwrap_or(DEFAULT_DUE_DAYS) {
                days if days > 0 => Some(DueDate::Offset(days)),
                _ => None,
            },
        };

        let issuer = Party {
            name: config
                .from
                .unwrap_or_else(|| "Project Folded, Inc.".to_string()),
            address: config.from_address.unwrap_or_else(|| {
                ["1", "Main st", "Newyark", "626112"].map(String::from).to_vec()
            }),
            details: config.from_details.unwrap_or_default(),
        };
        let recipient = Party {
            name: config
                .to
                .unwrap_or_else(|| "Untitled Corporation, Inc.".to_string()),
            address: config.to_address.unwrap_or_else(|| {
                ["1/56A", "Main st", "Newyark", "626112"]
                    .map(String::from)
                    .to_vec()
            }),
            details: config.to_details.unwrap_or_default(),
        };

        Self {
            id: format!("{}{}", id_prefix, id),
            title: config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            logo: config.logo.filter(|p| !p.as_os_str().is_empty()),
            logo_size: config.logo_size.unwrap_or(DEFAULT_LOGO_SIZE),
            issuer,
            recipient,
            date: config
                .date
                .unwrap_or_else(|| today.format(DISPLAY_DATE_FORMAT).to_string()),
            due,
            items: config
                .items
                .unwrap_or_else(|| vec!["Paper Cranes".to_string()]),
            quantities: config.quantities.unwrap_or_else(|| vec![2.0]),
            rates: config.rates.unwrap_or_else(|| vec![25.0]),
            dates: config.dates.unwrap_or_else(|| vec![today]),
            rates_tax_inclusive: config.rates_tax_inclusive.unwrap_or(false),
            tax_rate: config.tax.unwrap_or(0.0),
            tax_name: config
                .tax_name
                .unwrap_or_else(|| DEFAULT_TAX_NAME.to_string()),
            discount_rate: config.discount.unwrap_or(0.0),
            currency: config
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            note: config.note.unwrap_or_default(),
            generated_on: today,
        }
    }

    /// The due-date text to print, if any.
    pub fn due_label(&self) -> Result<Option<String>> {
        match &self.due {
            Some(DueDate::Explicit(date)) => Ok(Some(date.clone())),
            Some(DueDate::Offset(days)) => {
                let due = u64::try_from(*days)
                    .ok()
                    .and_then(|d| self.generated_on.checked_add_days(Days::new(d)))
                    .ok_or(InvoiceError::DueDateOutOfRange(*days))?;
                Ok(Some(due.format(DISPLAY_DATE_FORMAT).to_string()))
            }
            None => Ok(None),
        }
    }
}
