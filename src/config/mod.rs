mod currency;
mod document;
mod party;

pub use currency::{currency_symbol, CURRENCY_SYMBOLS};
pub use document::{DueDate, InvoiceConfig, InvoiceDocument, DISPLAY_DATE_FORMAT};
pub use party::{split_lines, Party};

use crate::error::{InvoiceError, Result};
use std::fs;
use std::path::Path;

/// Load a config file. The format is picked from the extension (`.toml` or `.json`).
pub fn load_config(path: &Path) -> Result<InvoiceConfig> {
    if !path.exists() {
        return Err(InvoiceError::ConfigFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        }),
        Some("json") => serde_json::from_str(&content).map_err(|e| InvoiceError::ConfigJson {
            path: path.to_path_buf(),
            source: e,
        }),
        _ => Err(InvoiceError::UnsupportedConfigFormat(path.to_path_buf())),
    }
}

/// Write [`CONFIG_TEMPLATE`] to `path`, refusing to overwrite.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(InvoiceError::AlreadyInitialized(path.to_path_buf()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}

/// Template content for invoice.toml
pub const CONFIG_TEMPLATE: &str = r#"# Invoice settings. Every key is optional; command-line flags override
# anything set here.
#
# Example:
#   invoice generate --config invoice.toml --worklog worklog.csv

idPrefix = "INV"
# id = "202601"                  # default: current year and month
title = "INVOICE"

from = "Project Folded, Inc."
fromAddress = ["1", "Main st", "Newyark", "626112"]

to = "Untitled Corporation, Inc.\nAttn: Accounts Payable"
toAddress = ["1/56A", "Main st", "Newyark", "626112"]

# logo = "logo.png"
# logoSize = 100                 # width in points, height keeps the aspect ratio

# date = "Jan 02, 2026"          # default: today
# due = "Jan 16, 2026"           # wins over dueDays when set
dueDays = 14

items = ["Paper Cranes"]
quantities = [2]
rates = [25]                     # the first rate is used for items without one
ratesTaxInclusive = false

tax = 0.0                        # e.g., 0.1 for 10%
taxName = "VAT"
discount = 0.0                   # fraction of the subtotal
currency = "USD"

# note = "Thank you for your business!\nPayment by bank transfer."

[fromDetails]
# "Tax ID" = "12-3456789"

[toDetails]
"#;
