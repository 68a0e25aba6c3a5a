pub mod config;
pub mod error;
pub mod invoice;
pub mod layout;
pub mod pdf;

pub use config::{load_config, InvoiceConfig, InvoiceDocument, Party};
pub use error::{InvoiceError, Result};
pub use invoice::{compute_totals, generate_invoice, render, render_to, Totals};
