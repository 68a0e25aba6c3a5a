mod generator;
mod totals;
mod worklog;

pub use generator::{
    document_currency_symbol, document_totals, generate_invoice, load_logo, output_path, render,
    render_to,
};
pub use totals::{compute_totals, line_items, LineItem, Totals};
pub use worklog::{
    aggregate, apply_worklog, parse_duration, read_worklog, read_worklog_file, WorklogEntry,
    WORKLOG_HEADERS,
};
