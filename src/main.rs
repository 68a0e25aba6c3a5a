use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use invoice::config::{load_config, write_template, InvoiceConfig, InvoiceDocument, CURRENCY_SYMBOLS};
use invoice::error::{InvoiceError, Result};
use invoice::invoice::{
    apply_worklog, document_currency_symbol, document_totals, generate_invoice, line_items,
    load_logo, read_worklog_file, render_to,
};
use invoice::layout::blocks::{format_money, tax_label};
use invoice::pdf::RecordingCanvas;

#[derive(Parser)]
#[command(name = "invoice")]
#[command(version, about = "Generate single-page PDF invoices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a commented config template
    Init {
        /// Where to write the template
        #[arg(long, default_value = "invoice.toml")]
        path: PathBuf,
    },

    /// Generate an invoice PDF
    Generate {
        #[command(flatten)]
        input: InvoiceArgs,

        /// Output file; the invoice id is appended to its name
        #[arg(short, long, default_value = "invoice.pdf")]
        output: PathBuf,
    },

    /// Show line items and totals without writing a PDF
    Preview {
        #[command(flatten)]
        input: InvoiceArgs,

        /// Also print every draw call of the page layout
        #[arg(long)]
        layout: bool,
    },

    /// List supported currency codes
    Currencies,
}

/// Invoice inputs shared by `generate` and `preview`. Flags override the config file.
#[derive(Args)]
struct InvoiceArgs {
    /// Config file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worklog CSV (Date,Start,End,Worked,Titles); replaces items, quantities and dates
    #[arg(long)]
    worklog: Option<PathBuf>,

    /// Invoice number (default: current year and month)
    #[arg(long)]
    id: Option<String>,

    /// Prefix put before the invoice number
    #[arg(long)]
    id_prefix: Option<String>,

    #[arg(long)]
    title: Option<String>,

    /// Rates per item; items without one use the first (e.g., -r 40,60)
    #[arg(short = 'r', long = "rate", value_delimiter = ',')]
    rates: Vec<f64>,

    /// Quantities per item; items without one count as 1
    #[arg(short = 'q', long = "quantity", value_delimiter = ',')]
    quantities: Vec<f64>,

    /// Item description (can be repeated)
    #[arg(short = 'i', long = "item")]
    items: Vec<String>,

    /// Logo image (PNG, JPEG or GIF)
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Logo width in points
    #[arg(long)]
    logo_size: Option<f64>,

    /// Issuer name; "\n" starts a new line
    #[arg(short, long)]
    from: Option<String>,

    #[arg(long, value_delimiter = ',')]
    from_address: Vec<String>,

    /// Issuer detail, e.g. "VAT=GB123" (can be repeated)
    #[arg(long, value_name = "KEY=VALUE")]
    from_detail: Vec<String>,

    /// Recipient name; "\n" starts a new line
    #[arg(short, long)]
    to: Option<String>,

    #[arg(short = 'a', long, value_delimiter = ',')]
    to_address: Vec<String>,

    /// Recipient detail, e.g. "PO=1234" (can be repeated)
    #[arg(long, value_name = "KEY=VALUE")]
    to_detail: Vec<String>,

    /// Issue date as printed (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Due date as printed; wins over --due-days
    #[arg(long)]
    due: Option<String>,

    /// Days after today the invoice is due; 0 prints no due date
    #[arg(long)]
    due_days: Option<i64>,

    /// Rates already include tax; pass "false" to override a config file
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    rates_tax_inclusive: Option<bool>,

    /// Tax rate as a fraction (e.g., 0.2 for 20%)
    #[arg(long)]
    tax: Option<f64>,

    #[arg(long)]
    tax_name: Option<String>,

    /// Discount as a fraction of the subtotal
    #[arg(short, long)]
    discount: Option<f64>,

    /// ISO 4217 currency code
    #[arg(short, long)]
    currency: Option<String>,

    /// Note printed under the items; "\n" starts a new line
    #[arg(short, long)]
    note: Option<String>,
}

impl InvoiceArgs {
    /// The flags that were actually given, as a config layer.
    fn to_config(&self) -> Result<InvoiceConfig> {
        Ok(InvoiceConfig {
            id: self.id.clone(),
            id_prefix: self.id_prefix.clone(),
            title: self.title.clone(),
            logo: self.logo.clone(),
            logo_size: self.logo_size,
            from: self.from.clone(),
            from_details: parse_details(&self.from_detail)?,
            from_address: non_empty(&self.from_address),
            to: self.to.clone(),
            to_details: parse_details(&self.to_detail)?,
            to_address: non_empty(&self.to_address),
            dates: None,
            date: self.date.clone(),
            due: self.due.clone(),
            due_days: self.due_days,
            items: non_empty(&self.items),
            quantities: non_empty(&self.quantities),
            rates: non_empty(&self.rates),
            rates_tax_inclusive: self.rates_tax_inclusive,
            tax: self.tax,
            tax_name: self.tax_name.clone(),
            discount: self.discount,
            currency: self.currency.clone(),
            note: self.note.clone(),
        })
    }

    /// Defaults, then the config file, then flags, then the worklog.
    fn build_document(&self) -> Result<InvoiceDocument> {
        let file = match &self.config {
            Some(path) => load_config(path)?,
            None => InvoiceConfig::default(),
        };
        let config = file.merge(self.to_config()?);
        let today = chrono::Local::now().date_naive();
        let mut document = InvoiceDocument::from_config(config, today);

        if let Some(path) = &self.worklog {
            let entries = read_worklog_file(path)?;
            apply_worklog(&mut document, entries);
        }
        Ok(document)
    }
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Parse `KEY=VALUE` pairs into a detail map.
fn parse_details(pairs: &[String]) -> Result<Option<HashMap<String, String>>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut details = HashMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| InvoiceError::InvalidDetail(pair.clone()))?;
        details.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(Some(details))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => cmd_init(&path),
        Commands::Generate { input, output } => cmd_generate(&input, &output),
        Commands::Preview { input, layout } => cmd_preview(&input, layout),
        Commands::Currencies => cmd_currencies(),
    }
}

/// Write the config template
fn cmd_init(path: &Path) -> Result<()> {
    write_template(path)?;

    println!("Created invoice config at: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Fill in your details:  $EDITOR {}", path.display());
    println!(
        "  2. Generate an invoice:   invoice generate --config {} --worklog <worklog.csv>",
        path.display()
    );

    Ok(())
}

/// Render and write the invoice
fn cmd_generate(input: &InvoiceArgs, output: &Path) -> Result<()> {
    let document = input.build_document()?;
    let path = generate_invoice(&document, output)?;
    println!("Generated {}", path.display());
    Ok(())
}

#[derive(Tabled)]
struct LineItemRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "HOURS")]
    hours: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "CODE")]
    code: &'static str,
    #[tabled(rename = "SYMBOL")]
    symbol: &'static str,
}

/// Print line items and totals, optionally with the recorded layout
fn cmd_preview(input: &InvoiceArgs, layout: bool) -> Result<()> {
    let document = input.build_document()?;
    let items = line_items(
        &document.items,
        &document.quantities,
        &document.rates,
        &document.dates,
    )?;
    let totals = document_totals(&document)?;
    let due = document.due_label()?;
    let symbol = document_currency_symbol(&document);

    println!("{} #{}  ·  {}", document.title, document.id, document.date);
    println!();

    let rows: Vec<LineItemRow> = items
        .iter()
        .map(|item| LineItemRow {
            date: item
                .date
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_default(),
            description: item.description.clone(),
            hours: format!("{:.2}", item.quantity),
            rate: format_money(&symbol, item.rate),
            amount: format_money(&symbol, item.amount),
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();

    println!("Total Hours: {:.2}", totals.total_hours);
    println!("Subtotal:    {}", format_money(&symbol, totals.displayed_subtotal));
    if totals.shows_tax() {
        println!(
            "{}: {}",
            tax_label(&document.tax_name, totals.tax_rate),
            format_money(&symbol, totals.tax)
        );
    }
    if totals.shows_discount() {
        println!("Discount:    {}", format_money(&symbol, totals.discount));
    }
    println!("Total Due:   {}", format_money(&symbol, totals.total));
    if let Some(due) = due {
        println!("Due Date:    {due}");
    }

    if layout {
        let logo = load_logo(&document)?;
        let mut canvas = RecordingCanvas::new();
        render_to(&document, logo.as_ref(), &mut canvas)?;

        println!();
        for op in canvas.ops() {
            println!("{op}");
        }
    }

    Ok(())
}

/// List the currency table
fn cmd_currencies() -> Result<()> {
    let rows: Vec<CurrencyRow> = CURRENCY_SYMBOLS
        .iter()
        .map(|&(code, symbol)| CurrencyRow { code, symbol })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_parse_key_value_pairs() {
        let details = parse_details(&["VAT = GB123".to_string(), "PO=7=8".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(details["VAT"], "GB123");
        assert_eq!(details["PO"], "7=8");
    }

    #[test]
    fn details_reject_missing_separator() {
        assert!(matches!(
            parse_details(&["VAT".to_string()]),
            Err(InvoiceError::InvalidDetail(_))
        ));
        assert!(matches!(
            parse_details(&["=x".to_string()]),
            Err(InvoiceError::InvalidDetail(_))
        ));
        assert_eq!(parse_details(&[]).unwrap(), None);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
