use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::InvoiceDocument;
use crate::error::{InvoiceError, Result};

/// Header row a worklog export must start with, in this order.
pub const WORKLOG_HEADERS: [&str; 5] = ["Date", "Start", "End", "Worked", "Titles"];

const DATE_COLUMN: usize = 0;
const WORKED_COLUMN: usize = 3;
const TITLES_COLUMN: usize = 4;

/// One tracked block of work.
#[derive(Debug, Clone, PartialEq)]
pub struct WorklogEntry {
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
}

/// Parse a `H:MM` duration into fractional hours.
pub fn parse_duration(value: &str) -> Option<f64> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Turn raw worklog rows into entries. The first row must be the header.
///
/// Fails on the first bad row; no partial result is returned.
pub fn aggregate<R, S>(rows: R) -> Result<Vec<WorklogEntry>>
where
    R: IntoIterator,
    R::Item: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let header: Vec<&str> = header
        .as_ref()
        .iter()
        .map(|h| AsRef::<str>::as_ref(h))
        .collect();
    if header != WORKLOG_HEADERS {
        return Err(InvoiceError::WorklogHeader {
            found: header.iter().map(|h| h.to_string()).collect(),
        });
    }

    let mut entries = Vec::new();
    for (idx, record) in rows.enumerate() {
        // 1-based, counting the header
        let row = idx + 2;
        let fields = record.as_ref();
        if fields.len() != WORKLOG_HEADERS.len() {
            return Err(InvoiceError::WorklogRow {
                row,
                fields: fields.len(),
            });
        }

        let date_value = fields[DATE_COLUMN].as_ref();
        let date = NaiveDate::parse_from_str(date_value, "%Y-%m-%d").map_err(|e| {
            InvoiceError::WorklogDate {
                row,
                value: date_value.to_string(),
                source: e,
            }
        })?;

        let worked = fields[WORKED_COLUMN].as_ref();
        let hours = parse_duration(worked).ok_or_else(|| InvoiceError::WorklogDuration {
            row,
            value: worked.to_string(),
        })?;

        entries.push(WorklogEntry {
            date,
            hours,
            description: fields[TITLES_COLUMN].as_ref().to_string(),
        });
    }

    Ok(entries)
}

/// Read a worklog CSV export and aggregate it.
pub fn read_worklog<R: Read>(reader: R) -> Result<Vec<WorklogEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    aggregate(rows)
}

/// Open and read a worklog CSV file.
pub fn read_worklog_file(path: &Path) -> Result<Vec<WorklogEntry>> {
    let file = File::open(path)?;
    read_worklog(file)
}

/// Replace the document's items, quantities and dates with the worklog.
///
/// An empty worklog leaves the document untouched. Returns whether anything was replaced.
pub fn apply_worklog(document: &mut InvoiceDocument, entries: Vec<WorklogEntry>) -> bool {
    if entries.is_empty() {
        return false;
    }

    info!("replacing line items with {} worklog entries", entries.len());
    let mut items = Vec::with_capacity(entries.len());
    let mut quantities = Vec::with_capacity(entries.len());
    let mut dates = Vec::with_capacity(entries.len());
    for entry in entries {
        items.push(entry.description);
        quantities.push(entry.hours);
        dates.push(entry.date);
    }

    document.items = items;
    document.quantities = quantities;
    document.dates = dates;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvoiceConfig;

    const WORKLOG: &str = "\
Date,Start,End,Worked,Titles
2026-02-02,09:00,16:30,7:30,API design
2026-02-03,10:00,12:15,2:15,\"Review, fixes\"
2026-02-01,13:00,14:00,1:00,Planning
";

    #[test]
    fn durations_are_fractional_hours() {
        assert_eq!(parse_duration("7:30"), Some(7.5));
        assert_eq!(parse_duration("0:45"), Some(0.75));
        assert_eq!(parse_duration("12:00"), Some(12.0));
        assert_eq!(parse_duration("7"), None);
        assert_eq!(parse_duration("7:xx"), None);
        assert_eq!(parse_duration("a:30"), None);
    }

    #[test]
    fn reads_rows_in_input_order() {
        let entries = read_worklog(WORKLOG.as_bytes()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].description, "API design");
        assert_eq!(entries[0].hours, 7.5);
        assert_eq!(entries[1].description, "Review, fixes");
        assert_eq!(entries[1].hours, 2.25);
        assert_eq!(
            entries[2].date,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn header_only_yields_nothing() {
        let entries = read_worklog("Date,Start,End,Worked,Titles\n".as_bytes()).unwrap();
        assert!(entries.is_empty());
        assert!(read_worklog("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn wrong_header_is_rejected() {
        let input = "Day,Start,End,Worked,Titles\n2026-02-02,09:00,16:30,7:30,API\n";
        let err = read_worklog(input.as_bytes()).unwrap_err();

        assert!(matches!(err, InvoiceError::WorklogHeader { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn bad_date_aborts() {
        let rows = vec![
            WORKLOG_HEADERS.to_vec(),
            vec!["2026-02-02", "", "", "1:00", "ok"],
            vec!["02/03/2026", "", "", "1:00", "bad"],
        ];

        assert!(matches!(
            aggregate(rows),
            Err(InvoiceError::WorklogDate { row: 3, .. })
        ));
    }

    #[test]
    fn bad_duration_aborts() {
        let rows = vec![
            WORKLOG_HEADERS.to_vec(),
            vec!["2026-02-02", "", "", "1h30", "bad"],
        ];

        assert!(matches!(
            aggregate(rows),
            Err(InvoiceError::WorklogDuration { row: 2, .. })
        ));
    }

    #[test]
    fn short_row_aborts() {
        let rows = vec![WORKLOG_HEADERS.to_vec(), vec!["2026-02-02", "1:00"]];

        assert!(matches!(
            aggregate(rows),
            Err(InvoiceError::WorklogRow { row: 2, fields: 2 })
        ));
    }

    #[test]
    fn long_row_aborts() {
        let input = "Date,Start,End,Worked,Titles\n2026-02-02,09:00,10:00,1:00,Review, fixes\n";

        assert!(matches!(
            read_worklog(input.as_bytes()),
            Err(InvoiceError::WorklogRow { row: 2, fields: 6 })
        ));
    }

    #[test]
    fn worklog_replaces_items() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut doc = InvoiceDocument::from_config(InvoiceConfig::default(), today);
        let entries = read_worklog(WORKLOG.as_bytes()).unwrap();

        assert!(apply_worklog(&mut doc, entries));
        assert_eq!(doc.items, vec!["API design", "Review, fixes", "Planning"]);
        assert_eq!(doc.quantities, vec![7.5, 2.25, 1.0]);
        assert_eq!(doc.dates.len(), 3);
        assert_eq!(doc.rates, vec![25.0]);
    }

    #[test]
    fn empty_worklog_keeps_items() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut doc = InvoiceDocument::from_config(InvoiceConfig::default(), today);

        assert!(!apply_worklog(&mut doc, Vec::new()));
        assert_eq!(doc.items, vec!["Paper Cranes"]);
    }
}
