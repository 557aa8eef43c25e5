//! # Tradelens Ingest
//!
//! Turns the raw history export (a CSV with a header row) into `TradeRecord`s.
//!
//! Loading is all-or-nothing for structural problems: a missing required column,
//! broken CSV syntax or a non-numeric amount aborts the whole upload. Rows whose
//! timestamps cannot be parsed are dropped individually, and an export left with
//! no rows at all is rejected.

use configuration::ColumnNames;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub mod dates;
pub mod error;

pub use dates::{parse_timestamp, translate_months};
pub use error::IngestError;

/// The records recovered from one export, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub records: Vec<TradeRecord>,
    /// Data rows present in the file.
    pub rows_read: usize,
    /// Rows discarded because a timestamp did not parse.
    pub rows_dropped: usize,
}

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    market: usize,
    start_time: usize,
    resolved_at: usize,
    profit_loss: usize,
}

/// Reads history exports laid out according to a set of `ColumnNames`.
#[derive(Debug, Clone)]
pub struct TradeLoader {
    columns: ColumnNames,
}

impl TradeLoader {
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    /// Loads an export from a file on disk.
    pub fn load_path(&self, path: &Path) -> Result<IngestOutcome, IngestError> {
        let file = File::open(path)?;
        self.load(file)
    }

    /// Loads an export already held in memory, e.g. an HTTP upload body.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<IngestOutcome, IngestError> {
        self.load(bytes)
    }

    /// Reads, validates and parses every row of the export.
    pub fn load<R: Read>(&self, reader: R) -> Result<IngestOutcome, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let index = self.locate_columns(csv_reader.headers()?)?;

        let mut records = Vec::new();
        let mut rows_read = 0;
        let mut rows_dropped = 0;

        for result in csv_reader.records() {
            let row = result?;
            rows_read += 1;
            let line = row.position().map_or(rows_read as u64 + 1, |p| p.line());

            let field = |i: usize| row.get(i).unwrap_or_default();

            // The amount is validated before the dates: a non-numeric amount
            // makes the whole export unusable, a bad date only loses the row.
            let profit_loss = parse_amount(field(index.profit_loss)).ok_or_else(|| {
                IngestError::InvalidAmount {
                    row: line,
                    value: field(index.profit_loss).to_string(),
                }
            })?;

            let start_time = parse_timestamp(field(index.start_time));
            let resolved_at = parse_timestamp(field(index.resolved_at));
            let (Some(start_time), Some(resolved_at)) = (start_time, resolved_at) else {
                tracing::debug!(
                    line,
                    start = field(index.start_time),
                    resolved = field(index.resolved_at),
                    "Dropping row with an unparseable timestamp."
                );
                rows_dropped += 1;
                continue;
            };

            records.push(TradeRecord {
                market: field(index.market).to_string(),
                start_time,
                resolved_at,
                profit_loss,
            });
        }

        if records.is_empty() {
            return Err(IngestError::NoValidRows { rows_read });
        }

        tracing::info!(
            rows_read,
            rows_dropped,
            rows_kept = records.len(),
            "History export loaded."
        );

        Ok(IngestOutcome {
            records,
            rows_read,
            rows_dropped,
        })
    }

    /// Finds every required column in the header row, reporting all missing ones at once.
    fn locate_columns(&self, headers: &csv::StringRecord) -> Result<ColumnIndex, IngestError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let found = self.columns.required().map(|name| (name, position(name)));
        let missing: Vec<String> = found
            .iter()
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match found.map(|(_, pos)| pos) {
            [Some(market), Some(start_time), Some(resolved_at), Some(profit_loss)] => {
                Ok(ColumnIndex {
                    market,
                    start_time,
                    resolved_at,
                    profit_loss,
                })
            }
            _ => Err(IngestError::MissingColumns(missing)),
        }
    }
}

/// Parses a profit/loss cell, accepting plain and scientific notation.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
