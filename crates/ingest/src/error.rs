use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read the export: {0}")]
    Io(#[from] std::io::Error),

    #[error("The CSV file must contain the columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: profit/loss '{value}' is not a number")]
    InvalidAmount { row: u64, value: String },

    #[error("No valid dates found in {rows_read} row(s). Check the date format of the file")]
    NoValidRows { rows_read: usize },
}

impl IngestError {
    /// A short, stable name for the failure category, suitable for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Csv(_) => "csv_syntax",
            IngestError::Io(_) => "io",
            IngestError::MissingColumns(_) => "missing_columns",
            IngestError::InvalidAmount { .. } => "invalid_amount",
            IngestError::NoValidRows { .. } => "no_valid_rows",
        }
    }
}
