use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to load the trade history: {0}")]
    Ingest(#[from] ingest::IngestError),

    #[error("Invalid trade data: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Invalid team pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}

impl AnalyticsError {
    /// A running total left the range `Decimal` can represent.
    pub(crate) fn overflow(total: &str) -> Self {
        AnalyticsError::Calculation(format!("{total} overflowed"))
    }

    /// A short, stable name for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::Ingest(e) => e.kind(),
            AnalyticsError::Core(_) => "invalid_trade",
            AnalyticsError::Pattern(_) => "invalid_pattern",
            AnalyticsError::Calculation(_) => "calculation",
        }
    }
}
