//! # Tradelens Analytics
//!
//! This crate turns a trader's settled-bet history into the numbers behind the
//! dashboard: enriched trades with a running bankroll, profit per team, profit
//! per day, the month-reset bankroll series and the headline KPIs.
//!
//! ## Architectural Principles
//!
//! - **Pure Calculation:** The `ReportEngine` is a stateless calculator. It takes
//!   parsed `TradeRecord`s as input and produces a `TradeReport` as output. The same
//!   input always yields the same report.
//! - **All or Nothing:** Any failure aborts the report. Callers never see a partial one.
//!
//! ## Public API
//!
//! - `ReportPipeline`: Loads an export and runs the engine over it in one call.
//! - `ReportEngine`: The calculation logic, usable on already-parsed records.
//! - `TradeReport`: The complete output, serializable for the web surface.
//! - `ReportCache`: Content-keyed memoization of finished reports.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

use configuration::Config;
use ingest::{IngestOutcome, TradeLoader};
use std::path::Path;

// Declare the modules that constitute this crate.
pub mod bankroll;
pub mod cache;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod report;
pub mod teams;

// Re-export the key components to create a clean, public-facing API.
pub use cache::ReportCache;
pub use classifier::classify;
pub use engine::ReportEngine;
pub use error::AnalyticsError;
pub use report::{MarketSummary, SummaryMetrics, TradeReport};
pub use teams::{TeamExtractor, least_profitable, most_profitable};

/// Parse, validate, enrich and aggregate: the full path from an uploaded
/// export to a finished `TradeReport`.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    loader: TradeLoader,
    engine: ReportEngine,
}

impl ReportPipeline {
    pub fn new(loader: TradeLoader, engine: ReportEngine) -> Self {
        Self { loader, engine }
    }

    pub fn from_config(config: &Config) -> Result<Self, AnalyticsError> {
        Ok(Self::new(
            TradeLoader::new(config.columns.clone()),
            ReportEngine::from_settings(&config.report)?,
        ))
    }

    /// Builds the report for an export held in memory.
    pub fn run_bytes(&self, content: &[u8]) -> Result<TradeReport, AnalyticsError> {
        let outcome = self.loader.load_bytes(content)?;
        self.finish(outcome)
    }

    /// Builds the report for an export on disk.
    pub fn run_path(&self, path: &Path) -> Result<TradeReport, AnalyticsError> {
        let outcome = self.loader.load_path(path)?;
        self.finish(outcome)
    }

    fn finish(&self, outcome: IngestOutcome) -> Result<TradeReport, AnalyticsError> {
        let mut report = self.engine.calculate(outcome.records)?;
        report.rows_dropped = outcome.rows_dropped;
        Ok(report)
    }
}
