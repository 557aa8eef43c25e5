use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub columns: ColumnNames,
    pub report: ReportSettings,
    pub server: ServerSettings,
}

/// Header names of the four required columns of the history export.
///
/// The defaults match the Portuguese-language export this tool was built for.
/// Override them when the export comes in another locale.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnNames {
    /// Free-text market description.
    pub market: String,
    /// Time the trade was opened.
    pub start_time: String,
    /// Time the market was last resolved.
    pub resolved_at: String,
    /// Signed profit or loss amount.
    pub profit_loss: String,
}

impl ColumnNames {
    /// The required headers, in the order they are reported when missing.
    pub fn required(&self) -> [&str; 4] {
        [
            &self.market,
            &self.start_time,
            &self.resolved_at,
            &self.profit_loss,
        ]
    }
}

/// Contains parameters for report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// The stake assumed for every trade when deriving odds.
    pub stake: Decimal,
    /// Sport prefix of descriptions that name two teams, as in `Futebol / A x B : ...`.
    pub sport_prefix: String,
    /// How many teams the most/least profitable views show.
    pub top_teams: usize,
    /// Maximum number of generated reports kept in memory, keyed by upload content.
    pub cache_capacity: usize,
}

/// Contains parameters for the upload server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address the server binds to, e.g. `127.0.0.1:3000`.
    pub addr: String,
    /// Largest accepted upload, in bytes.
    pub body_limit_bytes: usize,
}
