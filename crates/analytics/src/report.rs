use core_types::{DailyAggregate, EnrichedTrade, MarketCategory, MonthBankrollPoint, TeamProfit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows for one history export.
///
/// This struct is the final output of the `ReportEngine` and is what the CLI
/// renders and the web server returns. It is either produced whole or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReport {
    /// Every trade, oldest first, with the running account balance.
    pub trades: Vec<EnrichedTrade>,
    /// Profit per team, most profitable first.
    pub team_profits: Vec<TeamProfit>,
    /// Profit per calendar day, oldest first.
    pub daily: Vec<DailyAggregate>,
    /// The month-reset bankroll chart series.
    pub month_bankroll: Vec<MonthBankrollPoint>,
    pub summary: SummaryMetrics,
    /// Per-category performance, most profitable first.
    pub markets: Vec<MarketSummary>,
    /// Rows of the export discarded because a timestamp did not parse.
    pub rows_dropped: usize,
}

/// The headline KPIs of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_pnl: Decimal,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_entries: usize,
    /// Winning trades as a percentage of all entries; 0 when there are none.
    pub win_rate_pct: Decimal,
    /// Distinct calendar days with at least one trade.
    pub active_days: usize,
    /// `total_pnl / active_days`; 0 when there are no active days.
    pub avg_pnl_per_active_day: Decimal,
    pub best_trade: Option<EnrichedTrade>,
    pub worst_trade: Option<EnrichedTrade>,
}

impl SummaryMetrics {
    /// Creates a zeroed-out summary, the result for an empty history.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
            total_entries: 0,
            win_rate_pct: Decimal::ZERO,
            active_days: 0,
            avg_pnl_per_active_day: Decimal::ZERO,
            best_trade: None,
            worst_trade: None,
        }
    }
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Performance of one market category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub category: MarketCategory,
    pub total_entries: usize,
    pub total_pnl: Decimal,
    pub wins: usize,
    pub losses: usize,
    /// `None` only for a category with no entries.
    pub win_rate_pct: Option<Decimal>,
}

impl MarketSummary {
    pub fn new(category: MarketCategory) -> Self {
        Self {
            category,
            total_entries: 0,
            total_pnl: Decimal::ZERO,
            wins: 0,
            losses: 0,
            win_rate_pct: None,
        }
    }
}

impl TradeReport {
    /// A report for a history with no trades.
    pub fn empty() -> Self {
        Self {
            trades: Vec::new(),
            team_profits: Vec::new(),
            daily: Vec::new(),
            month_bankroll: Vec::new(),
            summary: SummaryMetrics::new(),
            markets: Vec::new(),
            rows_dropped: 0,
        }
    }
}
