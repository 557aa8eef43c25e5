use crate::enums::MarketCategory;
use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The stake assumed for every trade. The export does not carry one.
pub const DEFAULT_STAKE: Decimal = dec!(500.00);

/// One settled wager, as read from a row of the history export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Free-text market description, e.g. `Futebol / Santos x Vasco : Resultado da Partida`.
    pub market: String,
    pub start_time: NaiveDateTime,
    pub resolved_at: NaiveDateTime,
    /// Signed profit or loss of the trade in account currency.
    pub profit_loss: Decimal,
}

/// A `TradeRecord` with the fields derived during report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrade {
    pub market: String,
    pub start_time: NaiveDateTime,
    pub resolved_at: NaiveDateTime,
    pub profit_loss: Decimal,
    pub category: MarketCategory,
    pub stake: Decimal,
    /// Implied decimal odds. Only known for winning trades.
    pub odds: Option<Decimal>,
    /// Account balance after this trade, over the whole chronological history.
    pub cumulative_pnl: Decimal,
}

impl EnrichedTrade {
    pub fn new(
        record: TradeRecord,
        category: MarketCategory,
        stake: Decimal,
        cumulative_pnl: Decimal,
    ) -> Result<Self, CoreError> {
        let odds = implied_odds(record.profit_loss, stake)?;
        Ok(Self {
            market: record.market,
            start_time: record.start_time,
            resolved_at: record.resolved_at,
            profit_loss: record.profit_loss,
            category,
            stake,
            odds,
            cumulative_pnl,
        })
    }

    pub fn is_win(&self) -> bool {
        self.profit_loss > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.profit_loss < Decimal::ZERO
    }

    pub fn trade_date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Derives the decimal odds a winning trade was taken at: `profit / stake + 1`.
///
/// Returns `Ok(None)` for flat or losing trades, where the odds cannot be recovered.
pub fn implied_odds(profit_loss: Decimal, stake: Decimal) -> Result<Option<Decimal>, CoreError> {
    if stake <= Decimal::ZERO {
        return Err(CoreError::InvalidInput(
            "stake".to_string(),
            format!("must be positive, got {stake}"),
        ));
    }
    if profit_loss <= Decimal::ZERO {
        return Ok(None);
    }
    let ratio = profit_loss
        .checked_div(stake)
        .ok_or_else(|| CoreError::Calculation(format!("{profit_loss} / {stake} overflowed")))?;
    Ok(Some(ratio + Decimal::ONE))
}

/// Total profit or loss of all trades started on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub profit_loss: Decimal,
}

/// One point of the month-reset bankroll chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBankrollPoint {
    pub date: NaiveDate,
    /// Running profit or loss since the start of `month`.
    pub cumulative_pnl: Decimal,
    /// Month label in `YYYY-MM` form, used to group the chart lines.
    pub month: String,
    /// Marks the synthetic zero point that opens each month's line.
    pub origin: bool,
}

impl MonthBankrollPoint {
    pub fn month_label(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }
}

/// Profit or loss accumulated over every match a team took part in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfit {
    pub team: String,
    pub total_pnl: Decimal,
}
