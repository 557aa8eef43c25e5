use crate::bankroll;
use crate::classifier::classify;
use crate::error::AnalyticsError;
use crate::report::{MarketSummary, TradeReport};
use crate::teams::TeamExtractor;
use configuration::ReportSettings;
use core_types::{EnrichedTrade, MarketCategory, TradeRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator that turns parsed trade records into a `TradeReport`.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    stake: Decimal,
    teams: TeamExtractor,
}

impl ReportEngine {
    pub fn new(stake: Decimal, sport_prefix: &str) -> Result<Self, AnalyticsError> {
        Ok(Self {
            stake,
            teams: TeamExtractor::new(sport_prefix)?,
        })
    }

    pub fn from_settings(settings: &ReportSettings) -> Result<Self, AnalyticsError> {
        Self::new(settings.stake, &settings.sport_prefix)
    }

    /// The main entry point for building a report.
    ///
    /// # Arguments
    ///
    /// * `records` - Every valid trade of the export, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the complete `TradeReport` or an `AnalyticsError`.
    /// No partial report is ever returned.
    pub fn calculate(&self, records: Vec<TradeRecord>) -> Result<TradeReport, AnalyticsError> {
        let mut report = TradeReport::empty();

        if records.is_empty() {
            // Every metric of an empty history is zero or undefined.
            return Ok(report);
        }

        report.trades = self.enrich(records)?;
        report.daily = bankroll::daily_aggregates(&report.trades)?;
        report.month_bankroll = bankroll::month_reset_series(&report.daily)?;
        report.team_profits = self.teams.team_profits(&report.trades)?;

        self.calculate_summary(&mut report)?;
        self.calculate_market_breakdown(&mut report)?;

        tracing::info!(
            trades = report.trades.len(),
            days = report.daily.len(),
            teams = report.team_profits.len(),
            total_pnl = %report.summary.total_pnl,
            "Trade report calculated."
        );

        Ok(report)
    }

    /// Sorts the records chronologically and attaches category, stake, odds
    /// and the running account balance to each one.
    fn enrich(&self, mut records: Vec<TradeRecord>) -> Result<Vec<EnrichedTrade>, AnalyticsError> {
        // Stable: trades opened at the same minute keep their export order.
        records.sort_by_key(|record| record.start_time);

        let mut running = Decimal::ZERO;
        records
            .into_iter()
            .map(|record| -> Result<EnrichedTrade, AnalyticsError> {
                running = running
                    .checked_add(record.profit_loss)
                    .ok_or_else(|| AnalyticsError::overflow("running bankroll"))?;
                let category = classify(&record.market);
                Ok(EnrichedTrade::new(record, category, self.stake, running)?)
            })
            .collect()
    }

    /// Calculates the headline KPIs from the enriched trades.
    fn calculate_summary(&self, report: &mut TradeReport) -> Result<(), AnalyticsError> {
        let trades = &report.trades;
        let summary = &mut report.summary;

        summary.total_entries = trades.len();
        summary.total_pnl = trades.last().map_or(Decimal::ZERO, |t| t.cumulative_pnl);
        summary.winning_trades = trades.iter().filter(|t| t.is_win()).count();
        summary.losing_trades = trades.iter().filter(|t| t.is_loss()).count();
        summary.win_rate_pct = percentage(summary.winning_trades, summary.total_entries)?;

        summary.active_days = report.daily.len();
        if summary.active_days > 0 {
            summary.avg_pnl_per_active_day = summary
                .total_pnl
                .checked_div(Decimal::from(summary.active_days))
                .ok_or_else(|| {
                    AnalyticsError::Calculation("average per active day".to_string())
                })?;
        }

        // The first occurrence wins ties, in chronological order.
        let mut best: Option<&EnrichedTrade> = None;
        let mut worst: Option<&EnrichedTrade> = None;
        for trade in trades {
            if best.is_none_or(|b| trade.profit_loss > b.profit_loss) {
                best = Some(trade);
            }
            if worst.is_none_or(|w| trade.profit_loss < w.profit_loss) {
                worst = Some(trade);
            }
        }
        summary.best_trade = best.cloned();
        summary.worst_trade = worst.cloned();

        Ok(())
    }

    /// Groups the trades by market category, most profitable category first.
    fn calculate_market_breakdown(&self, report: &mut TradeReport) -> Result<(), AnalyticsError> {
        let mut by_category: BTreeMap<MarketCategory, MarketSummary> = BTreeMap::new();
        for trade in &report.trades {
            let entry = by_category
                .entry(trade.category)
                .or_insert_with(|| MarketSummary::new(trade.category));
            entry.total_entries += 1;
            entry.total_pnl = entry
                .total_pnl
                .checked_add(trade.profit_loss)
                .ok_or_else(|| AnalyticsError::overflow("market total"))?;
            if trade.is_win() {
                entry.wins += 1;
            } else if trade.is_loss() {
                entry.losses += 1;
            }
        }

        let mut markets = Vec::with_capacity(by_category.len());
        for mut market in by_category.into_values() {
            if market.total_entries > 0 {
                market.win_rate_pct = Some(percentage(market.wins, market.total_entries)?);
            }
            markets.push(market);
        }
        // Stable, so equal totals keep category priority order.
        markets.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));

        report.markets = markets;
        Ok(())
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> Result<Decimal, AnalyticsError> {
    if whole == 0 {
        return Ok(Decimal::ZERO);
    }
    Decimal::from(part)
        .checked_div(Decimal::from(whole))
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .ok_or_else(|| AnalyticsError::Calculation(format!("{part} / {whole}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use core_types::DEFAULT_STAKE;
    use rust_decimal_macros::dec;

    fn engine() -> ReportEngine {
        ReportEngine::new(DEFAULT_STAKE, "Futebol").unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record(market: &str, start: NaiveDateTime, profit_loss: Decimal) -> TradeRecord {
        TradeRecord {
            market: market.to_string(),
            start_time: start,
            resolved_at: start,
            profit_loss,
        }
    }

    #[test]
    fn empty_history_yields_zeroed_report() {
        let report = engine().calculate(Vec::new()).unwrap();
        assert_eq!(report.summary.win_rate_pct, Decimal::ZERO);
        assert_eq!(report.summary.avg_pnl_per_active_day, Decimal::ZERO);
        assert!(report.summary.best_trade.is_none());
        assert!(report.trades.is_empty());
        assert!(report.markets.is_empty());
    }

    #[test]
    fn trades_are_sorted_stably_before_accumulating() {
        let records = vec![
            record("late", at(2, 11), dec!(-20)),
            record("tie-first", at(1, 10), dec!(50)),
            record("tie-second", at(1, 10), dec!(5)),
        ];
        let report = engine().calculate(records).unwrap();

        let order: Vec<&str> = report.trades.iter().map(|t| t.market.as_str()).collect();
        assert_eq!(order, vec!["tie-first", "tie-second", "late"]);
        let running: Vec<Decimal> = report.trades.iter().map(|t| t.cumulative_pnl).collect();
        assert_eq!(running, vec![dec!(50), dec!(55), dec!(35)]);
    }

    #[test]
    fn summary_metrics_cover_wins_days_and_extremes() {
        let records = vec![
            record("a", at(1, 10), dec!(100)),
            record("b", at(1, 12), dec!(-40)),
            record("c", at(2, 9), dec!(100)),
            record("d", at(3, 9), Decimal::ZERO),
            record("e", at(3, 10), dec!(-40)),
        ];
        let report = engine().calculate(records).unwrap();
        let summary = &report.summary;

        assert_eq!(summary.total_entries, 5);
        assert_eq!(summary.total_pnl, dec!(120));
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.losing_trades, 2);
        assert_eq!(summary.win_rate_pct, dec!(40));
        assert_eq!(summary.active_days, 3);
        assert_eq!(summary.avg_pnl_per_active_day, dec!(40));
        assert_eq!(summary.best_trade.as_ref().unwrap().market, "a");
        assert_eq!(summary.worst_trade.as_ref().unwrap().market, "b");
    }

    #[test]
    fn markets_are_summarised_and_ranked() {
        let records = vec![
            record("Resultado da Partida", at(1, 10), dec!(-30)),
            record("Handicap -1", at(1, 11), dec!(80)),
            record("Handicap +1", at(1, 12), dec!(-10)),
            record("Escanteios", at(1, 13), Decimal::ZERO),
        ];
        let report = engine().calculate(records).unwrap();

        let ranked: Vec<(MarketCategory, Decimal)> =
            report.markets.iter().map(|m| (m.category, m.total_pnl)).collect();
        assert_eq!(
            ranked,
            vec![
                (MarketCategory::Handicap, dec!(70)),
                (MarketCategory::Corners, dec!(0)),
                (MarketCategory::MatchResult, dec!(-30)),
            ]
        );

        let handicap = &report.markets[0];
        assert_eq!((handicap.total_entries, handicap.wins, handicap.losses), (2, 1, 1));
        assert_eq!(handicap.win_rate_pct, Some(dec!(50)));
        let corners = &report.markets[1];
        assert_eq!((corners.wins, corners.losses), (0, 0));
        assert_eq!(corners.win_rate_pct, Some(Decimal::ZERO));
    }

    #[test]
    fn odds_follow_configured_stake() {
        let engine = ReportEngine::new(dec!(100), "Futebol").unwrap();
        let report = engine
            .calculate(vec![
                record("w", at(1, 10), dec!(50)),
                record("l", at(1, 11), dec!(-100)),
            ])
            .unwrap();
        assert_eq!(report.trades[0].odds, Some(dec!(1.5)));
        assert_eq!(report.trades[0].stake, dec!(100));
        assert_eq!(report.trades[1].odds, None);
    }

    #[test]
    fn zero_stake_fails_the_whole_report() {
        let engine = ReportEngine::new(Decimal::ZERO, "Futebol").unwrap();
        let err = engine
            .calculate(vec![record("w", at(1, 10), dec!(50))])
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_trade");
    }

    #[test]
    fn category_overflow_fails_even_when_the_bankroll_fits() {
        // The running balance swings back to zero, the handicap total does not.
        let half = Decimal::MAX / dec!(2) + Decimal::ONE;
        let records = vec![
            record("Handicap", at(1, 10), half),
            record("Escanteios", at(2, 10), -half),
            record("Handicap", at(3, 10), half),
        ];
        let err = engine().calculate(records).unwrap_err();
        assert_eq!(err.kind(), "calculation");
    }
}
