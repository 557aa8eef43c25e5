use crate::error::AnalyticsError;
use chrono::{Datelike, NaiveDate};
use core_types::{DailyAggregate, EnrichedTrade, MonthBankrollPoint};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sums profit and loss per start date. One entry per day with at least one
/// trade, in ascending date order.
pub fn daily_aggregates(trades: &[EnrichedTrade]) -> Result<Vec<DailyAggregate>, AnalyticsError> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for trade in trades {
        let total = by_day.entry(trade.trade_date()).or_default();
        *total = total
            .checked_add(trade.profit_loss)
            .ok_or_else(|| AnalyticsError::overflow("daily total"))?;
    }
    Ok(by_day
        .into_iter()
        .map(|(date, profit_loss)| DailyAggregate { date, profit_loss })
        .collect())
}

/// Builds the chart series whose running total restarts every calendar month.
///
/// Each month opens with a synthetic zero point on its first active day,
/// followed by the month-to-date total after each active day.
pub fn month_reset_series(
    daily: &[DailyAggregate],
) -> Result<Vec<MonthBankrollPoint>, AnalyticsError> {
    let mut months: BTreeMap<(i32, u32), Vec<&DailyAggregate>> = BTreeMap::new();
    for day in daily {
        months
            .entry((day.date.year(), day.date.month()))
            .or_default()
            .push(day);
    }

    let mut series = Vec::with_capacity(daily.len() + months.len());
    for days in months.into_values() {
        let Some(first) = days.iter().map(|d| d.date).min() else {
            continue;
        };
        let month = MonthBankrollPoint::month_label(first);

        series.push(MonthBankrollPoint {
            date: first,
            cumulative_pnl: Decimal::ZERO,
            month: month.clone(),
            origin: true,
        });

        let mut running = Decimal::ZERO;
        for day in days {
            running = running
                .checked_add(day.profit_loss)
                .ok_or_else(|| AnalyticsError::overflow("month-to-date bankroll"))?;
            series.push(MonthBankrollPoint {
                date: day.date,
                cumulative_pnl: running,
                month: month.clone(),
                origin: false,
            });
        }
    }

    // Stable, so each origin stays ahead of the real point sharing its date.
    series.sort_by_key(|point| point.date);
    Ok(series)
}
