//! Terminal rendering of a `TradeReport`.

use analytics::{least_profitable, most_profitable, TradeReport};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use core_types::{EnrichedTrade, TeamProfit};
use rust_decimal::Decimal;

const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn print_report(report: &TradeReport, top_teams: usize) {
    println!();
    println!("Trading Performance");
    println!();

    if report.rows_dropped > 0 {
        println!(
            "{} row(s) were skipped because their dates could not be parsed.",
            report.rows_dropped
        );
        println!();
    }

    print_summary(report);
    print_markets(report);
    print_teams(&report.team_profits, top_teams);
    print_daily(report);
    print_month_bankroll(report);
    print_trades(&report.trades);
}

fn print_summary(report: &TradeReport) {
    let summary = &report.summary;

    // Only a real win or loss is shown as the extreme trade.
    let best = summary.best_trade.as_ref().filter(|t| t.is_win());
    let worst = summary.worst_trade.as_ref().filter(|t| t.is_loss());

    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total P/L"),
        pnl_cell(summary.total_pnl),
    ]);
    table.add_row(vec![Cell::new("Total Entries"), Cell::new(summary.total_entries)]);
    table.add_row(vec![
        Cell::new("Win Rate"),
        Cell::new(format!("{:.1}%", summary.win_rate_pct)),
    ]);
    table.add_row(vec![
        Cell::new("Avg P/L per Active Day"),
        pnl_cell(summary.avg_pnl_per_active_day),
    ]);
    table.add_row(vec![Cell::new("Biggest Win"), extreme_cell(best)]);
    table.add_row(vec![Cell::new("Biggest Loss"), extreme_cell(worst)]);

    println!("Summary");
    println!("{table}");
    println!();
}

fn print_markets(report: &TradeReport) {
    let mut table = new_table(vec!["Market Type", "Entries", "P/L", "Win%"]);
    for market in &report.markets {
        let win_rate = market
            .win_rate_pct
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(market.category),
            Cell::new(market.total_entries),
            pnl_cell(market.total_pnl),
            Cell::new(win_rate),
        ]);
    }

    println!("Performance by Market Type");
    println!("{table}");
    println!();
}

fn print_teams(profits: &[TeamProfit], top_teams: usize) {
    println!("Profitability by Team");
    if profits.is_empty() {
        println!("No team data found in the market descriptions.");
        println!();
        return;
    }

    for (title, teams) in [
        ("Most Profitable Teams", most_profitable(profits, top_teams)),
        ("Least Profitable Teams", least_profitable(profits, top_teams)),
    ] {
        let mut table = new_table(vec!["Team", "Total P/L"]);
        for team in teams {
            table.add_row(vec![Cell::new(&team.team), pnl_cell(team.total_pnl)]);
        }
        println!("{title}");
        println!("{table}");
    }
    println!();
}

fn print_daily(report: &TradeReport) {
    let mut table = new_table(vec!["Date", "Daily P/L"]);
    for day in &report.daily {
        table.add_row(vec![
            Cell::new(day.date.format(DATE_FORMAT)),
            pnl_cell(day.profit_loss),
        ]);
    }

    println!("Daily P/L");
    println!("{table}");
    println!();
}

fn print_month_bankroll(report: &TradeReport) {
    let mut table = new_table(vec!["Month", "Date", "Month-to-Date Bankroll"]);
    for point in &report.month_bankroll {
        let date = if point.origin {
            "start".to_string()
        } else {
            point.date.format(DATE_FORMAT).to_string()
        };
        table.add_row(vec![
            Cell::new(&point.month),
            Cell::new(date),
            pnl_cell(point.cumulative_pnl),
        ]);
    }

    println!("Bankroll Growth (Monthly Reset)");
    println!("{table}");
    println!();
}

fn print_trades(trades: &[EnrichedTrade]) {
    let mut table = new_table(vec!["Start", "Market", "Market Type", "Odds", "P/L", "Bankroll"]);
    // Newest first.
    for trade in trades.iter().rev() {
        let odds = trade
            .odds
            .map(|o| format!("{:.2}", o))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(trade.start_time.format(DATE_TIME_FORMAT)),
            Cell::new(&trade.market),
            Cell::new(trade.category),
            Cell::new(odds),
            pnl_cell(trade.profit_loss),
            pnl_cell(trade.cumulative_pnl),
        ]);
    }

    println!("All Trades");
    println!("{table}");
    println!();
}

fn new_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn extreme_cell(trade: Option<&EnrichedTrade>) -> Cell {
    match trade {
        Some(trade) => Cell::new(format!(
            "{} ({} on {})",
            format_pnl(trade.profit_loss),
            trade.market,
            trade.start_time.format(DATE_TIME_FORMAT)
        ))
        .fg(pnl_color(trade.profit_loss)),
        None => Cell::new("N/A"),
    }
}

fn pnl_cell(value: Decimal) -> Cell {
    Cell::new(format_pnl(value)).fg(pnl_color(value))
}

fn pnl_color(value: Decimal) -> Color {
    if value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn format_pnl(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2}", value)
    } else {
        format!("-{:.2}", value.abs())
    }
}
