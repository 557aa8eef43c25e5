use crate::error::AnalyticsError;
use core_types::{EnrichedTrade, TeamProfit};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Pulls the two team names out of descriptions shaped like
/// `Futebol / Home x Away : Market`.
#[derive(Debug, Clone)]
pub struct TeamExtractor {
    pattern: Regex,
}

impl TeamExtractor {
    /// Builds an extractor for descriptions that start with `sport_prefix`.
    pub fn new(sport_prefix: &str) -> Result<Self, AnalyticsError> {
        let pattern = Regex::new(&format!(r"{} / (.+) x (.+) :", regex::escape(sport_prefix)))?;
        Ok(Self { pattern })
    }

    /// Returns both team names, trimmed and uppercased, or `None` when the
    /// description does not name a match.
    pub fn extract(&self, description: &str) -> Option<(String, String)> {
        let captures = self.pattern.captures(description)?;
        let home = captures.get(1)?.as_str().trim().to_uppercase();
        let away = captures.get(2)?.as_str().trim().to_uppercase();
        Some((home, away))
    }

    /// Totals profit and loss per team, most profitable first.
    ///
    /// A trade counts in full towards both of its teams: the figure answers
    /// "how did I do when this team was playing", it is not a split.
    pub fn team_profits(&self, trades: &[EnrichedTrade]) -> Result<Vec<TeamProfit>, AnalyticsError> {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for trade in trades {
            if let Some((home, away)) = self.extract(&trade.market) {
                for team in [home, away] {
                    let total = totals.entry(team).or_default();
                    *total = total
                        .checked_add(trade.profit_loss)
                        .ok_or_else(|| AnalyticsError::overflow("team total"))?;
                }
            }
        }

        let mut profits: Vec<TeamProfit> = totals
            .into_iter()
            .map(|(team, total_pnl)| TeamProfit { team, total_pnl })
            .collect();
        // Stable, so equal totals stay in name order.
        profits.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        Ok(profits)
    }
}

/// The `n` most profitable teams of a list sorted by [`TeamExtractor::team_profits`].
pub fn most_profitable(profits: &[TeamProfit], n: usize) -> &[TeamProfit] {
    &profits[..n.min(profits.len())]
}

/// The `n` least profitable teams, in the same descending order.
pub fn least_profitable(profits: &[TeamProfit], n: usize) -> &[TeamProfit] {
    &profits[profits.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::MarketCategory;
    use rust_decimal_macros::dec;

    fn trade(market: &str, profit_loss: Decimal) -> EnrichedTrade {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        EnrichedTrade {
            market: market.to_string(),
            start_time: at,
            resolved_at: at,
            profit_loss,
            category: MarketCategory::Other,
            stake: dec!(500),
            odds: None,
            cumulative_pnl: profit_loss,
        }
    }

    fn extractor() -> TeamExtractor {
        TeamExtractor::new("Futebol").unwrap()
    }

    #[test]
    fn extracts_trimmed_uppercase_names() {
        let teams = extractor().extract("Futebol /  Flamengo x Palmeiras  : Resultado da Partida");
        assert_eq!(teams, Some(("FLAMENGO".to_string(), "PALMEIRAS".to_string())));
    }

    #[test]
    fn other_conventions_name_no_team() {
        let extractor = extractor();
        assert_eq!(extractor.extract("Futebol / Flamengo v Palmeiras : Handicap"), None);
        assert_eq!(extractor.extract("Tênis / Nadal x Federer : Vencedor"), None);
        assert_eq!(extractor.extract("Resultado da Partida"), None);
    }

    #[test]
    fn captures_are_greedy() {
        // The away side runs to the last " :", the home side to the last " x " before it.
        let teams = extractor().extract("Futebol / Red x Blue x Green : Gols : Mais/Menos");
        assert_eq!(teams, Some(("RED X BLUE".to_string(), "GREEN : GOLS".to_string())));
    }

    #[test]
    fn both_teams_receive_the_full_amount() {
        let profits = extractor()
            .team_profits(&[trade("Futebol / A x B : Handicap", dec!(100))])
            .unwrap();
        assert_eq!(
            profits,
            vec![
                TeamProfit { team: "A".to_string(), total_pnl: dec!(100) },
                TeamProfit { team: "B".to_string(), total_pnl: dec!(100) },
            ]
        );
    }

    #[test]
    fn totals_accumulate_and_sort_descending() {
        let trades = [
            trade("Futebol / A x B : Handicap", dec!(100)),
            trade("Futebol / b x C : Escanteios", dec!(-40)),
            trade("Corrida / X x Y : Vencedor", dec!(999)),
        ];
        let profits = extractor().team_profits(&trades).unwrap();
        let summary: Vec<(&str, Decimal)> =
            profits.iter().map(|p| (p.team.as_str(), p.total_pnl)).collect();
        assert_eq!(summary, vec![("A", dec!(100)), ("B", dec!(60)), ("C", dec!(-40))]);

        assert_eq!(most_profitable(&profits, 1)[0].team, "A");
        assert_eq!(least_profitable(&profits, 1)[0].team, "C");
        assert_eq!(most_profitable(&profits, 10).len(), 3);
        assert_eq!(least_profitable(&profits, 10).len(), 3);
    }

    #[test]
    fn sport_prefix_is_matched_literally() {
        let extractor = TeamExtractor::new("Futebol (BR)").unwrap();
        assert!(extractor.extract("Futebol (BR) / A x B : Handicap").is_some());
        assert!(extractor.extract("Futebol BR / A x B : Handicap").is_none());
    }

    #[test]
    fn overflowing_team_total_is_an_error() {
        let trades = [
            trade("Futebol / A x B : Handicap", Decimal::MAX),
            trade("Futebol / A x C : Handicap", Decimal::MAX),
        ];
        let err = extractor().team_profits(&trades).unwrap_err();
        assert_eq!(err.kind(), "calculation");
    }
}
