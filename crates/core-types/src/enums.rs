use serde::{Deserialize, Serialize};
use std::fmt;

/// The coarse type of bet a market description belongs to.
///
/// Variants are declared in classification priority order: when a description
/// matches several categories, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketCategory {
    MatchResult,
    OverUnderGoals,
    FirstHalfGoals,
    Halftime,
    CorrectScore,
    BothTeamsScore,
    DrawNoBet,
    DoubleChance,
    Handicap,
    Cards,
    Corners,
    Other,
}

impl MarketCategory {
    /// Every category, in classification priority order.
    pub const ALL: [MarketCategory; 12] = [
        MarketCategory::MatchResult,
        MarketCategory::OverUnderGoals,
        MarketCategory::FirstHalfGoals,
        MarketCategory::Halftime,
        MarketCategory::CorrectScore,
        MarketCategory::BothTeamsScore,
        MarketCategory::DrawNoBet,
        MarketCategory::DoubleChance,
        MarketCategory::Handicap,
        MarketCategory::Cards,
        MarketCategory::Corners,
        MarketCategory::Other,
    ];

    /// Human-readable label used in rendered tables.
    pub fn label(&self) -> &'static str {
        match self {
            MarketCategory::MatchResult => "Match Result",
            MarketCategory::OverUnderGoals => "Over/Under Goals",
            MarketCategory::FirstHalfGoals => "First-Half Goals",
            MarketCategory::Halftime => "Halftime",
            MarketCategory::CorrectScore => "Correct Score",
            MarketCategory::BothTeamsScore => "Both Teams Score",
            MarketCategory::DrawNoBet => "Draw No Bet",
            MarketCategory::DoubleChance => "Double Chance",
            MarketCategory::Handicap => "Handicap",
            MarketCategory::Cards => "Cards",
            MarketCategory::Corners => "Corners",
            MarketCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
