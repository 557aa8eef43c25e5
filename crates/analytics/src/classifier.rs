use core_types::MarketCategory;

/// Keyword rules, evaluated top to bottom. The first rule with a keyword
/// contained in the lowercased description decides the category, so a
/// description mentioning several market types lands in the earliest one.
const RULES: &[(&[&str], MarketCategory)] = &[
    (&["resultado da partida"], MarketCategory::MatchResult),
    (
        &["mais/menos gols", "mais/menos", "total de gols"],
        MarketCategory::OverUnderGoals,
    ),
    (&["gols no primeiro tempo"], MarketCategory::FirstHalfGoals),
    (&["intervalo"], MarketCategory::Halftime),
    (&["placar correto"], MarketCategory::CorrectScore),
    (&["ambas as equipes marcam"], MarketCategory::BothTeamsScore),
    (&["empate anula a aposta"], MarketCategory::DrawNoBet),
    (&["chance dupla"], MarketCategory::DoubleChance),
    (&["handicap"], MarketCategory::Handicap),
    (&["cartões"], MarketCategory::Cards),
    (&["escanteios"], MarketCategory::Corners),
];

/// Buckets a market description into exactly one `MarketCategory`.
pub fn classify(description: &str) -> MarketCategory {
    let description = description.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| description.contains(k)))
        .map_or(MarketCategory::Other, |(_, category)| *category)
}
