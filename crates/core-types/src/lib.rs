pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::MarketCategory;
pub use error::CoreError;
pub use structs::{
    DEFAULT_STAKE, DailyAggregate, EnrichedTrade, MonthBankrollPoint, TeamProfit, TradeRecord,
    implied_odds,
};
