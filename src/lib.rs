mod card;
mod config;
mod error;
mod game_state;
mod hand;
pub mod strategy;

pub use card::{Card, Rank, Suit};
pub use config::{AdvisorConfig, StrategyKind};
pub use error::{Error, Result};
pub use game_state::{GameState, Inventory, CARDS_PER_DECK, MAX_DECKS, MIN_DECKS};
pub use hand::{can_split_cards, hand_value, hi_lo, HandValue};
pub use strategy::{
    Action, BasicStrategy, CountInfo, CountingStrategy, EnhancedStrategy, Recommendation, Strategy,
};
