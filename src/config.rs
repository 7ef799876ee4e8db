use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::strategy::{BasicStrategy, CountingStrategy, EnhancedStrategy, Strategy};
use crate::{Error, GameState, Result};

/// Which engine produces recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Charts only
    Basic,
    /// Charts plus the standard Hi-Lo deviations
    Counting,
    /// Charts plus the wider, lower-threshold deviation list
    Enhanced,
}

impl StrategyKind {
    pub fn engine(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Basic => Box::new(BasicStrategy::new()),
            StrategyKind::Counting => Box::new(CountingStrategy::new()),
            StrategyKind::Enhanced => Box::new(EnhancedStrategy::new()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(StrategyKind::Basic),
            "counting" => Ok(StrategyKind::Counting),
            "enhanced" => Ok(StrategyKind::Enhanced),
            _ => Err(Error::Precondition("strategy must be basic, counting or enhanced")),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Basic => "basic",
            StrategyKind::Counting => "counting",
            StrategyKind::Enhanced => "enhanced",
        };
        f.write_str(name)
    }
}

/// Session settings chosen by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Number of decks in the shoe (1-8)
    pub num_decks: u8,

    /// Engine used for recommendations
    pub strategy: StrategyKind,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            num_decks: 1,
            strategy: StrategyKind::Basic,
        }
    }
}

impl AdvisorConfig {
    pub fn single_deck() -> Self {
        Self::default()
    }

    /// Typical casino shoe, counted with the standard deviations
    pub fn six_deck_shoe() -> Self {
        Self {
            num_decks: 6,
            strategy: StrategyKind::Counting,
        }
    }

    pub fn eight_deck_shoe() -> Self {
        Self {
            num_decks: 8,
            strategy: StrategyKind::Enhanced,
        }
    }

    pub fn validate(&self) -> Result<()> {
        GameState::check_deck_count(self.num_decks)
    }

    pub fn new_state(&self) -> Result<GameState> {
        GameState::new(self.num_decks)
    }

    pub fn engine(&self) -> Box<dyn Strategy> {
        self.strategy.engine()
    }
}
