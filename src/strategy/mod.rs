use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, GameState, Result};

mod basic;
mod deviation;
mod table;

pub use basic::BasicStrategy;
pub use deviation::{
    CountingStrategy, Deviation, DeviationSet, EnhancedStrategy, HandShape, Outcome, Trigger,
};
pub use table::StrategyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    /// One-letter code used in strategy charts.
    pub fn code(&self) -> char {
        match self {
            Action::Hit => 'H',
            Action::Stand => 'S',
            Action::Double => 'D',
            Action::Split => 'P',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::Double => "Double",
            Action::Split => "Split",
        };
        f.write_str(name)
    }
}

/// Count snapshot attached by the counting engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountInfo {
    pub running_count: i32,
    pub true_count: f64,
    pub narrative: String,
}

impl CountInfo {
    pub(crate) fn from_state(state: &GameState) -> Self {
        let running_count = state.running_count();
        let true_count = state.true_count();
        let composition = if true_count > 0.0 {
            "more high cards"
        } else {
            "more low cards"
        };
        Self {
            running_count,
            true_count,
            narrative: format!(
                "Running count: {running_count}, True count: {true_count:.1}. \
                 This affects optimal decisions as the count indicates {composition} remaining."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub explanation: String,
    pub subsequent_advice: String,
    pub bust_probability: f64,
    pub count: Option<CountInfo>,
}

/// Anything that can advise on the current decision point.
pub trait Strategy {
    fn recommend(&self, state: &GameState) -> Result<Recommendation>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn recommend(&self, state: &GameState) -> Result<Recommendation> {
        (**self).recommend(state)
    }
}

/// Shared precondition of every engine; returns the dealer's up-card value.
pub(crate) fn ready(state: &GameState) -> Result<u8> {
    if state.player_hand().is_empty() {
        return Err(Error::Precondition("player hand is empty"));
    }
    state
        .dealer_up_card()
        .map(|card| card.value())
        .ok_or(Error::Precondition("dealer up card is not set"))
}
