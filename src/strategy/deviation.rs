//! Count-based departures from basic strategy.
//!
//! Each engine owns an ordered rule list. Rules are checked top to bottom
//! against the current hand, dealer up card and true count; the first rule
//! that fires replaces the basic-strategy action and explanation.

use log::{debug, trace};

use super::{ready, Action, BasicStrategy, CountInfo, Recommendation, Strategy};
use crate::{GameState, Result};

/// Which side of the threshold the true count must be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    AtLeast,
    AtMost,
}

impl Trigger {
    fn fires(&self, true_count: f64, threshold: f64) -> bool {
        match self {
            Trigger::AtLeast => true_count >= threshold,
            Trigger::AtMost => true_count <= threshold,
        }
    }
}

/// Player-hand condition of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandShape {
    /// Any hand; the rule depends on the dealer card only.
    Any,
    /// Hard total.
    Hard(u16),
    /// Soft total.
    Soft(u16),
    /// Soft total on two cards.
    SoftTwoCard(u16),
    /// Any total on two cards.
    TwoCard(u16),
    /// Splittable pair of the given card value (10 covers matching tens and faces).
    Pair(u8),
}

/// What a firing rule does to the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Play(Action),
    /// Explanation only; the action stays as basic strategy has it.
    Advise,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub hand: HandShape,
    /// Up-card value, 11 for an ace.
    pub dealer_value: u8,
    pub trigger: Trigger,
    pub threshold: f64,
    pub outcome: Outcome,
    pub phrase: &'static str,
}

/// Snapshot of the decision point that rules are matched against.
struct Situation {
    total: u16,
    is_soft: bool,
    two_cards: bool,
    pair_value: Option<u8>,
    dealer_value: u8,
}

impl Situation {
    fn read(state: &GameState, dealer_value: u8) -> Self {
        let hand = state.player_hand_value();
        Self {
            total: hand.total,
            is_soft: hand.is_soft,
            two_cards: state.can_double_down(),
            pair_value: state.can_split().then(|| state.player_hand()[0].value()),
            dealer_value,
        }
    }
}

impl HandShape {
    fn matches(&self, s: &Situation) -> bool {
        match *self {
            HandShape::Any => true,
            HandShape::Hard(total) => !s.is_soft && s.total == total,
            HandShape::Soft(total) => s.is_soft && s.total == total,
            HandShape::SoftTwoCard(total) => s.is_soft && s.two_cards && s.total == total,
            HandShape::TwoCard(total) => s.two_cards && s.total == total,
            HandShape::Pair(value) => s.pair_value == Some(value),
        }
    }
}

impl Deviation {
    fn fires(&self, s: &Situation, true_count: f64) -> bool {
        self.dealer_value == s.dealer_value
            && self.hand.matches(s)
            && self.trigger.fires(true_count, self.threshold)
    }

    fn explain(&self, true_count: f64) -> String {
        match (self.outcome, self.trigger) {
            (Outcome::Advise, _) => format!("{} with true count {true_count:.1}.", self.phrase),
            (Outcome::Play(_), Trigger::AtLeast) => {
                format!("{} due to true count {true_count:.1}.", self.phrase)
            }
            (Outcome::Play(_), Trigger::AtMost) => {
                format!("{} due to very negative true count {true_count:.1}.", self.phrase)
            }
        }
    }
}

const fn at_least(
    hand: HandShape,
    dealer_value: u8,
    threshold: f64,
    outcome: Outcome,
    phrase: &'static str,
) -> Deviation {
    Deviation {
        hand,
        dealer_value,
        trigger: Trigger::AtLeast,
        threshold,
        outcome,
        phrase,
    }
}

const fn at_most(
    hand: HandShape,
    dealer_value: u8,
    threshold: f64,
    outcome: Outcome,
    phrase: &'static str,
) -> Deviation {
    Deviation {
        hand,
        dealer_value,
        trigger: Trigger::AtMost,
        threshold,
        outcome,
        phrase,
    }
}

use Action::{Double, Split, Stand};
use HandShape::{Any, Hard, Pair, Soft, SoftTwoCard, TwoCard};
use Outcome::{Advise, Play};

const ACE: u8 = 11;

const COUNTING: &[Deviation] = &[
    at_least(Any, ACE, 3.0, Advise, "Consider taking insurance"),
    at_least(Hard(16), 10, 0.0, Play(Stand), "Stand with 16 vs 10"),
    at_least(Hard(15), 10, 4.0, Play(Stand), "Stand with 15 vs 10"),
    at_least(TwoCard(10), ACE, 4.0, Play(Double), "Double down with 10 vs A"),
    at_least(Hard(12), 3, 2.0, Play(Stand), "Stand with 12 vs 3"),
    at_least(Hard(12), 2, 3.0, Play(Stand), "Stand with 12 vs 2"),
    at_least(TwoCard(11), ACE, 1.0, Play(Double), "Double down with 11 vs A"),
    at_least(TwoCard(9), 2, 1.0, Play(Double), "Double down with 9 vs 2"),
    at_most(Pair(10), 5, -4.0, Play(Split), "Split 10s vs 5"),
    at_most(Pair(10), 6, -4.0, Play(Split), "Split 10s vs 6"),
];

const ENHANCED: &[Deviation] = &[
    at_least(Any, ACE, 2.5, Advise, "Consider taking insurance"),
    // Standing
    at_least(Hard(16), 10, 0.0, Play(Stand), "Stand with 16 vs 10"),
    at_least(Hard(15), 10, 3.0, Play(Stand), "Stand with 15 vs 10"),
    at_least(Hard(14), 10, 4.0, Play(Stand), "Stand with 14 vs 10"),
    at_least(Hard(13), 10, 5.0, Play(Stand), "Stand with 13 vs 10"),
    at_least(Hard(12), 10, 5.0, Play(Stand), "Stand with 12 vs 10"),
    at_least(Hard(12), 2, 2.0, Play(Stand), "Stand with 12 vs 2"),
    at_least(Hard(12), 3, 1.0, Play(Stand), "Stand with 12 vs 3"),
    at_least(Hard(12), 4, 1.0, Play(Stand), "Stand with 12 vs 4"),
    at_least(Hard(12), 5, 1.5, Play(Stand), "Stand with 12 vs 5"),
    at_least(Hard(12), 6, 2.0, Play(Stand), "Stand with 12 vs 6"),
    at_least(Hard(13), 2, 1.0, Play(Stand), "Stand with 13 vs 2"),
    at_least(Hard(13), 3, 1.5, Play(Stand), "Stand with 13 vs 3"),
    // Soft hands
    at_least(Soft(18), 9, 0.5, Play(Stand), "Stand on soft 18 vs 9"),
    at_least(Soft(17), 2, 1.0, Play(Stand), "Stand on soft 17 vs 2"),
    at_least(SoftTwoCard(16), 4, 0.5, Play(Double), "Double on soft 16 vs 4"),
    at_least(SoftTwoCard(15), 4, 0.5, Play(Double), "Double on soft 15 vs 4"),
    at_least(SoftTwoCard(14), 5, 0.5, Play(Double), "Double on soft 14 vs 5"),
    at_least(SoftTwoCard(13), 5, 0.5, Play(Double), "Double on soft 13 vs 5"),
    // Doubling
    at_least(TwoCard(11), ACE, 0.5, Play(Double), "Double on 11 vs A"),
    at_least(TwoCard(10), ACE, 1.0, Play(Double), "Double on 10 vs A"),
    at_least(TwoCard(10), 10, 1.0, Play(Double), "Double on 10 vs 10"),
    at_least(TwoCard(9), 2, 0.5, Play(Double), "Double on 9 vs 2"),
    at_least(TwoCard(9), 3, 0.5, Play(Double), "Double on 9 vs 3"),
    // Splitting
    at_most(Pair(10), 5, -3.0, Play(Split), "Split 10s vs 5"),
    at_most(Pair(10), 6, -3.0, Play(Split), "Split 10s vs 6"),
    at_least(Pair(8), 10, 1.0, Play(Split), "Split 8s vs 10"),
    at_least(Pair(6), 7, 1.0, Play(Split), "Split 6s vs 7"),
    at_least(Pair(5), 10, 1.0, Play(Split), "Split 5s vs 10"),
    at_least(Pair(4), 4, 1.0, Play(Split), "Split 4s vs 4"),
    at_least(Pair(3), 8, 1.0, Play(Split), "Split 3s vs 8"),
    at_least(Pair(2), 8, 1.0, Play(Split), "Split 2s vs 8"),
    // Surrender is advice only
    at_most(Hard(15), 10, -1.0, Advise, "Consider surrendering 15 vs 10"),
    at_most(Hard(14), 10, -2.0, Advise, "Consider surrendering 14 vs 10"),
    at_most(Hard(13), 10, -3.0, Advise, "Consider surrendering 13 vs 10"),
];

/// An ordered, first-match-wins list of deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationSet {
    rules: &'static [Deviation],
    marker: &'static str,
}

impl DeviationSet {
    /// Standard Hi-Lo index plays.
    pub fn counting() -> Self {
        Self {
            rules: COUNTING,
            marker: "(This is a deviation from basic strategy based on the count.)",
        }
    }

    /// Wider rule list with lower thresholds.
    pub fn enhanced() -> Self {
        Self {
            rules: ENHANCED,
            marker: "(This is an enhanced strategy deviation based on the count.)",
        }
    }

    pub fn rules(&self) -> &'static [Deviation] {
        self.rules
    }

    /// The first rule that fires for this state and true count; `None`
    /// when nothing fires or no up card is set.
    pub fn first_match(&self, state: &GameState, true_count: f64) -> Option<&'static Deviation> {
        let dealer_value = state.dealer_up_card()?.value();
        let situation = Situation::read(state, dealer_value);
        self.rules
            .iter()
            .find(|rule| rule.fires(&situation, true_count))
    }

    fn apply(&self, basic: &BasicStrategy, state: &GameState) -> Result<Recommendation> {
        ready(state)?;
        let mut rec = basic.recommend(state)?;
        let count = CountInfo::from_state(state);
        let true_count = count.true_count;

        match self.first_match(state, true_count) {
            Some(rule) => {
                trace!("Deviation fired: {} at true count {true_count:.2}", rule.phrase);
                if let Outcome::Play(action) = rule.outcome {
                    rec.action = action;
                }
                rec.explanation = rule.explain(true_count);
                rec.subsequent_advice = if rec.subsequent_advice.is_empty() {
                    self.marker.to_string()
                } else {
                    format!("{} {}", rec.subsequent_advice, self.marker)
                };
            }
            None => {
                rec.explanation =
                    format!("Follow basic strategy. Current true count: {true_count:.1}.");
            }
        }

        debug!("Count-adjusted strategy: {} ({})", rec.action, rec.explanation);
        rec.count = Some(count);
        Ok(rec)
    }
}

/// Basic strategy with the standard Hi-Lo deviations.
#[derive(Debug, Clone, Copy)]
pub struct CountingStrategy {
    basic: BasicStrategy,
    deviations: DeviationSet,
}

impl CountingStrategy {
    pub fn new() -> Self {
        Self {
            basic: BasicStrategy::new(),
            deviations: DeviationSet::counting(),
        }
    }
}

impl Default for CountingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for CountingStrategy {
    fn recommend(&self, state: &GameState) -> Result<Recommendation> {
        self.deviations.apply(&self.basic, state)
    }
}

/// Basic strategy with the enhanced deviation list.
#[derive(Debug, Clone, Copy)]
pub struct EnhancedStrategy {
    basic: BasicStrategy,
    deviations: DeviationSet,
}

impl EnhancedStrategy {
    pub fn new() -> Self {
        Self {
            basic: BasicStrategy::new(),
            deviations: DeviationSet::enhanced(),
        }
    }
}

impl Default for EnhancedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for EnhancedStrategy {
    fn recommend(&self, state: &GameState) -> Result<Recommendation> {
        self.deviations.apply(&self.basic, state)
    }
}
