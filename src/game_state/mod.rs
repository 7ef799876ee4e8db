use log::debug;
use serde::{Deserialize, Serialize};

use crate::hand::{can_split_cards, hand_value, hi_lo, HandValue};
use crate::{Card, Error, Result};

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;
pub const CARDS_PER_DECK: u16 = 52;

/// Inventory slot labels. Tens, jacks, queens and kings share the `10` slot.
const SLOTS: [&str; 10] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "A"];

/// Remaining cards per rank, with ten-valued ranks pooled.
/// Index 0=Two, ..., 7=Nine, 8=Ten/J/Q/K, 9=Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [i32; 10],
}

impl Inventory {
    fn full_shoe(deck_count: u8) -> Self {
        let n = i32::from(deck_count);
        let mut counts = [4 * n; 10];
        counts[8] = 16 * n;
        Self { counts }
    }

    fn slot(card: &Card) -> usize {
        if card.is_ace() {
            9
        } else {
            usize::from(card.value() - 2)
        }
    }

    fn remove(&mut self, card: &Card) {
        self.counts[Self::slot(card)] -= 1;
    }

    /// Count for a slot label (`"2"`..`"10"`, `"A"`). Face ranks are not keys.
    pub fn get(&self, rank: &str) -> Option<i32> {
        SLOTS
            .iter()
            .position(|&slot| slot == rank)
            .map(|idx| self.counts[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        SLOTS.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> i32 {
        self.counts.iter().sum()
    }
}

/// Numeric value a slot contributes when checking for a bust: the digit for
/// numeral slots, 10 for the ace slot.
fn slot_bust_value(slot: &str) -> u16 {
    slot.parse().unwrap_or(10)
}

/// Everything the player has seen of the current shoe.
///
/// Deserializing checks the deck count and recomputes the running count
/// from the stored cards; a saved `running_count` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedGameState")]
pub struct GameState {
    deck_count: u8,
    observed_cards: Vec<Card>,
    player_hand: Vec<Card>,
    dealer_up_card: Option<Card>,
    running_count: i32,
}

/// Serialized form of a `GameState`, validated on the way in.
#[derive(Deserialize)]
struct SavedGameState {
    deck_count: u8,
    observed_cards: Vec<Card>,
    player_hand: Vec<Card>,
    dealer_up_card: Option<Card>,
}

impl TryFrom<SavedGameState> for GameState {
    type Error = Error;

    fn try_from(saved: SavedGameState) -> Result<Self> {
        let mut state = Self::new(saved.deck_count)?;
        state.observed_cards = saved.observed_cards;
        state.player_hand = saved.player_hand;
        state.dealer_up_card = saved.dealer_up_card;
        state.running_count = state.seen().map(hi_lo).sum();
        debug!(
            "Loaded shoe: {} card(s) seen, running count {}",
            state.cards_seen(),
            state.running_count
        );
        Ok(state)
    }
}

impl GameState {
    pub fn new(deck_count: u8) -> Result<Self> {
        Self::check_deck_count(deck_count)?;
        Ok(Self {
            deck_count,
            observed_cards: Vec::new(),
            player_hand: Vec::new(),
            dealer_up_card: None,
            running_count: 0,
        })
    }

    pub(crate) fn check_deck_count(deck_count: u8) -> Result<()> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&deck_count) {
            return Err(Error::Precondition("deck count must be between 1 and 8"));
        }
        Ok(())
    }

    /// Starts a fresh shoe with `deck_count` decks, discarding every observation.
    pub fn reset(&mut self, deck_count: u8) -> Result<()> {
        *self = Self::new(deck_count)?;
        debug!("Shoe reset with {deck_count} deck(s)");
        Ok(())
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }

    pub fn observed_cards(&self) -> &[Card] {
        &self.observed_cards
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer_up_card.as_ref()
    }

    // ── Observations ──

    /// Records a card seen dealt or discarded outside the player's and dealer's hands.
    pub fn add_dealt_card(&mut self, token: &str) -> Result<()> {
        let card = Card::parse(token)?;
        self.count(&card);
        self.observed_cards.push(card);
        debug!("Observed {card}, running count {}", self.running_count);
        Ok(())
    }

    pub fn add_to_player_hand(&mut self, token: &str) -> Result<()> {
        let card = Card::parse(token)?;
        self.count(&card);
        self.player_hand.push(card);
        debug!("Player dealt {card}, running count {}", self.running_count);
        Ok(())
    }

    /// Sets the dealer's up card, replacing any previous one. The replaced
    /// card's count contribution stays in the running count.
    pub fn set_dealer_up_card(&mut self, token: &str) -> Result<()> {
        let card = Card::parse(token)?;
        self.count(&card);
        if let Some(previous) = self.dealer_up_card.replace(card) {
            debug!("Dealer up card {previous} replaced by {card}");
        }
        debug!("Dealer shows {card}, running count {}", self.running_count);
        Ok(())
    }

    /// Moves the dealer's up card and the player's cards into the observed
    /// pile. The running count is unchanged since those cards were counted on entry.
    pub fn next_hand(&mut self) {
        if let Some(card) = self.dealer_up_card.take() {
            self.observed_cards.push(card);
        }
        self.observed_cards.append(&mut self.player_hand);
        debug!(
            "Next hand: {} card(s) observed, running count {}",
            self.observed_cards.len(),
            self.running_count
        );
    }

    fn count(&mut self, card: &Card) {
        self.running_count += hi_lo(card);
    }

    fn seen(&self) -> impl Iterator<Item = &Card> {
        self.observed_cards
            .iter()
            .chain(self.player_hand.iter())
            .chain(self.dealer_up_card.iter())
    }

    // ── Queries ──

    pub fn player_hand_value(&self) -> HandValue {
        hand_value(&self.player_hand)
    }

    pub fn can_split(&self) -> bool {
        match self.player_hand.as_slice() {
            [first, second] => can_split_cards(first, second),
            _ => false,
        }
    }

    pub fn can_double_down(&self) -> bool {
        self.player_hand.len() == 2
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Cards removed from the shoe so far, including the player's hand and the up card.
    pub fn cards_seen(&self) -> usize {
        self.seen().count()
    }

    pub fn decks_remaining(&self) -> f64 {
        let total = f64::from(u16::from(self.deck_count) * CARDS_PER_DECK);
        (total - self.cards_seen() as f64) / f64::from(CARDS_PER_DECK)
    }

    /// Running count per remaining deck; 0 once the shoe is exhausted.
    pub fn true_count(&self) -> f64 {
        let decks_remaining = self.decks_remaining();
        if decks_remaining <= 0.0 {
            return 0.0;
        }
        f64::from(self.running_count) / decks_remaining
    }

    pub fn remaining_card_inventory(&self) -> Inventory {
        let mut inventory = Inventory::full_shoe(self.deck_count);
        for card in self.seen() {
            inventory.remove(card);
        }
        inventory
    }

    /// Probability that one more card busts the player's hand.
    pub fn bust_probability(&self) -> f64 {
        let total = self.player_hand_value().total;
        if total >= 21 {
            return 1.0;
        }

        let bust_threshold = 21 - total;
        let inventory = self.remaining_card_inventory();
        let remaining = inventory.total();
        if remaining <= 0 {
            return 0.0;
        }

        let bust_cards: i32 = inventory
            .iter()
            .filter(|(slot, _)| slot_bust_value(slot) > bust_threshold)
            .map(|(_, count)| count)
            .sum();

        f64::from(bust_cards) / f64::from(remaining)
    }
}
