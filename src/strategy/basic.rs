use log::debug;

use super::{ready, Action, Recommendation, Strategy, StrategyTable};
use crate::{GameState, Result};

/// Chart-only strategy that ignores the count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy {
    table: StrategyTable,
}

impl BasicStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the chart action. Pairs win over soft totals, soft over hard;
    /// a soft total missing from the soft chart is read from the hard chart.
    fn chart_action(&self, state: &GameState, dealer_value: u8) -> Action {
        let hand = state.player_hand_value();

        let charted = if state.can_split() {
            let pair_value = state.player_hand()[0].value();
            self.table.pair(pair_value, dealer_value)
        } else {
            hand.is_soft
                .then(|| self.table.soft(hand.total, dealer_value))
                .flatten()
                .or_else(|| self.table.hard(hand.total, dealer_value))
        };
        let action = charted.unwrap_or(Action::Hit);

        if action == Action::Double && !state.can_double_down() {
            Action::Hit
        } else {
            action
        }
    }
}

impl Strategy for BasicStrategy {
    fn recommend(&self, state: &GameState) -> Result<Recommendation> {
        let dealer_value = ready(state)?;
        let action = self.chart_action(state, dealer_value);
        let total = state.player_hand_value().total;

        let explanation = match action {
            Action::Hit => format!("Hit with {total} against dealer's {dealer_value}."),
            Action::Stand => format!("Stand with {total} against dealer's {dealer_value}."),
            Action::Double => format!("Double down with {total} against dealer's {dealer_value}."),
            Action::Split => format!(
                "Split {}'s against dealer's {dealer_value}.",
                state.player_hand()[0].rank().token()
            ),
        };

        let bust_probability = state.bust_probability();
        let bust_percent = (bust_probability * 100.0) as u32;
        let subsequent_advice = match action {
            Action::Hit if bust_probability > 0.5 => {
                format!("Warning: {bust_percent}% chance of busting if you hit.")
            }
            Action::Hit => format!(
                "After hitting, re-evaluate based on your new total. {bust_percent}% chance of busting."
            ),
            Action::Double => {
                "After doubling, you will receive exactly one more card and then must stand."
                    .to_string()
            }
            Action::Split => {
                "After splitting, play each hand according to basic strategy.".to_string()
            }
            Action::Stand => String::new(),
        };

        debug!("Basic strategy: {action} ({explanation})");
        Ok(Recommendation {
            action,
            explanation,
            subsequent_advice,
            bust_probability,
            count: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn state_with(deck_count: u8, player: &[&str], dealer: &str) -> GameState {
        let mut state = GameState::new(deck_count).unwrap();
        for token in player {
            state.add_to_player_hand(token).unwrap();
        }
        state.set_dealer_up_card(dealer).unwrap();
        state
    }

    fn action(player: &[&str], dealer: &str) -> Action {
        BasicStrategy::new()
            .recommend(&state_with(1, player, dealer))
            .unwrap()
            .action
    }

    #[test]
    fn test_hard_16_vs_10_stands() {
        let rec = BasicStrategy::new()
            .recommend(&state_with(1, &["10C", "6D"], "10S"))
            .unwrap();
        assert_eq!(rec.action, Action::Stand);
        assert_eq!(rec.explanation, "Stand with 16 against dealer's 10.");
        assert_eq!(rec.subsequent_advice, "");
        assert!(rec.count.is_none());
    }

    #[test]
    fn test_hard_16_vs_ace_hits_with_warning() {
        let rec = BasicStrategy::new()
            .recommend(&state_with(1, &["10C", "6D"], "AS"))
            .unwrap();
        assert_eq!(rec.action, Action::Hit);
        assert_eq!(rec.explanation, "Hit with 16 against dealer's 11.");
        assert!(rec.bust_probability > 0.5);
        assert!(rec.subsequent_advice.starts_with("Warning: "));
        assert!(rec.subsequent_advice.ends_with("% chance of busting if you hit."));
    }

    #[test]
    fn test_low_hit_reports_bust_chance() {
        let rec = BasicStrategy::new()
            .recommend(&state_with(1, &["5C", "7D"], "2S"))
            .unwrap();
        assert_eq!(rec.action, Action::Hit);
        // 20 of 49 remaining cards bust a 12
        assert_eq!(
            rec.subsequent_advice,
            "After hitting, re-evaluate based on your new total. 40% chance of busting."
        );
    }

    #[test]
    fn test_every_hard_cell_matches_chart() {
        let table = StrategyTable;
        let fillers = ["2C", "3C", "4C", "5C", "6C", "7C", "8C", "9C"];
        for total in 5u16..=19 {
            // Two distinct non-ace cards summing to `total`
            let (a, b) = if total <= 11 { (2u16, total - 2) } else { (total - 10, 10) };
            if a == b || a > 9 || b < 2 {
                continue;
            }
            let first = fillers[usize::from(a - 2)];
            let second = if b == 10 { "KD" } else { fillers[usize::from(b - 2)] };
            let ups = ["2S", "3S", "4S", "5S", "6S", "7S", "8S", "9S", "10S", "AS"];
            for (dealer, up) in ups.iter().enumerate() {
                let expected = table.hard(total, dealer as u8 + 2).unwrap();
                assert_eq!(action(&[first, second], up), expected, "{first} {second} vs {up}");
            }
        }
    }

    #[test]
    fn test_double_downgrades_to_hit_after_two_cards() {
        assert_eq!(action(&["5C", "6D"], "6S"), Action::Double);
        assert_eq!(action(&["2C", "3D", "6H"], "6S"), Action::Hit);
        let rec = BasicStrategy::new()
            .recommend(&state_with(1, &["5C", "6D"], "6S"))
            .unwrap();
        assert_eq!(rec.explanation, "Double down with 11 against dealer's 6.");
        assert_eq!(
            rec.subsequent_advice,
            "After doubling, you will receive exactly one more card and then must stand."
        );
    }

    #[test]
    fn test_aces_always_split() {
        for up in ["2S", "6S", "10S", "AC"] {
            let rec = BasicStrategy::new()
                .recommend(&state_with(1, &["AS", "AD"], up))
                .unwrap();
            assert_eq!(rec.action, Action::Split, "vs {up}");
            assert!(rec.explanation.starts_with("Split A's against dealer's"));
            assert_eq!(
                rec.subsequent_advice,
                "After splitting, play each hand according to basic strategy."
            );
        }
    }

    #[test]
    fn test_pairs_use_pair_chart() {
        assert_eq!(action(&["8S", "8D"], "10S"), Action::Split);
        assert_eq!(action(&["9S", "9D"], "7S"), Action::Stand);
        assert_eq!(action(&["4S", "4D"], "5S"), Action::Split);
        assert_eq!(action(&["4S", "4D"], "4H"), Action::Hit);
        assert_eq!(action(&["5S", "5D"], "9S"), Action::Double);
        assert_eq!(action(&["5S", "5D"], "10S"), Action::Hit);
    }

    #[test]
    fn test_ten_valued_pairs_stand() {
        assert_eq!(action(&["10S", "10D"], "6S"), Action::Stand);
        assert_eq!(action(&["KS", "KD"], "5S"), Action::Stand);
        assert_eq!(action(&["JS", "JD"], "AS"), Action::Stand);
        // Mixed ten-valued cards are a hard 20
        assert_eq!(action(&["10S", "QD"], "5S"), Action::Stand);
    }

    #[test]
    fn test_lone_ace_is_soft_and_falls_back_to_hard_chart() {
        // Soft 11 is not charted; hard 11 says double, which a single card cannot
        assert_eq!(action(&["AS"], "6S"), Action::Hit);
    }

    #[test]
    fn test_soft_looking_hands_use_hard_chart() {
        // A,7 is flagged hard, so hard 18 stands even against 9
        assert_eq!(action(&["AS", "7D"], "9S"), Action::Stand);
        // A,6 reads as hard 17
        assert_eq!(action(&["AS", "6D"], "4S"), Action::Stand);
    }

    #[test]
    fn test_busted_total_defaults_to_hit() {
        assert_eq!(action(&["KS", "QD", "5H"], "6S"), Action::Hit);
    }

    #[test]
    fn test_missing_inputs() {
        let mut state = GameState::new(1).unwrap();
        state.set_dealer_up_card("5S").unwrap();
        assert_eq!(
            BasicStrategy::new().recommend(&state),
            Err(Error::Precondition("player hand is empty"))
        );

        let mut state = GameState::new(1).unwrap();
        state.add_to_player_hand("5S").unwrap();
        assert_eq!(
            BasicStrategy::new().recommend(&state),
            Err(Error::Precondition("dealer up card is not set"))
        );
    }

    #[test]
    fn test_recommend_is_repeatable() {
        let state = state_with(2, &["9C", "3D"], "2S");
        let engine = BasicStrategy::new();
        assert_eq!(engine.recommend(&state).unwrap(), engine.recommend(&state).unwrap());
    }
}
