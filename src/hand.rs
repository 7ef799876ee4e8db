use serde::{Deserialize, Serialize};

use crate::Card;

/// Total of a hand after aces have been devalued as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u16,
    /// Aces still counted as 11.
    pub soft_aces: u8,
    /// Only set while the total is 11 or less.
    pub is_soft: bool,
}

/// Calculate the value of a blackjack hand
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        total += u16::from(card.value());
        if card.is_ace() {
            aces += 1;
        }
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        soft_aces: aces,
        is_soft: aces > 0 && total <= 11,
    }
}

/// Check if two cards can be split (identical rank token, so `10` and `J` do not pair)
pub fn can_split_cards(card1: &Card, card2: &Card) -> bool {
    card1.rank() == card2.rank()
}

/// Hi-Lo tag: +1 for 2-6, -1 for tens, faces and aces, 0 for 7-9.
pub fn hi_lo(card: &Card) -> i32 {
    match card.value() {
        2..=6 => 1,
        v if v >= 10 || card.is_ace() => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| Card::parse(t).unwrap()).collect()
    }

    #[test]
    fn test_hand_value_simple() {
        let value = hand_value(&cards(&["2H", "3S"]));
        assert_eq!(value.total, 5);
        assert!(!value.is_soft);
    }

    #[test]
    fn test_hand_value_with_face_cards() {
        assert_eq!(hand_value(&cards(&["KH", "QS"])).total, 20);
    }

    #[test]
    fn test_hand_value_blackjack() {
        let value = hand_value(&cards(&["AH", "KS"]));
        assert_eq!(value.total, 21);
        assert_eq!(value.soft_aces, 1);
    }

    #[test]
    fn test_hand_value_hard_ace() {
        let value = hand_value(&cards(&["AH", "6S", "9C"]));
        assert_eq!(value.total, 16);
        assert_eq!(value.soft_aces, 0);
        assert!(!value.is_soft);
    }

    #[test]
    fn test_hand_value_multiple_aces() {
        let value = hand_value(&cards(&["AH", "AS", "9C"]));
        assert_eq!(value.total, 21);
        assert_eq!(value.soft_aces, 1);
    }

    #[test]
    fn test_soft_flag_requires_low_total() {
        // Ace counted high but total above 11
        let value = hand_value(&cards(&["AH", "6S"]));
        assert_eq!(value.total, 17);
        assert_eq!(value.soft_aces, 1);
        assert!(!value.is_soft);

        let lone_ace = hand_value(&cards(&["AD"]));
        assert_eq!(lone_ace.total, 11);
        assert!(lone_ace.is_soft);
    }

    #[test]
    fn test_pair_of_aces() {
        let value = hand_value(&cards(&["AH", "AS"]));
        assert_eq!(value.total, 12);
        assert_eq!(value.soft_aces, 1);
        assert!(!value.is_soft);
    }

    #[test]
    fn test_empty_hand() {
        assert_eq!(
            hand_value(&[]),
            HandValue {
                total: 0,
                soft_aces: 0,
                is_soft: false
            }
        );
    }

    #[test]
    fn test_can_split_cards_same_rank() {
        let c = cards(&["8H", "8S"]);
        assert!(can_split_cards(&c[0], &c[1]));
    }

    #[test]
    fn test_can_split_cards_face_cards() {
        let c = cards(&["KH", "QS"]);
        assert!(!can_split_cards(&c[0], &c[1]));
        let c = cards(&["10H", "JS"]);
        assert!(!can_split_cards(&c[0], &c[1]));
    }

    #[test]
    fn test_hi_lo_tags() {
        for (token, tag) in [
            ("2C", 1), ("3C", 1), ("4C", 1), ("5C", 1), ("6C", 1),
            ("7C", 0), ("8C", 0), ("9C", 0),
            ("10C", -1), ("JC", -1), ("QC", -1), ("KC", -1), ("AC", -1),
        ] {
            assert_eq!(hi_lo(&Card::parse(token).unwrap()), tag, "{token}");
        }
    }
}
