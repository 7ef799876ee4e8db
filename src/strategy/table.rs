use super::Action;

const H: Action = Action::Hit;
const S: Action = Action::Stand;
const D: Action = Action::Double;
const P: Action = Action::Split;

/// One chart row, indexed by dealer up-card value 2..=11 (11 is the ace).
type Row = [Action; 10];

/// Hard totals 2..=21.
const HARD: [Row; 20] = [
    /*  2 */ [H, H, H, H, H, H, H, H, H, H],
    /*  3 */ [H, H, H, H, H, H, H, H, H, H],
    /*  4 */ [H, H, H, H, H, H, H, H, H, H],
    /*  5 */ [H, H, H, H, H, H, H, H, H, H],
    /*  6 */ [H, H, H, H, H, H, H, H, H, H],
    /*  7 */ [H, H, H, H, H, H, H, H, H, H],
    /*  8 */ [H, H, H, H, H, H, H, H, H, H],
    /*  9 */ [H, D, D, D, D, H, H, H, H, H],
    /* 10 */ [D, D, D, D, D, D, D, D, H, H],
    /* 11 */ [D, D, D, D, D, D, D, D, D, D],
    /* 12 */ [H, H, S, S, S, H, H, H, H, H],
    /* 13 */ [S, S, S, S, S, H, H, H, H, H],
    /* 14 */ [S, S, S, S, S, H, H, H, H, H],
    /* 15 */ [S, S, S, S, S, H, H, H, H, H],
    /* 16 */ [S, S, S, S, S, S, S, S, S, H],
    /* 17 */ [S, S, S, S, S, S, S, S, S, S],
    /* 18 */ [S, S, S, S, S, S, S, S, S, S],
    /* 19 */ [S, S, S, S, S, S, S, S, S, S],
    /* 20 */ [S, S, S, S, S, S, S, S, S, S],
    /* 21 */ [S, S, S, S, S, S, S, S, S, S],
];

/// Soft totals 13..=20.
const SOFT: [Row; 8] = [
    /* 13 */ [H, H, H, D, D, H, H, H, H, H],
    /* 14 */ [H, H, H, D, D, H, H, H, H, H],
    /* 15 */ [H, H, D, D, D, H, H, H, H, H],
    /* 16 */ [H, H, D, D, D, H, H, H, H, H],
    /* 17 */ [H, D, D, D, D, H, H, H, H, H],
    /* 18 */ [S, S, S, S, S, S, S, H, H, H],
    /* 19 */ [S, S, S, S, S, S, S, S, S, S],
    /* 20 */ [S, S, S, S, S, S, S, S, S, S],
];

/// Pairs by card value 2..=11; the `10` row covers tens and face cards.
const PAIRS: [Row; 10] = [
    /*  2 */ [P, P, P, P, P, P, H, H, H, H],
    /*  3 */ [P, P, P, P, P, P, H, H, H, H],
    /*  4 */ [H, H, H, P, P, H, H, H, H, H],
    /*  5 */ [D, D, D, D, D, D, D, D, H, H],
    /*  6 */ [P, P, P, P, P, H, H, H, H, H],
    /*  7 */ [P, P, P, P, P, P, H, H, H, H],
    /*  8 */ [P, P, P, P, P, P, P, P, P, P],
    /*  9 */ [P, P, P, P, P, S, P, P, S, S],
    /* 10 */ [S, S, S, S, S, S, S, S, S, S],
    /*  A */ [P, P, P, P, P, P, P, P, P, P],
];

/// Basic strategy charts. Lookups outside a chart return `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyTable;

impl StrategyTable {
    fn cell<const N: usize>(
        rows: &[Row; N],
        first: u16,
        key: u16,
        dealer_value: u8,
    ) -> Option<Action> {
        let row = rows.get(usize::from(key.checked_sub(first)?))?;
        row.get(usize::from(dealer_value.checked_sub(2)?)).copied()
    }

    pub fn hard(&self, total: u16, dealer_value: u8) -> Option<Action> {
        Self::cell(&HARD, 2, total, dealer_value)
    }

    pub fn soft(&self, total: u16, dealer_value: u8) -> Option<Action> {
        Self::cell(&SOFT, 13, total, dealer_value)
    }

    /// `pair_value` is the value of either card (11 for aces).
    pub fn pair(&self, pair_value: u8, dealer_value: u8) -> Option<Action> {
        Self::cell(&PAIRS, 2, u16::from(pair_value), dealer_value)
    }
}
