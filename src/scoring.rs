//! Instant-win checks on dealt hands and the last-tricks kora bonus.

use crate::cards::{Card, Rank};
use crate::game::Seat;
use crate::hand::HAND_SIZE;
use std::fmt;

/// A hand whose rank values sum below this wins immediately.
pub const LOW_SUM_LIMIT: u32 = 21;

/// Sevens needed for the triple-seven instant win.
pub const SEVENS_NEEDED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AutoWinKind {
    /// Rank values sum below [`LOW_SUM_LIMIT`].
    Sum,
    /// Three or more sevens.
    Sevens,
}

impl AutoWinKind {
    pub fn label(self) -> &'static str {
        match self {
            AutoWinKind::Sum => "sum",
            AutoWinKind::Sevens => "sevens",
        }
    }
}

/// A qualifying instant-win condition found in a dealt hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoWin {
    pub kind: AutoWinKind,
    /// Rank sum for [`AutoWinKind::Sum`], seven count for [`AutoWinKind::Sevens`].
    pub value: u32,
}

impl AutoWin {
    pub fn reason(&self) -> String {
        match self.kind {
            AutoWinKind::Sum => {
                format!("hand totals {} (under {LOW_SUM_LIMIT})", self.value)
            }
            AutoWinKind::Sevens => format!("hand holds {} sevens", self.value),
        }
    }
}

impl fmt::Display for AutoWin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auto-win ({}): {}", self.kind.label(), self.reason())
    }
}

/// Inspect a dealt hand for an instant win.
///
/// The two conditions cannot both hold for one five-card hand (three sevens
/// already total 21), so the low-sum check simply runs first.
///
/// ```
/// use garame::cards::parse_cards;
/// use garame::scoring::{check_auto_win, AutoWinKind};
///
/// let low = parse_cards("3s 3h 4d 4c 5s").unwrap();
/// assert_eq!(check_auto_win(&low).map(|w| w.kind), Some(AutoWinKind::Sum));
/// ```
pub fn check_auto_win(hand: &[Card]) -> Option<AutoWin> {
    if hand.is_empty() {
        return None;
    }
    let sum: u32 = hand.iter().map(|c| u32::from(c.rank().value())).sum();
    if sum < LOW_SUM_LIMIT {
        return Some(AutoWin { kind: AutoWinKind::Sum, value: sum });
    }
    let sevens = hand.iter().filter(|c| c.rank() == Rank::Seven).count();
    if sevens >= SEVENS_NEEDED {
        return Some(AutoWin { kind: AutoWinKind::Sevens, value: sevens as u32 });
    }
    None
}

/// End-of-round bonus earned by taking the last trick(s) with threes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Kora {
    #[default]
    None,
    /// Trick 5 won with a three.
    Single,
    /// Tricks 4 and 5 both won with threes by the same player.
    Double,
}

impl Kora {
    pub const fn multiplier(self) -> u32 {
        match self {
            Kora::None => 1,
            Kora::Single => 2,
            Kora::Double => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Kora::None => "no kora",
            Kora::Single => "kora",
            Kora::Double => "double kora",
        }
    }
}

/// Compute the kora bonus from per-trick winners and the card each winner
/// took the trick with (both slices indexed by trick, oldest first).
///
/// Only applies once all five tricks are played.
///
/// ```
/// use garame::cards::parse_cards;
/// use garame::game::Seat;
/// use garame::scoring::{kora, Kora};
///
/// let winners = [Seat::A, Seat::B, Seat::A, Seat::A, Seat::A];
/// let cards = parse_cards("9s 8h 10d 3c 3h").unwrap();
/// assert_eq!(kora(&winners, &cards), Kora::Double);
/// ```
pub fn kora(trick_winners: &[Seat], winning_cards: &[Card]) -> Kora {
    if trick_winners.len() < HAND_SIZE || winning_cards.len() < HAND_SIZE {
        return Kora::None;
    }
    let last = HAND_SIZE - 1;
    if winning_cards[last].rank() != Rank::Three {
        return Kora::None;
    }
    let prev = last - 1;
    if trick_winners[prev] == trick_winners[last] && winning_cards[prev].rank() == Rank::Three {
        Kora::Double
    } else {
        Kora::Single
    }
}
