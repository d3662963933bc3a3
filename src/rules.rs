//! Card legality and trick resolution.
//!
//! Garame has no trumps. A responder holding the led suit must follow it but
//! need not beat it; a responder void in the led suit may discard anything,
//! and that discard can never take control.

use crate::cards::{Card, Suit};
use crate::game::Seat;
use std::fmt;

/// Cards the holder of `hand` may play against `table_card`, in hand order.
///
/// With no table card (the player leads) the whole hand is legal. Otherwise
/// the cards of the table card's suit are the only legal plays; if there are
/// none, the whole hand is legal. Never empty for a non-empty hand.
///
/// ```
/// use garame::cards::{parse_cards, Card};
/// use garame::rules::legal_moves;
///
/// let hand = parse_cards("3s 5s 4h 9d 6c").unwrap();
/// let table: Card = "4s".parse().unwrap();
/// let legal = legal_moves(&hand, Some(table));
/// assert_eq!(legal, parse_cards("3s 5s").unwrap());
/// ```
pub fn legal_moves(hand: &[Card], table_card: Option<Card>) -> Vec<Card> {
    let Some(table) = table_card else {
        return hand.to_vec();
    };
    let following: Vec<Card> = hand.iter().copied().filter(|c| c.suit() == table.suit()).collect();
    if following.is_empty() {
        hand.to_vec()
    } else {
        following
    }
}

/// Whether `card` is a legal play from `hand` against `table_card`.
pub fn is_legal(hand: &[Card], table_card: Option<Card>, card: Card) -> bool {
    legal_moves(hand, table_card).contains(&card)
}

/// Decide who holds control after `first_player` played `first` and the
/// opponent answered with `second`.
///
/// Same suit: the higher rank takes control. Different suits: the first
/// player keeps control whatever the ranks.
///
/// ```
/// use garame::game::Seat;
/// use garame::rules::resolve_trick;
///
/// let winner = resolve_trick("4s".parse().unwrap(), Seat::A, "5s".parse().unwrap());
/// assert_eq!(winner, Seat::B);
/// let kept = resolve_trick("4s".parse().unwrap(), Seat::A, "10h".parse().unwrap());
/// assert_eq!(kept, Seat::A);
/// ```
pub fn resolve_trick(first: Card, first_player: Seat, second: Card) -> Seat {
    if first.suit() == second.suit() && second.rank() > first.rank() {
        first_player.other()
    } else {
        first_player
    }
}

/// What the rules ask of the player about to act, for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Obligation {
    /// Nothing on the table: any card may lead.
    Lead,
    /// Must play the suit, and at least one held card can win.
    MustFollow(Suit),
    /// Must play the suit, but no held card of it beats the table card.
    SacrificeForced(Suit),
    /// Void in the suit: any card, none of which can take control.
    FreeDiscard,
}

impl fmt::Display for Obligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Obligation::Lead => write!(f, "lead any card"),
            Obligation::MustFollow(s) => write!(f, "must follow suit {}", s.glyph()),
            Obligation::SacrificeForced(s) => {
                write!(f, "sacrifice forced: play a {} card", s.glyph())
            }
            Obligation::FreeDiscard => write!(f, "no card to follow: free discard"),
        }
    }
}

/// Classify the position of the holder of `hand` facing `table_card`.
pub fn obligation(hand: &[Card], table_card: Option<Card>) -> Obligation {
    let Some(table) = table_card else {
        return Obligation::Lead;
    };
    let mut same_suit = hand.iter().filter(|c| c.suit() == table.suit()).peekable();
    if same_suit.peek().is_none() {
        return Obligation::FreeDiscard;
    }
    if same_suit.any(|c| c.rank() > table.rank()) {
        Obligation::MustFollow(table.suit())
    } else {
        Obligation::SacrificeForced(table.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn leading_allows_whole_hand() {
        let hand = parse_cards("3s 5s 4h").unwrap();
        assert_eq!(legal_moves(&hand, None), hand);
    }

    #[test]
    fn follow_suit_does_not_require_outranking() {
        let hand = parse_cards("3s 9h").unwrap();
        assert_eq!(legal_moves(&hand, Some(card("8s"))), vec![card("3s")]);
    }

    #[test]
    fn void_hand_may_discard_anything() {
        let hand = parse_cards("3h 9d").unwrap();
        assert_eq!(legal_moves(&hand, Some(card("8s"))), hand);
    }

    #[test]
    fn empty_hand_has_no_moves() {
        assert!(legal_moves(&[], Some(card("8s"))).is_empty());
    }

    #[test]
    fn resolve_same_suit_lower_keeps_leader() {
        assert_eq!(resolve_trick(card("9h"), Seat::B, card("4h")), Seat::B);
        assert_eq!(resolve_trick(card("4h"), Seat::B, card("9h")), Seat::A);
    }

    #[test]
    fn obligation_classifies_positions() {
        let hand = parse_cards("3s 5s 4h").unwrap();
        assert_eq!(obligation(&hand, None), Obligation::Lead);
        assert_eq!(obligation(&hand, Some(card("4s"))), Obligation::MustFollow(Suit::Spades));
        assert_eq!(obligation(&hand, Some(card("9s"))), Obligation::SacrificeForced(Suit::Spades));
        assert_eq!(obligation(&hand, Some(card("9d"))), Obligation::FreeDiscard);
        assert_eq!(Obligation::MustFollow(Suit::Spades).to_string(), "must follow suit ♠");
    }
}
