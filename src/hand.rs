use crate::cards::{parse_cards, Card, Rank, Suit};
use crate::deck::EXCLUDED_CARD;
use std::collections::HashSet;
use std::str::FromStr;

/// Number of cards dealt to each player; also the number of tricks in a round.
pub const HAND_SIZE: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hand")]
    DuplicateCards,
    #[error("hands share card {0}")]
    Overlap(Card),
    #[error("{0} is not part of the deck")]
    NotInDeck(Card),
    #[error("expected exactly {HAND_SIZE} cards, got {0}")]
    HandSize(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's private cards.
///
/// The rules treat a hand as a set; the order is kept only for display.
///
/// ```
/// use garame::hand::Hand;
///
/// let hand: Hand = "3s 5s 4h 9d 6c".parse().unwrap();
/// assert_eq!(hand.len(), 5);
/// assert_eq!(hand.rank_sum(), 27);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build a hand, rejecting duplicate cards.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit() == suit)
    }

    /// Sum of all rank values.
    pub fn rank_sum(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.rank().value())).sum()
    }

    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank() == rank).count()
    }

    /// Remove `card` from the hand, returning whether it was present.
    pub(crate) fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Cards sorted by suit then rank, the order used for display.
    pub fn sorted_for_display(&self) -> Vec<Card> {
        let mut out = self.cards.clone();
        out.sort_by_key(|c| (c.suit(), c.rank()));
        out
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Hand::try_new(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

/// Validate a pair of freshly dealt hands: five distinct deck cards each, no overlap.
pub fn validate_deal(a: &Hand, b: &Hand) -> Result<(), HandError> {
    for h in [a, b] {
        if h.len() != HAND_SIZE {
            return Err(HandError::HandSize(h.len()));
        }
        if h.contains(EXCLUDED_CARD) {
            return Err(HandError::NotInDeck(EXCLUDED_CARD));
        }
        let set: HashSet<Card> = h.as_slice().iter().copied().collect();
        if set.len() != h.len() {
            return Err(HandError::DuplicateCards);
        }
    }
    let set: HashSet<Card> = a.as_slice().iter().copied().collect();
    if let Some(&c) = b.as_slice().iter().find(|c| set.contains(c)) {
        return Err(HandError::Overlap(c));
    }
    Ok(())
}
