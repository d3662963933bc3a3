use crate::cards::{Card, Rank, Suit};
use crate::hand::{validate_deal, Hand, HandError, HAND_SIZE};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The one card removed from the canonical deck.
pub const EXCLUDED_CARD: Card = Card::new(Rank::Ten, Suit::Spades);

/// Cards in a freshly built Garame deck: 4 suits x 8 ranks, minus the excluded card.
pub const DECK_SIZE: usize = 31;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealError {
    #[error("not enough cards to deal: need {needed}, have {available}")]
    InsufficientCards { needed: usize, available: usize },
    #[error("malformed deal: {0}")]
    Malformed(#[from] HandError),
}

/// Two freshly dealt hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hand_a: Hand,
    pub hand_b: Hand,
}

/// The Garame play deck: ranks 3 to 10 in four suits, without the ten of spades.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled canonical deck.
    ///
    /// ```
    /// use garame::deck::Deck;
    ///
    /// let deck = Deck::garame();
    /// assert_eq!(deck.len(), 31);
    /// ```
    pub fn garame() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for s in Suit::ALL {
            for r in Rank::ALL {
                let card = Card::new(r, s);
                if card != EXCLUDED_CARD {
                    cards.push(card);
                }
            }
        }
        Self { cards }
    }

    /// Canonical deck in random order, ready to deal.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::garame();
        deck.shuffle_with(rng);
        deck
    }

    /// Deck over an explicit card sequence; the first card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
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

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal the first five cards to player A and the next five to player B.
    ///
    /// Remaining cards stay in the deck and take no further part in the round.
    pub fn deal(&mut self) -> Result<Deal, DealError> {
        let needed = HAND_SIZE * 2;
        if self.cards.len() < needed {
            return Err(DealError::InsufficientCards { needed, available: self.cards.len() });
        }
        let hand_a = Hand::new(self.cards[..HAND_SIZE].to_vec());
        let hand_b = Hand::new(self.cards[HAND_SIZE..needed].to_vec());
        validate_deal(&hand_a, &hand_b)?;
        self.cards.drain(..needed);
        Ok(Deal { hand_a, hand_b })
    }
}

/// Build, shuffle and deal a fresh round with the given RNG.
pub fn deal_new_round<R: Rng + ?Sized>(rng: &mut R) -> Result<Deal, DealError> {
    Deck::shuffled(rng).deal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn garame_deck_has_31_unique_cards_without_ten_of_spades() {
        let d = Deck::garame();
        assert_eq!(d.len(), DECK_SIZE);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), DECK_SIZE);
        assert!(!set.contains(&EXCLUDED_CARD));
        assert!(set.contains(&Card::new(Rank::Ten, Suit::Hearts)));
        assert!(set.contains(&Card::new(Rank::Three, Suit::Spades)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::garame();
        let mut d2 = Deck::garame();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn deal_splits_first_ten_cards() {
        let mut d = Deck::garame();
        d.shuffle_seeded(7);
        let first_ten: Vec<Card> = d.as_slice()[..10].to_vec();
        let deal = d.deal().unwrap();
        assert_eq!(deal.hand_a.as_slice(), &first_ten[..5]);
        assert_eq!(deal.hand_b.as_slice(), &first_ten[5..]);
        assert_eq!(d.len(), DECK_SIZE - 10);
    }

    #[test]
    fn deal_rejects_short_deck() {
        let mut d = Deck::from_cards(Deck::garame().as_slice()[..9].to_vec());
        assert_eq!(d.deal(), Err(DealError::InsufficientCards { needed: 10, available: 9 }));
        assert_eq!(d.len(), 9, "failed deal must not consume cards");
    }

    #[test]
    fn deal_rejects_duplicate_cards() {
        let c = Card::new(Rank::Four, Suit::Clubs);
        let mut cards = Deck::garame().as_slice()[..10].to_vec();
        cards[7] = c;
        cards[2] = c;
        let mut d = Deck::from_cards(cards);
        assert!(matches!(d.deal(), Err(DealError::Malformed(_))));
    }

    #[test]
    fn deal_rejects_stacked_ten_of_spades() {
        let mut cards = Deck::garame().as_slice()[..10].to_vec();
        cards[3] = EXCLUDED_CARD;
        let mut d = Deck::from_cards(cards);
        assert_eq!(d.deal(), Err(DealError::Malformed(HandError::NotInDeck(EXCLUDED_CARD))));
        assert_eq!(d.len(), 10);
    }

    #[test]
    fn deal_new_round_is_deterministic_for_seeded_rng() {
        let mut r1 = ChaCha8Rng::seed_from_u64(3);
        let mut r2 = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(deal_new_round(&mut r1).unwrap(), deal_new_round(&mut r2).unwrap());
    }
}
