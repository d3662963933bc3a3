// Minimal game engine API boundary. This trait exposes the round lifecycle,
// card plays and the queries agents need, so UIs (TUI, bots) can drive a
// session without depending on its internals. Implemented for `Game`.

use crate::cards::Card;
use crate::deck::DealError;
use crate::game::{PlayError, PlayResult, Round, Seat};

pub trait GameEngine {
    // Round lifecycle
    fn new_round(&mut self) -> Result<(), DealError>;

    // Player actions
    fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayResult, PlayError>;

    // Queries
    fn round(&self) -> Option<&Round>;
    fn round_id(&self) -> u64;

    fn is_over(&self) -> bool {
        self.round().map_or(true, Round::is_over)
    }
    fn current(&self) -> Option<Seat> {
        self.round().filter(|r| !r.is_over()).map(Round::current)
    }
    fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        self.round().map(|r| r.legal_moves(seat)).unwrap_or_default()
    }
}

impl GameEngine for crate::game::Game {
    fn new_round(&mut self) -> Result<(), DealError> {
        self.new_round()
    }

    fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayResult, PlayError> {
        self.play_card(seat, card)
    }

    fn round(&self) -> Option<&Round> {
        self.round()
    }
    fn round_id(&self) -> u64 {
        self.round_id()
    }
}
