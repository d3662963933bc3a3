use crate::cards::Card;
use crate::deck::{deal_new_round, DealError};
use crate::hand::{validate_deal, Hand, HAND_SIZE};
use crate::rules::{legal_moves, obligation, resolve_trick, Obligation};
use crate::scoring::{check_auto_win, kora, AutoWin, Kora};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, info};

/// Tricks in a round.
pub const TRICKS_PER_ROUND: u8 = HAND_SIZE as u8;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::A, Seat::B];

    pub const fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::A => write!(f, "A"),
            Seat::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// Trick `n` (1-based) is being played.
    Trick(u8),
    /// Terminal: see [`Round::outcome`].
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundEventVerb {
    AutoWin,
    Lead,
    Follow,
    Sacrifice,
    Discard,
    TakeControl,
    KeepControl,
    Kora,
    Win,
}

impl RoundEventVerb {
    pub fn label(self) -> &'static str {
        match self {
            RoundEventVerb::AutoWin => "Auto-win",
            RoundEventVerb::Lead => "Lead",
            RoundEventVerb::Follow => "Follow",
            RoundEventVerb::Sacrifice => "Sacrifice",
            RoundEventVerb::Discard => "Discard",
            RoundEventVerb::TakeControl => "Takes control",
            RoundEventVerb::KeepControl => "Keeps control",
            RoundEventVerb::Kora => "Kora",
            RoundEventVerb::Win => "Win",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("no round in progress")]
    NoRound,
    #[error("round is over")]
    RoundOver,
    #[error("not your turn: seat {expected} to play")]
    OutOfTurn { expected: Seat },
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("illegal move {card}: {obligation}")]
    IllegalMove { card: Card, obligation: Obligation },
}

/// A card on the table and who put it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// A fully resolved exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedTrick {
    pub number: u8,
    pub lead: Play,
    pub response: Play,
    pub winner: Seat,
}

impl CompletedTrick {
    /// The card the winner took the trick with.
    pub fn winning_card(&self) -> Card {
        if self.lead.seat == self.winner {
            self.lead.card
        } else {
            self.response.card
        }
    }
}

/// Terminal report of a round, handed to settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: Seat,
    /// Empty when the round ended by auto-win.
    pub trick_winners: Vec<Seat>,
    pub kora: Kora,
    pub auto_win: Option<AutoWin>,
}

impl RoundOutcome {
    pub fn multiplier(&self) -> u32 {
        self.kora.multiplier()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundEvent {
    pub trick: u8,
    pub seat: Seat,
    pub verb: RoundEventVerb,
    pub card: Option<Card>,
}

/// What a single accepted play changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    pub trick_completed: bool,
    pub trick_winner: Option<Seat>,
    pub round_over: bool,
}

/// State machine for one five-trick round.
///
/// Auto-wins are checked when the round is created; a qualifying hand ends
/// the round before any card is played.
#[derive(Debug, Clone)]
pub struct Round {
    hands: [Hand; 2],
    leader: Seat,
    current: Seat,
    phase: Phase,
    table: Option<Play>,
    tricks: Vec<CompletedTrick>,
    outcome: Option<RoundOutcome>,
    history: Vec<RoundEvent>,
}

impl Round {
    /// Start a round from two dealt hands; `leader` plays first in trick 1.
    ///
    /// ```
    /// use garame::game::{Phase, Round, Seat};
    ///
    /// let a = "8s 9s 10h 6d 5c".parse().unwrap();
    /// let b = "8h 9h 10d 6c 5s".parse().unwrap();
    /// let round = Round::new(a, b, Seat::A).unwrap();
    /// assert_eq!(round.phase(), Phase::Trick(1));
    /// assert_eq!(round.current(), Seat::A);
    /// ```
    pub fn new(hand_a: Hand, hand_b: Hand, leader: Seat) -> Result<Self, DealError> {
        validate_deal(&hand_a, &hand_b)?;
        let mut round = Self {
            hands: [hand_a, hand_b],
            leader,
            current: leader,
            phase: Phase::Trick(1),
            table: None,
            tricks: Vec::with_capacity(HAND_SIZE),
            outcome: None,
            history: Vec::new(),
        };
        round.check_auto_wins();
        Ok(round)
    }

    fn check_auto_wins(&mut self) {
        // The seat leading trick 1 has priority if both hands qualify.
        for seat in [self.leader, self.leader.other()] {
            if let Some(win) = check_auto_win(self.hands[seat.index()].as_slice()) {
                info!(seat = %seat, kind = win.kind.label(), "round ended by auto-win");
                self.push_event(seat, RoundEventVerb::AutoWin, None);
                self.push_event(seat, RoundEventVerb::Win, None);
                self.outcome = Some(RoundOutcome {
                    winner: seat,
                    trick_winners: Vec::new(),
                    kora: Kora::None,
                    auto_win: Some(win),
                });
                self.phase = Phase::Ended;
                return;
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Ended)
    }

    /// Seat whose turn it is. Meaningless once the round is over.
    pub fn current(&self) -> Seat {
        self.current
    }

    /// Seat holding control: leader of the trick in progress.
    pub fn leader(&self) -> Seat {
        self.leader
    }

    /// Current trick number (1..=5), or `None` once over.
    pub fn trick_no(&self) -> Option<u8> {
        match self.phase {
            Phase::Trick(n) => Some(n),
            Phase::Ended => None,
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    /// The led card of the trick in progress, if any.
    pub fn table(&self) -> Option<Play> {
        self.table
    }

    pub fn table_card(&self) -> Option<Card> {
        self.table.map(|p| p.card)
    }

    pub fn tricks(&self) -> &[CompletedTrick] {
        &self.tricks
    }

    pub fn last_trick(&self) -> Option<&CompletedTrick> {
        self.tricks.last()
    }

    pub fn trick_winners(&self) -> Vec<Seat> {
        self.tricks.iter().map(|t| t.winner).collect()
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Legal plays for `seat` right now; empty if it is not their turn.
    pub fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        if self.is_over() || seat != self.current {
            return Vec::new();
        }
        legal_moves(self.hand(seat).as_slice(), self.table_card())
    }

    /// Obligation of the player to act, for status messages.
    pub fn status(&self) -> Option<Obligation> {
        if self.is_over() {
            return None;
        }
        Some(obligation(self.hand(self.current).as_slice(), self.table_card()))
    }

    pub fn history(&self) -> &[RoundEvent] {
        &self.history
    }

    /// Play `card` for `seat`.
    ///
    /// On error nothing changes and the caller may resubmit.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayResult, PlayError> {
        let Phase::Trick(trick_no) = self.phase else {
            return Err(PlayError::RoundOver);
        };
        if seat != self.current {
            return Err(PlayError::OutOfTurn { expected: self.current });
        }
        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }
        let table_card = self.table_card();
        if !legal_moves(hand.as_slice(), table_card).contains(&card) {
            return Err(PlayError::IllegalMove {
                card,
                obligation: obligation(hand.as_slice(), table_card),
            });
        }
        self.hands[seat.index()].remove(card);

        let Some(lead) = self.table else {
            self.table = Some(Play { seat, card });
            self.current = seat.other();
            self.push_event(seat, RoundEventVerb::Lead, Some(card));
            return Ok(PlayResult { trick_completed: false, trick_winner: None, round_over: false });
        };

        let verb = response_verb(lead.card, card);
        self.push_event(seat, verb, Some(card));
        let winner = resolve_trick(lead.card, lead.seat, card);
        let control_verb = if winner == lead.seat {
            RoundEventVerb::KeepControl
        } else {
            RoundEventVerb::TakeControl
        };
        self.push_event(winner, control_verb, None);
        debug!(trick = trick_no, lead = %lead.card, response = %card, winner = %winner, "trick resolved");

        self.tricks.push(CompletedTrick {
            number: trick_no,
            lead,
            response: Play { seat, card },
            winner,
        });
        self.table = None;
        self.leader = winner;
        self.current = winner;

        if trick_no >= TRICKS_PER_ROUND {
            self.finish(winner);
            return Ok(PlayResult {
                trick_completed: true,
                trick_winner: Some(winner),
                round_over: true,
            });
        }
        self.phase = Phase::Trick(trick_no + 1);
        Ok(PlayResult { trick_completed: true, trick_winner: Some(winner), round_over: false })
    }

    fn finish(&mut self, winner: Seat) {
        let trick_winners = self.trick_winners();
        let winning_cards: Vec<Card> = self.tricks.iter().map(|t| t.winning_card()).collect();
        let bonus = kora(&trick_winners, &winning_cards);
        if bonus != Kora::None {
            self.push_event(winner, RoundEventVerb::Kora, winning_cards.last().copied());
        }
        self.push_event(winner, RoundEventVerb::Win, None);
        info!(winner = %winner, kora = bonus.label(), multiplier = bonus.multiplier(), "round ended");
        self.outcome = Some(RoundOutcome { winner, trick_winners, kora: bonus, auto_win: None });
        self.phase = Phase::Ended;
    }

    fn push_event(&mut self, seat: Seat, verb: RoundEventVerb, card: Option<Card>) {
        let trick = self.trick_no().unwrap_or(TRICKS_PER_ROUND);
        self.history.push(RoundEvent { trick, seat, verb, card });
    }
}

fn response_verb(lead: Card, response: Card) -> RoundEventVerb {
    if lead.suit() != response.suit() {
        RoundEventVerb::Discard
    } else if response.rank() > lead.rank() {
        RoundEventVerb::Follow
    } else {
        RoundEventVerb::Sacrifice
    }
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for reproducible dealing; random when `None`.
    pub seed: Option<u64>,
    /// Leader of the first round; alternates afterwards.
    pub first_leader: Seat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { seed: None, first_leader: Seat::A }
    }
}

/// A match session: consecutive rounds between the same two seats.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: ChaCha8Rng,
    round: Option<Round>,
    round_id: u64,
    next_leader: Seat,
    rounds_won: [u32; 2],
    points: [u32; 2],
    pending_reports: Vec<RoundOutcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            round: None,
            round_id: 0,
            next_leader: config.first_leader,
            rounds_won: [0; 2],
            points: [0; 2],
            pending_reports: Vec::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Increments with every deal; a stale id means the round was abandoned.
    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn rounds_won(&self, seat: Seat) -> u32 {
        self.rounds_won[seat.index()]
    }

    /// Rounds won weighted by their kora multiplier.
    pub fn points(&self, seat: Seat) -> u32 {
        self.points[seat.index()]
    }

    /// Deal a new round, abandoning any round in progress.
    pub fn new_round(&mut self) -> Result<(), DealError> {
        let deal = deal_new_round(&mut self.rng)?;
        self.start_round(deal.hand_a, deal.hand_b)
    }

    /// Start a new round from explicit hands.
    pub fn start_round(&mut self, hand_a: Hand, hand_b: Hand) -> Result<(), DealError> {
        let leader = self.next_leader;
        let round = Round::new(hand_a, hand_b, leader)?;
        self.next_leader = leader.other();
        self.round_id += 1;
        debug!(round_id = self.round_id, leader = %leader, "round dealt");
        let ended = round.is_over();
        self.round = Some(round);
        if ended {
            self.settle();
        }
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayResult, PlayError> {
        let round = self.round.as_mut().ok_or(PlayError::NoRound)?;
        let result = round.play_card(seat, card)?;
        if result.round_over {
            self.settle();
        }
        Ok(result)
    }

    fn settle(&mut self) {
        let Some(outcome) = self.round.as_ref().and_then(|r| r.outcome()).cloned() else {
            return;
        };
        let i = outcome.winner.index();
        self.rounds_won[i] += 1;
        self.points[i] += outcome.multiplier();
        self.pending_reports.push(outcome);
    }

    /// Drain round reports not yet handed to settlement.
    pub fn take_reports(&mut self) -> Vec<RoundOutcome> {
        std::mem::take(&mut self.pending_reports)
    }

    pub fn history_recent(&self, n: usize) -> Vec<RoundEvent> {
        self.history_recent_offset(n, 0)
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<RoundEvent> {
        let Some(round) = self.round.as_ref() else {
            return Vec::new();
        };
        let history = round.history();
        if n == 0 || history.is_empty() {
            return Vec::new();
        }
        let len = history.len();
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.history().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn plain_round() -> Round {
        Round::new(
            "8s 9s 10h 6d 5c".parse().unwrap(),
            "8h 9h 10d 6c 5s".parse().unwrap(),
            Seat::A,
        )
        .unwrap()
    }

    #[test]
    fn out_of_turn_is_rejected_without_change() {
        let mut r = plain_round();
        let before = r.hand(Seat::B).clone();
        assert_eq!(
            r.play_card(Seat::B, card("8h")),
            Err(PlayError::OutOfTurn { expected: Seat::A })
        );
        assert_eq!(r.hand(Seat::B), &before);
        assert_eq!(r.phase(), Phase::Trick(1));
    }

    #[test]
    fn card_not_in_hand_is_rejected() {
        let mut r = plain_round();
        assert_eq!(r.play_card(Seat::A, card("3s")), Err(PlayError::CardNotInHand(card("3s"))));
    }

    #[test]
    fn response_verbs_follow_suit_relation() {
        assert_eq!(response_verb(card("4s"), card("5s")), RoundEventVerb::Follow);
        assert_eq!(response_verb(card("4s"), card("3s")), RoundEventVerb::Sacrifice);
        assert_eq!(response_verb(card("4s"), card("10h")), RoundEventVerb::Discard);
    }

    #[test]
    fn history_paging_clamps_offset() {
        let mut g = Game::new(GameConfig { seed: Some(1), first_leader: Seat::A });
        g.start_round("8s 9s 10h 6d 5c".parse().unwrap(), "8h 9h 10d 6c 5s".parse().unwrap())
            .unwrap();
        g.play_card(Seat::A, card("8s")).unwrap();
        g.play_card(Seat::B, card("5s")).unwrap();
        assert_eq!(g.history_len(), 3);
        assert_eq!(g.history_recent(2).len(), 2);
        let page = g.history_recent_offset(2, 10);
        assert_eq!(page[0].verb, RoundEventVerb::Lead);
        assert!(g.history_recent(0).is_empty());
    }

    #[test]
    fn leader_alternates_between_rounds() {
        let mut g = Game::new(GameConfig { seed: Some(9), first_leader: Seat::B });
        g.start_round("8s 9s 10h 6d 5c".parse().unwrap(), "8h 9h 10d 6c 5s".parse().unwrap())
            .unwrap();
        assert_eq!(g.round().unwrap().leader(), Seat::B);
        g.start_round("8s 9s 10h 6d 5c".parse().unwrap(), "8h 9h 10d 6c 5s".parse().unwrap())
            .unwrap();
        assert_eq!(g.round().unwrap().leader(), Seat::A);
        assert_eq!(g.round_id(), 2);
    }
}
