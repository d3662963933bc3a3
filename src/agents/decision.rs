//! Computer opponent move selection.
//!
//! Each decision runs situation analysis, strategy selection and card
//! selection within the legal set, then re-checks the pick against an
//! independently recomputed legal set. The engine holds no state: every
//! call is a function of its [`DecisionContext`].

use crate::cards::{Card, Rank};
use crate::game::{Round, Seat, TRICKS_PER_ROUND};
use crate::rules::legal_moves;
use std::fmt;
use tracing::{debug, warn};

/// Tricks a player must take to be sure of the round's majority.
const MAJORITY: u8 = 3;

/// Rationale attached to a decision replaced by the re-validation fallback.
pub const FALLBACK_RATIONALE: &str = "fallback: first legal move";

/// Read-only snapshot the decision engine works from, rebuilt for every decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionContext {
    pub seat: Seat,
    pub hand: Vec<Card>,
    /// Card to answer, or `None` when leading.
    pub table_card: Option<Card>,
    /// 1-based index of the trick in progress.
    pub trick_no: u8,
    /// Winners of the completed tricks, oldest first.
    pub trick_winners: Vec<Seat>,
    /// Whether `seat` holds control (leads the trick in progress).
    pub has_control: bool,
    pub own_table_card: Option<Card>,
    pub opponent_table_card: Option<Card>,
}

impl DecisionContext {
    /// Snapshot `round` from the point of view of `seat`; `None` once the round is over.
    pub fn from_round(round: &Round, seat: Seat) -> Option<Self> {
        let trick_no = round.trick_no()?;
        let table = round.table();
        let played_by = |who: Seat| table.filter(|p| p.seat == who).map(|p| p.card);
        Some(Self {
            seat,
            hand: round.hand(seat).as_slice().to_vec(),
            table_card: played_by(seat.other()),
            trick_no,
            trick_winners: round.trick_winners(),
            has_control: round.leader() == seat,
            own_table_card: played_by(seat),
            opponent_table_card: played_by(seat.other()),
        })
    }

    pub fn tricks_won(&self) -> u8 {
        self.trick_winners.iter().filter(|&&w| w == self.seat).count() as u8
    }
}

/// Derived facts the strategy table keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Situation {
    pub threes: usize,
    pub tricks_won: u8,
    /// Including the trick in progress.
    pub tricks_remaining: u8,
    pub is_last_trick: bool,
    pub needs_to_win: u8,
}

impl Situation {
    pub fn analyze(ctx: &DecisionContext) -> Self {
        let threes = ctx.hand.iter().filter(|c| c.rank() == Rank::Three).count();
        let tricks_won = ctx.tricks_won();
        let tricks_remaining = TRICKS_PER_ROUND.saturating_sub(ctx.trick_no) + 1;
        let is_last_trick = ctx.trick_no >= TRICKS_PER_ROUND;
        let needs_to_win = if is_last_trick { 1 } else { MAJORITY.saturating_sub(tricks_won).max(1) };
        Self { threes, tricks_won, tricks_remaining, is_last_trick, needs_to_win }
    }

    /// Last trick, or the round hangs on a single trick.
    pub fn is_critical(&self) -> bool {
        self.is_last_trick || self.needs_to_win <= 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    KoraAttempt,
    SecureWin,
    AggressiveCounter,
    MaintainControl,
    StrategicPlay,
}

impl Strategy {
    /// Priority-ordered strategy table.
    pub fn select(situation: &Situation, ctx: &DecisionContext) -> Self {
        if situation.is_last_trick && ctx.has_control && situation.threes > 0 {
            Strategy::KoraAttempt
        } else if situation.is_last_trick {
            Strategy::SecureWin
        } else if situation.needs_to_win <= 1 {
            Strategy::AggressiveCounter
        } else if ctx.has_control {
            Strategy::MaintainControl
        } else {
            Strategy::StrategicPlay
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::KoraAttempt => "KORA_ATTEMPT",
            Strategy::SecureWin => "SECURE_WIN",
            Strategy::AggressiveCounter => "AGGRESSIVE_COUNTER",
            Strategy::MaintainControl => "MAINTAIN_CONTROL",
            Strategy::StrategicPlay => "STRATEGIC_PLAY",
        }
    }

    /// Spends strength now rather than conserving it.
    pub fn is_aggressive(self) -> bool {
        matches!(self, Strategy::KoraAttempt | Strategy::SecureWin | Strategy::AggressiveCounter)
    }

    fn bids_kora(self) -> bool {
        matches!(self, Strategy::KoraAttempt | Strategy::SecureWin)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A chosen card with the strategy and reason behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    pub strategy: Strategy,
    pub rationale: &'static str,
}

impl Decision {
    pub fn is_fallback(&self) -> bool {
        self.rationale == FALLBACK_RATIONALE
    }
}

/// A pick that failed its own legality re-check. Logged, never returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConsistencyError {
    #[error("chose {chosen} under {strategy} but legal moves are {legal:?}")]
    IllegalChoice { chosen: Card, strategy: Strategy, legal: Vec<Card> },
}

/// Choose a legal card for `ctx`. `None` only when the hand is empty.
///
/// ```
/// use garame::agents::decision::{decide, DecisionContext};
/// use garame::cards::parse_cards;
/// use garame::game::Seat;
///
/// let ctx = DecisionContext {
///     seat: Seat::B,
///     hand: parse_cards("3s 5s 4h 9d 6c").unwrap(),
///     table_card: Some("4s".parse().unwrap()),
///     trick_no: 1,
///     trick_winners: vec![],
///     has_control: false,
///     own_table_card: None,
///     opponent_table_card: Some("4s".parse().unwrap()),
/// };
/// assert_eq!(decide(&ctx).unwrap().card.to_string(), "5s");
/// ```
pub fn decide(ctx: &DecisionContext) -> Option<Decision> {
    let legal = legal_moves(&ctx.hand, ctx.table_card);
    let &first = legal.first()?;
    let situation = Situation::analyze(ctx);
    let strategy = Strategy::select(&situation, ctx);
    let candidate = select_card(ctx, &situation, strategy, &legal).unwrap_or(Decision {
        card: first,
        strategy,
        rationale: FALLBACK_RATIONALE,
    });
    let decision = revalidate(ctx, candidate)?;
    debug!(
        seat = %ctx.seat,
        trick = ctx.trick_no,
        strategy = decision.strategy.name(),
        card = %decision.card,
        rationale = decision.rationale,
        "decision"
    );
    Some(decision)
}

/// Check `candidate` against a freshly computed legal set, falling back to
/// the first legal move when it is not a member.
///
/// Returns `None` only when there is no legal move at all.
pub fn revalidate(ctx: &DecisionContext, candidate: Decision) -> Option<Decision> {
    let legal = legal_moves(&ctx.hand, ctx.table_card);
    if legal.contains(&candidate.card) {
        return Some(candidate);
    }
    let &first = legal.first()?;
    let err = ConsistencyError::IllegalChoice {
        chosen: candidate.card,
        strategy: candidate.strategy,
        legal,
    };
    warn!(seat = %ctx.seat, error = %err, "decision failed legality re-check");
    Some(Decision { card: first, strategy: candidate.strategy, rationale: FALLBACK_RATIONALE })
}

fn select_card(
    ctx: &DecisionContext,
    situation: &Situation,
    strategy: Strategy,
    legal: &[Card],
) -> Option<Decision> {
    let pick = |card: Card, rationale: &'static str| Decision { card, strategy, rationale };
    let Some(table) = ctx.table_card else {
        return lead(situation, strategy, legal).map(|(c, why)| pick(c, why));
    };
    let following: Vec<Card> = legal.iter().copied().filter(|c| c.suit() == table.suit()).collect();
    if following.is_empty() {
        return discard(situation, legal).map(|(c, why)| pick(c, why));
    }
    let winners: Vec<Card> = following.iter().copied().filter(|c| c.rank() > table.rank()).collect();
    if winners.is_empty() {
        return lowest(&following).map(|c| pick(c, "no winner in suit: sacrifice smallest"));
    }
    if situation.is_critical() {
        highest(&winners).map(|c| pick(c, "critical: largest winning card"))
    } else {
        lowest(&winners).map(|c| pick(c, "smallest winning card"))
    }
}

fn lead(
    situation: &Situation,
    strategy: Strategy,
    legal: &[Card],
) -> Option<(Card, &'static str)> {
    if situation.is_last_trick && strategy.bids_kora() {
        if let Some(three) = find_three(legal) {
            return Some((three, "lead a three for kora"));
        }
    }
    if strategy.is_aggressive() {
        highest(legal).map(|c| (c, "lead strongest card"))
    } else {
        middling(legal).map(|c| (c, "lead a middling card"))
    }
}

/// Void in the led suit: nothing played here can take control.
///
/// In a dealt round the last trick leaves a single card, so the kora branch
/// picks the same card `lowest` would; it only names the three as a kora bid.
fn discard(situation: &Situation, legal: &[Card]) -> Option<(Card, &'static str)> {
    if situation.is_last_trick {
        if let Some(three) = find_three(legal) {
            return Some((three, "discard a three for kora"));
        }
    }
    lowest(legal).map(|c| (c, "void in suit: discard smallest"))
}

fn find_three(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().filter(|c| c.rank() == Rank::Three).min_by_key(|c| c.suit())
}

fn lowest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|c| (c.rank(), c.suit()))
}

fn highest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|c| (c.rank(), c.suit()))
}

fn middling(cards: &[Card]) -> Option<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|c| (c.rank(), c.suit()));
    sorted.get(sorted.len() / 2).copied()
}
