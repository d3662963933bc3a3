use crate::cards::Card;
use crate::engine::GameEngine;
use crate::game::{PlayError, Seat};
use crate::rules::legal_moves;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};
use tracing::debug;

use super::decision::{decide, Decision, DecisionContext};
use super::{AgentKind, PlayerAgent};

/// Difficulty tiers for the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Med",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for a bot's play quality and pacing.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Chance of replacing the engine's pick with a random legal card.
    pub mistake_rate: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let mistake_rate = match difficulty {
            Difficulty::Easy => 0.25,
            Difficulty::Medium => 0.10,
            Difficulty::Hard => 0.0,
        };
        Self { difficulty, mistake_rate, min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Use a fixed thinking delay.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.min_delay_ms = delay_ms;
        self.max_delay_ms = delay_ms;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// A scheduled move: the bot is "thinking" until `due`.
///
/// Bound to the position it was scheduled for; if the round is redealt or
/// the table changes before it fires, the schedule is dropped unplayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDecision {
    pub due: Instant,
    pub round_id: u64,
    pub trick_no: u8,
    pub table_card: Option<Card>,
}

impl PendingDecision {
    fn matches(&self, round_id: u64, trick_no: u8, table_card: Option<Card>) -> bool {
        self.round_id == round_id && self.trick_no == trick_no && self.table_card == table_card
    }
}

/// Computer opponent driving the decision engine, with a cancellable
/// thinking delay and a difficulty-dependent mistake rate.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    pending: Option<PendingDecision>,
    last_decision: Option<Decision>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, pending: None, last_decision: None }
    }

    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    /// The most recent decision this bot committed.
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    fn maybe_slip(&mut self, ctx: &DecisionContext, decision: Decision) -> Decision {
        if self.profile.mistake_rate <= 0.0
            || self.state.rng.random::<f64>() >= self.profile.mistake_rate
        {
            return decision;
        }
        let legal = legal_moves(&ctx.hand, ctx.table_card);
        if legal.is_empty() {
            return decision;
        }
        let card = legal[self.state.rng.random_range(0..legal.len())];
        Decision { card, strategy: decision.strategy, rationale: "slip: random legal card" }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Seat) -> Result<bool, PlayError> {
        let round_id = engine.round_id();
        let Some(ctx) = engine.round().and_then(|r| DecisionContext::from_round(r, seat)) else {
            self.cancel();
            return Ok(false);
        };
        if engine.current() != Some(seat) {
            return Ok(false);
        }
        if let Some(p) = self.pending {
            if !p.matches(round_id, ctx.trick_no, ctx.table_card) {
                debug!(seat = %seat, round_id, "dropping stale scheduled decision");
                self.pending = None;
            }
        }

        let now = Instant::now();
        let delay = choose_delay_ms(&self.profile, &mut self.state);
        if delay > 0 {
            match self.pending {
                None => {
                    self.pending = Some(PendingDecision {
                        due: now + Duration::from_millis(delay),
                        round_id,
                        trick_no: ctx.trick_no,
                        table_card: ctx.table_card,
                    });
                    return Ok(false);
                }
                Some(p) if now < p.due => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.pending = None;

        let Some(decision) = decide(&ctx) else {
            return Ok(false);
        };
        let decision = self.maybe_slip(&ctx, decision);
        engine.play_card(seat, decision.card)?;
        self.last_decision = Some(decision);
        Ok(true)
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}
