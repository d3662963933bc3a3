//! Agents: pluggable players (the computer opponent, humans via a frontend).
//!
//! This module introduces a small trait `PlayerAgent` and a minimal manager
//! `AgentTable` that coordinates which agent controls which seat. It lives in
//! the library so UIs remain thin and do not need to implement bot
//! coordination.

use crate::cards::Card;
use crate::engine::GameEngine;
use crate::game::{PlayError, Seat};
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level action intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Play(Card),
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` may be the current actor. Implementations may throttle internally.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Seat) -> Result<bool, PlayError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive a seat-intent action; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
    /// Drop any scheduled or queued move.
    fn cancel(&mut self) {}
}

mod bots;
pub mod decision;

pub use bots::{BotAgent, BotProfile, Difficulty, PendingDecision};
pub use decision::{decide, Decision, DecisionContext, Strategy};

/// A simple agent that plays user-chosen cards when it's their turn.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Seat) -> Result<bool, PlayError> {
        if engine.is_over() {
            self.pending = None;
            return Ok(false);
        }
        if engine.current() != Some(seat) {
            return Ok(false);
        }
        // A rejected card is consumed; the player picks again.
        match self.pending.take() {
            Some(Action::Play(card)) => engine.play_card(seat, card).map(|_| true),
            None => Ok(false),
        }
    }
    fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Holds an optional agent for each seat and drives the agent at the current
/// seat when appropriate.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// Create a table with both seats empty.
    pub fn new() -> Self {
        Self { seats: [None, None], min_action_delay: Duration::from_millis(0), next_action_at: None }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    /// Get immutable access to an agent for inspection.
    pub fn agent(&self, seat: Seat) -> Option<&dyn PlayerAgent> {
        self.seats[seat.index()].as_deref()
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.agent(seat).map(|ag| ag.kind())
    }

    /// Send an action intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: Seat, action: Action) -> bool {
        match self.seats[seat.index()].as_mut() {
            Some(agent) => agent.receive(action),
            None => false,
        }
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Set a global minimum delay between any actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, PlayError> {
        let Some(seat) = engine.current() else {
            return Ok(false);
        };
        let Some(agent) = self.seats[seat.index()].as_mut() else {
            return Ok(false);
        };
        let is_bot = matches!(agent.kind(), AgentKind::Bot);
        let now = Instant::now();
        if is_bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && self.min_action_delay > Duration::from_millis(0) {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }

    /// Cancel every agent's scheduled or queued move, e.g. when a round is abandoned.
    pub fn cancel_pending(&mut self) {
        for agent in self.seats.iter_mut().flatten() {
            agent.cancel();
        }
        self.next_action_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GameConfig};
    use std::thread;

    fn mk_game() -> Game {
        let mut g = Game::new(GameConfig { seed: None, first_leader: Seat::B });
        g.start_round("8s 9s 10h 6d 5c".parse().unwrap(), "8h 9h 10d 6c 5s".parse().unwrap())
            .unwrap();
        g
    }

    #[test]
    fn delay_ms_throttle_actions() {
        let mut g = mk_game();
        let profile = BotProfile::for_difficulty(Difficulty::Hard).with_seed(7).with_delay_ms(15);
        let mut bot = BotAgent::new(profile);

        // First tick should schedule the bot and not act yet.
        assert!(!bot.on_turn(&mut g, Seat::B).unwrap());
        assert!(bot.pending().is_some());
        assert_eq!(g.round().unwrap().hand(Seat::B).len(), 5, "no card before delay");

        // After delay, the waiting bot should run.
        thread::sleep(Duration::from_millis(20));
        assert!(bot.on_turn(&mut g, Seat::B).unwrap());
        assert_eq!(g.round().unwrap().current(), Seat::A, "bot should act once delay elapsed");
    }

    #[test]
    fn human_agent_plays_queued_card_only_on_turn() {
        let mut g = mk_game();
        let mut human = HumanAgent::new();
        assert!(human.receive(Action::Play("8s".parse().unwrap())));
        assert!(!human.receive(Action::Play("9s".parse().unwrap())), "one pending action");
        assert!(!human.on_turn(&mut g, Seat::A).unwrap(), "seat B leads this round");
        assert_eq!(g.round().unwrap().hand(Seat::A).len(), 5);
    }

    #[test]
    fn table_drives_current_seat() {
        let mut g = mk_game();
        let mut table = AgentTable::new();
        table.set_agent(Seat::A, Some(Box::new(HumanAgent::new())));
        table.set_agent(Seat::B, Some(Box::new(BotAgent::new(BotProfile::default().with_seed(1)))));
        assert!(table.any_bots());
        assert_eq!(format!("{table:?}"), "AgentTable(HB)");
        assert!(table.on_turn(&mut g).unwrap(), "bot leads without delay");
        assert_eq!(g.round().unwrap().current(), Seat::A);
        assert!(!table.on_turn(&mut g).unwrap(), "human has nothing queued");
    }
}
