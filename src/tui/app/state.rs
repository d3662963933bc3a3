use crate::agents::{Action, AgentKind, AgentTable, BotAgent, Difficulty, HumanAgent};
use crate::cards::Card;
use crate::game::{Game, GameConfig, RoundOutcome, Seat};
use std::time::{Duration, Instant};

/// Seat driven by the keyboard.
pub const HUMAN_SEAT: Seat = Seat::A;
/// Seat driven by the computer opponent.
pub const BOT_SEAT: Seat = Seat::B;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewRound,
    CursorLeft,
    CursorRight,
    PlaySelected,
    PlayIndex(usize),
    BotDifficultyNext,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Core game session
    pub game: Game,
    pub agents: AgentTable,
    // Selected card in the human hand (display order)
    pub cursor: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_bot_difficulty: Difficulty,
    pub cfg_bot_delay_ms: u64,
    pub cfg_first_leader: Seat,
    pub bot_difficulty: Difficulty,
    pub bot_delay_ms: u64,
    pub round_started: bool,
    pub(crate) last_outcome: Option<RoundOutcome>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let default_delay = 600;
        let default_difficulty = Difficulty::Medium;
        let mut agents = AgentTable::new();
        agents.set_agent(HUMAN_SEAT, Some(Box::new(HumanAgent::new())));
        agents.set_agent(
            BOT_SEAT,
            Some(Box::new(BotAgent::new(Self::default_bot_profile(
                default_delay,
                default_difficulty,
            )))),
        );
        Self {
            scene: Scene::Menu,
            game: Game::new(GameConfig::default()),
            agents,
            cursor: 0,
            menu_index: 0,
            cfg_bot_difficulty: default_difficulty,
            cfg_bot_delay_ms: default_delay,
            cfg_first_leader: HUMAN_SEAT,
            bot_difficulty: default_difficulty,
            bot_delay_ms: default_delay,
            round_started: false,
            last_outcome: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    fn can_act(&self) -> bool {
        self.scene == Scene::Table
            && self.round_started
            && self.game.round().is_some_and(|r| !r.is_over() && r.current() == HUMAN_SEAT)
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if !self.can_act() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(HUMAN_SEAT, action)
    }

    /// The human hand in the order it is drawn on screen.
    pub fn human_cards(&self) -> Vec<Card> {
        self.game.round().map(|r| r.hand(HUMAN_SEAT).sorted_for_display()).unwrap_or_default()
    }

    /// Cards the human may play right now; empty when it is not their turn.
    pub fn human_legal(&self) -> Vec<Card> {
        self.game.round().map(|r| r.legal_moves(HUMAN_SEAT)).unwrap_or_default()
    }

    pub fn selected_card(&self) -> Option<Card> {
        self.human_cards().get(self.cursor).copied()
    }

    /// Result of the most recently settled round.
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn bot_profile_label(&self) -> Option<&'static str> {
        if !matches!(self.agents.agent_kind(BOT_SEAT), Some(AgentKind::Bot)) {
            return None;
        }
        Some(self.bot_difficulty.label())
    }

    fn cursor_left(&mut self) {
        let n = self.human_cards().len();
        if n == 0 {
            return;
        }
        self.cursor = (self.cursor.min(n - 1) + n - 1) % n;
    }

    fn cursor_right(&mut self) {
        let n = self.human_cards().len();
        if n == 0 {
            return;
        }
        self.cursor = (self.cursor.min(n - 1) + 1) % n;
    }

    fn play_index(&mut self, idx: usize) -> bool {
        let Some(card) = self.human_cards().get(idx).copied() else {
            return false;
        };
        self.cursor = idx;
        self.queue_action(Action::Play(card))
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewRound => {
                if self.scene == Scene::Table {
                    self.new_round();
                }
                false
            }
            InputAction::CursorLeft => {
                if self.scene == Scene::Table {
                    self.cursor_left();
                }
                false
            }
            InputAction::CursorRight => {
                if self.scene == Scene::Table {
                    self.cursor_right();
                }
                false
            }
            InputAction::PlaySelected => self.play_index(self.cursor),
            InputAction::PlayIndex(idx) => self.play_index(idx),
            InputAction::BotDifficultyNext => {
                if self.scene == Scene::Table {
                    self.cycle_bot_difficulty();
                }
                false
            }
        }
    }

    /// Deal a fresh round. A round in progress is abandoned and any
    /// scheduled bot move is cancelled.
    pub fn new_round(&mut self) {
        self.agents.cancel_pending();
        match self.game.new_round() {
            Ok(()) => {
                self.round_started = true;
                self.cursor = 0;
                self.history_offset = 0;
                self.clear_action_error();
                self.collect_reports();
            }
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    pub fn cycle_bot_difficulty(&mut self) {
        if !matches!(self.agents.agent_kind(BOT_SEAT), Some(AgentKind::Bot)) {
            return;
        }
        self.bot_difficulty = self.bot_difficulty.next();
        let profile = Self::default_bot_profile(self.bot_delay_ms, self.bot_difficulty);
        self.agents.set_agent(BOT_SEAT, Some(Box::new(BotAgent::new(profile))));
    }

    fn collect_reports(&mut self) {
        if let Some(outcome) = self.game.take_reports().pop() {
            self.last_outcome = Some(outcome);
        }
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.round_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => {
                self.clear_action_error();
                let n = self.human_cards().len();
                self.cursor = self.cursor.min(n.saturating_sub(1));
            }
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
        self.collect_reports();
    }
}
