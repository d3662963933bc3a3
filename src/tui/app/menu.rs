use crate::agents::{AgentTable, BotAgent, BotProfile, Difficulty, HumanAgent};
use crate::game::{Game, GameConfig};

use super::{AppState, Scene, BOT_SEAT, HUMAN_SEAT};

const MAX_BOT_DELAY_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    BotDifficulty,
    BotDelayMs,
    FirstLeader,
}

const MENU_ITEMS: [MenuItem; 3] =
    [MenuItem::BotDifficulty, MenuItem::BotDelayMs, MenuItem::FirstLeader];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::BotDifficulty => {
                format!("Bot Difficulty: {}", app.cfg_bot_difficulty.label())
            }
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
            MenuItem::FirstLeader => {
                let who = if app.cfg_first_leader == HUMAN_SEAT { "You" } else { "Bot" };
                format!("First Lead: {who}")
            }
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.next(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = (app.cfg_bot_delay_ms + 100).min(MAX_BOT_DELAY_MS);
            }
            MenuItem::FirstLeader => app.cfg_first_leader = app.cfg_first_leader.other(),
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.prev(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
            MenuItem::FirstLeader => app.cfg_first_leader = app.cfg_first_leader.other(),
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_bot_difficulty = self.bot_difficulty;
        self.cfg_first_leader = self.game.config().first_leader;
        self.scene = Scene::Menu;
    }

    /// Start a new session with the edited settings. Tallies reset.
    pub fn apply_menu(&mut self) {
        self.agents.cancel_pending();
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.bot_difficulty = self.cfg_bot_difficulty;
        self.game = Game::new(GameConfig { seed: None, first_leader: self.cfg_first_leader });
        self.agents = AgentTable::new();
        self.agents.set_min_action_delay_ms(150);
        self.agents.set_agent(HUMAN_SEAT, Some(Box::new(HumanAgent::new())));
        let profile = Self::default_bot_profile(self.bot_delay_ms, self.bot_difficulty);
        self.agents.set_agent(BOT_SEAT, Some(Box::new(BotAgent::new(profile))));
        self.cursor = 0;
        self.last_outcome = None;
        self.round_started = false;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }

    pub(crate) fn default_bot_profile(delay_ms: u64, difficulty: Difficulty) -> BotProfile {
        BotProfile::for_difficulty(difficulty).with_delay_ms(delay_ms)
    }
}
