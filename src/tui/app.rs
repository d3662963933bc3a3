mod menu;
mod state;

pub use state::{AppState, InputAction, Scene, BOT_SEAT, HUMAN_SEAT};
