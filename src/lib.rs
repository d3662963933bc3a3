//! garame: rules engine and computer opponent for the Garame trick-taking game
//!
//! Goals:
//! - Deterministic, side-effect free rules: legality, trick control, auto-wins, kora
//! - A computer opponent that can never play an illegal card
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a trick
//! ```
//! use garame::cards::Card;
//! use garame::game::{Round, Seat};
//!
//! let mut round = Round::new(
//!     "8s 9s 10h 6d 5c".parse().unwrap(),
//!     "8h 9h 10d 6c 5s".parse().unwrap(),
//!     Seat::A,
//! ).unwrap();
//!
//! let lead: Card = "8s".parse().unwrap();
//! round.play_card(Seat::A, lead).unwrap();
//! // B holds a spade and must follow, even though it cannot win.
//! assert!(round.play_card(Seat::B, "8h".parse().unwrap()).is_err());
//! let result = round.play_card(Seat::B, "5s".parse().unwrap()).unwrap();
//! assert_eq!(result.trick_winner, Some(Seat::A));
//! ```
//!
//! ## TUI
//! Play against the computer with:
//! ```sh
//! cargo run --bin garame
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod rules;
pub mod scoring;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
