//! Terminal front-end: one human seat against the computer opponent.

pub mod app;
pub mod controller;
pub mod ui;
