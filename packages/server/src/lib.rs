//! Anonymous one-on-one chat matchmaking server.
//!
//! Participants connect over WebSocket, wait in a FIFO queue, and are paired two at a time.
//! A participant can ask for a new partner ("next"), which puts them at the front of the queue
//! and their abandoned partner at the back.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
