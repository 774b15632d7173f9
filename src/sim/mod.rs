//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick stepping only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! A frontend owns the real-time loop: it feeds a [`TickInput`] per tick and
//! reads entity positions, scores, and [`MatchEvent`]s back out of
//! [`MatchState`].

pub mod collision;
pub mod cpu;
pub mod state;
pub mod tick;

pub use cpu::{CpuReaction, predict_intercept_y};
pub use state::{
    Ball, CPU, HUMAN, MatchEvent, MatchPhase, MatchState, Paddle, Player, PlayerKind, Side,
};
pub use tick::{TickInput, tick};
