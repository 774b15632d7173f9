//! Reflex Pong - classic-court Pong against a reactive CPU opponent
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (entities, collisions, CPU
//!   reaction engine, per-tick match loop)
//! - `config`: Match configuration (serde/JSON)
//!
//! Rendering and input capture live outside this crate: an embedding
//! frontend feeds a [`sim::TickInput`] each tick and reads entity positions,
//! scores, and [`sim::MatchEvent`]s back out of [`sim::MatchState`].

pub mod config;
pub mod sim;

pub use config::MatchConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference tick rate used to size the fixed inter-round pauses
    pub const TICK_HZ: u32 = 120;

    /// Pixels per entity size unit (a size-1 shape spans 20 px edge to edge)
    pub const SIZE_UNIT: f32 = 10.0;

    /// Ball size in size units (radius = BALL_SIZE * SIZE_UNIT)
    pub const BALL_SIZE: f32 = 0.5;
    /// Paddle half-width in size units
    pub const PADDLE_HALF_WIDTH: f32 = 0.5;
    /// Horizontal inset of each paddle from its wall (px)
    pub const PADDLE_INSET: f32 = 30.0;

    /// Offset added to the CPU's randomized reaction threshold (px)
    pub const REACT_X_OFFSET: f32 = 50.0;
    /// The CPU drifts home only once the departing ball is this close to the
    /// human paddle's plane (px)
    pub const CENTER_RETURN_RANGE: f32 = 100.0;

    /// Ball stays hidden after a point (2 seconds at the reference rate)
    pub const POINT_PAUSE_TICKS: u32 = 2 * TICK_HZ;
    /// Serve freeze after the ball is re-homed (2 seconds)
    pub const SERVE_PAUSE_TICKS: u32 = 2 * TICK_HZ;
}

/// Normalize a heading in degrees to [0, 360)
#[inline]
pub fn normalize_heading(heading: f32) -> f32 {
    heading.rem_euclid(360.0)
}

/// Convert (speed, heading in degrees) to a cartesian velocity
#[inline]
pub fn polar_to_cartesian(speed: f32, heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}

/// Convert a cartesian velocity to (speed, heading in degrees).
/// The heading comes back in (-180, 180]; use [`normalize_heading`] for
/// direction checks.
#[inline]
pub fn cartesian_to_polar(vel: Vec2) -> (f32, f32) {
    (vel.length(), vel.y.atan2(vel.x).to_degrees())
}
