//! Match state and core entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::cpu::CpuReaction;
use crate::config::MatchConfig;
use crate::consts::*;
use crate::{cartesian_to_polar, normalize_heading, polar_to_cartesian};

/// Index of the human player in [`MatchState::players`]
pub const HUMAN: usize = 0;
/// Index of the CPU player
pub const CPU: usize = 1;

/// Court side. Doubles as a horizontal travel direction: a ball "moving
/// Left" is closing on the left paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The ball, or a hidden ghost copy of it used for interception prediction.
///
/// Velocity is stored polar as (speed, heading in degrees); speed stays
/// constant between deflection events.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Speed in px per tick
    pub speed: f32,
    /// Heading in degrees, counter-clockwise from the positive x axis
    pub heading: f32,
    pub radius: f32,
    /// Hidden between a point and the next serve; ghosts are never visible
    pub visible: bool,
}

impl Ball {
    /// Serve a fresh ball from the court center
    pub fn serve(speed: f32, rng: &mut impl Rng) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            speed,
            heading: 0.0,
            radius: BALL_SIZE * SIZE_UNIT,
            visible: true,
        };
        ball.restart(speed, rng);
        ball
    }

    /// Spawn the hidden simulation copy: same position and heading as the
    /// live ball, advanced at the reference speed instead of the live one.
    /// Fully independent state, so integrating it cannot perturb the
    /// original.
    pub fn ghost(&self, sim_speed: f32) -> Self {
        Self {
            pos: self.pos,
            speed: sim_speed,
            heading: self.heading,
            radius: self.radius,
            visible: false,
        }
    }

    /// Re-home to center with a fresh random heading.
    ///
    /// Exactly 90 and 270 are excluded: a vertical ball would rally forever
    /// without reaching either paddle.
    pub fn restart(&mut self, speed: f32, rng: &mut impl Rng) {
        self.pos = Vec2::ZERO;
        self.speed = speed;
        self.heading = loop {
            let heading = rng.random_range(0..360u32);
            if heading != 90 && heading != 270 {
                break heading as f32;
            }
        };
        self.visible = true;
    }

    /// Advance one tick along the current heading. No bound checks here;
    /// the caller runs collision detection afterwards.
    pub fn move_forward(&mut self) {
        self.pos += polar_to_cartesian(self.speed, self.heading);
    }

    /// Bounce off the top or bottom wall: mirror the vertical velocity
    /// component, preserving speed
    pub fn deflect_vertical(&mut self) {
        let mut vel = polar_to_cartesian(self.speed, self.heading);
        vel.y = -vel.y;
        (self.speed, self.heading) = cartesian_to_polar(vel);
    }

    /// Bounce off a paddle. The new heading encodes only which side was
    /// struck plus the directional influence; the incoming angle is
    /// discarded and speed is unchanged. Not a physical reflection.
    pub fn deflect_horizontal(&mut self, di: f32) {
        self.heading = match self.moving_direction() {
            Side::Left => 90.0 * di,
            Side::Right => 180.0 - 90.0 * di,
        };
    }

    /// Which side the ball is traveling toward. Uses the normalized heading;
    /// exactly 90 and 270 count as Right.
    pub fn moving_direction(&self) -> Side {
        let heading = normalize_heading(self.heading);
        if heading > 90.0 && heading < 270.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// A paddle. x is fixed at placement; only y changes during play.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    /// Length in size units; half-extent in px is `length * SIZE_UNIT`
    pub length: f32,
}

impl Paddle {
    pub fn new(side: Side, length: f32, screen_width: f32) -> Self {
        let mut paddle = Self {
            side,
            pos: Vec2::ZERO,
            length,
        };
        paddle.reset_to_center(screen_width);
        paddle
    }

    /// Half of the paddle's vertical extent, in px. Scales both contact
    /// geometry and directional influence.
    pub fn half_extent(&self) -> f32 {
        self.length * SIZE_UNIT
    }

    /// Half of the paddle's horizontal thickness, in px
    pub fn half_width(&self) -> f32 {
        PADDLE_HALF_WIDTH * SIZE_UNIT
    }

    /// The x plane a ball contacts: the paddle face toward the court center
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.pos.x + self.half_width(),
            Side::Right => self.pos.x - self.half_width(),
        }
    }

    /// Place at the fixed x inset from the wall, centered vertically
    pub fn reset_to_center(&mut self, screen_width: f32) {
        self.pos = match self.side {
            Side::Left => Vec2::new(-screen_width / 2.0 + PADDLE_INSET, 0.0),
            Side::Right => Vec2::new(screen_width / 2.0 - PADDLE_INSET, 0.0),
        };
    }

    /// Directional influence for a ball contacting at `ball_y`.
    ///
    /// Linear in the contact offset, scaled by 0.8 so an edge hit stays
    /// short of vertical. Callers must have passed the paddle contact test
    /// first; geometry then bounds the result to about [-0.8, 0.8].
    pub fn directional_influence(&self, ball_y: f32) -> f32 {
        (ball_y - self.pos.y) * 0.8 / self.half_extent()
    }
}

/// What drives a player's paddle
#[derive(Debug, Clone)]
pub enum PlayerKind {
    /// Driven by external [`super::TickInput`] commands
    Human,
    /// Driven by the reaction engine in [`super::cpu`]
    Cpu(CpuReaction),
}

/// A match participant: score, movement tuning, and exactly one paddle
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub score: u32,
    /// Paddle step per accepted move command (px)
    pub paddle_speed: f32,
    pub paddle: Paddle,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(
        name: String,
        side: Side,
        paddle_length: f32,
        paddle_speed: f32,
        screen_width: f32,
        kind: PlayerKind,
    ) -> Self {
        Self {
            name,
            score: 0,
            paddle_speed,
            paddle: Paddle::new(side, paddle_length, screen_width),
            kind,
        }
    }

    /// Step the paddle up, unless its far edge has run out of room.
    /// A rejected move is a plain no-op, not a clamp.
    pub fn move_up(&mut self, screen_height: f32) {
        if self.paddle.half_extent() < screen_height / 2.0 - self.paddle.pos.y {
            self.paddle.pos.y += self.paddle_speed;
        }
    }

    /// Mirror of [`Self::move_up`]
    pub fn move_down(&mut self, screen_height: f32) {
        if self.paddle.half_extent() < screen_height / 2.0 + self.paddle.pos.y {
            self.paddle.pos.y -= self.paddle_speed;
        }
    }

    /// The CPU reaction state, if this player is computer controlled
    pub fn reaction_mut(&mut self) -> Option<&mut CpuReaction> {
        match &mut self.kind {
            PlayerKind::Cpu(reaction) => Some(reaction),
            PlayerKind::Human => None,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Active rally
    Playing,
    /// A point just landed: ball hidden, paddles frozen
    PointPause,
    /// Ball re-homed and visible, frozen until the serve
    ServePause,
    /// A player reached the winning score
    GameOver,
}

/// Things a frontend may want to react to, raised during the most recent
/// tick and cleared at the start of the next one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    WallBounce,
    PaddleHit { side: Side, di: f32 },
    PointScored { scorer: usize },
    MatchOver { winner: usize },
}

/// Complete match state. Owns the config, the RNG, the ball, and both
/// players; step functions receive this explicitly instead of sharing
/// globals.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub config: MatchConfig,
    /// Match seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: MatchPhase,
    /// Countdown driving the pause phases
    pub pause_ticks: u32,
    /// Ticks spent in active play
    pub time_ticks: u64,
    pub ball: Ball,
    /// `players[HUMAN]` defends the left side, `players[CPU]` the right
    pub players: [Player; 2],
    /// Events raised by the most recent tick
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Create a match ready to play its opening serve
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::serve(config.starting_ball_speed, &mut rng);

        let human = Player::new(
            config.player_name.clone(),
            Side::Left,
            config.paddle_length,
            config.paddle_speed,
            config.screen_width,
            PlayerKind::Human,
        );
        let cpu = Player::new(
            config.cpu_name.clone(),
            Side::Right,
            config.paddle_length,
            config.cpu_paddle_speed,
            config.screen_width,
            PlayerKind::Cpu(CpuReaction::new(config.screen_width)),
        );

        let mut state = Self {
            seed,
            rng,
            phase: MatchPhase::Playing,
            pause_ticks: 0,
            time_ticks: 0,
            ball,
            players: [human, cpu],
            events: Vec::new(),
            config,
        };
        state.arm_cpu_for_serve();
        state
    }

    /// Arm the CPU for an instant reaction when the fresh serve already
    /// travels its way; a leftward serve leaves the trigger disarmed until
    /// the human returns the ball.
    pub(crate) fn arm_cpu_for_serve(&mut self) {
        if self.ball.moving_direction() == Side::Right {
            if let Some(reaction) = self.players[CPU].reaction_mut() {
                reaction.arm_instant();
            }
        }
    }

    /// The winning player, once the match is over
    pub fn winner(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.score >= self.config.winning_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, heading: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            speed: 3.0,
            heading,
            radius: 5.0,
            visible: true,
        }
    }

    #[test]
    fn test_deflect_vertical_mirrors_and_preserves_speed() {
        let mut ball = ball_at(0.0, 0.0, 30.0);
        let before = polar_to_cartesian(ball.speed, ball.heading);

        ball.deflect_vertical();
        let after = polar_to_cartesian(ball.speed, ball.heading);
        assert!((ball.speed - 3.0).abs() < 1e-5);
        assert!((after.x - before.x).abs() < 1e-4);
        assert!((after.y + before.y).abs() < 1e-4);

        // Applying it twice restores the original velocity
        ball.deflect_vertical();
        let twice = polar_to_cartesian(ball.speed, ball.heading);
        assert!((twice - before).length() < 1e-4);
    }

    #[test]
    fn test_deflect_horizontal_is_heading_reassignment() {
        // Off the left paddle: heading becomes 90 * di
        let mut ball = ball_at(-360.0, 0.0, 200.0);
        ball.deflect_horizontal(0.5);
        assert_eq!(ball.heading, 45.0);
        assert_eq!(ball.speed, 3.0);

        // Off the right paddle: heading becomes 180 - 90 * di
        let mut ball = ball_at(360.0, 0.0, 10.0);
        ball.deflect_horizontal(-0.8);
        assert_eq!(ball.heading, 252.0);
        assert_eq!(ball.speed, 3.0);
    }

    #[test]
    fn test_moving_direction_boundaries() {
        assert_eq!(ball_at(0.0, 0.0, 89.0).moving_direction(), Side::Right);
        assert_eq!(ball_at(0.0, 0.0, 90.0).moving_direction(), Side::Right);
        assert_eq!(ball_at(0.0, 0.0, 91.0).moving_direction(), Side::Left);
        assert_eq!(ball_at(0.0, 0.0, 269.0).moving_direction(), Side::Left);
        assert_eq!(ball_at(0.0, 0.0, 270.0).moving_direction(), Side::Right);
        assert_eq!(ball_at(0.0, 0.0, 271.0).moving_direction(), Side::Right);
        // Wrap-around: raw negative headings normalize before the check
        assert_eq!(ball_at(0.0, 0.0, -90.0).moving_direction(), Side::Right);
        assert_eq!(ball_at(0.0, 0.0, -150.0).moving_direction(), Side::Left);
    }

    #[test]
    fn test_restart_never_serves_vertical() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut ball = Ball::serve(3.0, &mut rng);
        for _ in 0..10_000 {
            ball.restart(3.0, &mut rng);
            assert_eq!(ball.pos, Vec2::ZERO);
            assert!(ball.visible);
            assert!((0.0..360.0).contains(&ball.heading));
            assert_eq!(ball.heading.fract(), 0.0);
            assert_ne!(ball.heading, 90.0);
            assert_ne!(ball.heading, 270.0);
        }
    }

    #[test]
    fn test_ghost_copies_position_and_heading_only() {
        let ball = ball_at(12.0, -34.0, 17.0);
        let ghost = ball.ghost(9.0);
        assert_eq!(ghost.pos, ball.pos);
        assert_eq!(ghost.heading, ball.heading);
        assert_eq!(ghost.speed, 9.0);
        assert!(!ghost.visible);
    }

    #[test]
    fn test_paddle_placement_and_face() {
        let left = Paddle::new(Side::Left, 5.0, 800.0);
        assert_eq!(left.pos, Vec2::new(-370.0, 0.0));
        assert_eq!(left.face_x(), -365.0);

        let right = Paddle::new(Side::Right, 5.0, 800.0);
        assert_eq!(right.pos, Vec2::new(370.0, 0.0));
        assert_eq!(right.face_x(), 365.0);
    }

    #[test]
    fn test_directional_influence_linear_map() {
        let paddle = Paddle::new(Side::Right, 5.0, 800.0);
        assert_eq!(paddle.directional_influence(0.0), 0.0);
        assert_eq!(paddle.directional_influence(50.0), 0.8);
        assert_eq!(paddle.directional_influence(-50.0), -0.8);
        assert!((paddle.directional_influence(25.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_move_guard_rejects_at_bound() {
        let mut player = Player::new(
            "P".to_string(),
            Side::Left,
            5.0,
            40.0,
            800.0,
            PlayerKind::Human,
        );

        // Half-extent 50, court half-height 250: at y=200 the top edge sits
        // exactly on the bound, so up is rejected and down still works
        player.paddle.pos.y = 200.0;
        player.move_up(500.0);
        assert_eq!(player.paddle.pos.y, 200.0);
        player.move_down(500.0);
        assert_eq!(player.paddle.pos.y, 160.0);

        // Mirrored at the bottom
        player.paddle.pos.y = -200.0;
        player.move_down(500.0);
        assert_eq!(player.paddle.pos.y, -200.0);
        player.move_up(500.0);
        assert_eq!(player.paddle.pos.y, -160.0);
    }

    #[test]
    fn test_new_match_is_ready_to_play() {
        let state = MatchState::new(MatchConfig::default(), 7);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.players[HUMAN].score, 0);
        assert_eq!(state.players[CPU].score, 0);
        assert_eq!(state.players[HUMAN].paddle.pos, Vec2::new(-370.0, 0.0));
        assert_eq!(state.players[CPU].paddle.pos, Vec2::new(370.0, 0.0));
        assert!(state.ball.visible);
        assert_ne!(state.ball.heading, 90.0);
        assert_ne!(state.ball.heading, 270.0);
        assert!(state.winner().is_none());
    }

    #[test]
    fn test_serve_toward_cpu_arms_instant_reaction() {
        // Scan seeds for one rightward and one leftward opening serve
        let mut saw_right = false;
        let mut saw_left = false;
        for seed in 0..64 {
            let mut state = MatchState::new(MatchConfig::default(), seed);
            let dir = state.ball.moving_direction();
            let reaction = state.players[CPU].reaction_mut().unwrap();
            match dir {
                Side::Right => {
                    assert_eq!(reaction.react_x, 0.0);
                    saw_right = true;
                }
                Side::Left => {
                    assert_eq!(reaction.react_x, 800.0);
                    saw_left = true;
                }
            }
        }
        assert!(saw_right && saw_left);
    }
}
