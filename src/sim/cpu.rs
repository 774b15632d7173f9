//! The CPU reaction engine
//!
//! The CPU does not track the ball continuously. Once per approach it
//! "sees" the trajectory: a hidden ghost ball is fast-forwarded from the
//! live ball's current position and heading to the CPU paddle's contact
//! plane, wall bounces included, and the resulting y becomes the movement
//! target. A randomized trigger threshold and a randomized aim offset keep
//! the reaction imperfect in a human-looking way.

use rand::Rng;

use super::collision;
use super::state::{Ball, Player, PlayerKind, Side};
use crate::config::MatchConfig;
use crate::consts::{CENTER_RETURN_RANGE, REACT_X_OFFSET};

/// Per-approach reaction bookkeeping
#[derive(Debug, Clone)]
pub struct CpuReaction {
    /// Whether the current approach has been reacted to yet
    pub reacted: bool,
    /// Ball x at which the reaction triggers
    pub react_x: f32,
    /// Predicted interception y from the last reaction
    pub future_y: f32,
    /// Aim offset in px, sampled once per reaction, so the CPU rarely
    /// returns the ball dead-center
    pub di_intent: f32,
    /// Paddle has crossed its target; hold still instead of oscillating
    pub stop_moving: bool,
}

impl CpuReaction {
    /// Fresh state with `react_x` at the far wall, so no trigger can fire
    /// before the first arm
    pub fn new(screen_width: f32) -> Self {
        Self {
            reacted: false,
            react_x: screen_width,
            future_y: 0.0,
            di_intent: 0.0,
            stop_moving: false,
        }
    }

    /// Arm a reaction with a randomized trigger threshold. Called when the
    /// human paddle returns the ball; the spread creates variable reaction
    /// latency.
    pub fn arm(&mut self, screen_width: f32, rng: &mut impl Rng) {
        let spread = screen_width / 8.0;
        self.react_x = rng.random_range(-spread..=spread) + REACT_X_OFFSET;
        self.reacted = false;
    }

    /// Arm an instant reaction (threshold at center court). Called when a
    /// fresh serve already travels toward the CPU, which could otherwise
    /// cross a randomized threshold before it exists.
    pub fn arm_instant(&mut self) {
        self.react_x = 0.0;
        self.stop_moving = false;
        self.reacted = false;
    }

    /// Commit to a predicted interception point and sample this approach's
    /// aim offset. Pushes the trigger back to the far wall until the next
    /// arm.
    pub fn commit(
        &mut self,
        future_y: f32,
        aim_spread: f32,
        screen_width: f32,
        rng: &mut impl Rng,
    ) {
        self.future_y = future_y;
        self.reacted = true;
        self.stop_moving = false;
        self.react_x = screen_width;
        self.di_intent = rng.random_range(-aim_spread..=aim_spread);
    }
}

/// Fast-forward a ghost of `ball` to the CPU paddle's contact plane and
/// report the y at which it arrives.
///
/// A full re-simulation rather than a closed form, so any number of wall
/// bounces is handled. It runs at `sim_speed` regardless of the live ball's
/// speed and terminates because the ghost only ever moves rightward.
pub fn predict_intercept_y(
    ball: &Ball,
    paddle_face_x: f32,
    sim_speed: f32,
    screen_height: f32,
) -> f32 {
    debug_assert!(ball.moving_direction() == Side::Right);

    let mut ghost = ball.ghost(sim_speed);
    while ghost.pos.x + ghost.radius <= paddle_face_x {
        ghost.move_forward();
        if collision::hits_horizontal_wall(&ghost, screen_height) {
            ghost.deflect_vertical();
        }
    }
    ghost.pos.y
}

/// Advance the CPU player by one tick: fire the reaction trigger if the
/// ball has crossed the threshold, step the paddle toward the committed
/// target, then handle the drift home while the ball travels away.
pub fn drive(
    cpu: &mut Player,
    ball: &Ball,
    human_paddle_x: f32,
    config: &MatchConfig,
    rng: &mut impl Rng,
) {
    let PlayerKind::Cpu(reaction) = &mut cpu.kind else {
        return;
    };

    // Reaction trigger
    if ball.pos.x >= reaction.react_x && !reaction.reacted {
        let future_y = predict_intercept_y(
            ball,
            cpu.paddle.face_x(),
            config.starting_ball_speed,
            config.screen_height,
        );
        let aim_spread = cpu.paddle.half_extent();
        reaction.commit(future_y, aim_spread, config.screen_width, rng);
    }

    let reacted = reaction.reacted;
    let stop_moving = reaction.stop_moving;
    let target = reaction.future_y + reaction.di_intent;

    // Tracking: one step toward the target per tick, stopping the instant
    // the paddle crosses it (ties stop)
    if reacted && !stop_moving {
        let half_height = config.screen_height / 2.0;
        let up_target = target.min(half_height);
        let down_target = target.max(-half_height);

        if cpu.paddle.pos.y < up_target {
            cpu.move_up(config.screen_height);
            if cpu.paddle.pos.y >= up_target {
                stop_tracking(cpu);
            }
        } else if cpu.paddle.pos.y > down_target {
            cpu.move_down(config.screen_height);
            if cpu.paddle.pos.y <= down_target {
                stop_tracking(cpu);
            }
        }
    }

    // Drift home while the ball heads back to the human, but only once it
    // is near that paddle's plane; any pending target is cancelled
    if ball.moving_direction() == Side::Left {
        stop_tracking(cpu);
        if ball.pos.x <= human_paddle_x + CENTER_RETURN_RANGE {
            // Dead-zone of half a step around center to avoid jitter
            if cpu.paddle.pos.y < -cpu.paddle_speed / 2.0 {
                cpu.move_up(config.screen_height);
            } else if cpu.paddle.pos.y > cpu.paddle_speed / 2.0 {
                cpu.move_down(config.screen_height);
            }
        }
    }
}

fn stop_tracking(cpu: &mut Player) {
    if let PlayerKind::Cpu(reaction) = &mut cpu.kind {
        reaction.stop_moving = true;
    }
}
