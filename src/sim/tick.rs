//! Per-tick match orchestration
//!
//! One [`tick`] advances the match one step in a fixed order: human input,
//! CPU reaction trigger and movement, ball advance, then collision
//! consequences (deflection, scoring, round reset, win detection).
//! Rendering happens outside, between ticks.

use super::collision;
use super::cpu;
use super::state::{CPU, HUMAN, MatchEvent, MatchPhase, MatchState, Side};
use crate::consts::{POINT_PAUSE_TICKS, SERVE_PAUSE_TICKS};

/// Edge-triggered human commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        MatchPhase::GameOver => return,
        MatchPhase::PointPause => {
            state.pause_ticks = state.pause_ticks.saturating_sub(1);
            if state.pause_ticks == 0 {
                serve_next_round(state);
            }
            return;
        }
        MatchPhase::ServePause => {
            state.pause_ticks = state.pause_ticks.saturating_sub(1);
            if state.pause_ticks == 0 {
                state.phase = MatchPhase::Playing;
            }
            return;
        }
        MatchPhase::Playing => {}
    }

    let MatchState {
        config,
        rng,
        phase,
        time_ticks,
        pause_ticks,
        ball,
        players,
        events,
        ..
    } = state;

    *time_ticks += 1;

    // Human input
    if input.up {
        players[HUMAN].move_up(config.screen_height);
    }
    if input.down {
        players[HUMAN].move_down(config.screen_height);
    }

    // CPU reaction trigger and paddle movement
    let human_paddle_x = players[HUMAN].paddle.pos.x;
    cpu::drive(&mut players[CPU], ball, human_paddle_x, config, rng);

    // Ball advances; consequences are mutually exclusive within one tick
    ball.move_forward();

    if collision::hits_horizontal_wall(ball, config.screen_height) {
        ball.deflect_vertical();
        events.push(MatchEvent::WallBounce);
    } else if collision::crosses_vertical_bound(ball, config.screen_width) {
        // Whoever the ball was escaping from concedes the point
        let scorer = match ball.moving_direction() {
            Side::Left => CPU,
            Side::Right => HUMAN,
        };
        players[scorer].score += 1;
        ball.visible = false;
        events.push(MatchEvent::PointScored { scorer });

        if players[scorer].score >= config.winning_score {
            *phase = MatchPhase::GameOver;
            events.push(MatchEvent::MatchOver { winner: scorer });
        } else {
            *phase = MatchPhase::PointPause;
            *pause_ticks = POINT_PAUSE_TICKS;
        }
    } else if let Some(side) = collision::paddle_contact(
        ball,
        &players[HUMAN].paddle,
        &players[CPU].paddle,
    ) {
        let paddle = match side {
            Side::Left => &players[HUMAN].paddle,
            Side::Right => &players[CPU].paddle,
        };
        let di = paddle.directional_influence(ball.pos.y);

        // A human return starts the CPU's next reaction cycle
        if side == Side::Left {
            if let Some(reaction) = players[CPU].reaction_mut() {
                reaction.arm(config.screen_width, rng);
            }
        }

        ball.deflect_horizontal(di);
        events.push(MatchEvent::PaddleHit { side, di });
    }
}

/// End of the hidden pause: re-home everything, then freeze for the serve
fn serve_next_round(state: &mut MatchState) {
    let speed = state.config.starting_ball_speed;
    let width = state.config.screen_width;

    state.ball.restart(speed, &mut state.rng);
    state.players[HUMAN].paddle.reset_to_center(width);
    state.players[CPU].paddle.reset_to_center(width);
    state.arm_cpu_for_serve();

    state.phase = MatchPhase::ServePause;
    state.pause_ticks = SERVE_PAUSE_TICKS;
}
