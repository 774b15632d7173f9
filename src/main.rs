//! Reflex Pong entry point
//!
//! There is no bundled renderer: this binary runs a headless exhibition
//! match to demonstrate the embedding contract. A real frontend does the
//! same three things per tick — build a `TickInput` from keyboard state,
//! call `tick`, then draw from the public `MatchState` fields and drain
//! `state.events`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use reflex_pong::config::MatchConfig;
use reflex_pong::sim::{CPU, HUMAN, MatchEvent, MatchPhase, MatchState, TickInput, tick};

/// Tick budget so a perfectly even exhibition rally cannot spin forever
const MAX_DEMO_TICKS: u64 = 2_000_000;

fn main() {
    env_logger::init();

    let config = MatchConfig::load_or_default(Path::new("reflex-pong.json"));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    log::info!(
        "Exhibition match: {} vs {} to {}, seed {seed}",
        config.player_name,
        config.cpu_name,
        config.winning_score
    );

    let mut state = MatchState::new(config, seed);
    let mut ticks: u64 = 0;
    let mut paddle_hits: u64 = 0;
    let mut wall_bounces: u64 = 0;

    while state.phase != MatchPhase::GameOver && ticks < MAX_DEMO_TICKS {
        let input = follow_ball(&state);
        tick(&mut state, &input);
        ticks += 1;

        for event in &state.events {
            match event {
                MatchEvent::PaddleHit { .. } => paddle_hits += 1,
                MatchEvent::WallBounce => wall_bounces += 1,
                MatchEvent::PointScored { scorer } => log::info!(
                    "Point to {} ({} {} - {} {})",
                    state.players[*scorer].name,
                    state.players[HUMAN].name,
                    state.players[HUMAN].score,
                    state.players[CPU].name,
                    state.players[CPU].score,
                ),
                MatchEvent::MatchOver { winner } => {
                    log::info!("{} takes the match", state.players[*winner].name)
                }
            }
        }
    }

    match state.winner() {
        Some(winner) => log::info!(
            "Done after {ticks} ticks: {} wins {} - {} ({paddle_hits} returns, {wall_bounces} wall bounces)",
            winner.name,
            state.players[HUMAN].score,
            state.players[CPU].score,
        ),
        None => log::warn!("Tick budget exhausted with no winner"),
    }
}

/// Stand-in for the human: chase the ball's y with a half-step dead-zone
fn follow_ball(state: &MatchState) -> TickInput {
    if !state.ball.visible {
        return TickInput::default();
    }
    let paddle_y = state.players[HUMAN].paddle.pos.y;
    let dead_zone = state.players[HUMAN].paddle_speed / 2.0;
    let delta = state.ball.pos.y - paddle_y;
    TickInput {
        up: delta > dead_zone,
        down: delta < -dead_zone,
    }
}
