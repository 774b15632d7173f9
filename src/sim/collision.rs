//! Collision predicates for the rectangular court
//!
//! Pure geometry tests; the tick loop applies the consequences (deflection,
//! scoring) so the predicates stay reusable for the CPU's ghost-ball
//! simulation.

use super::state::{Ball, Paddle, Side};

/// Ball touching the top or bottom wall
pub fn hits_horizontal_wall(ball: &Ball, screen_height: f32) -> bool {
    screen_height / 2.0 - ball.pos.y.abs() < ball.radius
}

/// Ball reaching the left or right court bound (a point for the other side)
pub fn crosses_vertical_bound(ball: &Ball, screen_width: f32) -> bool {
    screen_width / 2.0 - ball.pos.x.abs() < ball.radius
}

/// Which paddle, if either, the ball is contacting this tick.
///
/// A paddle only counts while the ball travels toward it and the ball's
/// center is within the paddle's vertical extent. The left face is tested
/// first and the tests are exclusive, so at most one contact is reported
/// per tick.
pub fn paddle_contact(ball: &Ball, left: &Paddle, right: &Paddle) -> Option<Side> {
    if ball.pos.x - ball.radius <= left.face_x() {
        if ball.moving_direction() == Side::Left
            && (ball.pos.y - left.pos.y).abs() <= left.half_extent()
        {
            return Some(Side::Left);
        }
    } else if ball.pos.x + ball.radius >= right.face_x()
        && ball.moving_direction() == Side::Right
        && (ball.pos.y - right.pos.y).abs() <= right.half_extent()
    {
        return Some(Side::Right);
    }
    None
}
