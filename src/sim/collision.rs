//! Collision detection and response for the rectangular field
//!
//! Wall tests are predictive: they look at where the ball would be next
//! frame so the reflection happens before the boundary is crossed. Block
//! hits elsewhere use center-point containment (`Rect::contains`), a
//! deliberate simplification.

use glam::Vec2;

use super::state::Paddle;
use crate::consts::PADDLE_MAX_REFLECTION;

/// Would the ball cross the left or right field boundary next frame?
pub fn crosses_side_wall(pos: Vec2, vel: Vec2, radius: f32, dt: f32, field_width: f32) -> bool {
    let next_x = pos.x + vel.x * dt;
    next_x > field_width - radius || next_x < radius
}

/// Would the ball cross the top boundary next frame?
pub fn crosses_top_wall(pos: Vec2, vel: Vec2, radius: f32, dt: f32) -> bool {
    pos.y + vel.y * dt < radius
}

/// Would the ball cross the bottom boundary next frame?
pub fn crosses_bottom(pos: Vec2, vel: Vec2, radius: f32, dt: f32, field_height: f32) -> bool {
    pos.y + vel.y * dt > field_height - radius
}

/// Angle-based paddle reflection.
///
/// The hit position relative to the paddle center maps linearly onto
/// [-pi/4, pi/4]: center hits go straight up, edge hits deflect sharply.
/// Speed magnitude is preserved.
pub fn paddle_reflect(ball_x: f32, vel: Vec2, paddle: &Paddle) -> Vec2 {
    let relative = (ball_x - paddle.center_x()) / (paddle.width / 2.0);
    let angle = relative * PADDLE_MAX_REFLECTION;
    let speed = vel.length();
    Vec2::new(angle.sin() * speed, -angle.cos() * speed)
}
