use crate::math::Vec2;
use crate::objects::PhysicsBody;

/// Advances a body one tick.
///
/// Position moves by the current velocity first; gravity is then applied to
/// kinematic bodies only, so a body resting on the ground is displaced by at
/// most one tick of accumulated gravity before resolution pushes it back.
/// Static bodies are left untouched.
pub fn integrate(body: &mut PhysicsBody, gravity: Vec2, dt: f64) {
    if !body.is_dynamic() {
        return;
    }

    let velocity = body.velocity;
    if velocity != Vec2::ZERO {
        body.translate(velocity * dt);
    }

    if body.is_kinematic {
        body.velocity += gravity * dt;
    }
}
