use ultraviolet::Vec2;

use crate::physics::Body;

// One constant for both body-body attraction and ray bending.
pub const G: f32 = 6.674e-10;

// Separation floor; coincident points exert no pull rather than divide by zero.
pub const MIN_DISTANCE: f32 = 1e-6;

/// Pull exerted at `point` by `attractor`, per unit of attracted mass.
/// The law is `G * mass / distance`, directed toward the attractor.
pub fn pull_from(point: Vec2, attractor: &Body) -> Vec2 {
    let offset = attractor.pos - point;
    let distance = offset.mag();
    if distance < MIN_DISTANCE {
        return Vec2::zero();
    }

    (offset / distance) * (G * attractor.mass / distance)
}

/// Summed pull over every body, as felt by a massless test ray.
pub fn field_at(point: Vec2, bodies: &[Body]) -> Vec2 {
    bodies
        .iter()
        .fold(Vec2::zero(), |sum, body| sum + pull_from(point, body))
}
