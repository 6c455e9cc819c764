use itertools::Itertools;
use macroquad::color::{Color, WHITE};
use macroquad::shapes::{draw_circle, draw_line};
use ultraviolet::Vec2;

use crate::gravity;
use crate::physics::Body;

pub struct LightSource {
    pub pos: Vec2,
    pub radius: f32,
    pub on: bool,
    /// Degrees between adjacent rays.
    pub angular_resolution: f32,
    /// Ray speed: both the direction magnitude and the march step.
    pub step_length: f32,
    pub max_distance: f32,
}

impl LightSource {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 10.0,
            on: true,
            angular_resolution: 5.0,
            step_length: 100.0,
            max_distance: 500.0,
        }
    }

    /// March one ray from the source at `angle` (radians) and return its
    /// polyline. Each step bends the direction by the field and renormalizes
    /// it back to `step_length`. The field is sampled at the source, not at
    /// the advancing tip, so a ray keeps bending the way its origin does.
    pub fn march(&self, angle: f32, bodies: &[Body]) -> Vec<Vec2> {
        let mut direction = Vec2::new(angle.cos(), angle.sin()) * self.step_length;
        let mut tip = self.pos;
        let mut points = vec![tip];

        let mut travelled = 0.0;
        while travelled < self.max_distance {
            direction += gravity::field_at(self.pos, bodies) * self.step_length;
            direction = direction.normalized() * self.step_length;
            tip += direction;
            points.push(tip);
            travelled += self.step_length;
        }

        points
    }

    /// Polylines for the full fan of rays; empty while the source is off.
    pub fn rays(&self, bodies: &[Body]) -> Vec<Vec<Vec2>> {
        if !self.on {
            return Vec::new();
        }

        let mut rays = Vec::new();
        let mut angle = 0.0f32;
        while angle < 360.0 {
            rays.push(self.march(angle.to_radians(), bodies));
            angle += self.angular_resolution;
        }

        rays
    }

    pub fn draw(&self, bodies: &[Body]) {
        draw_circle(self.pos.x, self.pos.y, self.radius, WHITE);

        for points in self.rays(bodies) {
            for (a, b) in points.iter().tuple_windows() {
                draw_line(a.x, a.y, b.x, b.y, 1.0, random_color());
            }
        }
    }
}

fn random_color() -> Color {
    Color::from_rgba(fastrand::u8(..), fastrand::u8(..), fastrand::u8(..), 255)
}
