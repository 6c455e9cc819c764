use core::f32::consts::PI;

use ultraviolet::Vec2;

use crate::gravity::MIN_DISTANCE;

pub const WORLD_W: f32 = 1000.0;
pub const WORLD_H: f32 = 1000.0;

// Scroll-resizing never takes a body below this mass.
pub const MIN_MASS: f32 = 10.0;

const WALL_DAMPING: f32 = -0.8;
const RESTITUTION: f32 = 1.0;
const IMPULSE_DAMPING: f32 = 0.9;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Generic,
    BlackHole,
}

#[derive(Clone)]
pub struct Body {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub mass: f32,
    pub density: f32,
    pub movable: bool,
    pub destroyed: bool,
}

impl Body {
    pub fn new(kind: BodyKind, pos: Vec2, mass: f32) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::zero(),
            acc: Vec2::zero(),
            mass,
            density: 1.0,
            movable: true,
            destroyed: false,
        }
    }

    // Radius follows mass and density, never stored.
    pub fn radius(&self) -> f32 {
        (self.mass / self.density / PI).sqrt()
    }

    pub fn pull(&mut self, force: Vec2) {
        self.acc += force / self.mass;
    }

    pub fn integrate(&mut self, dt: f32) {
        if !self.movable {
            return;
        }

        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        self.acc = Vec2::zero();

        // Walls reflect the whole velocity vector, losing a fifth of it.
        if self.pos.x < 0.0 || self.pos.x > WORLD_W || self.pos.y < 0.0 || self.pos.y > WORLD_H {
            self.pos.x = self.pos.x.clamp(0.0, WORLD_W);
            self.pos.y = self.pos.y.clamp(0.0, WORLD_H);
            self.vel *= WALL_DAMPING;
        }
    }
}

/// Resolve overlaps between `bodies[i]` and every other body: separate the
/// pair weighted by the opposite mass, then exchange a damped elastic
/// impulse. Anchored bodies are never repositioned but still trade impulse.
pub fn collide(bodies: &mut [Body], i: usize) {
    for j in 0..bodies.len() {
        if i == j {
            continue;
        }

        let (a, b) = pair_mut(bodies, i, j);

        let offset = a.pos - b.pos;
        if offset.mag() > a.radius() + b.radius() {
            continue;
        }

        let distance = offset.mag().max(MIN_DISTANCE);
        let overlap = a.radius() + b.radius() - distance;
        let normal = offset / distance;

        let total = a.mass + b.mass;
        if a.movable {
            a.pos += normal * overlap * (b.mass / total);
        }
        if b.movable {
            b.pos -= normal * overlap * (a.mass / total);
        }

        let along_normal = (a.vel - b.vel).dot(normal);
        if along_normal >= 0.0 {
            continue;
        }

        let j_mag = -(1.0 + RESTITUTION) * along_normal / (1.0 / a.mass + 1.0 / b.mass);
        let impulse = normal * j_mag * IMPULSE_DAMPING;
        a.vel += impulse / a.mass;
        b.vel -= impulse / b.mass;
    }
}

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
