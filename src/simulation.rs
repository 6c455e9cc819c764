use macroquad::{color::*, input::*, shapes::*, text::draw_text, time::*, window::*};
use ultraviolet::Vec2;

use crate::gravity;
use crate::light::LightSource;
use crate::physics::{self, Body, BodyKind, MIN_MASS};

const SPAWN_MASS: f32 = 100_000.0;
const SPAWN_DENSITY: f32 = 100.0;

/// Pointer state for one frame, in simulation space.
#[derive(Default, Clone, Copy)]
pub struct Pointer {
    pub pos: Vec2,
    pub scroll: f32,
    pub primary: bool,
    pub secondary: bool,
}

pub struct Simulation {
    bodies: Vec<Body>,
    light: Option<LightSource>,
    paused: bool,
    fps: i32,
    logged: u32,
}

fn black_hole(pos: Vec2) -> Body {
    Body {
        density: SPAWN_DENSITY,
        ..Body::new(BodyKind::BlackHole, pos, SPAWN_MASS)
    }
}

impl Simulation {
    pub fn init() -> Self {
        let mut bodies = vec![
            black_hole(Vec2::new(500.0, 500.0)),
            black_hole(Vec2::new(11.0, 500.0)),
        ];

        // A light test mass on a fast pass between the two holes
        bodies.push(Body {
            vel: Vec2::new(0.0, 900.0),
            ..Body::new(BodyKind::Generic, Vec2::new(700.0, 500.0), 10.0)
        });

        Self {
            bodies,
            light: None,
            paused: false,
            fps: 0,
            logged: 0,
        }
    }

    pub fn update(&mut self) {
        // Spawns and removals from the keyboard happen before the body
        // loop, never during it.
        if is_key_pressed(KeyCode::L) {
            self.light = Some(LightSource::new(mouse_pos()));
        }
        if is_key_pressed(KeyCode::K) {
            self.light = None;
        }
        if is_key_pressed(KeyCode::Space) {
            self.bodies.push(black_hole(mouse_pos()));
        }
        if is_key_pressed(KeyCode::P) {
            self.paused = !self.paused;
        }

        let pointer = Pointer {
            pos: mouse_pos(),
            scroll: mouse_wheel().1,
            primary: is_mouse_button_down(MouseButton::Left),
            secondary: is_mouse_button_down(MouseButton::Right),
        };

        self.step(get_frame_time(), &pointer);

        // Update fps around 10 times per second
        let time = (10.0 * get_time()) as u32;

        if time > self.logged {
            self.logged = time;
            self.fps = get_fps();
        }
    }

    /// One simulation frame: pointer overrides, then per-kind physics in
    /// list order, then compaction of destroyed bodies.
    pub fn step(&mut self, dt: f32, pointer: &Pointer) {
        for i in 0..self.bodies.len() {
            if self.pointer_override(i, pointer) {
                continue;
            }
            if self.paused {
                continue;
            }

            if self.bodies[i].kind == BodyKind::BlackHole {
                self.attract_all(i);
            }
            self.bodies[i].integrate(dt);
            physics::collide(&mut self.bodies, i);
        }

        self.bodies.retain(|body| !body.destroyed);
    }

    // Direct manipulation of whichever body sits under the pointer.
    // Returns true when the body skips physics this frame.
    fn pointer_override(&mut self, i: usize, pointer: &Pointer) -> bool {
        let body = &mut self.bodies[i];
        if (pointer.pos - body.pos).mag() >= body.radius() {
            return false;
        }

        if pointer.scroll != 0.0 {
            if pointer.scroll > 0.0 {
                body.mass *= 1.0 + pointer.scroll;
            } else {
                body.mass /= 1.0 - pointer.scroll;
            }
            body.mass = body.mass.max(MIN_MASS);
        }

        if pointer.primary {
            body.vel = Vec2::zero();
            body.pos = pointer.pos;
            return true;
        }
        if pointer.secondary {
            body.destroyed = true;
            return true;
        }

        false
    }

    // A black hole's pull lands on every other body immediately, before
    // the hole itself integrates.
    fn attract_all(&mut self, i: usize) {
        for j in 0..self.bodies.len() {
            if j == i {
                continue;
            }

            let force =
                gravity::pull_from(self.bodies[j].pos, &self.bodies[i]) * self.bodies[j].mass;
            self.bodies[j].pull(force);
        }
    }

    pub fn render(&self) {
        clear_background(BLACK);

        // Rays first so bodies occlude them
        if let Some(light) = &self.light {
            light.draw(&self.bodies);
        }

        for body in &self.bodies {
            match body.kind {
                BodyKind::BlackHole => {
                    draw_circle(body.pos.x, body.pos.y, body.radius(), BLACK);
                    draw_circle_lines(body.pos.x, body.pos.y, body.radius(), 1.0, YELLOW);
                }
                BodyKind::Generic => {
                    draw_circle(body.pos.x, body.pos.y, body.radius(), WHITE);
                }
            }
        }

        draw_text(&format!("{}", self.fps), 10.0, 16.0, 12.0, WHITE);
        if self.paused {
            draw_text("paused", 10.0, 30.0, 12.0, WHITE);
        }
    }
}

fn mouse_pos() -> Vec2 {
    let (x, y) = mouse_position();
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_with(bodies: Vec<Body>) -> Simulation {
        Simulation {
            bodies,
            light: None,
            paused: false,
            fps: 0,
            logged: 0,
        }
    }

    fn idle_pointer() -> Pointer {
        Pointer {
            pos: Vec2::new(-100.0, -100.0),
            ..Default::default()
        }
    }

    #[test]
    fn black_hole_deflects_a_passing_body() {
        let mut anchor = Body::new(BodyKind::BlackHole, Vec2::new(500.0, 500.0), 100_000.0);
        anchor.movable = false;

        let mut sim = sim_with(vec![
            anchor,
            Body {
                vel: Vec2::new(0.0, 900.0),
                ..Body::new(BodyKind::Generic, Vec2::new(700.0, 500.0), 10.0)
            },
        ]);

        sim.step(1.0 / 60.0, &idle_pointer());

        // The pass curves toward the hole while the hole stays anchored.
        assert!(sim.bodies[1].vel.x < 0.0, "vx = {}", sim.bodies[1].vel.x);
        assert!(sim.bodies[1].vel.y > 0.0);
        assert_eq!(sim.bodies[0].pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn scroll_never_drops_mass_below_the_floor() {
        let mut sim = sim_with(vec![Body::new(
            BodyKind::Generic,
            Vec2::new(500.0, 500.0),
            MIN_MASS,
        )]);

        let pointer = Pointer {
            pos: Vec2::new(500.0, 500.0),
            scroll: -40.0,
            ..Default::default()
        };
        sim.step(1.0 / 60.0, &pointer);

        assert_eq!(sim.bodies[0].mass, MIN_MASS);
    }

    #[test]
    fn scroll_up_scales_mass_multiplicatively() {
        let mut sim = sim_with(vec![Body::new(
            BodyKind::Generic,
            Vec2::new(500.0, 500.0),
            100.0,
        )]);

        let pointer = Pointer {
            pos: Vec2::new(500.0, 500.0),
            scroll: 1.0,
            ..Default::default()
        };
        sim.step(0.0, &pointer);

        assert_eq!(sim.bodies[0].mass, 200.0);
    }

    #[test]
    fn drag_snaps_to_the_pointer_and_freezes() {
        let mut sim = sim_with(vec![Body {
            vel: Vec2::new(50.0, 50.0),
            ..Body::new(BodyKind::Generic, Vec2::new(500.0, 500.0), 100.0)
        }]);

        let pointer = Pointer {
            pos: Vec2::new(501.0, 499.0),
            primary: true,
            ..Default::default()
        };
        sim.step(1.0 / 60.0, &pointer);

        assert_eq!(sim.bodies[0].pos, Vec2::new(501.0, 499.0));
        assert_eq!(sim.bodies[0].vel, Vec2::zero());
    }

    #[test]
    fn destroyed_bodies_are_gone_after_the_frame() {
        let mut sim = sim_with(vec![
            Body::new(BodyKind::Generic, Vec2::new(500.0, 500.0), 100.0),
            Body::new(BodyKind::Generic, Vec2::new(100.0, 100.0), 100.0),
        ]);

        let pointer = Pointer {
            pos: Vec2::new(500.0, 500.0),
            secondary: true,
            ..Default::default()
        };
        sim.step(1.0 / 60.0, &pointer);

        assert_eq!(sim.bodies.len(), 1);
        assert_eq!(sim.bodies[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn pause_freezes_physics_but_not_overrides() {
        let mut sim = sim_with(vec![Body {
            vel: Vec2::new(100.0, 0.0),
            ..Body::new(BodyKind::Generic, Vec2::new(500.0, 500.0), 100.0)
        }]);
        sim.paused = true;

        sim.step(1.0 / 60.0, &idle_pointer());
        assert_eq!(sim.bodies[0].pos, Vec2::new(500.0, 500.0));

        // Scroll still lands while paused.
        let pointer = Pointer {
            pos: Vec2::new(500.0, 500.0),
            scroll: 1.0,
            ..Default::default()
        };
        sim.step(1.0 / 60.0, &pointer);
        assert_eq!(sim.bodies[0].mass, 200.0);
        assert_eq!(sim.bodies[0].pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn empty_body_list_steps_without_incident() {
        let mut sim = sim_with(Vec::new());
        sim.step(1.0 / 60.0, &idle_pointer());

        assert!(sim.bodies.is_empty());
    }
}
