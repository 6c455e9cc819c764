use macroquad::prelude::*;

mod gravity;
mod light;
mod physics;
mod simulation;

fn window_conf() -> Conf {
    Conf {
        window_title: "black hole simulation".to_string(),
        window_width: physics::WORLD_W as i32,
        window_height: physics::WORLD_H as i32,
        window_resizable: false,
        sample_count: 0,
        icon: None,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut sim = simulation::Simulation::init();

    loop {
        sim.update();
        sim.render();

        next_frame().await
    }
}
