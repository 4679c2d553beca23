//! Maze Bounce headless runner
//!
//! Drives the simulation without a renderer: drops a few walls, runs a fixed
//! number of ticks, and logs every impact. Useful for eyeballing the bounce
//! behavior from a terminal (`RUST_LOG=debug cargo run`).

use glam::Vec2;

use maze_bounce::SimConfig;
use maze_bounce::sim::{MazeSimulation, SimEvent, TickInput, tick};

const RUN_TICKS: u64 = 20_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB0A7);

    let config = SimConfig::default();
    log::info!(
        "Maze Bounce starting: {}x{} board, seed {seed}",
        config.grid_size,
        config.grid_size
    );
    log::debug!("config: {}", config.to_json().unwrap_or_default());

    let mut sim = match MazeSimulation::with_seed(config, seed) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("bad configuration: {err}");
            std::process::exit(1);
        }
    };

    // A small obstacle course around the center
    for target in [
        Vec2::new(2.0, 2.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(-3.0, -1.0),
        Vec2::new(-2.0, 3.0),
        Vec2::new(4.0, -2.0),
    ] {
        match sim.toggle_wall_at(target) {
            Ok(change) => log::info!("wall placed at {}", change.cell.label()),
            Err(err) => log::warn!("wall skipped: {err}"),
        }
    }
    sim.drain_events();
    sim.set_paused(false);

    let input = TickInput::default();
    let mut impacts = 0u64;
    for _ in 0..RUN_TICKS {
        tick(&mut sim, &input);
        for event in sim.drain_events() {
            match event {
                SimEvent::Impact(record) => {
                    impacts += 1;
                    log::info!(
                        "impact #{impacts} at ({:.3},{:.3}): incidence {:.1} normal {:.1} reflected {:.1}",
                        record.position.x,
                        record.position.y,
                        record.incidence_degrees,
                        record.normal_degrees,
                        record.reflected_degrees,
                    );
                }
                SimEvent::CellEntered { label, .. } => {
                    log::debug!("sprite entered {label}");
                }
                SimEvent::WallPlaced(cell) | SimEvent::WallRemoved(cell) => {
                    log::debug!("wall changed at {}", cell.label());
                }
            }
        }
    }

    println!(
        "ran {} ticks: {impacts} impacts, sprite in cell {} at ({:.3},{:.3}) heading {:.1} speed {:.3}",
        sim.ticks(),
        sim.cell_label(),
        sim.sprite.pos.x,
        sim.sprite.pos.y,
        sim.sprite.heading_degrees(),
        sim.sprite.speed(),
    );
}
