//! Headless flurry driver: runs a preset at a fixed timestep and logs stats.

use std::path::{Path, PathBuf};

use flurry::{
    options::{Options, SimulationOptions},
    particle::ParticleEngine,
    util::frame_timing::FrameTiming,
};

const PRESET_DIR: &str = "assets/presets";

fn resolve_preset_path(input: &str) -> Result<PathBuf, String> {
    let path = Path::new(input);
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    let preset = Path::new(PRESET_DIR).join(format!("{input}.toml"));
    if preset.exists() {
        return Ok(preset);
    }

    let available = Options::list_presets(Path::new(PRESET_DIR));
    Err(format!(
        "File not found and not a known preset: {input} (available: {})",
        available.join(", ")
    ))
}

fn run(engine: &mut ParticleEngine, simulation: &SimulationOptions) {
    let mut timing = FrameTiming::new(simulation.target_fps);
    let mut peak_active = 0;

    for frame in 1..=simulation.frames {
        let wait = timing.remaining();
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }

        engine.update(simulation.dt);
        timing.end_frame();
        peak_active = peak_active.max(engine.active_count());

        if simulation.report_every > 0 && frame % simulation.report_every == 0
        {
            let stats = engine.stats();
            log::info!(
                "frame {frame}: t={:.2}s active={} free={} emitted={} retired={} collisions={} ({:.0} updates/s)",
                engine.current_time(),
                stats.active,
                stats.free,
                stats.emitted_last_update,
                stats.retired_last_update,
                stats.collisions_last_update,
                timing.fps()
            );
        }
    }

    let stats = engine.stats();
    log::info!(
        "done after {} frames: {} release ticks, {} slots constructed of {}, peak {} active, final draw count {}",
        timing.frames(),
        stats.release_events,
        stats.constructed,
        stats.capacity,
        peak_active,
        engine.draw_count()
    );
}

fn main() {
    env_logger::init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fountain".to_owned());

    let path = match resolve_preset_path(&input) {
        Ok(path) => path,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let options = match Options::load(&path) {
        Ok(options) => options,
        Err(e) => {
            log::error!("Failed to load preset '{}': {e}", path.display());
            std::process::exit(1);
        }
    };
    log::info!("Loaded preset '{}'", path.display());

    let mut engine = match ParticleEngine::from_options(&options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    run(&mut engine, &options.simulation);
}
