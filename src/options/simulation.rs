use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for a headless driver run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Simulation", inline)]
#[serde(default)]
pub struct SimulationOptions {
    /// Fixed timestep fed to every update, in seconds.
    #[schemars(title = "Timestep", range(min = 0.0001, max = 0.1))]
    pub dt: f32,
    /// Number of updates to run.
    #[schemars(title = "Frames")]
    pub frames: u32,
    /// RNG seed. Omit for a non-deterministic run.
    #[schemars(skip)]
    pub seed: Option<u64>,
    /// Log stats every this many frames (0 = only at the end).
    #[schemars(title = "Report Every")]
    pub report_every: u32,
    /// Pace updates to this rate (0 = as fast as possible).
    #[schemars(title = "Target FPS")]
    pub target_fps: u32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            frames: 600,
            seed: None,
            report_every: 60,
            target_fps: 0,
        }
    }
}
