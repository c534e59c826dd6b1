//! Emitter, collision-plane, and run options with TOML preset support.
//!
//! A preset describes one engine: its `[emitter]`, any number of
//! `[[planes]]`, and a `[simulation]` section read by the driver. Presets
//! live in `assets/presets/`.

mod emitter;
mod planes;
mod simulation;

use std::path::Path;

pub use emitter::EmitterOptions;
pub use planes::PlaneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use simulation::SimulationOptions;

use crate::error::FlurryError;

/// Top-level options container. All sections use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[emitter]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Release cadence, initial state, and forces.
    pub emitter: EmitterOptions,
    /// Collision planes, evaluated in order.
    pub planes: Vec<PlaneOptions>,
    /// Driver settings for a headless run.
    pub simulation: SimulationOptions,
}

impl Options {
    /// Generate JSON Schema describing every option.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlurryError::OptionsParse`] if the text is not valid TOML
    /// for this schema.
    pub fn from_toml(content: &str) -> Result<Self, FlurryError> {
        toml::from_str(content)
            .map_err(|e| FlurryError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlurryError::Io`] if the file cannot be read, or
    /// [`FlurryError::OptionsParse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, FlurryError> {
        let content = std::fs::read_to_string(path).map_err(FlurryError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`FlurryError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), FlurryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlurryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FlurryError::Io)?;
        }
        std::fs::write(path, content).map_err(FlurryError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::particle::CollisionResult;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("flurry-options-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[emitter]
max_particles = 500
gravity = [0.0, -9.8, 0.0]

[[planes]]
normal = [0.0, 1.0, 0.0]
result = 'stick'
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.emitter.max_particles, 500);
        assert_eq!(opts.emitter.gravity, [0.0, -9.8, 0.0]);
        // Everything else should be default
        assert_eq!(opts.emitter.life_cycle, EmitterOptions::default().life_cycle);
        assert_eq!(opts.planes.len(), 1);
        assert_eq!(opts.planes[0].result, CollisionResult::Stick);
        assert_eq!(opts.planes[0].bounce_factor, 1.0);
        assert_eq!(opts.planes[0].point, [0.0; 3]);
        assert_eq!(opts.simulation, SimulationOptions::default());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[emitter]\nmax_particles = 'many'")
            .unwrap_err();
        assert!(matches!(err, FlurryError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_and_list() {
        let dir = scratch_dir("save");
        let mut opts = Options::default();
        opts.simulation.seed = Some(9);
        opts.planes.push(PlaneOptions::default());

        opts.save(&dir.join("b.toml")).unwrap();
        opts.save(&dir.join("a.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::load(&dir.join("a.toml")).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["a", "b"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = scratch_dir("missing");
        let err = Options::load(&dir.join("nope.toml")).unwrap_err();
        assert!(matches!(err, FlurryError::Io(_)));
        assert!(Options::list_presets(&dir).is_empty());
    }

    #[test]
    fn shipped_presets_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets");
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"fountain".to_owned()));
        for name in names {
            let opts = Options::load(&dir.join(format!("{name}.toml")))
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(opts.emitter.to_config().validate().is_ok(), "{name}");
        }
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("emitter"));
        assert!(props.contains_key("planes"));
        assert!(props.contains_key("simulation"));
    }
}
