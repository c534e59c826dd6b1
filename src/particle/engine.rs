//! The particle engine: configuration, per-frame update, and export.

use glam::Vec3;

use super::{
    collision::CollisionPlane, emitter::EmitterConfig, pool::ParticlePool,
    random::ParticleRng, Particle,
};
use crate::{
    error::FlurryError,
    gpu::{VertexRecord, VertexStream},
    options::Options,
};

/// Counters describing the pool after the most recent `update` or `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStats {
    /// Pool capacity (`max_particles`).
    pub capacity: u32,
    /// Live particles.
    pub active: u32,
    /// Retired slots awaiting reuse.
    pub free: u32,
    /// Slots constructed so far.
    pub constructed: u32,
    /// Particles released by the last update.
    pub emitted_last_update: u32,
    /// Particles retired by the last update.
    pub retired_last_update: u32,
    /// Plane contacts resolved by the last update.
    pub collisions_last_update: u32,
    /// Release ticks since the engine was created.
    pub release_events: u64,
}

/// CPU particle simulation for one emitter.
///
/// Configure with the setters and [`Self::add_collision_plane`], call
/// [`Self::initialize`] once, then [`Self::update`] every frame. All calls
/// must come from one thread; separate engines share nothing.
#[derive(Debug)]
pub struct ParticleEngine {
    config: EmitterConfig,
    planes: Vec<CollisionPlane>,
    pool: ParticlePool,
    stream: Option<VertexStream>,
    rng: ParticleRng,
    current_time: f32,
    last_release_time: f32,
    release_events: u64,
    emitted_last_update: u32,
    retired_last_update: u32,
    collisions_last_update: u32,
    saturation_logged: bool,
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEngine {
    /// Engine with default configuration and an OS-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(ParticleRng::from_entropy())
    }

    /// Engine with default configuration and a deterministic generator.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ParticleRng::seeded(seed))
    }

    /// Engine drawing randomness from `rng`.
    #[must_use]
    pub fn with_rng(rng: ParticleRng) -> Self {
        Self {
            config: EmitterConfig::default(),
            planes: Vec::new(),
            pool: ParticlePool::with_capacity(0),
            stream: None,
            rng,
            current_time: 0.0,
            last_release_time: 0.0,
            release_events: 0,
            emitted_last_update: 0,
            retired_last_update: 0,
            collisions_last_update: 0,
            saturation_logged: false,
        }
    }

    /// Build, configure, and initialize an engine from a preset.
    ///
    /// Uses `options.simulation.seed` when present.
    ///
    /// # Errors
    ///
    /// Returns [`FlurryError::InvalidConfig`] if the emitter or any plane is
    /// out of range.
    pub fn from_options(options: &Options) -> Result<Self, FlurryError> {
        let config = options.emitter.to_config();
        if let Err(e) = config.validate() {
            log::warn!("rejected emitter options: {e}");
            return Err(e);
        }
        let planes = options
            .planes
            .iter()
            .map(CollisionPlane::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| log::warn!("rejected plane options: {e}"))?;

        let mut engine = options
            .simulation
            .seed
            .map_or_else(Self::new, Self::with_seed);
        engine.set_config(config);
        for plane in planes {
            engine.add_collision_plane(plane);
        }
        engine.initialize();
        Ok(engine)
    }

    // ── Configuration ──

    /// Replace the whole emitter configuration.
    ///
    /// After [`Self::initialize`] the pool capacity is fixed; a different
    /// `max_particles` is ignored.
    pub fn set_config(&mut self, config: EmitterConfig) {
        let max_particles = self.config.max_particles;
        self.config = config;
        if self.is_initialized() && config.max_particles != max_particles {
            log::warn!(
                "max_particles is fixed after initialize(); keeping {max_particles}"
            );
            self.config.max_particles = max_particles;
        }
    }

    /// Pool capacity. Only takes effect before [`Self::initialize`].
    pub fn set_max_particles(&mut self, max_particles: u32) {
        debug_assert!(max_particles > 0, "max_particles must be > 0");
        if self.is_initialized() {
            log::warn!("max_particles is fixed after initialize(); ignoring");
            return;
        }
        self.config.max_particles = max_particles;
    }

    /// Particles released per tick.
    pub fn set_num_to_release(&mut self, num_to_release: u32) {
        self.config.num_to_release = num_to_release;
    }

    /// Seconds between release ticks.
    pub fn set_release_interval(&mut self, release_interval: f32) {
        debug_assert!(
            release_interval >= 0.0,
            "release_interval must be >= 0"
        );
        self.config.release_interval = release_interval;
    }

    /// Particle lifetime in seconds.
    pub fn set_life_cycle(&mut self, life_cycle: f32) {
        debug_assert!(life_cycle > 0.0, "life_cycle must be > 0");
        self.config.life_cycle = life_cycle;
    }

    /// Release point.
    pub fn set_position(&mut self, position: Vec3) {
        self.config.position = position;
    }

    /// Base release velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.config.velocity = velocity;
    }

    /// Constant acceleration.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// Velocity that air resistance relaxes toward.
    pub fn set_wind(&mut self, wind: Vec3) {
        self.config.wind = wind;
    }

    /// Toggle air resistance.
    pub fn set_air_resistance(&mut self, air_resistance: bool) {
        self.config.air_resistance = air_resistance;
    }

    /// Random spread magnitude added to the release velocity.
    pub fn set_velocity_scale(&mut self, velocity_scale: f32) {
        self.config.velocity_scale = velocity_scale;
    }

    /// Append a collision plane. Planes are evaluated in insertion order.
    pub fn add_collision_plane(&mut self, plane: CollisionPlane) {
        self.planes.push(plane);
    }

    /// Allocate the particle pool and vertex staging for `max_particles`.
    ///
    /// Call once, after configuration and before the first update. Later
    /// calls are ignored.
    pub fn initialize(&mut self) {
        if self.is_initialized() {
            log::warn!("initialize() called twice; ignoring");
            return;
        }
        debug_assert!(
            self.config.validate().is_ok(),
            "initialize() with invalid config: {:?}",
            self.config
        );
        let capacity = self.config.max_particles as usize;
        self.pool = ParticlePool::with_capacity(capacity);
        self.stream = Some(VertexStream::new(capacity));
        log::info!(
            "particle engine initialized: {capacity} slots, {} bytes of vertex staging, {} planes",
            capacity * VertexRecord::SIZE,
            self.planes.len()
        );
    }

    // ── Simulation ──

    /// Advance the simulation by `dt` seconds.
    ///
    /// Retires particles whose age reached the life cycle, runs a release
    /// tick if one is due, integrates forces and plane collisions for every
    /// live particle, and rewrites the vertex stream.
    ///
    /// `dt` is not clamped: a step large enough to carry a particle past
    /// the far side of a plane's epsilon band and back out does not collide.
    pub fn update(&mut self, dt: f32) {
        debug_assert!(
            self.is_initialized(),
            "initialize() must run before update()"
        );
        self.current_time += dt;

        let now = self.current_time;
        let life_cycle = self.config.life_cycle;
        self.retired_last_update =
            self.pool.retire_where(|p| p.age(now) >= life_cycle) as u32;
        self.emitted_last_update = self.release_due();
        self.collisions_last_update = self.integrate(dt);
        self.export();
    }

    /// Release up to `count` particles now, outside the regular cadence.
    ///
    /// Does not move the release clock. Returns the number released, which
    /// is lower than `count` when the pool is exhausted.
    pub fn emit_burst(&mut self, count: u32) -> u32 {
        let emitted = self.emit(count);
        self.export();
        emitted
    }

    /// Retire every live particle. Simulation time is untouched.
    pub fn reset(&mut self) {
        let retired = self.pool.retire_all();
        if retired > 0 {
            log::debug!("reset retired {retired} particles");
        }
        self.emitted_last_update = 0;
        self.retired_last_update = retired as u32;
        self.collisions_last_update = 0;
        self.export();
    }

    fn release_due(&mut self) -> u32 {
        if self.current_time - self.last_release_time
            <= self.config.release_interval
        {
            return 0;
        }
        self.last_release_time = self.current_time;
        self.release_events += 1;
        self.emit(self.config.num_to_release)
    }

    fn emit(&mut self, count: u32) -> u32 {
        let config = self.config;
        let now = self.current_time;
        let mut emitted = 0;
        for _ in 0..count {
            let Some(particle) = self.pool.acquire() else {
                if !self.saturation_logged {
                    log::debug!(
                        "particle pool saturated at {} slots; truncating releases",
                        self.pool.capacity()
                    );
                    self.saturation_logged = true;
                }
                break;
            };
            let mut velocity = config.velocity;
            if config.velocity_scale != 0.0 {
                velocity += config.velocity_scale * self.rng.unit_vector();
            }
            *particle = Particle {
                position: config.position,
                velocity,
                color: self.rng.color(),
                start_time: now,
            };
            emitted += 1;
        }
        emitted
    }

    fn integrate(&mut self, dt: f32) -> u32 {
        let config = &self.config;
        let planes = self.planes.as_slice();
        let mut collisions = 0;
        self.pool.for_each_active_mut(|particle| {
            collisions += step_particle(particle, config, planes, dt);
        });
        collisions
    }

    fn export(&mut self) {
        let Some(stream) = self.stream.as_mut() else {
            return;
        };
        let mut writer = stream.writer();
        for particle in self.pool.iter_active() {
            if !writer.push(VertexRecord::new(particle.position, particle.color))
            {
                break;
            }
        }
    }

    // ── Accessors ──

    /// Current emitter configuration.
    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Collision planes in evaluation order.
    #[must_use]
    pub fn planes(&self) -> &[CollisionPlane] {
        &self.planes
    }

    /// Whether [`Self::initialize`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.stream.is_some()
    }

    /// Simulation clock in seconds.
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Simulation time of the last release tick.
    #[must_use]
    pub fn last_release_time(&self) -> f32 {
        self.last_release_time
    }

    /// Live particle count.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pool.active_len()
    }

    /// Retired slots awaiting reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.pool.free_len()
    }

    /// Slots constructed so far.
    #[must_use]
    pub fn constructed_count(&self) -> usize {
        self.pool.constructed()
    }

    /// Whether any particle is live.
    #[must_use]
    pub fn has_active_particles(&self) -> bool {
        !self.pool.is_empty()
    }

    /// Live particles in export order.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.pool.iter_active()
    }

    /// The exported vertex stream, once initialized.
    #[must_use]
    pub fn vertex_stream(&self) -> Option<&VertexStream> {
        self.stream.as_ref()
    }

    /// Vertices to draw this frame.
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.stream.as_ref().map_or(0, VertexStream::draw_count)
    }

    /// Pool and activity counters.
    #[must_use]
    pub fn stats(&self) -> ParticleStats {
        ParticleStats {
            capacity: self.pool.capacity() as u32,
            active: self.pool.active_len() as u32,
            free: self.pool.free_len() as u32,
            constructed: self.pool.constructed() as u32,
            emitted_last_update: self.emitted_last_update,
            retired_last_update: self.retired_last_update,
            collisions_last_update: self.collisions_last_update,
            release_events: self.release_events,
        }
    }
}

/// Integrate one particle over `dt` and resolve its plane contacts.
/// Returns the number of planes it collided with.
fn step_particle(
    particle: &mut Particle,
    config: &EmitterConfig,
    planes: &[CollisionPlane],
    dt: f32,
) -> u32 {
    particle.velocity += config.gravity * dt;
    if config.air_resistance {
        particle.velocity += (config.wind - particle.velocity) * dt;
    }

    let moved_from = particle.position;
    particle.position += particle.velocity * dt;
    let moved_to = particle.position;

    let mut collisions = 0;
    for plane in planes {
        if plane.respond(particle, moved_from, moved_to, config.life_cycle) {
            collisions += 1;
        }
    }
    collisions
}
