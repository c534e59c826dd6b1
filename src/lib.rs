// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! CPU point-particle simulation engine with a GPU-ready vertex stream.
//!
//! Flurry advances thousands of short-lived point particles under gravity,
//! air resistance, and infinite-plane collisions, and exports one compact
//! `(position, color)` vertex record per live particle every frame.
//!
//! # Key entry points
//!
//! - [`particle::ParticleEngine`] - pool, emission, integration, collision,
//!   and vertex export
//! - [`gpu::ParticleBuffers`] - wgpu vertex + indirect-draw buffers fed from
//!   the engine's [`gpu::VertexStream`]
//! - [`options::Options`] - TOML presets describing an emitter, its planes,
//!   and a simulation run
//!
//! # Frame flow
//!
//! The driver calls [`particle::ParticleEngine::update`] once per frame. The
//! engine retires aged particles, releases new ones on its cadence,
//! integrates and collides the survivors, then writes the vertex stream and
//! draw count. The driver uploads that stream with
//! [`gpu::ParticleBuffers::upload`] and draws it with
//! [`gpu::ParticleBuffers::draw`]. Ordering the CPU write before the GPU read
//! is the driver's job.

pub mod error;
pub mod gpu;
pub mod options;
pub mod particle;
pub mod util;

pub use error::FlurryError;
