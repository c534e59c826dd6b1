//! GPU-facing particle output.
//!
//! The engine writes a [`VertexStream`] on the CPU every frame;
//! [`ParticleBuffers`] mirrors it into wgpu vertex and indirect-draw buffers
//! and issues the draw.

/// wgpu vertex + indirect buffers and the particle vertex layout.
pub mod particle_buffers;
/// CPU staging for vertex records and draw arguments.
pub mod vertex_stream;

pub use particle_buffers::{vertex_buffer_layout, ParticleBuffers};
pub use vertex_stream::{
    DrawIndirectArgs, StreamWriter, VertexRecord, VertexStream,
};
