//! GPU buffers that mirror a particle [`VertexStream`].
//!
//! One vertex buffer sized for the full pool and one 16-byte indirect-args
//! buffer. Neither ever grows: the engine's capacity is fixed at
//! initialization, so the buffers are created once at that size.

use super::vertex_stream::{DrawIndirectArgs, VertexRecord, VertexStream};

/// Vertex layout for [`VertexRecord`]: position at location 0, color at
/// location 1.
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VertexRecord::SIZE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

/// Vertex and indirect-draw buffers for one particle engine.
pub struct ParticleBuffers {
    vertex_buffer: wgpu::Buffer,
    indirect_buffer: wgpu::Buffer,
    capacity: usize,
    draw_count: u32,
    uploaded_generation: Option<u64>,
}

impl ParticleBuffers {
    /// Buffers with room for `capacity` vertex records.
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let capacity = capacity.max(1);

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Vertex Buffer"),
            size: (capacity * VertexRecord::SIZE) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let indirect_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Indirect Buffer"),
            size: DrawIndirectArgs::SIZE as u64,
            usage: wgpu::BufferUsages::INDIRECT
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vertex_buffer,
            indirect_buffer,
            capacity,
            draw_count: 0,
            uploaded_generation: None,
        }
    }

    /// Copy the stream's current records and draw count to the GPU.
    ///
    /// Skips the transfer when the stream has not been rewritten since the
    /// last upload. Records beyond this buffer's capacity are dropped and
    /// the uploaded draw count is clamped to match.
    ///
    /// Returns `true` if anything was written.
    pub fn upload(&mut self, queue: &wgpu::Queue, stream: &VertexStream) -> bool {
        if self.uploaded_generation == Some(stream.generation()) {
            return false;
        }

        let records = stream.records();
        let count = records.len().min(self.capacity);
        if count > 0 {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&records[..count]),
            );
        }

        let args = DrawIndirectArgs::vertices(count as u32);
        queue.write_buffer(&self.indirect_buffer, 0, bytemuck::bytes_of(&args));

        self.draw_count = count as u32;
        self.uploaded_generation = Some(stream.generation());
        true
    }

    /// Bind the vertex buffer at slot 0 and issue an indirect draw.
    ///
    /// Caller must set the pipeline and bind groups before calling this.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.draw_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw_indirect(&self.indirect_buffer, 0);
    }

    /// Same as [`Self::draw`] but with a direct draw call, for backends
    /// without indirect support.
    pub fn draw_direct<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.draw_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.draw_count, 0..1);
    }

    /// The vertex buffer.
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// The indirect-args buffer.
    pub fn indirect_buffer(&self) -> &wgpu::Buffer {
        &self.indirect_buffer
    }

    /// Vertex count from the last upload.
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// Record capacity of the vertex buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// GPU buffer sizes: `(label, used_bytes, allocated_bytes)`.
    pub fn buffer_info(&self) -> Vec<(&'static str, usize, usize)> {
        vec![
            (
                "Particle Vertices",
                self.draw_count as usize * VertexRecord::SIZE,
                self.capacity * VertexRecord::SIZE,
            ),
            (
                "Particle Indirect Args",
                DrawIndirectArgs::SIZE,
                DrawIndirectArgs::SIZE,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_record() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12]);
        assert!(layout
            .attributes
            .iter()
            .all(|a| a.format == wgpu::VertexFormat::Float32x3));

        let record = VertexRecord::new(glam::Vec3::X, glam::Vec3::Z);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&record));
        assert_eq!(floats[(offsets[1] / 4) as usize + 2], 1.0);
    }
}
