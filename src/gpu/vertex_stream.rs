//! CPU-side staging for the per-frame particle vertex stream.
//!
//! A [`VertexStream`] holds room for exactly `capacity` records plus the
//! indirect-draw arguments that say how many of them are current. All
//! writes go through a [`StreamWriter`], which commits its count to the
//! arguments when it is dropped, so a frame that writes nothing still
//! publishes an accurate (zero) draw count.

use glam::Vec3;

/// 24-byte point vertex: world position and RGB color.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct VertexRecord {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl VertexRecord {
    /// Size of one record in bytes.
    pub const SIZE: usize = size_of::<Self>();

    /// Record from glam vectors.
    #[inline]
    #[must_use]
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// Non-indexed indirect draw arguments, laid out as the GPU reads them.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct DrawIndirectArgs {
    /// Vertices to draw.
    pub vertex_count: u32,
    /// Instances to draw.
    pub instance_count: u32,
    /// First vertex index.
    pub first_vertex: u32,
    /// First instance index.
    pub first_instance: u32,
}

impl DrawIndirectArgs {
    /// Size of the argument block in bytes.
    pub const SIZE: usize = size_of::<Self>();

    /// A single instance of `vertex_count` vertices starting at zero.
    #[must_use]
    pub const fn vertices(vertex_count: u32) -> Self {
        Self {
            vertex_count,
            instance_count: 1,
            first_vertex: 0,
            first_instance: 0,
        }
    }
}

/// Fixed-capacity vertex records plus their draw arguments.
#[derive(Debug, Clone)]
pub struct VertexStream {
    records: Vec<VertexRecord>,
    args: DrawIndirectArgs,
    generation: u64,
}

impl VertexStream {
    /// Zeroed stream with room for `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: vec![VertexRecord::default(); capacity],
            args: DrawIndirectArgs::default(),
            generation: 0,
        }
    }

    /// Begin rewriting the stream from record zero.
    pub fn writer(&mut self) -> StreamWriter<'_> {
        StreamWriter {
            stream: self,
            len: 0,
        }
    }

    /// Maximum number of records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Records published by the last committed write.
    #[must_use]
    pub fn records(&self) -> &[VertexRecord] {
        &self.records[..self.args.vertex_count as usize]
    }

    /// Vertex count published by the last committed write.
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.args.vertex_count
    }

    /// Current indirect draw arguments.
    #[must_use]
    pub fn indirect_args(&self) -> DrawIndirectArgs {
        self.args
    }

    /// Incremented by every commit. Uploaders compare it to skip redundant
    /// transfers.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every record slot, including stale ones past the draw count.
    #[must_use]
    pub fn backing_store(&self) -> &[VertexRecord] {
        &self.records
    }

    /// Byte size of the full backing store.
    #[must_use]
    pub fn byte_capacity(&self) -> usize {
        self.records.len() * VertexRecord::SIZE
    }
}

/// Scoped write access to a [`VertexStream`].
///
/// Records land at consecutive slots starting from zero. Dropping the writer
/// publishes the number written as the new draw count.
pub struct StreamWriter<'a> {
    stream: &'a mut VertexStream,
    len: usize,
}

impl StreamWriter<'_> {
    /// Append a record. Returns `false` and writes nothing once the stream
    /// is full.
    pub fn push(&mut self, record: VertexRecord) -> bool {
        let Some(slot) = self.stream.records.get_mut(self.len) else {
            return false;
        };
        *slot = record;
        self.len += 1;
        true
    }

    /// Records written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for StreamWriter<'_> {
    fn drop(&mut self) {
        self.stream.args = DrawIndirectArgs::vertices(self.len as u32);
        self.stream.generation = self.stream.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_gpu_expectations() {
        assert_eq!(VertexRecord::SIZE, 24);
        assert_eq!(DrawIndirectArgs::SIZE, 16);
        let args = DrawIndirectArgs::vertices(7);
        let words: &[u32] = bytemuck::cast_slice(bytemuck::bytes_of(&args));
        assert_eq!(words, &[7, 1, 0, 0]);
    }

    #[test]
    fn new_stream_publishes_nothing() {
        let stream = VertexStream::new(4);
        assert_eq!(stream.capacity(), 4);
        assert_eq!(stream.byte_capacity(), 96);
        assert_eq!(stream.draw_count(), 0);
        assert_eq!(stream.indirect_args(), DrawIndirectArgs::default());
        assert!(stream.records().is_empty());
    }

    #[test]
    fn writer_commits_on_drop() {
        let mut stream = VertexStream::new(4);
        {
            let mut writer = stream.writer();
            assert!(writer.push(VertexRecord::new(Vec3::X, Vec3::ONE)));
            assert!(writer.push(VertexRecord::new(Vec3::Y, Vec3::ZERO)));
            assert_eq!(writer.len(), 2);
        }
        assert_eq!(stream.draw_count(), 2);
        assert_eq!(stream.generation(), 1);
        assert_eq!(stream.records()[1].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn writer_never_exceeds_capacity() {
        let mut stream = VertexStream::new(2);
        {
            let mut writer = stream.writer();
            for _ in 0..5 {
                let _ = writer.push(VertexRecord::default());
            }
            assert_eq!(writer.len(), 2);
        }
        assert_eq!(stream.draw_count(), 2);
        assert_eq!(stream.backing_store().len(), 2);
    }

    #[test]
    fn empty_write_zeroes_count_but_keeps_stale_records() {
        let mut stream = VertexStream::new(3);
        {
            let mut writer = stream.writer();
            let _ = writer.push(VertexRecord::new(Vec3::splat(5.0), Vec3::X));
        }
        drop(stream.writer());
        assert_eq!(stream.draw_count(), 0);
        assert!(stream.records().is_empty());
        assert_eq!(stream.backing_store()[0].position, [5.0, 5.0, 5.0]);
        assert_eq!(stream.generation(), 2);
    }
}
