/// The animated sine-wave mesh and the strategies that generate it
use std::fmt;

use crate::error::{ComputeError, ComputeResult};

/// Floats per vertex: `(u, w, v, 1)`
pub const FLOATS_PER_VERTEX: usize = 4;
/// Spatial frequency of the wave across the `[-1, 1]` grid
pub const WAVE_FREQUENCY: f32 = 4.0;
pub const WAVE_AMPLITUDE: f32 = 0.5;

/// Segment counts of the generated grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshResolution {
    pub width: usize,
    pub height: usize,
}

impl MeshResolution {
    pub const DEFAULT: Self = Self {
        width: 8 * 64,
        height: 8 * 64,
    };

    /// Largest segment count accepted from user input, per axis
    pub const MAX_SEGMENTS: usize = 4096;

    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Resolution with each axis clamped to `1..=MAX_SEGMENTS`
    pub fn clamped(width: usize, height: usize) -> Self {
        Self::new(
            width.clamp(1, Self::MAX_SEGMENTS),
            height.clamp(1, Self::MAX_SEGMENTS),
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    /// Length of a vertex buffer holding the whole mesh
    pub fn buffer_len(&self) -> usize {
        self.vertex_count() * FLOATS_PER_VERTEX
    }

    /// Check that `out` can hold exactly the whole mesh
    pub fn check_buffer(&self, out: &[f32]) -> ComputeResult<()> {
        if out.len() != self.buffer_len() {
            return Err(ComputeError::BufferSize {
                expected: self.buffer_len(),
                actual: out.len(),
            });
        }
        Ok(())
    }
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which collaborator produces the per-vertex data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexStrategy {
    Accelerator,
    Host,
}

impl VertexStrategy {
    pub fn toggled(self) -> Self {
        match self {
            VertexStrategy::Accelerator => VertexStrategy::Host,
            VertexStrategy::Host => VertexStrategy::Accelerator,
        }
    }
}

impl fmt::Display for VertexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexStrategy::Accelerator => f.write_str("accelerator"),
            VertexStrategy::Host => f.write_str("host"),
        }
    }
}

/// Something that fills a vertex buffer for a given animation phase
pub trait VertexSource {
    fn strategy(&self) -> VertexStrategy;

    fn resolution(&self) -> MeshResolution;

    /// Write every vertex of the mesh into `out`
    fn generate(&mut self, phase: f32, out: &mut [f32]) -> ComputeResult<()>;
}

/// Height of the wave at grid coordinates `u`, `v` in `[-1, 1]`
pub fn wave_height(u: f32, v: f32, phase: f32) -> f32 {
    (u * WAVE_FREQUENCY + phase).sin() * (v * WAVE_FREQUENCY + phase).cos() * WAVE_AMPLITUDE
}

/// Computes the wave on the CPU
#[derive(Debug, Clone)]
pub struct HostWave {
    resolution: MeshResolution,
}

impl HostWave {
    pub fn new(resolution: MeshResolution) -> Self {
        Self { resolution }
    }
}

impl VertexSource for HostWave {
    fn strategy(&self) -> VertexStrategy {
        VertexStrategy::Host
    }

    fn resolution(&self) -> MeshResolution {
        self.resolution
    }

    fn generate(&mut self, phase: f32, out: &mut [f32]) -> ComputeResult<()> {
        self.resolution.check_buffer(out)?;
        let MeshResolution { width, height } = self.resolution;

        for (index, vertex) in out.chunks_exact_mut(FLOATS_PER_VERTEX).enumerate() {
            let (x, y) = (index % width, index / width);
            let u = (x as f32 / width as f32) * 2.0 - 1.0;
            let v = (y as f32 / height as f32) * 2.0 - 1.0;
            vertex.copy_from_slice(&[u, wave_height(u, v, phase), v, 1.0]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_resolution() {
        assert_eq!(MeshResolution::clamped(0, 1_000_000), MeshResolution::new(1, 4096));
        assert_eq!(MeshResolution::clamped(16, 8), MeshResolution::new(16, 8));
    }

    #[test]
    fn test_default_resolution() {
        let res = MeshResolution::default();
        assert_eq!(res.vertex_count(), 512 * 512);
        assert_eq!(res.buffer_len(), 512 * 512 * 4);
    }

    #[test]
    fn test_host_wave_layout() {
        let res = MeshResolution::new(4, 2);
        let mut source = HostWave::new(res);
        let mut out = vec![0.0; res.buffer_len()];
        source.generate(0.3, &mut out).unwrap();

        // Vertex (x=1, y=1) sits at index 4 * (1 * 4 + 1)
        let vertex = &out[20..24];
        let (u, v) = (1.0 / 4.0 * 2.0 - 1.0, 1.0 / 2.0 * 2.0 - 1.0);
        assert_eq!(vertex[0], u);
        assert_eq!(vertex[2], v);
        assert_eq!(vertex[3], 1.0);
        let expected = (u * 4.0 + 0.3f32).sin() * (v * 4.0 + 0.3f32).cos() * 0.5;
        assert!((vertex[1] - expected).abs() < 1e-6);

        // First vertex is the grid corner
        assert_eq!(&out[0..4], &[-1.0, wave_height(-1.0, -1.0, 0.3), -1.0, 1.0]);
    }

    #[test]
    fn test_wave_is_bounded() {
        let res = MeshResolution::new(16, 16);
        let mut source = HostWave::new(res);
        let mut out = vec![0.0; res.buffer_len()];
        source.generate(12.5, &mut out).unwrap();
        assert!(out.chunks_exact(4).all(|v| v[1].abs() <= WAVE_AMPLITUDE));
    }

    #[test]
    fn test_wrong_buffer_size() {
        let mut source = HostWave::new(MeshResolution::new(4, 4));
        let mut out = vec![0.0; 10];
        match source.generate(0.0, &mut out) {
            Err(ComputeError::BufferSize { expected, actual }) => {
                assert_eq!(expected, 64);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_strategy_toggle() {
        assert_eq!(VertexStrategy::Host.toggled(), VertexStrategy::Accelerator);
        assert_eq!(VertexStrategy::Accelerator.toggled(), VertexStrategy::Host);
        assert_eq!(VertexStrategy::Host.to_string(), "host");
    }
}
