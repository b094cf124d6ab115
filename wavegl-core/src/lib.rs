/// wavegl Core Library - Interactive view transform pipeline
/// 
/// This library provides the matrix math, transform state, input mapping and
/// per-frame update contract used to display an animated sine-wave mesh,
/// plus the host (and optionally OpenCL) generators for its vertices.

pub mod error;
pub mod frame;
pub mod input;
pub mod matrix;
pub mod mesh;
pub mod projection;
pub mod transform;

#[cfg(feature = "opencl")]
pub mod accel;

// Re-export commonly used types
pub use error::{ComputeError, ComputeResult};
pub use frame::{
    make_source, AnimationPhase, FpsCounter, FrameDriver, FrameOutput, SourceFactory, ViewControl,
    ViewSession,
};
pub use input::{KeyCommand, PointerButtons, PointerTracker};
pub use matrix::Matrix16;
pub use mesh::{HostWave, MeshResolution, VertexSource, VertexStrategy};
pub use projection::ViewportState;
pub use transform::{RotationState, TransformState, TranslationState};
