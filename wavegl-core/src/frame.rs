/// Per-frame update contract between input, matrices and vertex generation
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::ComputeResult;
use crate::input::{self, PointerButtons};
use crate::matrix::Matrix16;
use crate::mesh::{HostWave, MeshResolution, VertexSource, VertexStrategy};
use crate::projection::ViewportState;
use crate::transform::TransformState;

/// Phase increment per displayed frame
pub const PHASE_STEP: f64 = 0.01;

/// The callback surface a windowing or input host drives
pub trait ViewControl {
    fn on_drag(&mut self, dx: f32, dy: f32, primary_held: bool, secondary_held: bool);

    fn on_scroll(&mut self, ticks: f32);

    fn on_resize(&mut self, width: u32, height: u32);

    fn on_frame_tick(&mut self) -> FrameOutput;
}

/// Everything the renderer and the vertex strategy need for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub model_view: Matrix16,
    pub projection: Matrix16,
    pub animation_phase: f32,
}

/// Frame-count based animation phase
///
/// Advances by [`PHASE_STEP`] per frame regardless of wall-clock time, so
/// playback speed follows the achieved frame rate. The value wraps at 2π.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationPhase {
    frames: u64,
}

impl AnimationPhase {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn value(&self) -> f32 {
        ((self.frames as f64 * PHASE_STEP) % TAU) as f32
    }

    pub fn advance(&mut self) {
        self.frames += 1;
    }
}

/// Transform and viewport state owned by a single update loop
#[derive(Debug, Clone)]
pub struct ViewSession {
    transform: TransformState,
    viewport: ViewportState,
    phase: AnimationPhase,
    model_view: Matrix16,
    projection: Matrix16,
    model_view_dirty: bool,
    projection_dirty: bool,
}

impl ViewSession {
    pub fn new(transform: TransformState, viewport: ViewportState) -> Self {
        Self {
            transform,
            viewport,
            phase: AnimationPhase::default(),
            model_view: transform.model_view_matrix(),
            projection: viewport.projection_matrix(),
            model_view_dirty: false,
            projection_dirty: false,
        }
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: TransformState) {
        self.transform = transform;
        self.model_view_dirty = true;
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Phase the next frame will use
    pub fn animation_phase(&self) -> f32 {
        self.phase.value()
    }

    pub fn frames(&self) -> u64 {
        self.phase.frames()
    }
}

impl Default for ViewSession {
    fn default() -> Self {
        Self::new(TransformState::default(), ViewportState::default())
    }
}

impl ViewControl for ViewSession {
    fn on_drag(&mut self, dx: f32, dy: f32, primary_held: bool, secondary_held: bool) {
        let buttons = PointerButtons {
            primary: primary_held,
            secondary: secondary_held,
        };
        input::apply_drag(&mut self.transform, dx, dy, buttons);
        self.model_view_dirty = true;
    }

    fn on_scroll(&mut self, ticks: f32) {
        input::apply_scroll(&mut self.transform, ticks);
        self.model_view_dirty = true;
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.projection_dirty = true;
        debug!(
            "viewport resized to {}x{} (aspect {:.3})",
            self.viewport.width,
            self.viewport.height,
            self.viewport.aspect()
        );
    }

    fn on_frame_tick(&mut self) -> FrameOutput {
        if self.model_view_dirty {
            self.model_view = self.transform.model_view_matrix();
            self.model_view_dirty = false;
            debug!(
                "model-view recomputed: translation ({:.2}, {:.2}, {:.2}), rotation ({:.1}, {:.1})",
                self.transform.translation.x,
                self.transform.translation.y,
                self.transform.translation.z,
                self.transform.rotation.x,
                self.transform.rotation.y
            );
        }
        if self.projection_dirty {
            self.projection = self.viewport.projection_matrix();
            self.projection_dirty = false;
            debug!("projection recomputed for aspect {:.3}", self.viewport.aspect());
        }

        let output = FrameOutput {
            model_view: self.model_view,
            projection: self.projection,
            animation_phase: self.phase.value(),
        };
        self.phase.advance();
        output
    }
}

/// Builds the vertex source for a strategy
pub type SourceFactory = fn(VertexStrategy, MeshResolution) -> ComputeResult<Box<dyn VertexSource>>;

/// Default factory: host always works, the accelerator needs the `opencl` feature
pub fn make_source(
    strategy: VertexStrategy,
    resolution: MeshResolution,
) -> ComputeResult<Box<dyn VertexSource>> {
    match strategy {
        VertexStrategy::Host => Ok(Box::new(HostWave::new(resolution))),
        #[cfg(feature = "opencl")]
        VertexStrategy::Accelerator => Ok(Box::new(crate::accel::AcceleratorWave::new(
            resolution,
        )?)),
        #[cfg(not(feature = "opencl"))]
        VertexStrategy::Accelerator => Err(crate::error::ComputeError::Unavailable(
            "built without the `opencl` feature".to_string(),
        )),
    }
}

/// Drives a session and the active vertex strategy once per frame
pub struct FrameDriver {
    session: ViewSession,
    source: Box<dyn VertexSource>,
    factory: SourceFactory,
    vertices: Vec<f32>,
}

impl FrameDriver {
    pub fn new(session: ViewSession, resolution: MeshResolution, strategy: VertexStrategy) -> Self {
        Self::with_factory(session, resolution, strategy, make_source)
    }

    /// Start with `strategy`, falling back to the host if it cannot be built
    pub fn with_factory(
        session: ViewSession,
        resolution: MeshResolution,
        strategy: VertexStrategy,
        factory: SourceFactory,
    ) -> Self {
        let source: Box<dyn VertexSource> = match factory(strategy, resolution) {
            Ok(source) => source,
            Err(err) => {
                warn!("{} vertex generation failed to start ({}), using host", strategy, err);
                Box::new(HostWave::new(resolution))
            }
        };
        info!("vertex generation: {}", source.strategy());

        Self {
            session,
            vertices: vec![0.0; resolution.buffer_len()],
            source,
            factory,
        }
    }

    pub fn session(&self) -> &ViewSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ViewSession {
        &mut self.session
    }

    pub fn strategy(&self) -> VertexStrategy {
        self.source.strategy()
    }

    pub fn resolution(&self) -> MeshResolution {
        self.source.resolution()
    }

    /// Vertex data produced by the most recent tick
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Advance one frame and regenerate the mesh with the frame's phase
    pub fn tick(&mut self) -> ComputeResult<FrameOutput> {
        let output = self.session.on_frame_tick();
        self.source.generate(output.animation_phase, &mut self.vertices)?;
        Ok(output)
    }

    /// Replace the vertex source; the buffer is cleared for the new producer
    pub fn set_source(&mut self, source: Box<dyn VertexSource>) {
        self.vertices.clear();
        self.vertices.resize(source.resolution().buffer_len(), 0.0);
        self.source = source;
    }

    /// Switch between accelerator and host generation
    ///
    /// Keeps the current source when the other strategy cannot be built.
    pub fn toggle_strategy(&mut self) -> ComputeResult<VertexStrategy> {
        let next = self.strategy().toggled();
        let source = (self.factory)(next, self.resolution())?;
        self.set_source(source);
        info!("vertex generation is now {}", next);
        Ok(next)
    }
}

impl ViewControl for FrameDriver {
    fn on_drag(&mut self, dx: f32, dy: f32, primary_held: bool, secondary_held: bool) {
        self.session.on_drag(dx, dy, primary_held, secondary_held);
    }

    fn on_scroll(&mut self, ticks: f32) {
        self.session.on_scroll(ticks);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.session.on_resize(width, height);
    }

    /// Same as [`FrameDriver::tick`], but a generation failure is logged and
    /// the previous vertex data is kept so the frame can still be drawn
    fn on_frame_tick(&mut self) -> FrameOutput {
        let output = self.session.on_frame_tick();
        if let Err(err) = self.source.generate(output.animation_phase, &mut self.vertices) {
            warn!("{} vertex generation failed: {}", self.source.strategy(), err);
        }
        output
    }
}

/// Frames-per-second estimate refreshed about once a second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new estimate when a window closes
    pub fn record_frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
