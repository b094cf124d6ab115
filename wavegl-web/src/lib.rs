/// wavegl Web - view pipeline exported to a JavaScript/WebGL host
///
/// The host owns the canvas, the event listeners and the GL calls. It
/// forwards pointer, wheel and resize events here and uploads the matrices
/// returned by `on_frame_tick` as shader uniforms.

use wasm_bindgen::prelude::*;
use wavegl_core::mesh::{HostWave, MeshResolution, VertexSource};
use wavegl_core::{ComputeResult, FrameOutput, TransformState, ViewControl, ViewSession, ViewportState};

/// Number of floats returned by `on_frame_tick`
pub const FRAME_PACKET_LEN: usize = 33;

/// Pack both matrices and the phase as `[model_view; 16, projection; 16, phase]`
pub fn pack_frame(output: &FrameOutput) -> Vec<f32> {
    let mut packet = Vec::with_capacity(FRAME_PACKET_LEN);
    packet.extend_from_slice(&output.model_view);
    packet.extend_from_slice(&output.projection);
    packet.push(output.animation_phase);
    packet
}

#[wasm_bindgen]
pub struct WebSession {
    session: ViewSession,
    wave: HostWave,
    vertices: Vec<f32>,
}

#[wasm_bindgen]
impl WebSession {
    /// Mesh dimensions are clamped to `1..=MeshResolution::MAX_SEGMENTS`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, mesh_width: usize, mesh_height: usize) -> WebSession {
        let resolution = MeshResolution::clamped(mesh_width, mesh_height);
        WebSession {
            session: ViewSession::new(TransformState::default(), ViewportState::new(width, height)),
            wave: HostWave::new(resolution),
            vertices: vec![0.0; resolution.buffer_len()],
        }
    }

    pub fn on_drag(&mut self, dx: f32, dy: f32, primary_held: bool, secondary_held: bool) {
        self.session.on_drag(dx, dy, primary_held, secondary_held);
    }

    pub fn on_scroll(&mut self, ticks: f32) {
        self.session.on_scroll(ticks);
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.session.on_resize(width, height);
    }

    /// Advance one frame; see [`pack_frame`] for the layout
    pub fn on_frame_tick(&mut self) -> Vec<f32> {
        pack_frame(&self.session.on_frame_tick())
    }

    /// Host-generated mesh for `phase`, four floats per vertex
    pub fn vertices(&mut self, phase: f32) -> Result<Vec<f32>, JsValue> {
        self.generate(phase)
            .map(<[f32]>::to_vec)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.wave.resolution().vertex_count()
    }
}

impl WebSession {
    fn generate(&mut self, phase: f32) -> ComputeResult<&[f32]> {
        self.wave.generate(phase, &mut self.vertices)?;
        Ok(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_packet_layout() {
        let mut web = WebSession::new(800, 600, 4, 4);
        web.on_drag(0.0, 0.0, false, false);
        let first = web.on_frame_tick();
        let second = web.on_frame_tick();
        assert_eq!(first.len(), FRAME_PACKET_LEN);
        assert_eq!(first[32], 0.0);
        assert!((second[32] - 0.01).abs() < 1e-7);
        assert_eq!(&first[..16], &TransformState::default().model_view_matrix()[..]);
        assert_eq!(&first[16..32], &ViewportState::new(800, 600).projection_matrix()[..]);
    }

    #[test]
    fn test_scroll_reaches_model_view() {
        let mut web = WebSession::new(800, 600, 4, 4);
        web.on_scroll(4.0);
        let packet = web.on_frame_tick();
        let mut expected = TransformState::default();
        expected.translation.z = -3.0;
        assert_eq!(&packet[..16], &expected.model_view_matrix()[..]);
    }

    #[test]
    fn test_vertices_cover_mesh() {
        let mut web = WebSession::new(800, 600, 4, 3);
        assert_eq!(web.vertex_count(), 12);
        let vertices = web.vertices(0.5).unwrap();
        assert_eq!(vertices.len(), 48);
        assert!(vertices.chunks(4).all(|v| v[3] == 1.0));
    }

    #[test]
    fn test_mesh_size_is_clamped() {
        let web = WebSession::new(800, 600, 0, 1_000_000);
        assert_eq!(web.vertex_count(), MeshResolution::MAX_SEGMENTS);
    }

    #[test]
    fn test_generation_error_is_reported() {
        let mut web = WebSession::new(800, 600, 4, 4);
        web.vertices.truncate(10);
        let err = web.generate(0.0).unwrap_err();
        assert_eq!(err.to_string(), "vertex buffer holds 10 floats, expected 64");
    }
}
