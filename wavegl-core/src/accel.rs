/// OpenCL-backed wave generation
use log::info;
use ocl::{Buffer, Kernel, ProQue};

use crate::error::ComputeResult;
use crate::mesh::{MeshResolution, VertexSource, VertexStrategy};

/// Index of the `time` argument of the kernel below
const PHASE_ARG: u32 = 3;

static KERNEL_SRC: &str = r#"
    __kernel void sine_wave(__global float* pos, unsigned int width,
            unsigned int height, float time)
    {
        unsigned int x = get_global_id(0);
        unsigned int y = get_global_id(1);

        float u = x / (float) width;
        float v = y / (float) height;
        u = u * 2.0f - 1.0f;
        v = v * 2.0f - 1.0f;

        float freq = 4.0f;
        float w = sin(u * freq + time) * cos(v * freq + time) * 0.5f;

        unsigned int i = (y * width + x) * 4;
        pos[i] = u;
        pos[i + 1] = w;
        pos[i + 2] = v;
        pos[i + 3] = 1.0f;
    }
"#;

/// Computes the wave with a kernel on the default OpenCL device
pub struct AcceleratorWave {
    resolution: MeshResolution,
    kernel: Kernel,
    positions: Buffer<f32>,
}

impl AcceleratorWave {
    pub fn new(resolution: MeshResolution) -> ComputeResult<Self> {
        let pro_que = ProQue::builder()
            .src(KERNEL_SRC)
            .dims((resolution.width, resolution.height))
            .build()?;

        let positions = pro_que
            .buffer_builder::<f32>()
            .len(resolution.buffer_len())
            .build()?;

        let kernel = pro_que
            .kernel_builder("sine_wave")
            .arg(&positions)
            .arg(resolution.width as u32)
            .arg(resolution.height as u32)
            .arg(0.0f32)
            .build()?;

        info!(
            "OpenCL wave kernel built for {}x{} vertices",
            resolution.width,
            resolution.height
        );

        Ok(Self {
            resolution,
            kernel,
            positions,
        })
    }
}

impl VertexSource for AcceleratorWave {
    fn strategy(&self) -> VertexStrategy {
        VertexStrategy::Accelerator
    }

    fn resolution(&self) -> MeshResolution {
        self.resolution
    }

    fn generate(&mut self, phase: f32, out: &mut [f32]) -> ComputeResult<()> {
        self.resolution.check_buffer(out)?;

        self.kernel.set_arg(PHASE_ARG, &phase)?;
        unsafe {
            self.kernel.enq()?;
        }
        self.positions.read(out).enq()?;
        Ok(())
    }
}
