/// Command-line options of the terminal viewer
use clap::Parser;
use std::path::PathBuf;
use wavegl_core::{MeshResolution, VertexStrategy};

#[derive(Parser, Debug)]
#[command(name = "wavegl-terminal")]
#[command(about = "Animated sine-wave mesh rendered as a terminal point cloud")]
#[command(version)]
pub struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Grid segments along X
    #[arg(long, default_value_t = MeshResolution::DEFAULT.width as u32,
          value_parser = clap::value_parser!(u32).range(1..=MeshResolution::MAX_SEGMENTS as i64))]
    pub mesh_width: u32,

    /// Grid segments along Z
    #[arg(long, default_value_t = MeshResolution::DEFAULT.height as u32,
          value_parser = clap::value_parser!(u32).range(1..=MeshResolution::MAX_SEGMENTS as i64))]
    pub mesh_height: u32,

    /// Who generates the vertices
    #[arg(long, value_enum, default_value_t = StrategyArg::preferred())]
    pub strategy: StrategyArg,

    /// JSON transform state to start from
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Write the final transform state here on exit
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,
}

impl Args {
    pub fn resolution(&self) -> MeshResolution {
        MeshResolution::new(self.mesh_width as usize, self.mesh_height as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    #[value(alias = "cl")]
    Accelerator,
    Host,
}

impl StrategyArg {
    /// The accelerator when it was compiled in, the host otherwise
    pub fn preferred() -> Self {
        if cfg!(feature = "opencl") {
            StrategyArg::Accelerator
        } else {
            StrategyArg::Host
        }
    }
}

impl From<StrategyArg> for VertexStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Accelerator => VertexStrategy::Accelerator,
            StrategyArg::Host => VertexStrategy::Host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wavegl-terminal"]).unwrap();
        assert_eq!(args.fps, 30);
        assert_eq!(args.resolution(), MeshResolution::DEFAULT);
        assert_eq!(args.strategy, StrategyArg::preferred());
        assert!(args.state.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wavegl-terminal",
            "--fps",
            "60",
            "--mesh-width",
            "64",
            "--mesh-height",
            "32",
            "--strategy",
            "cl",
            "--save-state",
            "view.json",
        ])
        .unwrap();
        assert_eq!(args.fps, 60);
        assert_eq!(args.resolution(), MeshResolution::new(64, 32));
        assert_eq!(VertexStrategy::from(args.strategy), VertexStrategy::Accelerator);
        assert_eq!(args.save_state, Some(PathBuf::from("view.json")));
    }

    #[test]
    fn test_rejects_zero_mesh() {
        assert!(Args::try_parse_from(["wavegl-terminal", "--mesh-width", "0"]).is_err());
        assert!(Args::try_parse_from(["wavegl-terminal", "--fps", "0"]).is_err());
    }
}
