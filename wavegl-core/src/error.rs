/// Errors raised by vertex-generation collaborators
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComputeError {
    /// The output buffer does not hold exactly one `float4` per vertex
    #[error("vertex buffer holds {actual} floats, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    /// The requested strategy cannot run in this build or on this machine
    #[error("strategy unavailable: {0}")]
    Unavailable(String),
    #[cfg(feature = "opencl")]
    #[error("OpenCL error: {0}")]
    Ocl(#[from] ocl::Error),
}

pub type ComputeResult<T> = Result<T, ComputeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ComputeError::BufferSize {
            expected: 64,
            actual: 10,
        };
        assert_eq!(err.to_string(), "vertex buffer holds 10 floats, expected 64");
        let err = ComputeError::Unavailable("no device".to_string());
        assert_eq!(err.to_string(), "strategy unavailable: no device");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(ComputeError::Unavailable("x".to_string()));
        assert!(err.source().is_none());
    }
}
