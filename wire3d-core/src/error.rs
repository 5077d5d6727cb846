/// Error types for each stage of the rendering pipeline
use std::io;
use std::path::PathBuf;

/// Fatal errors while reading a mesh description.
///
/// Malformed lines are not errors; they are reported as
/// [`ParseWarning`](crate::obj::ParseWarning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// A face references a vertex that does not exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("face {face} references vertex {index}, but only {vertex_count} vertices are defined")]
pub struct IntegrityError {
    /// Position of the face in the face list
    pub face: usize,
    /// The offending 0-based reference
    pub index: i64,
    pub vertex_count: usize,
}

/// Errors while writing or reading a TGA image
#[derive(Debug, thiserror::Error)]
pub enum TgaError {
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode image")]
    Encode(#[source] io::Error),

    #[error("truncated image: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("unsupported image: {0}")]
    Unsupported(String),
}

/// A pipeline failure, tagged with the stage that failed.
///
/// The stage error is the [`source`](std::error::Error::source).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("mesh ingestion failed")]
    Ingest(#[from] ObjError),

    #[error("mesh resolution failed")]
    Resolve(#[from] IntegrityError),

    #[error("image encoding failed")]
    Encode(#[from] TgaError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pipeline_error_names_stage() {
        let err = PipelineError::from(IntegrityError {
            face: 0,
            index: 998,
            vertex_count: 10,
        });
        assert_eq!(err.to_string(), "mesh resolution failed");
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("face 0 references vertex 998, but only 10 vertices are defined".to_string())
        );
    }
}
