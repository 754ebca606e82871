/// Error types for the wireframe core.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the vector types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A component slice did not match the vector's arity
    #[error("Shape mismatch: expected {expected} components, found {found}")]
    Shape { expected: usize, found: usize },

    /// Component index outside the vector
    #[error("Index {index} out of range for vector of length {len}")]
    Index { index: usize, len: usize },

    /// Face references a vertex that does not exist
    #[error("Face {face} references vertex {index}, but the mesh has {count} vertices")]
    FaceIndex {
        face: usize,
        index: usize,
        count: usize,
    },
}

/// Errors raised while loading geometry files.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("Geometry file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed `v` or `f` line
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Face index below 1
    #[error("Face on line {line} has invalid vertex index {index}")]
    FaceIndex { line: usize, index: i64 },
}

impl ObjError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Errors raised by the area utility.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Degenerate shape: {0}")]
    DegenerateShape(&'static str),

    /// Side lengths cannot close a triangle
    #[error("Side lengths ({a}, {b}, {c}) do not form a triangle")]
    Domain { a: f64, b: f64, c: f64 },
}

/// Errors raised by a drawing pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Any error produced by the core.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Obj(#[from] ObjError),

    #[error(transparent)]
    Area(#[from] AreaError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
