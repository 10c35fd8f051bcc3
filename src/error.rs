use thiserror::Error;

/// Errors produced while reading, resolving or rendering a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token could not be read as an integer or a record has the wrong shape.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The input ended before every declared record was read.
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: String },

    /// A 1-based reference points outside the declared record count.
    #[error("line {line}: {kind} index {index} is out of range 1..={count}")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        count: usize,
    },

    /// A record built in memory refers to an entity that does not exist.
    #[error("{owner} refers to {kind} {index}, but only {count} exist")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        index: usize,
        count: usize,
    },

    /// A polygon face lists fewer than three vertices.
    #[error("face {face} has {len} vertices, at least 3 are required")]
    FaceTooShort { face: usize, len: usize },

    /// Half-edges come in twin pairs.
    #[error("{count} half-edges cannot be paired into twins")]
    OddHalfEdgeCount { count: usize },

    /// Following `next` from a half-edge did not come back to it.
    #[error("half-edge ring starting at {start} did not close after {limit} steps")]
    OpenRing { start: usize, limit: usize },

    /// A DCEL can only be built from a mesh whose every side has a reverse side.
    #[error("side ({from}, {to}) has no reverse side")]
    MissingTwin { from: usize, to: usize },

    #[error("mesh has no vertices")]
    Empty,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MeshError>;
