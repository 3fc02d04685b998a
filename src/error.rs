use thiserror::Error;

/// Top-level error type for arc retrieval and symbol assembly.
#[derive(Debug, Error)]
pub enum ScorearcError {
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Precondition violations detected on a skeleton buffer before scanning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("skeleton of {width}x{height} pixels is too small, at least 3x3 required")]
    TooSmall { width: usize, height: usize },

    #[error("buffer holds {actual} pixels, {expected} expected")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("unknown pixel status code {0}")]
    UnknownStatus(u8),

    #[error("foreground pixel ({x}, {y}) lies on the image border")]
    BorderNotBackground { x: i32, y: i32 },

    #[error("junction pixel ({x}, {y}) has no foreground neighbor")]
    IsolatedJunction { x: i32, y: i32 },
}

/// Errors related to geometric model fitting.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{needed} points required, got {actual}")]
    NotEnoughPoints { needed: usize, actual: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to scale-dependent constants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interline must be positive")]
    InvalidInterline,

    #[error("{name}: low bound {low} must be smaller than high bound {high}")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
    },
}

/// Convenience type alias for results using [`ScorearcError`].
pub type Result<T> = std::result::Result<T, ScorearcError>;
