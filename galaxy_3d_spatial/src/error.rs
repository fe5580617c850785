//! Error types for the Galaxy3D spatial crate
//!
//! Only programming errors and invalid configuration are reported as errors.
//! A scene without camera, a volume outside the world bounds or the removal
//! of an untracked entity are regular conditions and never produce an `Error`.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A required service (component) is missing on an entity
    MissingService(String),

    /// The entity does not exist in the world
    InvalidEntity(String),

    /// World bounds are not a valid box
    InvalidBounds(String),

    /// Invalid configuration value (depth, ...)
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingService(msg) => write!(f, "Missing service: {}", msg),
            Error::InvalidEntity(msg) => write!(f, "Invalid entity: {}", msg),
            Error::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error at ERROR severity and build it.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_spatial::engine_err;
///
/// let err = engine_err!("galaxy3d::World", InvalidEntity, "Entity {} not found", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
