//! Error types for the HDS LOD engine
//!
//! This module defines the error types used throughout the crate,
//! covering mesh validation, camera setup and runtime parameters.

use std::fmt;

/// Result type for HDS LOD operations
pub type Result<T> = std::result::Result<T, Error>;

/// HDS LOD errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Mesh input rejected (no vertices, bad indices, degenerate triangles...)
    InvalidMesh(String),

    /// Camera parameters that cannot produce a view frame
    InvalidView(String),

    /// Runtime parameter out of range (thresholds, config values)
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMesh(msg) => write!(f, "Invalid mesh: {}", msg),
            Error::InvalidView(msg) => write!(f, "Invalid view: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build the matching `Error` value
///
/// # Example
///
/// ```no_run
/// # use hds_lod_engine::engine_err;
/// let err = engine_err!("hds::Mesh", InvalidMesh, "triangle {} is degenerate", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::hds::Error::$kind(message)
    }};
}

/// Log an ERROR message and return early with the matching `Error`
///
/// # Example
///
/// ```no_run
/// # use hds_lod_engine::engine_bail;
/// fn check(n: usize) -> hds_lod_engine::hds::Result<()> {
///     if n == 0 {
///         engine_bail!("hds::Mesh", InvalidMesh, "mesh has no vertices");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
