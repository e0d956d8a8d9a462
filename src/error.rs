//! Error types shared by the drawing reader, the cut algorithms and the
//! surface analyzer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading drawings, building parts or analyzing
/// surfaces.
#[derive(Error, Debug)]
pub enum PartsError {
    /// Reading or writing a file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The drawing is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A `d` attribute could not be parsed
    #[error("invalid path data \"{data}\": {message}")]
    PathData {
        /// The offending path data.
        data: String,
        /// Parser message.
        message: String,
    },

    /// Endpoint precision outside the supported range
    #[error("precision {precision} is outside the supported range {min}..={max}")]
    InvalidPrecision {
        /// The rejected number of decimal digits.
        precision: i32,
        /// Smallest accepted precision.
        min: i32,
        /// Largest accepted precision.
        max: i32,
    },

    /// A path must have at least one segment
    #[error("path has no segments")]
    EmptyPath,

    /// More than one outer cut geometrically surrounds the same cut
    #[error("cut {cut} is surrounded by more than one outer cut {candidates:?}")]
    AmbiguousContainment {
        /// Index of the cut being resolved.
        cut: usize,
        /// Indices of every outer cut that surrounds it.
        candidates: Vec<usize>,
    },

    /// Regrouping the unresolved cuts made no progress
    #[error("nesting could not be resolved for {remaining} cuts")]
    UnresolvableNesting {
        /// Number of cuts still unresolved.
        remaining: usize,
    },

    /// A surface image could not be loaded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl PartsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PartsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PartsError>;
