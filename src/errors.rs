//! Error types produced while loading catalogs, stock data or build requests.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a part catalog cannot be loaded or fails its integrity checks.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Returned when two catalog entries share a name.
    #[error("catalog contains duplicate part name {0:?}")]
    DuplicateName(String),
    /// Returned when a straight segment has no usable length.
    #[error("straight part {name:?} must have a positive length")]
    InvalidStraightLength {
        /// Name of the offending part.
        name: String,
    },
    /// Returned when the catalog file cannot be read.
    #[error("cannot read catalog {path:?}: {source}")]
    Io {
        /// Location of the catalog file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the catalog file is not valid JSON for a part list.
    #[error("cannot parse catalog {path:?}: {source}")]
    Parse {
        /// Location of the catalog file.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when the raw dimensions of a build request are rejected.
///
/// The calculator itself only ever sees validated requests; these variants are
/// raised while turning user input into a [`Structure`](crate::Structure).
///
/// # Examples
///
/// ```
/// use trusscalc::{RequestError, Structure, StructureType};
///
/// let error = Structure::from_parts(StructureType::SelfSupporting, 5.0, None, 2.5)
///     .expect_err("width is required for a self-supporting frame");
/// assert_eq!(error, RequestError::MissingWidth);
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RequestError {
    /// Returned when a dimension is not a number at all.
    #[error("{dimension} is not a number: {raw:?}")]
    InvalidNumber {
        /// Which dimension was being parsed.
        dimension: &'static str,
        /// The rejected input text.
        raw: String,
    },
    /// Returned when a dimension is zero, negative or not finite.
    #[error("{dimension} must be a positive length in metres (received {value})")]
    NonPositiveDimension {
        /// Which dimension was rejected.
        dimension: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Returned when a dimension is larger than any structure the calculator plans.
    #[error("{dimension} of {value} m exceeds the {max} m limit")]
    DimensionTooLarge {
        /// Which dimension was rejected.
        dimension: &'static str,
        /// The rejected value.
        value: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// Returned when a self-supporting frame is requested without a width.
    #[error("a self-supporting structure requires a width")]
    MissingWidth,
    /// Returned when the volume margin is negative or not finite.
    #[error("volume margin must be a non-negative ratio (received {0})")]
    InvalidVolumeMargin(f64),
}

/// Error returned by a [`StockStore`](crate::StockStore) implementation.
#[derive(Debug, Error)]
pub enum StockStoreError {
    /// Returned when the stock file cannot be read or written.
    #[error("stock file {path:?} is not accessible: {source}")]
    Io {
        /// Location of the stock file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the stock file does not hold a name to boolean map.
    #[error("stock file {path:?} is malformed: {source}")]
    Malformed {
        /// Location of the stock file.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}
