//! Part definitions and the built-in Eurotruss FD34 catalog.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Kind of a catalog part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// Straight segment used to span distances.
    #[serde(rename = "straight")]
    Straight,
    /// Corner joining two segments.
    #[serde(rename = "corner-2-way")]
    Corner2Way,
    /// Corner joining three segments, typically two top edges and a leg.
    #[serde(rename = "corner-3-way")]
    Corner3Way,
    /// Corner joining four segments.
    #[serde(rename = "corner-4-way")]
    Corner4Way,
    /// Ground support placed under a leg.
    #[serde(rename = "base")]
    Base,
    /// Flat plate.
    #[serde(rename = "plate")]
    Plate,
}

impl PartKind {
    /// Corner kind able to join `degree` members, if one exists.
    ///
    /// # Examples
    /// ```
    /// use trusscalc::PartKind;
    ///
    /// assert_eq!(PartKind::corner_for_degree(3), Some(PartKind::Corner3Way));
    /// assert_eq!(PartKind::corner_for_degree(1), None);
    /// ```
    #[must_use]
    pub const fn corner_for_degree(degree: usize) -> Option<Self> {
        match degree {
            2 => Some(Self::Corner2Way),
            3 => Some(Self::Corner3Way),
            4 => Some(Self::Corner4Way),
            _ => None,
        }
    }
}

/// Immutable catalog entry describing one truss part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    /// Unique part name.
    pub name: String,
    /// Linear extent in metres, when the part has one.
    #[serde(default)]
    pub length: Option<f64>,
    /// Weight in kilograms.
    pub weight: f64,
    /// Cross-section width in metres.
    pub width: f64,
    /// Cross-section height in metres.
    pub height: f64,
    /// Kind of part.
    pub kind: PartKind,
    /// Connector pins consumed by one placed unit.
    pub pin_count: u32,
}

impl PartDefinition {
    /// Key under which placed units of this part are counted.
    #[must_use]
    pub fn count_key(&self) -> String {
        count_key(&self.name, self.length)
    }

    /// Enclosing volume of one unit in cubic metres; parts without a length count as zero.
    #[must_use]
    pub fn unit_volume(&self) -> f64 {
        self.length.unwrap_or(0.0) * self.width * self.height
    }
}

/// Build the composite count key for a part, e.g. `"FD34-150 - 1.5m"`.
///
/// Every place that writes or reads bill-of-materials counts goes through this
/// function so the two can never disagree on the format.
///
/// # Examples
/// ```
/// use trusscalc::count_key;
///
/// assert_eq!(count_key("FD34-150", Some(1.5)), "FD34-150 - 1.5m");
/// assert_eq!(count_key("FD34-400", Some(4.0)), "FD34-400 - 4.0m");
/// assert_eq!(count_key("FD34-Plate", None), "FD34-Plate - 0.0m");
/// ```
#[must_use]
pub fn count_key(name: &str, length: Option<f64>) -> String {
    format!("{name} - {:?}m", length.unwrap_or(0.0))
}

/// Shorthand for a straight FD34 segment with the shared cross-section.
fn fd34_straight(name: &str, length: f64, weight: f64) -> PartDefinition {
    PartDefinition {
        name: name.to_owned(),
        length: Some(length),
        weight,
        width: 0.29,
        height: 0.29,
        kind: PartKind::Straight,
        pin_count: 4,
    }
}

/// The Eurotruss FD34 product range used by default.
#[must_use]
pub fn eurotruss_fd34() -> Vec<PartDefinition> {
    vec![
        fd34_straight("FD34-025", 0.25, 2.0),
        fd34_straight("FD34-050", 0.50, 3.5),
        fd34_straight("FD34-075", 0.75, 5.0),
        fd34_straight("FD34-100", 1.00, 6.3),
        fd34_straight("FD34-150", 1.50, 8.1),
        fd34_straight("FD34-200", 2.00, 10.5),
        fd34_straight("FD34-250", 2.50, 13.0),
        fd34_straight("FD34-300", 3.00, 15.0),
        fd34_straight("FD34-350", 3.50, 16.5),
        fd34_straight("FD34-400", 4.00, 19.5),
        PartDefinition {
            name: "FD34-L90 (90°)".to_owned(),
            length: Some(0.5),
            weight: 5.0,
            width: 0.29,
            height: 0.29,
            kind: PartKind::Corner2Way,
            pin_count: 8,
        },
        PartDefinition {
            name: "FD34 3 WAY CORNER 90˚ + DOWN".to_owned(),
            length: Some(0.5),
            weight: 5.0,
            width: 0.5,
            height: 0.5,
            kind: PartKind::Corner3Way,
            pin_count: 12,
        },
        PartDefinition {
            name: "FD34-Base".to_owned(),
            length: Some(0.8),
            weight: 80.0,
            width: 0.8,
            height: 0.10,
            kind: PartKind::Base,
            pin_count: 4,
        },
    ]
}

/// Check the integrity rules every catalog must satisfy.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateName`] when two parts share a name and
/// [`CatalogError::InvalidStraightLength`] when a straight part has no positive length.
pub fn validate_catalog(parts: &[PartDefinition]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for part in parts {
        if !seen.insert(part.name.as_str()) {
            return Err(CatalogError::DuplicateName(part.name.clone()));
        }
        if part.kind == PartKind::Straight && !part.length.is_some_and(|l| l > 0.0) {
            return Err(CatalogError::InvalidStraightLength {
                name: part.name.clone(),
            });
        }
    }
    Ok(())
}

/// Read a JSON part list from `path` and validate it.
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read, parsed or fails validation.
pub fn load_catalog(path: &Path) -> Result<Vec<PartDefinition>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parts: Vec<PartDefinition> =
        serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate_catalog(&parts)?;
    Ok(parts)
}
