//! Assembling a full bill of materials for a requested structure.

use serde::{Deserialize, Serialize};

use crate::adjust::{adjust, straight_lengths};
use crate::availability::{filter_available, AvailabilityMap};
use crate::bom::BillOfMaterials;
use crate::catalog::{PartDefinition, PartKind};
use crate::decompose::decompose;
use crate::errors::RequestError;
use crate::frame::Frame;

/// Kind of structure to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureType {
    /// Four-legged rectangular frame.
    SelfSupporting,
    /// Two-legged arch.
    Arch,
}

/// Structure with its dimensions in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Structure {
    /// Four-legged rectangular frame.
    SelfSupporting {
        /// Length of the frame.
        length: f64,
        /// Width of the frame.
        width: f64,
        /// Height of the frame.
        height: f64,
    },
    /// Two-legged arch.
    Arch {
        /// Span of the arch.
        length: f64,
        /// Height of the arch.
        height: f64,
    },
}

impl Structure {
    /// Validate raw dimensions for the given structure type.
    ///
    /// `width` is required for a self-supporting frame and ignored for an arch.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NonPositiveDimension`] for a dimension that is not a
    /// finite positive number, [`RequestError::DimensionTooLarge`] above
    /// [`MAX_DIMENSION`] and [`RequestError::MissingWidth`] when a
    /// self-supporting frame has no width.
    ///
    /// # Examples
    /// ```
    /// use trusscalc::{Structure, StructureType};
    ///
    /// let arch = Structure::from_parts(StructureType::Arch, 10.0, Some(99.0), 4.0).unwrap();
    /// assert_eq!(arch, Structure::Arch { length: 10.0, height: 4.0 });
    /// ```
    pub fn from_parts(
        kind: StructureType,
        length: f64,
        width: Option<f64>,
        height: f64,
    ) -> Result<Self, RequestError> {
        let length = positive("length", length)?;
        let height = positive("height", height)?;
        match kind {
            StructureType::SelfSupporting => {
                let width = positive("width", width.ok_or(RequestError::MissingWidth)?)?;
                Ok(Self::SelfSupporting {
                    length,
                    width,
                    height,
                })
            }
            StructureType::Arch => Ok(Self::Arch { length, height }),
        }
    }

    /// Type of the structure.
    #[must_use]
    pub const fn kind(&self) -> StructureType {
        match self {
            Self::SelfSupporting { .. } => StructureType::SelfSupporting,
            Self::Arch { .. } => StructureType::Arch,
        }
    }

    /// Length in metres.
    #[must_use]
    pub const fn length(&self) -> f64 {
        match *self {
            Self::SelfSupporting { length, .. } | Self::Arch { length, .. } => length,
        }
    }

    /// Width in metres, for structures that have one.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        match *self {
            Self::SelfSupporting { width, .. } => Some(width),
            Self::Arch { .. } => None,
        }
    }

    /// Height in metres.
    #[must_use]
    pub const fn height(&self) -> f64 {
        match *self {
            Self::SelfSupporting { height, .. } | Self::Arch { height, .. } => height,
        }
    }

    /// Whether a horizontal dimension is above `threshold` metres.
    ///
    /// Such structures need intermediate support, which the calculator does not plan.
    #[must_use]
    pub fn exceeds_size_threshold(&self, threshold: f64) -> bool {
        self.length() > threshold || self.width().is_some_and(|width| width > threshold)
    }

    /// Joint and member layout for these dimensions.
    #[must_use]
    pub fn frame(&self) -> Frame {
        match *self {
            Self::SelfSupporting {
                length,
                width,
                height,
            } => Frame::self_supporting(length, width, height),
            Self::Arch { length, height } => Frame::arch(length, height),
        }
    }
}

/// Largest dimension, in metres, a request may ask for.
///
/// Every placed unit is listed in the bill, so the span bounds its size.
pub const MAX_DIMENSION: f64 = 1_000.0;

/// Check that `value` is a finite positive length no larger than [`MAX_DIMENSION`].
fn positive(dimension: &'static str, value: f64) -> Result<f64, RequestError> {
    if !(value.is_finite() && value > 0.0) {
        Err(RequestError::NonPositiveDimension { dimension, value })
    } else if value > MAX_DIMENSION {
        Err(RequestError::DimensionTooLarge {
            dimension,
            value,
            max: MAX_DIMENSION,
        })
    } else {
        Ok(value)
    }
}

/// Tunable settings of the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Safety margin applied to the total volume, as a ratio.
    pub volume_margin: f64,
    /// Horizontal dimension in metres above which a size warning is raised.
    pub size_warning_threshold: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            volume_margin: 0.10,
            size_warning_threshold: 12.0,
        }
    }
}

/// Immutable description of one computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildRequest {
    /// Structure and its requested dimensions.
    pub structure: Structure,
    /// Safety margin applied to the total volume.
    pub volume_margin: f64,
}

impl BuildRequest {
    /// Request `structure` with the default volume margin.
    #[must_use]
    pub fn new(structure: Structure) -> Self {
        Self {
            structure,
            volume_margin: CalculatorConfig::default().volume_margin,
        }
    }

    /// Replace the volume margin.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidVolumeMargin`] when `margin` is negative or not finite.
    pub fn with_volume_margin(mut self, margin: f64) -> Result<Self, RequestError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(RequestError::InvalidVolumeMargin(margin));
        }
        self.volume_margin = margin;
        Ok(self)
    }
}

/// Result of one computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Calculation {
    /// Dimensions as requested.
    pub requested: Structure,
    /// Dimensions actually built, rounded up to reachable spans.
    pub adjusted: Structure,
    /// Parts and totals.
    pub bill: BillOfMaterials,
}

impl Calculation {
    /// Whether the available parts could realise the structure at all.
    ///
    /// The calculator does not tell "nothing needed" from "nothing available":
    /// an empty bill, or a dimension adjusted down to zero because no straight
    /// segment is in stock, means the request cannot be satisfied.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        let adjusted = &self.adjusted;
        let reachable = [Some(adjusted.length()), adjusted.width(), Some(adjusted.height())]
            .into_iter()
            .flatten()
            .all(|dimension| dimension > 0.0);
        reachable && !self.bill.is_empty()
    }
}

/// Round every dimension of `structure` up to a span reachable with `available` straights.
#[must_use]
pub fn adjust_structure(structure: &Structure, available: &[&PartDefinition]) -> Structure {
    let lengths = straight_lengths(available);
    match *structure {
        Structure::SelfSupporting {
            length,
            width,
            height,
        } => Structure::SelfSupporting {
            length: adjust(length, &lengths),
            width: adjust(width, &lengths),
            height: adjust(height, &lengths),
        },
        Structure::Arch { length, height } => Structure::Arch {
            length: adjust(length, &lengths),
            height: adjust(height, &lengths),
        },
    }
}

/// Compute the bill of materials for `request` using the in-stock part of `catalog`.
///
/// Missing corner or base hardware is left out of the bill rather than reported.
///
/// # Examples
/// ```
/// use trusscalc::{compute, eurotruss_fd34, AvailabilityMap, BuildRequest, Structure};
///
/// let request = BuildRequest::new(Structure::Arch { length: 10.0, height: 4.0 });
/// let calculation = compute(&request, &eurotruss_fd34(), &AvailabilityMap::new());
/// assert_eq!(calculation.bill.quantity("FD34-Base - 0.8m"), 2);
/// ```
#[must_use]
pub fn compute(
    request: &BuildRequest,
    catalog: &[PartDefinition],
    availability: &AvailabilityMap,
) -> Calculation {
    let available = filter_available(catalog, availability);
    let adjusted = adjust_structure(&request.structure, &available);
    tracing::debug!(requested = ?request.structure, ?adjusted, "adjusted dimensions");

    let frame = adjusted.frame();
    let mut bill = BillOfMaterials::new();
    for group in frame.span_groups() {
        tracing::debug!(
            role = ?group.role,
            span = group.span,
            replication = group.replication,
            "decomposing span"
        );
        bill.merge(decompose(group.span, group.replication, &available));
    }
    for (kind, quantity) in frame.corner_requirements() {
        place_first_of_kind(&mut bill, &available, kind, quantity);
    }
    place_first_of_kind(&mut bill, &available, PartKind::Base, frame.base_count());

    bill.aggregate(&available, request.volume_margin);
    tracing::debug!(
        parts = bill.unit_count(),
        pins = bill.total_pins,
        weight = bill.total_weight,
        "bill of materials complete"
    );

    Calculation {
        requested: request.structure,
        adjusted,
        bill,
    }
}

/// Place `quantity` units of the first available part of `kind`, if there is one.
fn place_first_of_kind(
    bill: &mut BillOfMaterials,
    available: &[&PartDefinition],
    kind: PartKind,
    quantity: u32,
) {
    match available.iter().find(|part| part.kind == kind) {
        Some(part) => bill.place(part, quantity),
        None => tracing::debug!(?kind, "no hardware of this kind in stock, skipping"),
    }
}
