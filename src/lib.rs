#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod adjust;
mod availability;
mod bom;
mod calculator;
mod catalog;
mod decompose;
mod errors;
mod frame;

pub use adjust::{adjust, straight_lengths, LENGTH_TOLERANCE};
pub use availability::{filter_available, AvailabilityMap, JsonStockStore, StockStore};
pub use bom::BillOfMaterials;
pub use calculator::{
    adjust_structure, compute, BuildRequest, Calculation, CalculatorConfig, Structure,
    StructureType, MAX_DIMENSION,
};
pub use catalog::{
    count_key, eurotruss_fd34, load_catalog, validate_catalog, PartDefinition, PartKind,
};
pub use decompose::{decompose, Decomposition};
pub use errors::{CatalogError, RequestError, StockStoreError};
pub use frame::{Frame, MemberRole, SpanGroup};
