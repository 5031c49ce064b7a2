//! Layer Model Module
//!
//! Implements the medallion layers:
//! - Raw: data as ingested, no provenance
//! - Trusted: validated or cleaned data, optionally linked to its sources
//! - Refined: derived or aggregated data, optionally linked to its sources

mod data;
mod factory;
mod layer;
mod loader;

pub use data::{LayerData, LayerVariant};
pub use factory::{create_raw, create_refined, create_trusted};
pub use layer::Layer;
pub use loader::{read_layer_data, read_metadata};
