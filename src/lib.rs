//! flow-dae2obj
//!
//! Converts a single-mesh COLLADA (`.dae`) file into a Wavefront `.obj` mesh
//! and its companion `.mtl` material library. The mesh is baked into world
//! space using the cumulative transform of the scene node that instances it.
//!
//! High-level modules
//! - `convert`: the `convert` entry point tying all stages together
//! - `data_structures`: scene graph, mesh data and matrix helpers
//! - `error`: the error taxonomy shared by all stages
//! - `export`: OBJ and MTL writers
//! - `resources`: document loading, the typed COLLADA view and extraction
//!

pub mod convert;
pub mod data_structures;
pub mod error;
pub mod export;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use convert::{ConvertOptions, convert, convert_with};
pub use data_structures::scene_graph::CompositionOrder;
pub use error::{ConvertError, Result};
