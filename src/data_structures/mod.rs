//! Converter data structures: scene graph, mesh data and transforms.
//!
//! - `mesh` holds the validated vertex attributes and triangles of a geometry
//! - `scene_graph` enables hierarchical transform resolution
//! - `transform` contains the matrix helpers shared by both

pub mod mesh;
pub mod scene_graph;
pub mod transform;
