use std::path::Path;

use crate::{
    error::Result,
    resources::{collada::Collada, document::Document},
};

/**
 * This module contains all logic for loading geometry, materials and scene
 * data from COLLADA files.
 */
pub mod collada;
pub mod document;
pub mod encoding;
pub mod geometry;
pub mod material;

/// Reads `path` and decodes it according to its BOM or XML declaration.
pub fn load_string(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    encoding::decode(&bytes)
}

/// Reads and parses `path`, then runs the typed schema pass over it.
pub fn load_collada(path: &Path) -> Result<Collada> {
    let text = load_string(path)?;
    let doc = Document::parse(&text)?;
    let collada = Collada::from_document(&doc);
    log::debug!(
        "Loaded {}: {} nodes, {} geometries, {} materials",
        path.display(),
        collada.scene.len(),
        collada.geometries.len(),
        collada.materials.len()
    );
    Ok(collada)
}
