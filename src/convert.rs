//! The conversion pipeline: load, resolve, extract, write.

use std::path::Path;

use crate::{
    data_structures::scene_graph::CompositionOrder,
    error::Result,
    export,
    resources::{self, geometry},
};

/// Knobs of a single conversion. The defaults reproduce the output of the
/// existing asset pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    pub composition: CompositionOrder,
}

/// Converts `input` into `<output_base>.obj` and `<output_base>.mtl`.
pub fn convert(input: impl AsRef<Path>, output_base: impl AsRef<Path>) -> Result<()> {
    convert_with(input, output_base, &ConvertOptions::default())
}

/**
 * Same as [`convert`] with explicit options.
 *
 * All validation happens before the first output file is created. Errors are
 * returned as they are raised; a failed write may leave a partial OBJ behind.
 */
pub fn convert_with(
    input: impl AsRef<Path>,
    output_base: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<()> {
    let input = input.as_ref();
    let output_base = output_base.as_ref();
    log::info!("Converting {}", input.display());

    let collada = resources::load_collada(input)?;
    let geometry = geometry::single_geometry(&collada)?;
    let owner = geometry::owning_node(&collada, geometry)?;
    let transform = collada.scene.world_transform(owner, options.composition)?;
    if let Some(node) = collada.scene.node(owner) {
        log::debug!(
            "Geometry is owned by node {} ({} ancestors, {:?} composition)",
            node.label(),
            collada.scene.ancestors(owner).count() - 1,
            options.composition
        );
    }

    let extracted = geometry::extract(&collada, geometry)?;
    export::write(
        input,
        output_base,
        &extracted.mesh,
        extracted.texture.as_deref(),
        &transform,
    )
}
