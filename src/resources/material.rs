use crate::resources::collada::{Collada, Effect};

/**
 * Follows material -> effect -> diffuse texture -> image and returns the
 * image's `init_from` path.
 *
 * Every link of that chain is optional: whatever is missing just means the
 * material has no texture.
 */
pub fn resolve_texture(collada: &Collada, material_id: &str) -> Option<String> {
    let Some(material) = collada.material(material_id) else {
        log::warn!("Material {material_id} is not defined, writing it without texture.");
        return None;
    };
    let effect = collada.effect(material.effect.as_deref()?)?;
    let texture = effect.diffuse_texture.as_deref()?;
    let image = collada
        .image(texture)
        .or_else(|| collada.image(sampled_image(effect, texture)?))?;
    if image.init_from.is_none() {
        log::debug!("Image {} of material {material_id} has no file path.", image.id);
    }
    image.init_from.clone()
}

/// Image id behind a sampler2D newparam: sampler -> surface -> image.
fn sampled_image<'a>(effect: &'a Effect, sampler: &str) -> Option<&'a str> {
    let surface = effect.samplers.get(sampler)?;
    effect.surfaces.get(surface).map(String::as_str)
}
