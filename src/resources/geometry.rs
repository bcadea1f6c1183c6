//! Geometry extraction: turns the typed document into validated [`MeshData`].

use crate::{
    data_structures::mesh::{
        MeshData, parse_floats, parse_indices, to_triangles, to_vec2s, to_vec3s,
    },
    error::{ConvertError, Result},
    resources::{
        collada::{Collada, Geometry, Source},
        material::resolve_texture,
    },
};

/// Source id suffixes of the first normal and uv channels.
pub const NORMAL_SUFFIX: &str = "-Normal0";
pub const UV_SUFFIX: &str = "-UV0";

/// Mesh data plus the resolved diffuse texture path, if any.
#[derive(Clone, Debug)]
pub struct Extracted {
    pub mesh: MeshData,
    pub texture: Option<String>,
}

/// The one geometry of the document.
pub fn single_geometry(collada: &Collada) -> Result<&Geometry> {
    match collada.geometries.as_slice() {
        [] => Err(ConvertError::missing("<geometry> element")),
        [geometry] => Ok(geometry),
        many => Err(ConvertError::Unsupported(format!(
            "{} geometries found, only single-mesh files can be converted",
            many.len()
        ))),
    }
}

/// Index of the scene node that directly instances `geometry`.
pub fn owning_node(collada: &Collada, geometry: &Geometry) -> Result<usize> {
    let id = geometry
        .id
        .as_deref()
        .ok_or_else(|| ConvertError::missing("id attribute on <geometry>"))?;
    let mut instances = collada.instances.iter().filter(|i| i.geometry_id == id);
    let instance = instances
        .next()
        .ok_or_else(|| ConvertError::missing(format!("<instance_geometry> for geometry {id}")))?;
    if instances.next().is_some() {
        return Err(ConvertError::Unsupported(format!(
            "geometry {id} is instanced more than once"
        )));
    }
    instance.owner.ok_or_else(|| {
        ConvertError::missing(format!(
            "<node> directly containing the instance of geometry {id}"
        ))
    })
}

/// Pulls positions, normals, uvs, triangles and the material binding out of
/// `geometry`.
pub fn extract(collada: &Collada, geometry: &Geometry) -> Result<Extracted> {
    let label = geometry
        .id
        .as_deref()
        .or(geometry.name.as_deref())
        .unwrap_or("<anonymous>");
    let mesh = geometry
        .mesh
        .as_ref()
        .ok_or_else(|| ConvertError::missing(format!("<mesh> in geometry {label}")))?;

    let position_id = mesh
        .position_source
        .as_deref()
        .ok_or_else(|| ConvertError::missing("POSITION input in <vertices>"))?;
    let positions = mesh
        .source(position_id)
        .ok_or_else(|| ConvertError::missing(format!("position source {position_id}")))?;
    let positions = to_vec3s("positions", &floats(positions)?)?;

    let normals = mesh
        .source_with_suffix(NORMAL_SUFFIX)
        .ok_or_else(|| ConvertError::missing("normals source"))?;
    let normals = to_vec3s("normals", &floats(normals)?)?;

    let uvs = mesh
        .source_with_suffix(UV_SUFFIX)
        .ok_or_else(|| ConvertError::missing("UVs source"))?;
    let uvs = to_vec2s("uvs", &floats(uvs)?)?;

    let block = match mesh.triangles.as_slice() {
        [] => return Err(ConvertError::missing("<triangles> block")),
        [block] => block,
        many => {
            return Err(ConvertError::Unsupported(format!(
                "{} <triangles> blocks found, only one material per file is supported",
                many.len()
            )));
        }
    };
    let indices = block
        .indices
        .as_deref()
        .ok_or_else(|| ConvertError::missing("<p> indices of <triangles>"))?;
    let indices = parse_indices(indices)?;
    let material_id = block
        .material
        .clone()
        .ok_or_else(|| ConvertError::missing("material attribute on <triangles>"))?;
    let triangles = to_triangles(&indices)?;

    let mesh = MeshData::new(positions, normals, uvs, triangles, material_id)?;
    log::debug!(
        "Extracted {} positions, {} normals, {} uvs and {} triangles from {}",
        mesh.positions.len(),
        mesh.normals.len(),
        mesh.uvs.len(),
        mesh.triangles.len(),
        label
    );

    let texture = resolve_texture(collada, &mesh.material_id);
    Ok(Extracted { mesh, texture })
}

/// Parses the float array of a source the conversion actually uses.
fn floats(source: &Source) -> Result<Vec<f64>> {
    let text = source
        .float_array
        .as_deref()
        .ok_or_else(|| ConvertError::missing(format!("<float_array> in source {}", source.id)))?;
    parse_floats(&source.id, text)
}
