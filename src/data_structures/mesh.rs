use cgmath::{Vector2, Vector3};

use crate::error::{ConvertError, Result};

/// Number of indices one triangle occupies in a `<p>` stream.
pub const TRIANGLE_STRIDE: usize = 9;

/// One triangle corner; every attribute is indexed independently (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub normal: usize,
    pub uv: usize,
}

pub type Triangle = [Corner; 3];

/**
 * Validated mesh data of the converted geometry.
 *
 * Positions are still in object space, the owning node's transform is only
 * applied when the OBJ is written.
 */
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<Vector3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub uvs: Vec<Vector2<f64>>,
    pub triangles: Vec<Triangle>,
    pub material_id: String,
}

impl MeshData {
    /// Checks that every corner of every triangle points at an existing
    /// position, normal and uv.
    pub fn new(
        positions: Vec<Vector3<f64>>,
        normals: Vec<Vector3<f64>>,
        uvs: Vec<Vector2<f64>>,
        triangles: Vec<Triangle>,
        material_id: String,
    ) -> Result<Self> {
        for corner in triangles.iter().flatten() {
            check_bounds("position", corner.position, positions.len())?;
            check_bounds("normal", corner.normal, normals.len())?;
            check_bounds("uv", corner.uv, uvs.len())?;
        }
        Ok(Self {
            positions,
            normals,
            uvs,
            triangles,
            material_id,
        })
    }
}

fn check_bounds(attribute: &'static str, index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(ConvertError::IndexOutOfRange {
            attribute,
            index,
            count,
        })
    }
}

pub fn to_vec3s(what: &'static str, values: &[f64]) -> Result<Vec<Vector3<f64>>> {
    aligned(what, values.len(), 3)?;
    Ok(values
        .chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect())
}

pub fn to_vec2s(what: &'static str, values: &[f64]) -> Result<Vec<Vector2<f64>>> {
    aligned(what, values.len(), 2)?;
    Ok(values
        .chunks_exact(2)
        .map(|c| Vector2::new(c[0], c[1]))
        .collect())
}

/// Splits an interleaved `<p>` stream into triangles.
///
/// Within each stride of nine the corners start at offsets 0, 3 and 6 and
/// are laid out as `position, normal, uv`.
pub fn to_triangles(indices: &[usize]) -> Result<Vec<Triangle>> {
    aligned("triangle index stream", indices.len(), TRIANGLE_STRIDE)?;
    Ok(indices
        .chunks_exact(TRIANGLE_STRIDE)
        .map(|c| {
            let corner = |o: usize| Corner {
                position: c[o],
                normal: c[o + 1],
                uv: c[o + 2],
            };
            [corner(0), corner(3), corner(6)]
        })
        .collect())
}

fn aligned(what: &'static str, len: usize, stride: usize) -> Result<()> {
    if len % stride == 0 {
        Ok(())
    } else {
        Err(ConvertError::Misaligned { what, len, stride })
    }
}

/// Whitespace separated floats of a `<float_array>` or `<matrix>`.
pub fn parse_floats(context: &str, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|v| {
            v.parse::<f64>().map_err(|_| ConvertError::InvalidNumber {
                context: format!("float array of {context}"),
                value: v.to_string(),
            })
        })
        .collect()
}

/// Whitespace separated indices of a `<p>` element.
pub fn parse_indices(text: &str) -> Result<Vec<usize>> {
    text.split_whitespace()
        .map(|v| {
            v.parse::<usize>().map_err(|_| ConvertError::InvalidNumber {
                context: "triangle indices".to_string(),
                value: v.to_string(),
            })
        })
        .collect()
}
