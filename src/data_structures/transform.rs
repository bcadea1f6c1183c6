//! Matrix helpers for scene node transforms.
//!
//! COLLADA stores `<matrix>` values row-major while cgmath keeps its
//! matrices column-major; everything here converts between the two and
//! applies the result to vertex positions with the column-vector convention.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::{
    data_structures::mesh::parse_floats,
    error::{ConvertError, Result},
};

/// Build a matrix from 16 values listed row by row.
pub fn matrix_from_row_major(v: &[f64; 16]) -> Matrix4<f64> {
    // cgmath::Matrix4::new takes its arguments column by column
    Matrix4::new(
        v[0], v[4], v[8], v[12], //
        v[1], v[5], v[9], v[13], //
        v[2], v[6], v[10], v[14], //
        v[3], v[7], v[11], v[15],
    )
}

/// Parse the text of one `<matrix>` element of node `node`.
pub fn parse_matrix(node: &str, text: &str) -> Result<Matrix4<f64>> {
    let values = parse_floats(&format!("matrix of node {node}"), text)?;
    let values: [f64; 16] = values
        .as_slice()
        .try_into()
        .map_err(|_| ConvertError::InvalidMatrix {
            node: node.to_string(),
            count: values.len(),
        })?;
    Ok(matrix_from_row_major(&values))
}

/// Combine several local matrices in document order: `I × m0 × m1 × ...`.
pub fn compose_local<'a>(matrices: impl IntoIterator<Item = &'a Matrix4<f64>>) -> Matrix4<f64> {
    matrices
        .into_iter()
        .fold(Matrix4::identity(), |acc, m| acc * *m)
}

/// Apply `matrix` to a position lifted to `(x, y, z, 1)`.
///
/// The result is divided by `w` only when `w` is non-zero, otherwise the raw
/// xyz part is kept as is.
pub fn transform_point(matrix: &Matrix4<f64>, position: Vector3<f64>) -> Vector3<f64> {
    let homogeneous = *matrix * position.extend(1.0);
    if homogeneous.w != 0.0 {
        homogeneous.truncate() / homogeneous.w
    } else {
        homogeneous.truncate()
    }
}
