use std::io::{self, Write};

use cgmath::Matrix4;

use crate::data_structures::{mesh::MeshData, transform::transform_point};

/**
 * Writes `mesh` as a Wavefront OBJ.
 *
 * Positions get `transform` applied and are rounded to four decimals,
 * texture coordinates and normals are written untouched in source order.
 * Face indices are shifted from COLLADA's 0-based to OBJ's 1-based
 * convention and written as `position/uv/normal`.
 */
pub fn write_obj<W: Write>(
    out: &mut W,
    source_name: &str,
    mtl_name: &str,
    mesh: &MeshData,
    transform: &Matrix4<f64>,
) -> io::Result<()> {
    writeln!(out, "# Converted from {source_name}")?;
    writeln!(out, "mtllib {mtl_name}")?;
    writeln!(out)?;

    for position in &mesh.positions {
        let v = transform_point(transform, *position);
        writeln!(out, "v {:.4} {:.4} {:.4}", v.x, v.y, v.z)?;
    }
    // Debug keeps the shortest round-trip repr and always prints a fraction
    for uv in &mesh.uvs {
        writeln!(out, "vt {:?} {:?}", uv.x, uv.y)?;
    }
    for normal in &mesh.normals {
        writeln!(out, "vn {:?} {:?} {:?}", normal.x, normal.y, normal.z)?;
    }

    writeln!(out)?;
    writeln!(out, "usemtl {}", mesh.material_id)?;
    for triangle in &mesh.triangles {
        write!(out, "f")?;
        for corner in triangle {
            write!(
                out,
                " {}/{}/{}",
                corner.position + 1,
                corner.uv + 1,
                corner.normal + 1
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
