//! OBJ/MTL serialization of a converted mesh.
//!
//! - `obj` writes vertices, texture coordinates, normals and faces
//! - `mtl` writes the companion material library

use std::{
    ffi::OsString,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use cgmath::Matrix4;

use crate::{data_structures::mesh::MeshData, error::Result};

pub mod mtl;
pub mod obj;

/// `<base>.<extension>`; unlike `Path::with_extension` this keeps any dots
/// already present in the base name.
pub fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/**
 * Writes `<output_base>.obj` and `<output_base>.mtl`.
 *
 * The OBJ references its material library by file name only, so both files
 * have to stay next to each other.
 */
pub fn write(
    input: &Path,
    output_base: &Path,
    mesh: &MeshData,
    texture: Option<&str>,
    transform: &Matrix4<f64>,
) -> Result<()> {
    let obj_path = with_suffix(output_base, "obj");
    let mtl_path = with_suffix(output_base, "mtl");

    let mut out = BufWriter::new(File::create(&obj_path)?);
    obj::write_obj(
        &mut out,
        &file_name(input),
        &file_name(&mtl_path),
        mesh,
        transform,
    )?;
    out.flush()?;

    let mut out = BufWriter::new(File::create(&mtl_path)?);
    mtl::write_mtl(&mut out, &mesh.material_id, texture)?;
    out.flush()?;

    log::info!(
        "Wrote {} and {}",
        obj_path.display(),
        mtl_path.display()
    );
    Ok(())
}
