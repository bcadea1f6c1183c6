use std::io::{self, Write};

/// Writes the single material of a converted mesh.
///
/// Shading coefficients are fixed; the source material's own parameters are
/// not carried over. `map_Kd` is only written when a texture was resolved.
pub fn write_mtl<W: Write>(out: &mut W, material_id: &str, texture: Option<&str>) -> io::Result<()> {
    writeln!(out, "newmtl {material_id}")?;
    writeln!(out, "Ka 1.000000 1.000000 1.000000")?;
    writeln!(out, "Kd 1.000000 1.000000 1.000000")?;
    writeln!(out, "Ks 0.000000 0.000000 0.000000")?;
    writeln!(out, "Ns 2.000000")?;
    if let Some(texture) = texture {
        match texture_file_name(texture) {
            Some(name) => writeln!(out, "map_Kd {name}")?,
            None => log::warn!("Texture path {texture:?} has no file name, skipping map_Kd."),
        }
    }
    Ok(())
}

/// File name of a texture path, without directories or a `file://` scheme.
///
/// Both `/` and `\` count as separators since exporters on Windows write
/// native paths into `init_from`.
pub fn texture_file_name(path: &str) -> Option<&str> {
    let path = path.trim();
    let path = path.strip_prefix("file://").unwrap_or(path);
    path.rsplit(['/', '\\']).next().filter(|name| !name.is_empty())
}
