use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

pub const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

pub fn translation(x: f64, y: f64, z: f64) -> [f64; 16] {
    [
        1.0, 0.0, 0.0, x, //
        0.0, 1.0, 0.0, y, //
        0.0, 0.0, 1.0, z, //
        0.0, 0.0, 0.0, 1.0,
    ]
}

pub fn scale(s: f64) -> [f64; 16] {
    [
        s, 0.0, 0.0, 0.0, //
        0.0, s, 0.0, 0.0, //
        0.0, 0.0, s, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// How the material's diffuse channel references its image.
#[derive(Clone, Debug)]
pub enum Texture {
    None,
    /// `<texture texture="...">` names the image directly
    Image(String),
    /// `<texture>` names a sampler2D newparam backed by a surface
    Sampler(String),
}

/// A COLLADA document with one geometry and one triangle block.
///
/// `chain` lists the nested scene nodes from the outermost to the one that
/// instances the geometry; `None` means the node has no `<matrix>`. An empty
/// chain puts the instance directly into the visual scene.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub positions: Vec<f64>,
    pub normals: Option<Vec<f64>>,
    pub uvs: Option<Vec<f64>>,
    pub indices: Option<Vec<usize>>,
    pub material: String,
    pub define_material: bool,
    pub texture: Texture,
    pub chain: Vec<Option<Vec<f64>>>,
    pub extra_geometry: bool,
    pub instances: usize,
}

impl Fixture {
    /// Positions (0,0,0), (1,0,0), (0,1,0), one triangle, material `M1`.
    pub fn triangle() -> Self {
        Self {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            uvs: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            indices: Some(vec![0, 0, 0, 1, 1, 1, 2, 2, 2]),
            material: "M1".to_string(),
            define_material: true,
            texture: Texture::None,
            chain: vec![None],
            extra_geometry: false,
            instances: 1,
        }
    }

    /// A unit quad made of two triangles sharing one normal.
    pub fn quad() -> Self {
        Self {
            positions: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            normals: Some(vec![0.0, 0.0, 1.0]),
            uvs: Some(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]),
            // position, normal, uv per corner
            indices: Some(vec![
                0, 0, 0, 1, 0, 1, 2, 0, 2, //
                0, 0, 0, 2, 0, 2, 3, 0, 3,
            ]),
            ..Self::triangle()
        }
    }

    pub fn with_chain(mut self, chain: Vec<Option<[f64; 16]>>) -> Self {
        self.chain = chain.into_iter().map(|m| m.map(|m| m.to_vec())).collect();
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = texture;
        self
    }

    pub fn to_xml(&self) -> String {
        let mut x = String::new();
        x.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        x.push_str(
            "<COLLADA xmlns=\"http://www.collada.org/2005/11/COLLADASchema\" version=\"1.4.1\">\n",
        );
        x.push_str("  <asset><unit name=\"meter\" meter=\"1\"/><up_axis>Z_UP</up_axis></asset>\n");

        let image = match &self.texture {
            Texture::None => None,
            Texture::Image(path) | Texture::Sampler(path) => Some(path),
        };
        if let Some(path) = image {
            let _ = writeln!(
                x,
                "  <library_images>\n    <image id=\"Tex-image\" name=\"Tex\"><init_from>{path}</init_from></image>\n  </library_images>"
            );
        }

        if self.define_material {
            x.push_str("  <library_effects>\n    <effect id=\"Mat-effect\">\n      <profile_COMMON>\n");
            let texture_ref = match &self.texture {
                Texture::None => None,
                Texture::Image(_) => Some("Tex-image"),
                Texture::Sampler(_) => {
                    x.push_str(
                        "        <newparam sid=\"Tex-surface\"><surface type=\"2D\"><init_from>Tex-image</init_from></surface></newparam>\n",
                    );
                    x.push_str(
                        "        <newparam sid=\"Tex-sampler\"><sampler2D><source>Tex-surface</source></sampler2D></newparam>\n",
                    );
                    Some("Tex-sampler")
                }
            };
            x.push_str("        <technique sid=\"common\"><phong><diffuse>");
            match texture_ref {
                Some(t) => {
                    let _ = write!(x, "<texture texture=\"{t}\" texcoord=\"UVMap\"/>");
                }
                None => x.push_str("<color sid=\"diffuse\">0.8 0.8 0.8 1</color>"),
            }
            x.push_str("</diffuse></phong></technique>\n      </profile_COMMON>\n    </effect>\n  </library_effects>\n");
            let _ = writeln!(
                x,
                "  <library_materials>\n    <material id=\"{0}\" name=\"{0}\"><instance_effect url=\"#Mat-effect\"/></material>\n  </library_materials>",
                self.material
            );
        }

        x.push_str("  <library_geometries>\n");
        self.write_geometry(&mut x, "Mesh-mesh");
        if self.extra_geometry {
            self.write_geometry(&mut x, "Other-mesh");
        }
        x.push_str("  </library_geometries>\n");

        x.push_str("  <library_visual_scenes>\n    <visual_scene id=\"Scene\" name=\"Scene\">\n");
        for (depth, matrix) in self.chain.iter().enumerate() {
            let _ = write!(x, "<node id=\"node{depth}\" name=\"node{depth}\" type=\"NODE\">");
            if let Some(m) = matrix {
                let _ = write!(x, "<matrix sid=\"transform\">{}</matrix>", join(m));
            }
        }
        for _ in 0..self.instances {
            let _ = write!(
                x,
                "<instance_geometry url=\"#Mesh-mesh\" name=\"Mesh\"><bind_material><technique_common><instance_material symbol=\"{0}\" target=\"#{0}\"/></technique_common></bind_material></instance_geometry>",
                self.material
            );
        }
        for _ in &self.chain {
            x.push_str("</node>");
        }
        x.push_str("\n    </visual_scene>\n  </library_visual_scenes>\n");
        x.push_str("  <scene><instance_visual_scene url=\"#Scene\"/></scene>\n</COLLADA>\n");
        x
    }

    fn write_geometry(&self, x: &mut String, id: &str) {
        let _ = writeln!(x, "    <geometry id=\"{id}\" name=\"Mesh\"><mesh>");
        write_source(x, &format!("{id}-positions"), Some(&self.positions), 3);
        if let Some(normals) = &self.normals {
            write_source(x, &format!("{id}-Normal0"), Some(normals), 3);
        }
        if let Some(uvs) = &self.uvs {
            write_source(x, &format!("{id}-UV0"), Some(uvs), 2);
        }
        let _ = writeln!(
            x,
            "      <vertices id=\"{id}-vertices\"><input semantic=\"POSITION\" source=\"#{id}-positions\"/></vertices>"
        );
        if let Some(indices) = &self.indices {
            let p = indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                x,
                "      <triangles material=\"{}\" count=\"{}\"><input semantic=\"VERTEX\" source=\"#{id}-vertices\" offset=\"0\"/><input semantic=\"NORMAL\" source=\"#{id}-Normal0\" offset=\"1\"/><input semantic=\"TEXCOORD\" source=\"#{id}-UV0\" offset=\"2\" set=\"0\"/><p>{p}</p></triangles>",
                self.material,
                indices.len() / 9
            );
        }
        x.push_str("    </mesh></geometry>\n");
    }

    /// Writes the document to `<dir>/<name>.dae`.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(format!("{name}.dae"));
        fs::write(&path, self.to_xml()).expect("failed to write fixture");
        path
    }
}

fn write_source(x: &mut String, id: &str, values: Option<&Vec<f64>>, stride: usize) {
    let values = values.map(|v| join(v)).unwrap_or_default();
    let count = values.split_whitespace().count();
    let _ = writeln!(
        x,
        "      <source id=\"{id}\"><float_array id=\"{id}-array\" count=\"{count}\">{values}</float_array><technique_common><accessor source=\"#{id}-array\" count=\"{}\" stride=\"{stride}\"/></technique_common></source>",
        count / stride
    );
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output base `<dir>/<name>`; the converter appends `.obj` and `.mtl`.
pub fn output_base(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

pub fn read_outputs(base: &Path) -> (String, String) {
    let obj = fs::read_to_string(flow_dae2obj::export::with_suffix(base, "obj"))
        .expect("obj output missing");
    let mtl = fs::read_to_string(flow_dae2obj::export::with_suffix(base, "mtl"))
        .expect("mtl output missing");
    (obj, mtl)
}

/// `(x, y, z)` of every `v` line.
pub fn vertices(obj: &str) -> Vec<[f64; 3]> {
    obj.lines()
        .filter_map(|l| l.strip_prefix("v "))
        .map(|rest| {
            let v: Vec<f64> = rest
                .split_whitespace()
                .map(|t| t.parse().expect("vertex component"))
                .collect();
            [v[0], v[1], v[2]]
        })
        .collect()
}

pub fn count_prefix(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}
