//! Typed view of the parts of a COLLADA document the converter needs.
//!
//! [`Collada::from_document`] walks the XML tree once and copies everything
//! into owned structs. Optional links stay `Option`s here; deciding which of
//! them are required happens in the geometry extractor. Numeric text is kept
//! as is and only parsed for the arrays and matrices a conversion uses.

use std::collections::HashMap;

use roxmltree::{Node, NodeId};

use crate::{
    data_structures::scene_graph::{LocalTransform, SceneGraph, SceneNode},
    resources::document::{Document, Tag, children, find_all, find_first, is_tag, strip_fragment},
};

#[derive(Clone, Debug)]
pub struct Collada {
    pub scene: SceneGraph,
    pub instances: Vec<GeometryInstance>,
    pub geometries: Vec<Geometry>,
    pub materials: Vec<Material>,
    pub effects: Vec<Effect>,
    pub images: Vec<Image>,
}

/// An `<instance_geometry>` and the scene node directly containing it.
#[derive(Clone, Debug)]
pub struct GeometryInstance {
    pub geometry_id: String,
    pub owner: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct Geometry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mesh: Option<Mesh>,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Source id bound to the `POSITION` semantic of `<vertices>`.
    pub position_source: Option<String>,
    pub sources: Vec<Source>,
    pub triangles: Vec<TriangleBlock>,
}

impl Mesh {
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn source_with_suffix(&self, suffix: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id.ends_with(suffix))
    }
}

#[derive(Clone, Debug)]
pub struct Source {
    pub id: String,
    /// Text of the `<float_array>`, if the source has one.
    pub float_array: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TriangleBlock {
    pub material: Option<String>,
    /// Text of the `<p>` element.
    pub indices: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Material {
    pub id: String,
    pub effect: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Effect {
    pub id: String,
    /// `texture` attribute of the first `<texture>` inside `<diffuse>`.
    pub diffuse_texture: Option<String>,
    /// sampler2D newparam sid -> sid of the surface it samples.
    pub samplers: HashMap<String, String>,
    /// surface newparam sid -> image id it is initialised from.
    pub surfaces: HashMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct Image {
    pub id: String,
    pub init_from: Option<String>,
}

impl Collada {
    pub fn from_document(doc: &Document<'_>) -> Self {
        let root = doc.root();
        let (scene, node_ids) = scene_graph(root);

        let instances = find_all(root, Tag::InstanceGeometry)
            .filter_map(|instance| {
                let url = instance.attribute("url")?;
                let owner = instance
                    .parent_element()
                    .filter(|p| is_tag(p, Tag::Node))
                    .and_then(|p| node_ids.get(&p.id()).copied());
                Some(GeometryInstance {
                    geometry_id: strip_fragment(url).to_string(),
                    owner,
                })
            })
            .collect();

        let geometries = find_all(root, Tag::Geometry).map(parse_geometry).collect();

        let materials = find_all(root, Tag::Material)
            .filter_map(|m| {
                Some(Material {
                    id: m.attribute("id")?.to_string(),
                    effect: find_first(m, Tag::InstanceEffect)
                        .and_then(|e| e.attribute("url"))
                        .map(|url| strip_fragment(url).to_string()),
                })
            })
            .collect();

        let effects = find_all(root, Tag::Effect).filter_map(parse_effect).collect();

        let images = find_all(root, Tag::Image)
            .filter_map(|i| {
                Some(Image {
                    id: i.attribute("id")?.to_string(),
                    init_from: init_from_text(i),
                })
            })
            .collect();

        Self {
            scene,
            instances,
            geometries,
            materials,
            effects,
            images,
        }
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn effect(&self, id: &str) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }
}

/// Builds the scene graph from every `<node>` below `root`.
///
/// Descendants come in document order, so a parent is always inserted before
/// its children. Only a `<node>` that is the direct parent element counts as
/// parent.
fn scene_graph(root: Node<'_, '_>) -> (SceneGraph, HashMap<NodeId, usize>) {
    let mut graph = SceneGraph::new();
    let mut ids = HashMap::new();
    for node in find_all(root, Tag::Node) {
        let matrices = children(node, Tag::Matrix)
            .map(|m| m.text().unwrap_or_default().to_string())
            .collect();
        let parent = node
            .parent_element()
            .filter(|p| is_tag(p, Tag::Node))
            .and_then(|p| ids.get(&p.id()).copied());
        let idx = graph.add_node(
            SceneNode::new(
                node.attribute("id").map(str::to_string),
                node.attribute("name").map(str::to_string),
                LocalTransform::Raw(matrices),
            ),
            parent,
        );
        ids.insert(node.id(), idx);
    }
    (graph, ids)
}

fn parse_geometry(node: Node<'_, '_>) -> Geometry {
    Geometry {
        id: node.attribute("id").map(str::to_string),
        name: node.attribute("name").map(str::to_string),
        mesh: find_first(node, Tag::Mesh).map(parse_mesh),
    }
}

fn parse_mesh(node: Node<'_, '_>) -> Mesh {
    let position_source = find_first(node, Tag::Vertices)
        .and_then(|v| {
            find_all(v, Tag::Input).find(|i| i.attribute("semantic") == Some("POSITION"))
        })
        .and_then(|i| i.attribute("source"))
        .map(|s| strip_fragment(s).to_string());

    let sources = find_all(node, Tag::Source)
        .map(|s| Source {
            id: s.attribute("id").unwrap_or_default().to_string(),
            float_array: find_first(s, Tag::FloatArray).map(text_of),
        })
        .collect();

    let triangles = find_all(node, Tag::Triangles)
        .map(|t| TriangleBlock {
            material: t.attribute("material").map(str::to_string),
            indices: find_first(t, Tag::P).map(text_of),
        })
        .collect();

    Mesh {
        position_source,
        sources,
        triangles,
    }
}

fn parse_effect(node: Node<'_, '_>) -> Option<Effect> {
    let id = node.attribute("id")?.to_string();
    // any <diffuse> may carry the texture, e.g. in a second technique
    let diffuse_texture = find_all(node, Tag::Diffuse)
        .find_map(|d| find_first(d, Tag::Texture)?.attribute("texture"))
        .map(str::to_string);

    let mut samplers = HashMap::new();
    let mut surfaces = HashMap::new();
    for param in find_all(node, Tag::NewParam) {
        let Some(sid) = param.attribute("sid") else {
            continue;
        };
        if let Some(sampler) = children(param, Tag::Sampler2D).next() {
            if let Some(source) = children(sampler, Tag::Source).next().and_then(|c| c.text()) {
                samplers.insert(sid.to_string(), source.trim().to_string());
            }
        } else if let Some(surface) = children(param, Tag::Surface).next() {
            if let Some(image) = init_from_text(surface) {
                surfaces.insert(sid.to_string(), image);
            }
        }
    }

    Some(Effect {
        id,
        diffuse_texture,
        samplers,
        surfaces,
    })
}

fn init_from_text(scope: Node<'_, '_>) -> Option<String> {
    find_first(scope, Tag::InitFrom)
        .and_then(|i| i.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn text_of(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().to_string()
}
