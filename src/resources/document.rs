//! Namespace-aware queries over a parsed COLLADA document.
//!
//! Every query only matches elements of the COLLADA 1.4 schema namespace and
//! is keyed by [`Tag`], so callers never deal with raw tag names.

use roxmltree::Node;

use crate::error::Result;

pub const COLLADA_NAMESPACE: &str = "http://www.collada.org/2005/11/COLLADASchema";

/// COLLADA elements the converter looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Diffuse,
    Effect,
    FloatArray,
    Geometry,
    Image,
    InitFrom,
    Input,
    InstanceEffect,
    InstanceGeometry,
    Material,
    Matrix,
    Mesh,
    NewParam,
    Node,
    P,
    Sampler2D,
    Source,
    Surface,
    Texture,
    Triangles,
    Vertices,
    VisualScene,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Diffuse => "diffuse",
            Tag::Effect => "effect",
            Tag::FloatArray => "float_array",
            Tag::Geometry => "geometry",
            Tag::Image => "image",
            Tag::InitFrom => "init_from",
            Tag::Input => "input",
            Tag::InstanceEffect => "instance_effect",
            Tag::InstanceGeometry => "instance_geometry",
            Tag::Material => "material",
            Tag::Matrix => "matrix",
            Tag::Mesh => "mesh",
            Tag::NewParam => "newparam",
            Tag::Node => "node",
            Tag::P => "p",
            Tag::Sampler2D => "sampler2D",
            Tag::Source => "source",
            Tag::Surface => "surface",
            Tag::Texture => "texture",
            Tag::Triangles => "triangles",
            Tag::Vertices => "vertices",
            Tag::VisualScene => "visual_scene",
        }
    }
}

/// True if `node` is the COLLADA element `tag`.
pub fn is_tag(node: &Node<'_, '_>, tag: Tag) -> bool {
    node.is_element() && node.has_tag_name((COLLADA_NAMESPACE, tag.name()))
}

/// First element `tag` strictly below `scope`, in document order.
pub fn find_first<'a, 'input>(scope: Node<'a, 'input>, tag: Tag) -> Option<Node<'a, 'input>> {
    find_all(scope, tag).next()
}

/// Every element `tag` strictly below `scope`, in document order.
pub fn find_all<'a, 'input>(
    scope: Node<'a, 'input>,
    tag: Tag,
) -> impl Iterator<Item = Node<'a, 'input>> {
    scope.descendants().skip(1).filter(move |n| is_tag(n, tag))
}

/// Direct element children `tag` of `scope`.
pub fn children<'a, 'input>(
    scope: Node<'a, 'input>,
    tag: Tag,
) -> impl Iterator<Item = Node<'a, 'input>> {
    scope.children().filter(move |n| is_tag(n, tag))
}

/// Parsed XML tree of one input file.
pub struct Document<'input> {
    tree: roxmltree::Document<'input>,
}

impl<'input> Document<'input> {
    pub fn parse(text: &'input str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let tree = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self { tree })
    }

    pub fn root(&self) -> Node<'_, 'input> {
        self.tree.root_element()
    }

    /// The element `tag` whose `id` attribute equals `id`, anywhere in the document.
    pub fn find_by_id<'a>(&'a self, tag: Tag, id: &str) -> Option<Node<'a, 'input>> {
        self.find_by_attribute(tag, "id", id)
    }

    pub fn find_by_attribute<'a>(
        &'a self,
        tag: Tag,
        attribute: &str,
        value: &str,
    ) -> Option<Node<'a, 'input>> {
        self.tree
            .root()
            .descendants()
            .find(|n| is_tag(n, tag) && n.attribute(attribute) == Some(value))
    }
}

/// Strips the leading `#` of a COLLADA URL fragment (`#Mesh-1` -> `Mesh-1`).
pub fn strip_fragment(url: &str) -> &str {
    url.strip_prefix('#').unwrap_or(url)
}
