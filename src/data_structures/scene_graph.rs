//! Scene graph and hierarchical transform resolution.
//!
//! The COLLADA visual scene is flattened into an arena of [`SceneNode`]s.
//! Each node remembers the index of the node that directly contains it, so
//! resolving a world transform only walks the ancestor chain instead of
//! searching the whole tree at every step.

use cgmath::{Matrix4, SquareMatrix};

use crate::{
    data_structures::transform::{compose_local, parse_matrix},
    error::Result,
};

/// How a node's local matrix is combined with the matrices of its ancestors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositionOrder {
    /// `world(n) = local(n) × world(parent)`.
    ///
    /// This is the order existing converted assets were produced with, so it
    /// stays the default.
    #[default]
    Legacy,
    /// `world(n) = world(parent) × local(n)`, the usual scene-graph order.
    Hierarchical,
}

/// Local transform of a node, either resolved or still as document text.
#[derive(Clone, Debug)]
pub enum LocalTransform {
    Matrix(Matrix4<f64>),
    /// Text of the node's `<matrix>` elements in document order. Only parsed
    /// when a world transform passes through the node.
    Raw(Vec<String>),
}

impl From<Matrix4<f64>> for LocalTransform {
    fn from(matrix: Matrix4<f64>) -> Self {
        LocalTransform::Matrix(matrix)
    }
}

/// One `<node>` of the visual scene.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub local: LocalTransform,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl SceneNode {
    pub fn new(
        id: Option<String>,
        name: Option<String>,
        local: impl Into<LocalTransform>,
    ) -> Self {
        Self {
            id,
            name,
            local: local.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Product of the node's own matrices: `I × m0 × m1 × ...`.
    pub fn local_transform(&self) -> Result<Matrix4<f64>> {
        match &self.local {
            LocalTransform::Matrix(matrix) => Ok(*matrix),
            LocalTransform::Raw(texts) => {
                let matrices = texts
                    .iter()
                    .map(|text| parse_matrix(self.label(), text))
                    .collect::<Result<Vec<_>>>()?;
                Ok(compose_local(&matrices))
            }
        }
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Human readable label for logs and error messages.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<anonymous>")
    }
}

/// Arena owning every scene node; indices are stable for its lifetime.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` below `parent` and returns its index.
    ///
    /// Nodes have to be added parent first; an unknown parent index leaves
    /// the node at the top level.
    pub fn add_node(&mut self, mut node: SceneNode, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        node.parent = parent.filter(|p| *p < idx);
        if let Some(p) = node.parent {
            self.nodes[p].children.push(idx);
        } else if parent.is_some() {
            log::warn!(
                "Parent {:?} of node {} does not exist yet, keeping it at the top level.",
                parent,
                node.label()
            );
        }
        self.nodes.push(node);
        idx
    }

    pub fn node(&self, idx: usize) -> Option<&SceneNode> {
        self.nodes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| i)
    }

    /// Yields `idx` first, then its parent, grandparent and so on.
    pub fn ancestors(&self, idx: usize) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.nodes.get(idx).map(|_| idx),
        }
    }

    /// Cumulative transform of node `idx`.
    ///
    /// A node without a parent resolves to its own local matrix, an unknown
    /// index to the identity. Only the matrices of `idx` and its ancestors
    /// are parsed.
    pub fn world_transform(&self, idx: usize, order: CompositionOrder) -> Result<Matrix4<f64>> {
        self.ancestors(idx)
            .try_fold(Matrix4::identity(), |acc, i| {
                let local = self.nodes[i].local_transform()?;
                Ok(match order {
                    CompositionOrder::Legacy => acc * local,
                    CompositionOrder::Hierarchical => local * acc,
                })
            })
    }
}

pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.graph.nodes[current].parent;
        Some(current)
    }
}
