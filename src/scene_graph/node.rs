use glam::{Mat4, Vec3};
use id_arena::Id;

use crate::scene_graph::hierarchy::Hierarchy;
use crate::scene_graph::transform::Transform;

/// Stable handle to a node, returned by [`Hierarchy::add`]. Cheaper than a
/// name lookup in per-frame code. Handles stay valid for the lifetime of the
/// hierarchy that issued them.
pub type NodeId<P> = Id<Node<P>>;

/// Where a node is attached when it is added or re-parented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent<'a> {
    /// Directly under the world root.
    #[default]
    Root,
    /// Under the node with this name.
    Node(&'a str),
}

impl<'a> From<&'a str> for Parent<'a> {
    fn from(name: &'a str) -> Self {
        Parent::Node(name)
    }
}

impl<'a> From<&'a String> for Parent<'a> {
    fn from(name: &'a String) -> Self {
        Parent::Node(name)
    }
}

impl<'a> From<Option<&'a str>> for Parent<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(Parent::Root, Parent::Node)
    }
}

pub struct Node<P> {
    name: String,
    pub(crate) parent_id: Option<NodeId<P>>,
    pub(crate) child_ids: Vec<NodeId<P>>,
    /// Local transform, relative to the parent. Edited freely by animation code.
    pub transform: Transform,
    /// Extra transform applied to the payload when drawing. Children do not
    /// inherit it.
    pub shape_transform: Transform,
    pub payload: P,
    pub(crate) world_matrix: Mat4,
}

impl<P> Node<P> {
    pub(crate) fn new(
        name: String,
        parent_id: Option<NodeId<P>>,
        transform: Transform,
        payload: P,
    ) -> Self {
        Self {
            name,
            parent_id,
            child_ids: Vec::new(),
            transform,
            shape_transform: Transform::IDENTITY,
            payload,
            world_matrix: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<NodeId<P>> {
        self.parent_id
    }

    pub fn child_ids(&self) -> &[NodeId<P>] {
        &self.child_ids
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// World matrix computed by the last [`Hierarchy::update_world_transforms`]
    /// pass. Stale if local transforms were edited since.
    pub fn world_transform(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn world_translation(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    /// Matrix handed to the renderer: the world transform followed by the
    /// node's shape transform.
    pub fn model_matrix(&self) -> Mat4 {
        if self.shape_transform.is_identity() {
            self.world_matrix
        } else {
            self.world_matrix * self.shape_transform.matrix()
        }
    }

    pub fn parent<'a>(&self, hierarchy: &'a Hierarchy<P>) -> Option<&'a Node<P>> {
        self.parent_id.and_then(|id| hierarchy.get(id))
    }

    pub fn children<'a, 'b>(
        &'a self,
        hierarchy: &'b Hierarchy<P>,
    ) -> impl Iterator<Item = &'b Node<P>> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| hierarchy.get(*id))
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("shape_transform", &self.shape_transform)
            .field("payload", &self.payload)
            .field("world_matrix", &self.world_matrix)
            .finish_non_exhaustive()
    }
}
