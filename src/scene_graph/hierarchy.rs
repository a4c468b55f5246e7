use glam::{Mat4, Vec3};
use id_arena::Arena;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::scene_graph::error::{HierarchyError, Result};
use crate::scene_graph::node::{Node, NodeId, Parent};
use crate::scene_graph::transform::Transform;

/// A forest of named nodes, each carrying a local transform and a payload.
///
/// Nodes live in an arena and refer to their parent and children by id. A
/// name index maps each unique name to its id. `order` lists every node with
/// parents ahead of their children, so propagation is a single linear pass.
///
/// World transforms are not kept in sync with edits. Callers edit local
/// transforms, then call [`Hierarchy::update_world_transforms`] once before
/// reading world matrices or drawing.
pub struct Hierarchy<P> {
    nodes: Arena<Node<P>>,
    names: HashMap<String, NodeId<P>>,
    order: Vec<NodeId<P>>,
    root_transform: Mat4,
    up_to_date: bool,
}

impl<P> Default for Hierarchy<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Hierarchy<P> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            names: HashMap::new(),
            order: Vec::new(),
            root_transform: Mat4::IDENTITY,
            // An empty hierarchy has nothing to propagate.
            up_to_date: true,
        }
    }

    /// Registers a new node under `parent` with the given local transform.
    ///
    /// Fails if `name` is already taken or if `parent` names a node that has
    /// not been added yet. The hierarchy is left untouched on failure.
    pub fn add<'a>(
        &mut self,
        payload: P,
        name: impl Into<String>,
        parent: impl Into<Parent<'a>>,
        transform: Transform,
    ) -> Result<NodeId<P>> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(HierarchyError::DuplicateName(name));
        }

        let parent_id = self.resolve_parent(&name, parent.into())?;

        let id = self
            .nodes
            .alloc(Node::new(name.clone(), parent_id, transform, payload));

        if let Some(parent_id) = parent_id {
            self.nodes[parent_id].child_ids.push(id);
        }

        log::debug!(
            "added node '{}' under {}",
            name,
            parent_id.map_or("<root>", |id| self.nodes[id].name())
        );

        self.names.insert(name, id);
        // Parents always exist before their children, so appending keeps
        // `order` topological.
        self.order.push(id);
        self.up_to_date = false;

        Ok(id)
    }

    pub fn add_root(&mut self, payload: P, name: impl Into<String>) -> Result<NodeId<P>> {
        self.add(payload, name, Parent::Root, Transform::IDENTITY)
    }

    /// Adds a node under `parent`, offset by `translation`.
    pub fn add_child(
        &mut self,
        payload: P,
        name: impl Into<String>,
        parent: &str,
        translation: Vec3,
    ) -> Result<NodeId<P>> {
        self.add(
            payload,
            name,
            Parent::Node(parent),
            Transform::from_translation(translation),
        )
    }

    fn resolve_parent(&self, name: &str, parent: Parent<'_>) -> Result<Option<NodeId<P>>> {
        match parent {
            Parent::Root => Ok(None),
            Parent::Node(parent) => self.names.get(parent).copied().map(Some).ok_or_else(|| {
                HierarchyError::UnknownParent {
                    name: name.to_string(),
                    parent: parent.to_string(),
                }
            }),
        }
    }

    pub fn id_of(&self, name: &str) -> Result<NodeId<P>> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| HierarchyError::UnknownNode(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Node<P>> {
        let id = self.id_of(name)?;
        Ok(&self.nodes[id])
    }

    /// Mutable access for per-frame edits. Changes only reach the world
    /// transforms on the next propagation pass.
    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Node<P>> {
        let id = self.id_of(name)?;
        self.up_to_date = false;
        Ok(&mut self.nodes[id])
    }

    pub fn get(&self, id: NodeId<P>) -> Option<&Node<P>> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId<P>) -> Option<&mut Node<P>> {
        self.up_to_date = false;
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Name of the parent of `name`, or `None` if it hangs off the root.
    pub fn parent_of(&self, name: &str) -> Result<Option<&str>> {
        let node = self.lookup(name)?;
        Ok(node.parent(self).map(Node::name))
    }

    pub fn children_of(&self, name: &str) -> Result<impl Iterator<Item = &Node<P>>> {
        let node = self.lookup(name)?;
        Ok(node.children(self))
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node<P>> {
        self.nodes().filter(|node| node.is_root())
    }

    /// All nodes, parents before children. The sequence can be restarted at
    /// will; world matrices are those of the last propagation pass.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P>> + '_ {
        self.order.iter().map(move |&id| &self.nodes[id])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId<P>, &Node<P>)> + '_ {
        self.order.iter().map(move |&id| (id, &self.nodes[id]))
    }

    pub fn root_transform(&self) -> Mat4 {
        self.root_transform
    }

    /// Transform inherited by every root-attached node. Identity by default.
    pub fn set_root_transform(&mut self, root_transform: Mat4) {
        self.root_transform = root_transform;
        self.up_to_date = false;
    }

    /// Whether world transforms reflect every edit made so far.
    pub fn is_up_to_date(&self) -> bool {
        self.up_to_date
    }

    /// Recomputes every world transform from the local transforms.
    ///
    /// Each node gets `parent_world * local`, with root-attached nodes using
    /// the root transform as their parent. Topology is validated when it
    /// changes, so this pass cannot fail.
    pub fn update_world_transforms(&mut self) {
        for &id in &self.order {
            let parent_world = match self.nodes[id].parent_id {
                Some(parent_id) => self.nodes[parent_id].world_matrix,
                None => self.root_transform,
            };

            let node = &mut self.nodes[id];
            node.world_matrix = parent_world * node.transform.matrix();
        }

        log::trace!("propagated world transforms for {} nodes", self.order.len());
        self.up_to_date = true;
    }

    /// Moves `name` (with its subtree) under `new_parent`, keeping its local
    /// transform.
    ///
    /// Rejects moves that would attach a node under itself or one of its
    /// descendants. The hierarchy is left untouched on failure.
    pub fn reparent<'a>(&mut self, name: &str, new_parent: impl Into<Parent<'a>>) -> Result<()> {
        let id = self.id_of(name)?;
        let new_parent_id = self.resolve_parent(name, new_parent.into())?;

        if let Some(parent_id) = new_parent_id {
            if self.is_ancestor_or_self(id, parent_id) {
                return Err(HierarchyError::Cycle {
                    name: name.to_string(),
                    parent: self.nodes[parent_id].name().to_string(),
                });
            }
        }

        if self.nodes[id].parent_id == new_parent_id {
            return Ok(());
        }

        if let Some(old_parent_id) = self.nodes[id].parent_id {
            self.nodes[old_parent_id].child_ids.retain(|&child| child != id);
        }

        self.nodes[id].parent_id = new_parent_id;
        if let Some(parent_id) = new_parent_id {
            self.nodes[parent_id].child_ids.push(id);
        }

        log::debug!(
            "moved node '{}' under {}",
            name,
            new_parent_id.map_or("<root>", |id| self.nodes[id].name())
        );

        self.rebuild_order();
        self.up_to_date = false;

        Ok(())
    }

    /// True if `ancestor` is `node` or lies on the path from `node` to the root.
    fn is_ancestor_or_self(&self, ancestor: NodeId<P>, node: NodeId<P>) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id].parent_id;
        }
        false
    }

    /// Depth-first pre-order from every root, in insertion order of the roots.
    fn rebuild_order(&mut self) {
        let mut order = Vec::with_capacity(self.order.len());
        let mut stack = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        stack.reverse();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].child_ids.iter().rev().copied());
        }

        self.order = order;
    }
}

impl<P> Index<&str> for Hierarchy<P> {
    type Output = Node<P>;

    /// Panics if there is no node called `name`.
    fn index(&self, name: &str) -> &Node<P> {
        match self.lookup(name) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<P> IndexMut<&str> for Hierarchy<P> {
    /// Panics if there is no node called `name`.
    fn index_mut(&mut self, name: &str) -> &mut Node<P> {
        match self.lookup_mut(name) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}
