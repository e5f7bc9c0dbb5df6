use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::entities::{Forest, IdKey, Node, ParentRef};

/// A node stored in the arena, before its children are attached.
#[derive(Debug)]
pub struct ArenaNode {
    /// Identifier resolved from the source row
    pub id: IdKey,
    /// Parent resolved from the source row
    pub parent: ParentRef,
    /// Node payload, `children` still empty
    pub node: Node,
}

/// Arena-backed indexes built during one row-to-tree pass.
///
/// Holds the node index (id -> first node registered under it) and the
/// pending-children index (parent -> ordered child list). A node's children
/// are exactly the pending list keyed by its own id, so children seen before
/// their parent need no extra splicing step.
///
/// Owned by a single build; never shared between builds.
#[derive(Debug, Default)]
pub struct TreeIndex {
    arena: Arena<ArenaNode>,
    nodes: HashMap<IdKey, Index>,
    pending: HashMap<ParentRef, Vec<Index>>,
}

impl TreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` and links it under `parent`.
    ///
    /// The node index keeps the first node registered under an id. The node
    /// is not appended when a sibling with the same id already sits in the
    /// parent's list. Returns the arena index of the stored node.
    ///
    /// [`TreeBuilder`](crate::domain::TreeBuilder) settles duplicate ids before
    /// calling this, so both checks only matter when the index is filled
    /// directly.
    #[instrument(level = "trace", skip(self, node))]
    pub fn insert_node(&mut self, id: IdKey, parent: ParentRef, node: Node) -> Index {
        let node_idx = self.arena.insert(ArenaNode {
            id: id.clone(),
            parent: parent.clone(),
            node,
        });
        self.nodes.entry(id.clone()).or_insert(node_idx);

        let arena = &self.arena;
        let siblings = self.pending.entry(parent).or_default();
        let duplicate = siblings
            .iter()
            .filter_map(|&idx| arena.get(idx))
            .any(|sibling| sibling.id == id);
        if duplicate {
            trace!(%id, "sibling with same id already attached");
        } else {
            siblings.push(node_idx);
        }

        node_idx
    }

    pub fn contains(&self, id: &IdKey) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    /// Number of nodes stored, including ones not attached anywhere.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Registered identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &IdKey> {
        self.nodes.keys()
    }

    /// Keys of the pending-children index, in no particular order.
    pub fn parents(&self) -> impl Iterator<Item = &ParentRef> {
        self.pending.keys()
    }

    /// Arena indices of the nodes waiting under `parent`.
    pub fn children_of(&self, parent: &ParentRef) -> &[Index] {
        self.pending.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The node registered under `id`, with its subtree attached.
    pub fn node(&self, id: &IdKey) -> Option<Node> {
        self.nodes.get(id).and_then(|&idx| self.materialize(idx))
    }

    /// The nodes waiting under `parent`, each with its subtree attached.
    ///
    /// `None` when nothing was ever linked under `parent`.
    pub fn subtrees(&self, parent: &ParentRef) -> Option<Forest> {
        self.pending.get(parent).map(|children| {
            children
                .iter()
                .filter_map(|&idx| self.materialize(idx))
                .collect()
        })
    }

    /// Copies the stored node out of the arena and attaches its children.
    ///
    /// Recurses once per tree level. Looping parent chains are not detected:
    /// they cannot hang off the implicit root, but a root selector that
    /// starts inside one never returns.
    fn materialize(&self, idx: Index) -> Option<Node> {
        let stored = self.arena.get(idx)?;
        let mut node = stored.node.clone();
        node.children = self
            .subtrees(&ParentRef::Explicit(stored.id.clone()))
            .unwrap_or_default();
        Some(node)
    }
}
