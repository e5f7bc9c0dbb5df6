//! Depth-first traversal and flattening of nested trees.
//!
//! Works over anything implementing [`TreeItem`]: built [`Node`] forests, and
//! raw `serde_json::Value` arrays whose children sit under a configurable key.

use std::ops::ControlFlow;

use serde_json::Value;
use tracing::instrument;

use crate::domain::{Node, Row, CHILDREN_KEY};
use crate::util::{for_each_until, omit};

/// A tree element that can expose its children and a copy of itself
/// without them.
pub trait TreeItem: Sized {
    /// The node as handed to callbacks, children field removed.
    type Data;

    fn children<'a>(&'a self, children_key: &str) -> &'a [Self];

    fn stripped(&self, children_key: &str) -> Self::Data;
}

/// Objects nest under `children_key`. A missing or non-array value there
/// means no children; non-object items are leaves passed through as-is.
impl TreeItem for Value {
    type Data = Value;

    fn children<'a>(&'a self, children_key: &str) -> &'a [Value] {
        match self {
            Value::Object(map) => match map.get(children_key) {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        }
    }

    fn stripped(&self, children_key: &str) -> Value {
        match self {
            Value::Object(map) => Value::Object(omit(map, children_key)),
            other => other.clone(),
        }
    }
}

/// Children are structural; the key is ignored.
impl TreeItem for Node {
    type Data = Row;

    fn children<'a>(&'a self, _children_key: &str) -> &'a [Node] {
        &self.children
    }

    fn stripped(&self, _children_key: &str) -> Row {
        omit(&self.data, CHILDREN_KEY)
    }
}

/// What a traversal callback sees for one node.
#[derive(Debug)]
pub struct Visit<'a, T: TreeItem> {
    /// The node without its children field
    pub node: T::Data,
    /// Position among its siblings
    pub index: usize,
    /// The sibling list the node belongs to
    pub siblings: &'a [T],
    /// The node as stored, children included
    pub original: &'a T,
    /// Enclosing node, `None` at the top level
    pub parent: Option<&'a T>,
    /// 0 for the top level
    pub depth: usize,
}

/// Callback verdict for [`each_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Skip the node's children, carry on with its siblings.
    Skip,
    /// End the whole traversal.
    Stop,
}

/// Visits every node depth-first, parents before children.
///
/// [`Walk::Stop`] ends the traversal everywhere, not just in the current
/// sibling list. Recursion depth equals tree depth.
#[instrument(level = "trace", skip(forest, callback), fields(roots = forest.len()))]
pub fn each_tree<'a, T, F>(forest: &'a [T], children_key: &str, mut callback: F)
where
    T: TreeItem,
    F: FnMut(Visit<'a, T>) -> Walk,
{
    let _ = walk_level(forest, children_key, None, 0, &mut callback);
}

fn walk_level<'a, T, F>(
    nodes: &'a [T],
    children_key: &str,
    parent: Option<&'a T>,
    depth: usize,
    callback: &mut F,
) -> ControlFlow<()>
where
    T: TreeItem,
    F: FnMut(Visit<'a, T>) -> Walk,
{
    for_each_until(nodes, |index, node| {
        let visit = Visit {
            node: node.stripped(children_key),
            index,
            siblings: nodes,
            original: node,
            parent,
            depth,
        };
        match callback(visit) {
            Walk::Stop => ControlFlow::Break(()),
            Walk::Skip => ControlFlow::Continue(()),
            Walk::Continue => walk_level(
                node.children(children_key),
                children_key,
                Some(node),
                depth + 1,
                &mut *callback,
            ),
        }
    })
}

/// Flattens a forest into its nodes, children stripped, in pre-order.
pub fn flatten_tree<T: TreeItem>(forest: &[T]) -> Vec<T::Data> {
    flatten_tree_with(forest, CHILDREN_KEY, |visit| visit.node)
}

/// Flattens a forest in pre-order, mapping every node through `projector`.
pub fn flatten_tree_with<'a, T, R, F>(
    forest: &'a [T],
    children_key: &str,
    mut projector: F,
) -> Vec<R>
where
    T: TreeItem,
    F: FnMut(Visit<'a, T>) -> R,
{
    let mut results = Vec::new();
    each_tree(forest, children_key, |visit| {
        results.push(projector(visit));
        Walk::Continue
    });
    results
}
