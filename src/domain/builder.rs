//! Tree builder: turns flat rows carrying `id`/`parentId` into a forest.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::TreeIndex;
use crate::domain::entities::{
    Forest, IdKey, Node, ParentRef, Row, CHILDREN_KEY, DEFAULT_ID_KEY, DEFAULT_PARENT_KEY,
};
use crate::errors::{TreeError, TreeResult};
use crate::tree_traits::TreeNodeConvert;
use crate::util::{as_row, is_nil, type_name};

/// Per-row hook. `None` drops the row.
pub type Converter<'a> = Box<dyn FnMut(Node) -> Option<Node> + 'a>;

/// Custom root selection over the finished indexes. `None` yields an empty forest.
pub type RootFn<'a> = Box<dyn FnOnce(&TreeIndex) -> Option<Forest> + 'a>;

/// Which nodes end up at the top of the returned forest.
#[derive(Default)]
pub enum RootSelector<'a> {
    /// Rows whose parent field is null or missing.
    #[default]
    Sentinel,
    /// Rows whose parent field equals this value.
    Value(IdKey),
    /// Caller picks the roots from the pending-children and node indexes.
    Custom(RootFn<'a>),
}

impl fmt::Debug for RootSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSelector::Sentinel => write!(f, "Sentinel"),
            RootSelector::Value(id) => f.debug_tuple("Value").field(id).finish(),
            RootSelector::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// What to do with a row whose id is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Ignore the later row; the first row with the id is used everywhere.
    #[default]
    KeepFirst,
    /// Fail the build with [`TreeError::DuplicateId`].
    Reject,
}

/// Options for [`build_tree`].
pub struct TreeOptions<'a> {
    pub id_key: String,
    pub parent_key: String,
    pub root: RootSelector<'a>,
    pub converter: Option<Converter<'a>>,
    pub duplicates: DuplicatePolicy,
}

impl Default for TreeOptions<'_> {
    fn default() -> Self {
        Self {
            id_key: DEFAULT_ID_KEY.to_string(),
            parent_key: DEFAULT_PARENT_KEY.to_string(),
            root: RootSelector::Sentinel,
            converter: None,
            duplicates: DuplicatePolicy::KeepFirst,
        }
    }
}

impl fmt::Debug for TreeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOptions")
            .field("id_key", &self.id_key)
            .field("parent_key", &self.parent_key)
            .field("root", &self.root)
            .field("converter", &self.converter.as_ref().map(|_| ".."))
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

impl<'a> TreeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    pub fn parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = key.into();
        self
    }

    pub fn root_value(mut self, value: impl Into<IdKey>) -> Self {
        self.root = RootSelector::Value(value.into());
        self
    }

    pub fn root_with<F>(mut self, select: F) -> Self
    where
        F: FnOnce(&TreeIndex) -> Option<Forest> + 'a,
    {
        self.root = RootSelector::Custom(Box::new(select));
        self
    }

    pub fn converter<F>(mut self, convert: F) -> Self
    where
        F: FnMut(Node) -> Option<Node> + 'a,
    {
        self.converter = Some(Box::new(convert));
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Single-pass row-to-tree construction.
pub struct TreeBuilder<'a> {
    options: TreeOptions<'a>,
    index: TreeIndex,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(options: TreeOptions<'a>) -> Self {
        Self {
            options,
            index: TreeIndex::new(),
        }
    }

    /// Builds the forest from `rows`, consuming the builder.
    #[instrument(level = "debug", skip_all, fields(rows = rows.len()))]
    pub fn build(mut self, rows: &[Row]) -> TreeResult<Forest> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        for (position, row) in rows.iter().enumerate() {
            self.push_row(position, row)?;
        }
        Ok(self.finish())
    }

    /// Links one row into the indexes.
    ///
    /// `position` is only used in error messages.
    pub fn push_row(&mut self, position: usize, row: &Row) -> TreeResult<()> {
        let id = self.resolve_id(position, row)?;
        let parent = self.resolve_parent(position, row);

        if self.index.contains(&id) {
            match self.options.duplicates {
                DuplicatePolicy::KeepFirst => {
                    warn!(%id, position, "duplicate id ignored");
                    return Ok(());
                }
                DuplicatePolicy::Reject => {
                    return Err(TreeError::DuplicateId {
                        index: position,
                        id,
                    })
                }
            }
        }

        let node = self.create_node(&id, &parent, row);
        let mut node = match self.options.converter.as_mut() {
            Some(convert) => match convert(node) {
                Some(node) => node,
                None => {
                    trace!(%id, "row dropped by converter");
                    return Ok(());
                }
            },
            None => node,
        };
        // children are synthesized, never carried through
        node.data.shift_remove(CHILDREN_KEY);
        node.children.clear();

        trace!(%id, %parent, "linking node");
        self.index.insert_node(id, parent, node);
        Ok(())
    }

    /// Selects the roots and materializes the forest.
    pub fn finish(self) -> Forest {
        let index = self.index;
        let forest = match self.options.root {
            RootSelector::Sentinel => index.subtrees(&ParentRef::Root),
            RootSelector::Value(value) => index.subtrees(&ParentRef::Explicit(value)),
            RootSelector::Custom(select) => select(&index),
        }
        .unwrap_or_default();

        debug!(nodes = index.len(), roots = forest.len(), "tree built");
        trace!("\n{}", forest.to_tree_string(&self.options.id_key));
        forest
    }

    fn resolve_id(&self, position: usize, row: &Row) -> TreeResult<IdKey> {
        let key = &self.options.id_key;
        let value = row.get(key);
        value
            .and_then(IdKey::from_value)
            .ok_or_else(|| TreeError::InvalidId {
                index: position,
                key: key.clone(),
                got: type_name(value),
            })
    }

    /// A nil parent, or one that is not a string or number, attaches to the
    /// implicit root.
    fn resolve_parent(&self, position: usize, row: &Row) -> ParentRef {
        let value = row.get(&self.options.parent_key);
        if is_nil(value) {
            return ParentRef::Root;
        }
        match value.and_then(IdKey::from_value) {
            Some(id) => ParentRef::Explicit(id),
            None => {
                warn!(
                    position,
                    key = %self.options.parent_key,
                    got = type_name(value),
                    "unusable parent id, attaching to root"
                );
                ParentRef::Root
            }
        }
    }

    /// `{id, parent}` merged with the row's own fields; the resolved ids win.
    fn create_node(&self, id: &IdKey, parent: &ParentRef, row: &Row) -> Node {
        let id_key = &self.options.id_key;
        let parent_key = &self.options.parent_key;

        let mut data = Row::with_capacity(row.len() + 2);
        data.insert(id_key.clone(), id.to_value());
        data.insert(parent_key.clone(), parent.to_value());
        for (key, value) in row {
            if key == id_key || key == parent_key || key == CHILDREN_KEY {
                continue;
            }
            data.insert(key.clone(), value.clone());
        }
        Node::new(data)
    }
}

/// Builds a forest out of flat rows.
///
/// Rows may come in any order: children listed before their parent are held
/// until the parent shows up. Recursion depth while attaching children equals
/// the tree depth, so pathologically deep hierarchies can exhaust the stack.
///
/// # Errors
///
/// [`TreeError::InvalidId`] when a row's id is missing or not a string or
/// number, and [`TreeError::DuplicateId`] under
/// [`DuplicatePolicy::Reject`].
pub fn build_tree(rows: &[Row], options: TreeOptions<'_>) -> TreeResult<Forest> {
    TreeBuilder::new(options).build(rows)
}

/// Like [`build_tree`], for untyped input.
///
/// # Errors
///
/// Additionally fails with [`TreeError::NotASequence`] when `data` is not an
/// array and [`TreeError::NotARow`] when an element is not an object.
#[instrument(level = "debug", skip_all)]
pub fn build_tree_from_value(data: &Value, options: TreeOptions<'_>) -> TreeResult<Forest> {
    let items = match data {
        Value::Array(items) => items,
        other => {
            return Err(TreeError::NotASequence {
                got: type_name(Some(other)),
            })
        }
    };
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = TreeBuilder::new(options);
    for (position, item) in items.iter().enumerate() {
        let row = as_row(item).ok_or_else(|| TreeError::NotARow {
            index: position,
            got: type_name(Some(item)),
        })?;
        builder.push_row(position, row)?;
    }
    Ok(builder.finish())
}
