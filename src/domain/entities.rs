//! Domain entities: identifiers, rows and nodes

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Default field holding a row's identifier.
pub const DEFAULT_ID_KEY: &str = "id";
/// Default field holding a row's parent identifier.
pub const DEFAULT_PARENT_KEY: &str = "parentId";
/// Field under which children are nested.
pub const CHILDREN_KEY: &str = "children";

/// A flat record: field name -> value.
pub type Row = Map<String, Value>;

/// Ordered sequence of root nodes.
pub type Forest = Vec<Node>;

/// Node identifier.
///
/// Strings and numbers are distinct keys: `"1"` does not match `1`.
/// Whole-number floats are stored as integers, so `1.0` matches `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "RawIdKey")]
pub enum IdKey {
    Str(String),
    Num(Number),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdKey {
    Str(String),
    Num(Number),
}

impl From<RawIdKey> for IdKey {
    fn from(raw: RawIdKey) -> Self {
        match raw {
            RawIdKey::Str(s) => IdKey::Str(s),
            RawIdKey::Num(n) => IdKey::Num(integral(&n)),
        }
    }
}

/// `n` as an integer when it is a float without fractional part that fits
/// in `u64` or `i64`.
fn integral(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 => {
            if (0.0..18_446_744_073_709_551_616.0).contains(&f) {
                Number::from(f as u64)
            } else if (-9_223_372_036_854_775_808.0..0.0).contains(&f) {
                Number::from(f as i64)
            } else {
                n.clone()
            }
        }
        _ => n.clone(),
    }
}

impl IdKey {
    /// Reads an identifier out of a JSON value; only strings and numbers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(IdKey::Str(s.clone())),
            Value::Number(n) => Some(IdKey::Num(integral(n))),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            IdKey::Str(s) => Value::String(s.clone()),
            IdKey::Num(n) => Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKey::Str(s) => write!(f, "{:?}", s),
            IdKey::Num(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for IdKey {
    fn from(value: &str) -> Self {
        IdKey::Str(value.to_string())
    }
}

impl From<String> for IdKey {
    fn from(value: String) -> Self {
        IdKey::Str(value)
    }
}

impl From<i64> for IdKey {
    fn from(value: i64) -> Self {
        IdKey::Num(Number::from(value))
    }
}

impl From<u64> for IdKey {
    fn from(value: u64) -> Self {
        IdKey::Num(Number::from(value))
    }
}

impl From<i32> for IdKey {
    fn from(value: i32) -> Self {
        IdKey::Num(Number::from(value))
    }
}

/// Where a row attaches: the implicit root, or an explicit parent id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Root,
    Explicit(IdKey),
}

impl ParentRef {
    /// Value written back into the node's parent field.
    pub fn to_value(&self) -> Value {
        match self {
            ParentRef::Root => Value::Null,
            ParentRef::Explicit(id) => id.to_value(),
        }
    }
}

impl From<IdKey> for ParentRef {
    fn from(id: IdKey) -> Self {
        ParentRef::Explicit(id)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => write!(f, "<root>"),
            ParentRef::Explicit(id) => write!(f, "{}", id),
        }
    }
}

/// A row with its nested children.
///
/// Serializes as the row object plus a `children` array, which is left out
/// for leaves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub data: Row,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(data: Row) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Identifier stored under `id_key`, if it is a string or number.
    pub fn id(&self, id_key: &str) -> Option<IdKey> {
        self.data.get(id_key).and_then(IdKey::from_value)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels from this node down to its deepest leaf, inclusive.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Identifiers of all leaves below (or at) this node, left to right.
    pub fn leaf_ids(&self, id_key: &str) -> Vec<IdKey> {
        let mut leaves = Vec::new();
        self.collect_leaves(id_key, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, id_key: &str, leaves: &mut Vec<IdKey>) {
        if self.children.is_empty() {
            if let Some(id) = self.id(id_key) {
                leaves.push(id);
            }
        } else {
            for child in &self.children {
                child.collect_leaves(id_key, leaves);
            }
        }
    }

    pub fn into_value(self) -> Value {
        let mut map = self.data;
        if !self.children.is_empty() {
            let children = self.children.into_iter().map(Node::into_value).collect();
            map.insert(CHILDREN_KEY.to_string(), Value::Array(children));
        }
        Value::Object(map)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.into_value()
    }
}
