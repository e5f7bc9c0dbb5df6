//! Row/tree conversion and Cartesian products over JSON-like data.
//!
//! - [`build_tree`] turns flat rows carrying an id and a parent id into a
//!   forest of [`Node`]s, in any input order.
//! - [`flatten_tree`] / [`flatten_tree_with`] walk a forest back into rows.
//! - [`each_tree`] visits nodes depth-first with skip/stop control.
//! - [`cartesian_from_lists`] / [`cartesian_from_mapping`] enumerate every
//!   combination of candidate values.
//!
//! ```
//! use serde_json::json;
//! use treekit::{build_tree_from_value, flatten_tree, TreeOptions};
//!
//! let rows = json!([
//!     {"id": 2, "parentId": 1, "name": "level 1-1"},
//!     {"id": 1, "parentId": null, "name": "level 1"}
//! ]);
//! let forest = build_tree_from_value(&rows, TreeOptions::new()).unwrap();
//! assert_eq!(forest[0].children[0].get("name"), Some(&json!("level 1-1")));
//! assert_eq!(flatten_tree(&forest).len(), 2);
//! ```

pub mod cartesian;
pub mod config;
pub mod domain;
pub mod errors;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use cartesian::{
    cartesian_from_lists, cartesian_from_lists_with, cartesian_from_mapping, CartesianOptions,
};
pub use config::{CartesianConfig, TreeConfig};
pub use domain::{
    build_tree, build_tree_from_value, DuplicatePolicy, Forest, IdKey, Node, ParentRef,
    RootSelector, Row, TreeBuilder, TreeIndex, TreeOptions,
};
pub use errors::{ConfigError, ErrorKind, TreeError, TreeResult};
pub use tree::{each_tree, flatten_tree, flatten_tree_with, TreeItem, Visit, Walk};
pub use tree_traits::TreeNodeConvert;
