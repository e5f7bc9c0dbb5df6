//! Domain layer: rows, nodes and row-to-tree construction
//!
//! Pure in-memory transforms; no I/O and no config loading.

pub mod arena;
pub mod builder;
pub mod entities;

pub use arena::{ArenaNode, TreeIndex};
pub use builder::{
    build_tree, build_tree_from_value, Converter, DuplicatePolicy, RootFn, RootSelector,
    TreeBuilder, TreeOptions,
};
pub use entities::*;
