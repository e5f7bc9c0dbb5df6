use serde_json::Value;
use termtree::Tree;

use crate::domain::Node;

/// Renders nodes as an indented text tree, labelled by one field.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, label_key: &str) -> Tree<String>;
}

impl TreeNodeConvert for Node {
    fn to_tree_string(&self, label_key: &str) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_tree_string(label_key))
            .collect();

        Tree::new(label(self.get(label_key))).with_leaves(leaves)
    }
}

impl TreeNodeConvert for [Node] {
    fn to_tree_string(&self, label_key: &str) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty tree".to_string());
        }
        let leaves: Vec<_> = self.iter().map(|n| n.to_tree_string(label_key)).collect();
        Tree::new(".".to_string()).with_leaves(leaves)
    }
}

fn label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}
