//! Tests for tree flattening and traversal

use serde_json::{json, Value};

use treekit::util::omit;
use treekit::{
    build_tree, each_tree, flatten_tree, flatten_tree_with, Row, TreeOptions, Walk,
};

fn level_rows() -> Value {
    json!([
        {"id": 1, "parentId": null, "name": "level 1"},
        {"id": 2, "parentId": 1, "name": "level 1-1"},
        {"id": 3, "parentId": 1, "name": "level 1-2"}
    ])
}

fn level_tree() -> Value {
    json!([
        {
            "id": 1,
            "parentId": null,
            "name": "level 1",
            "children": [
                {"id": 2, "parentId": 1, "name": "level 1-1"},
                {"id": 3, "parentId": 1, "name": "level 1-2"}
            ]
        }
    ])
}

fn as_forest(value: &Value) -> &[Value] {
    value.as_array().expect("forest fixture")
}

// ============================================================
// Flattening
// ============================================================

#[test]
fn given_tree_when_flattening_then_returns_rows_in_pre_order() {
    let tree = level_tree();

    let flat = flatten_tree(as_forest(&tree));

    assert_eq!(Value::Array(flat), level_rows());
}

#[test]
fn given_built_forest_when_flattening_then_round_trips_to_rows() {
    let rows: Vec<Row> = serde_json::from_value(level_rows()).unwrap();
    let forest = build_tree(&rows, TreeOptions::new()).unwrap();

    let flat = flatten_tree(&forest);

    assert_eq!(flat, rows);
}

#[test]
fn given_custom_children_key_when_flattening_then_follows_that_key() {
    let tree = json!([
        {"label": "Zhang", "value": 1, "items": [{"label": "Li", "value": 2}]}
    ]);

    let flat = flatten_tree_with(as_forest(&tree), "items", |visit| visit.node);

    assert_eq!(
        Value::Array(flat),
        json!([{"label": "Zhang", "value": 1}, {"label": "Li", "value": 2}])
    );
}

#[test]
fn given_projector_when_flattening_then_collects_projected_values() {
    let tree = json!([
        {"label": "Zhang", "value": 1, "children": [{"label": "Li", "value": 2}]}
    ]);

    let flat = flatten_tree_with(as_forest(&tree), "children", |visit| {
        visit.node["value"].clone()
    });

    assert_eq!(flat, vec![json!(1), json!(2)]);
}

#[test]
fn given_projector_when_flattening_then_sees_position_and_parent() {
    let tree = level_tree();

    let flat = flatten_tree_with(as_forest(&tree), "children", |visit| {
        (
            visit.index,
            visit.siblings.len(),
            visit.parent.map(|p| p["id"].clone()),
            visit.original.get("children").is_some(),
        )
    });

    assert_eq!(
        flat,
        vec![
            (0, 1, None, true),
            (0, 2, Some(json!(1)), false),
            (1, 2, Some(json!(1)), false),
        ]
    );
}

#[test]
fn given_leaf_with_scalar_children_field_when_flattening_then_treated_as_leaf() {
    let tree = json!([{"id": 1, "children": null}, "loose"]);

    let flat = flatten_tree(as_forest(&tree));

    assert_eq!(flat, vec![json!({"id": 1}), json!("loose")]);
}

#[test]
fn given_empty_forest_when_flattening_then_empty() {
    let empty: Vec<Value> = Vec::new();
    assert!(flatten_tree(&empty).is_empty());
}

// ============================================================
// each_tree
// ============================================================

#[test]
fn given_callback_returning_stop_when_walking_then_traversal_ends() {
    let tree = level_tree();
    let mut visited = Vec::new();

    each_tree(as_forest(&tree), "children", |visit| {
        assert!(visit.node.get("children").is_none());
        visited.push(visit.node["id"].clone());
        Walk::Stop
    });

    assert_eq!(visited, vec![json!(1)]);
}

#[test]
fn given_stop_deep_in_first_root_when_walking_then_later_roots_are_not_visited() {
    let tree = json!([
        {"id": 1, "children": [{"id": 11}, {"id": 12}]},
        {"id": 2}
    ]);
    let mut visited = Vec::new();

    each_tree(as_forest(&tree), "children", |visit| {
        let id = visit.node["id"].clone();
        visited.push(id.clone());
        if id == json!(11) {
            Walk::Stop
        } else {
            Walk::Continue
        }
    });

    assert_eq!(visited, vec![json!(1), json!(11)]);
}

#[test]
fn given_callback_returning_skip_when_walking_then_children_are_skipped() {
    let tree = level_tree();
    let mut visited = Vec::new();

    each_tree(as_forest(&tree), "children", |visit| {
        if visit.node["parentId"] != Value::Null {
            return Walk::Skip;
        }
        visited.push(visit.node);
        Walk::Continue
    });

    let root = tree[0].as_object().unwrap();
    assert_eq!(visited, vec![Value::Object(omit(root, "children"))]);
}

#[test]
fn given_skip_on_first_root_when_walking_then_siblings_are_still_visited() {
    let tree = json!([
        {"id": 1, "children": [{"id": 11}]},
        {"id": 2, "children": [{"id": 21}]}
    ]);
    let mut visited = Vec::new();

    each_tree(as_forest(&tree), "children", |visit| {
        let id = visit.node["id"].clone();
        visited.push(id.clone());
        if id == json!(1) {
            Walk::Skip
        } else {
            Walk::Continue
        }
    });

    assert_eq!(visited, vec![json!(1), json!(2), json!(21)]);
}

#[test]
fn given_built_forest_when_walking_then_visits_rows_with_depth() {
    let rows: Vec<Row> = serde_json::from_value(level_rows()).unwrap();
    let forest = build_tree(&rows, TreeOptions::new()).unwrap();
    let mut visited = Vec::new();

    each_tree(&forest, "children", |visit| {
        visited.push((visit.node["name"].clone(), visit.depth));
        Walk::Continue
    });

    assert_eq!(
        visited,
        vec![
            (json!("level 1"), 0),
            (json!("level 1-1"), 1),
            (json!("level 1-2"), 1),
        ]
    );
}
