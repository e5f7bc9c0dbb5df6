//! Tests for Cartesian products

use rstest::rstest;
use serde_json::{json, Value};

use treekit::{cartesian_from_lists, cartesian_from_mapping, CartesianConfig, CartesianOptions, Row};

fn mapping() -> Row {
    serde_json::from_value(json!({"color": ["red", "blue"], "size": ["22#"]})).unwrap()
}

fn to_value(rows: Vec<Row>) -> Value {
    Value::Array(rows.into_iter().map(Value::Object).collect())
}

#[test]
fn given_mapping_when_expanding_then_every_combination_is_named() {
    let rows = cartesian_from_mapping(&mapping(), CartesianOptions::new());

    assert_eq!(
        to_value(rows),
        json!([
            {"color": "red", "size": "22#"},
            {"color": "blue", "size": "22#"}
        ])
    );
}

#[rstest]
#[case(CartesianOptions::new().include(["color"]))]
#[case(CartesianOptions::new().exclude(["size"]))]
#[case(CartesianOptions::new().include(["color", "size"]).exclude(["size"]))]
fn given_field_filter_when_expanding_then_only_kept_fields_remain(
    #[case] options: CartesianOptions<'static>,
) {
    let rows = cartesian_from_mapping(&mapping(), options);

    assert_eq!(to_value(rows), json!([{"color": "red"}, {"color": "blue"}]));
}

#[test]
fn given_convert_when_expanding_then_rows_are_post_processed() {
    let options = CartesianOptions::new()
        .include(["color"])
        .convert(|mut row| {
            row.insert("__convert__".to_string(), json!(true));
            row
        });

    let rows = cartesian_from_mapping(&mapping(), options);

    assert_eq!(
        to_value(rows),
        json!([
            {"color": "red", "__convert__": true},
            {"color": "blue", "__convert__": true}
        ])
    );
}

#[test]
fn given_mapping_when_expanding_then_field_order_is_kept() {
    let data: Row =
        serde_json::from_value(json!({"size": ["S", "M"], "color": ["red"], "fit": ["slim"]}))
            .unwrap();

    let rows = cartesian_from_mapping(&data, CartesianOptions::new());

    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["size", "color", "fit"]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn given_scalar_field_when_expanding_then_treated_as_single_candidate() {
    let data: Row =
        serde_json::from_value(json!({"color": ["red", "blue"], "brand": "acme"})).unwrap();

    let rows = cartesian_from_mapping(&data, CartesianOptions::new());

    assert_eq!(
        to_value(rows),
        json!([
            {"color": "red", "brand": "acme"},
            {"color": "blue", "brand": "acme"}
        ])
    );
}

#[rstest]
#[case(json!({}))]
#[case(json!({"color": []}))]
#[case(json!({"color": ["red"], "size": []}))]
fn given_no_candidates_when_expanding_then_empty(#[case] data: Value) {
    let data: Row = serde_json::from_value(data).unwrap();

    assert!(cartesian_from_mapping(&data, CartesianOptions::new()).is_empty());
}

#[test]
fn given_every_field_excluded_when_expanding_then_empty() {
    let rows = cartesian_from_mapping(
        &mapping(),
        CartesianOptions::new().exclude(["color", "size"]),
    );

    assert!(rows.is_empty());
}

#[test]
fn given_config_filters_when_expanding_then_applied() {
    let config = CartesianConfig::from_toml_str(r#"exclude = ["size"]"#).unwrap();

    let rows = cartesian_from_mapping(&mapping(), config.to_options());

    assert_eq!(to_value(rows), json!([{"color": "red"}, {"color": "blue"}]));
}

#[test]
fn given_three_lists_when_expanding_then_last_varies_fastest() {
    let lists = [vec![1, 2], vec![3], vec![4, 5]];

    let combinations = cartesian_from_lists(&lists);

    assert_eq!(
        combinations,
        vec![vec![1, 3, 4], vec![1, 3, 5], vec![2, 3, 4], vec![2, 3, 5]]
    );
}

#[test]
fn given_slices_when_expanding_then_accepted() {
    let left: &[&str] = &["a", "b"];
    let right: &[&str] = &["c"];

    let combinations = cartesian_from_lists(&[left, right]);

    assert_eq!(combinations, vec![vec!["a", "c"], vec!["b", "c"]]);
}
