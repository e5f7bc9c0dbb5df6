//! Cartesian products of value lists.

use std::fmt;
use std::slice;

use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::Row;

/// Post-processing hook applied to every named combination.
pub type RowConverter<'a> = Box<dyn FnMut(Row) -> Row + 'a>;

/// Options for [`cartesian_from_mapping`].
#[derive(Default)]
pub struct CartesianOptions<'a> {
    /// Keep only these fields; empty keeps all.
    pub include: Vec<String>,
    /// Drop these fields; empty drops none.
    pub exclude: Vec<String>,
    pub convert: Option<RowConverter<'a>>,
}

impl fmt::Debug for CartesianOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartesianOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("convert", &self.convert.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<'a> CartesianOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn convert<F>(mut self, convert: F) -> Self
    where
        F: FnMut(Row) -> Row + 'a,
    {
        self.convert = Some(Box::new(convert));
        self
    }

    /// Both lists must let `key` through.
    pub fn matches(&self, key: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|k| k == key);
        let excluded = !self.exclude.is_empty() && self.exclude.iter().any(|k| k == key);
        included && !excluded
    }
}

/// Every combination taking one element from each list, last list fastest.
///
/// Empty `lists` gives no combinations, and so does any empty inner list.
pub fn cartesian_from_lists<T, L>(lists: &[L]) -> Vec<Vec<T>>
where
    T: Clone,
    L: AsRef<[T]>,
{
    cartesian_from_lists_with(lists, |combination| combination)
}

/// Like [`cartesian_from_lists`], mapping each combination through `customizer`.
///
/// Recursion depth equals `lists.len()`.
pub fn cartesian_from_lists_with<T, L, R, F>(lists: &[L], mut customizer: F) -> Vec<R>
where
    T: Clone,
    L: AsRef<[T]>,
    F: FnMut(Vec<T>) -> R,
{
    let mut results = Vec::new();
    if lists.is_empty() {
        return results;
    }
    let mut prefix = Vec::with_capacity(lists.len());
    descend(lists, 0, &mut prefix, &mut customizer, &mut results);
    results
}

fn descend<T, L, R, F>(
    lists: &[L],
    depth: usize,
    prefix: &mut Vec<T>,
    customizer: &mut F,
    results: &mut Vec<R>,
) where
    T: Clone,
    L: AsRef<[T]>,
    F: FnMut(Vec<T>) -> R,
{
    let last = depth == lists.len() - 1;
    for value in lists[depth].as_ref() {
        prefix.push(value.clone());
        if last {
            results.push(customizer(prefix.clone()));
        } else {
            descend(lists, depth + 1, prefix, customizer, results);
        }
        prefix.pop();
    }
}

/// Cartesian product of a field -> candidates mapping, as named rows.
///
/// Fields keep the mapping's order. A field whose value is not an array
/// counts as a single candidate.
///
/// ```
/// use serde_json::json;
/// use treekit::cartesian::{cartesian_from_mapping, CartesianOptions};
///
/// let data = json!({"color": ["red", "blue"], "size": ["22#"]});
/// let rows = cartesian_from_mapping(data.as_object().unwrap(), CartesianOptions::new());
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0]["color"], json!("red"));
/// assert_eq!(rows[1]["size"], json!("22#"));
/// ```
#[instrument(level = "debug", skip_all, fields(fields = mapping.len()))]
pub fn cartesian_from_mapping(mapping: &Row, options: CartesianOptions<'_>) -> Vec<Row> {
    let (keys, values): (Vec<&String>, Vec<&[Value]>) = mapping
        .iter()
        .filter(|(key, _)| options.matches(key))
        .map(|(key, value)| match value {
            Value::Array(items) => (key, items.as_slice()),
            other => (key, slice::from_ref(other)),
        })
        .unzip();
    debug!(?keys, "fields kept");

    let mut convert = options.convert;
    cartesian_from_lists_with(&values, |combination| {
        let row: Row = keys
            .iter()
            .map(|key| (*key).clone())
            .zip_eq(combination)
            .collect();
        match convert.as_mut() {
            Some(convert) => convert(row),
            None => row,
        }
    })
}
