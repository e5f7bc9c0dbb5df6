//! Option sets loadable from TOML
//!
//! Only the data-shaped parts of the options live here; hooks such as
//! converters and custom root selectors are attached in code afterwards:
//!
//! ```
//! use treekit::config::TreeConfig;
//!
//! let config = TreeConfig::from_toml_str(r#"
//!     idKey = "key"
//!     parentKey = "parent"
//!     rootValue = 0
//! "#).unwrap();
//! let options = config.to_options().converter(Some);
//! assert_eq!(options.id_key, "key");
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cartesian::CartesianOptions;
use crate::domain::{
    DuplicatePolicy, IdKey, RootSelector, TreeOptions, CHILDREN_KEY, DEFAULT_ID_KEY,
    DEFAULT_PARENT_KEY,
};
use crate::errors::{ConfigError, ConfigResult};

/// Row-to-tree and traversal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeConfig {
    /// Field holding the row id
    pub id_key: String,
    /// Field holding the parent id
    pub parent_key: String,
    /// Field holding nested children when flattening or walking raw values
    pub children_key: String,
    /// Parent value marking the roots; rows without a parent when unset
    pub root_value: Option<IdKey>,
    pub duplicates: DuplicatePolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            id_key: DEFAULT_ID_KEY.to_string(),
            parent_key: DEFAULT_PARENT_KEY.to_string(),
            children_key: CHILDREN_KEY.to_string(),
            root_value: None,
            duplicates: DuplicatePolicy::KeepFirst,
        }
    }
}

impl TreeConfig {
    #[instrument(level = "debug", skip(content))]
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        non_empty("idKey", &self.id_key)?;
        non_empty("parentKey", &self.parent_key)?;
        non_empty("childrenKey", &self.children_key)?;
        if self.id_key == self.parent_key {
            return Err(ConfigError::InvalidValue {
                key: "parentKey".to_string(),
                reason: format!("must differ from idKey '{}'", self.id_key),
            });
        }
        Ok(())
    }

    /// Build options carrying these settings and no hooks.
    pub fn to_options<'a>(&self) -> TreeOptions<'a> {
        TreeOptions {
            id_key: self.id_key.clone(),
            parent_key: self.parent_key.clone(),
            root: match &self.root_value {
                Some(value) => RootSelector::Value(value.clone()),
                None => RootSelector::Sentinel,
            },
            converter: None,
            duplicates: self.duplicates,
        }
    }
}

/// Field filters for Cartesian products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartesianConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl CartesianConfig {
    #[instrument(level = "debug", skip(content))]
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_options<'a>(&self) -> CartesianOptions<'a> {
        CartesianOptions::new()
            .include(self.include.iter().cloned())
            .exclude(self.exclude.iter().cloned())
    }
}

fn non_empty(key: &str, value: &str) -> ConfigResult<()> {
    if value.is_empty() {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        })
    } else {
        Ok(())
    }
}
