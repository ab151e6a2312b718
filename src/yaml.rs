//! YAML-backed configuration
//!
//! [`YamlConfig`] owns a parsed tree and offers dot-notation lookup plus a
//! serde projection hook. It deliberately does not auto-populate anything:
//! a user-supplied projection turns subtrees into concrete typed structs,
//! including lists of records.

use crate::error::{ConfigError, ConfigResult};
use crate::render;
use crate::secret::mask_if_secret;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value as Yaml};
use std::fmt;
use std::path::{Path, PathBuf};

/// A configuration instance backed by a parsed YAML document
pub struct YamlConfig {
    path: PathBuf,
    tree: Yaml,
}

impl YamlConfig {
    /// Read and parse a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| {
            ConfigError::FileNotFound {
                path: path.clone(),
                source,
            }
        })?;
        let tree: Yaml = serde_yaml::from_str(&content)?;
        Ok(Self { path, tree })
    }

    /// Load a file and immediately run a projection over it
    ///
    /// The projection is the one place tree data becomes typed attributes;
    /// it runs exactly once, after the tree is available.
    pub fn load_projected<T, F>(path: impl AsRef<Path>, project: F) -> ConfigResult<T>
    where
        F: FnOnce(&YamlConfig) -> ConfigResult<T>,
    {
        let config = Self::load(path)?;
        config.project(project)
    }

    /// Run a user projection over the parsed tree
    pub fn project<T, F>(&self, project: F) -> ConfigResult<T>
    where
        F: FnOnce(&YamlConfig) -> ConfigResult<T>,
    {
        project(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw parsed tree
    pub fn tree(&self) -> &Yaml {
        &self.tree
    }

    /// Dot-notation lookup: descend through mapping keys
    ///
    /// Returns `None` when any intermediate node is not a mapping or a key
    /// is absent; never panics. Supply defaults with `unwrap_or`.
    pub fn get(&self, dotted: &str) -> Option<&Yaml> {
        let mut node = &self.tree;
        for part in dotted.split('.') {
            node = node.get(part)?;
        }
        Some(node)
    }

    pub fn get_str(&self, dotted: &str) -> Option<&str> {
        self.get(dotted)?.as_str()
    }

    pub fn get_i64(&self, dotted: &str) -> Option<i64> {
        self.get(dotted)?.as_i64()
    }

    pub fn get_f64(&self, dotted: &str) -> Option<f64> {
        self.get(dotted)?.as_f64()
    }

    pub fn get_bool(&self, dotted: &str) -> Option<bool> {
        self.get(dotted)?.as_bool()
    }

    /// Deserialize the subtree at `dotted` into a typed value
    ///
    /// Fails with [`ConfigError::MissingRequired`] when the path is absent
    /// and with a parse error when the subtree does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, dotted: &str) -> ConfigResult<T> {
        let node = self.get(dotted).ok_or_else(|| ConfigError::MissingRequired {
            key: dotted.to_string(),
        })?;
        Ok(serde_yaml::from_value(node.clone())?)
    }

    /// Whether the dotted path resolves; same traversal as [`get`],
    /// never fails
    ///
    /// [`get`]: YamlConfig::get
    pub fn has(&self, dotted: &str) -> bool {
        self.get(dotted).is_some()
    }

    /// Root mapping clone; empty when the document root is not a mapping
    pub fn to_mapping(&self) -> Mapping {
        self.tree.as_mapping().cloned().unwrap_or_default()
    }

    /// Flat, secret-masked rendering of the top-level entries in document
    /// order, titled after the file stem
    pub fn render(&self) -> String {
        let title = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "config".to_string());

        let mut lines = vec![format!("Config Path: {}", self.path.display())];
        if let Some(mapping) = self.tree.as_mapping() {
            for (key, value) in mapping {
                let key = key.as_str().unwrap_or("?");
                lines.push(format!(
                    "{} = {}",
                    key,
                    mask_if_secret(key, &summarize(value))
                ));
            }
        }
        render::frame(&title, &lines)
    }
}

/// One-line display form for a tree node: scalars print, containers show
/// their size only
fn summarize(value: &Yaml) -> String {
    match value {
        Yaml::Null => "none".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => s.clone(),
        Yaml::Sequence(seq) => format!("[{} items]", seq.len()),
        Yaml::Mapping(map) => format!("{{{} keys}}", map.len()),
        Yaml::Tagged(tagged) => summarize(&tagged.value),
    }
}

impl fmt::Display for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Debug for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
