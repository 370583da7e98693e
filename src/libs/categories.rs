//! Category taxonomy: what counts as "Work", "Games", and so on.
//!
//! Categories are defined by a hierarchical JSON document mapping category
//! names to either a regex string (matched against window/app titles by the
//! tracking server) or a nested object of sub-categories. Inside a nested
//! object the special key `"$re"` holds the regex for the parent level
//! itself; a parent without `"$re"` becomes a catch-all bucket with no
//! filter of its own.
//!
//! ```json
//! {
//!   "Work": "Programming|nvim|Code",
//!   "Media": {
//!     "Social Media": "Twitter|reddit",
//!     "Games": "Minecraft|Steam"
//!   }
//! }
//! ```
//!
//! The document path is taken from the `NAG_CATEGORIES` environment
//! variable; when unset or pointing at a missing file, a built-in default
//! taxonomy is used. An unparseable document is a startup error: every
//! downstream matching decision depends on it, so degrading silently is
//! worse than refusing to start.

use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug, msg_info};
use anyhow::Result;
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable naming the category document path.
pub const CATEGORIES_ENV: &str = "NAG_CATEGORIES";

/// Key carrying the parent level's own regex inside a nested object.
const PARENT_RULE_KEY: &str = "$re";

/// Separator between levels in a flattened category label.
pub const PATH_SEPARATOR: &str = ">";

/// How events are matched into a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Match window/app titles against a regex.
    Regex { pattern: String, ignore_case: bool },
    /// Catch-all bucket with no further filtering.
    None,
}

/// One flattened category: a hierarchical path plus its matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub path: Vec<String>,
    pub rule: Rule,
}

impl Category {
    pub fn regex(path: &[&str], pattern: &str) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            rule: Rule::Regex {
                pattern: pattern.to_string(),
                ignore_case: true,
            },
        }
    }

    pub fn bucket(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            rule: Rule::None,
        }
    }

    /// The full `">"`-joined label, matching the `$category` key the
    /// tracking server reports back.
    pub fn label(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }
}

/// Loads the taxonomy from `NAG_CATEGORIES`, falling back to the built-in
/// defaults when the variable is unset or the file does not exist.
pub fn load() -> Result<Vec<Category>> {
    if let Ok(path) = env::var(CATEGORIES_ENV) {
        if Path::new(&path).exists() {
            let doc = match fs::read_to_string(&path) {
                Ok(doc) => doc,
                Err(e) => msg_bail_anyhow!(Message::CategoriesReadFailed(path, e.to_string())),
            };
            let categories = match from_str(&doc) {
                Ok(categories) => categories,
                Err(e) => msg_bail_anyhow!(Message::CategoriesParseFailed(path, e.to_string())),
            };
            msg_info!(Message::CategoriesLoaded(path, categories.len()));
            return Ok(categories);
        }
        msg_debug!(format!("{} points at a missing file: {}", CATEGORIES_ENV, path));
    }

    let categories = default_taxonomy();
    msg_info!(Message::CategoriesDefault(categories.len()));
    Ok(categories)
}

/// Parses a hierarchical category document into flat `(path, rule)` pairs.
pub fn from_str(doc: &str) -> Result<Vec<Category>> {
    let root: Value = serde_json::from_str(doc)?;
    let Value::Object(map) = root else {
        msg_bail_anyhow!(Message::CategoriesInvalidNode("<root>".to_string()));
    };

    let mut categories = Vec::new();
    parse_node(&[], &map, &mut categories)?;
    Ok(categories)
}

/// Recursive descent over one nesting level.
///
/// Each regex-valued key becomes a leaf category; each object-valued key
/// becomes a parent category (rule from `"$re"`, or catch-all) followed by
/// its children.
fn parse_node(prefix: &[String], map: &Map<String, Value>, out: &mut Vec<Category>) -> Result<()> {
    for (name, value) in map {
        if name == PARENT_RULE_KEY {
            continue;
        }

        let mut path = prefix.to_vec();
        path.push(name.clone());

        match value {
            Value::String(pattern) => out.push(Category {
                path,
                rule: Rule::Regex {
                    pattern: pattern.clone(),
                    ignore_case: true,
                },
            }),
            Value::Object(children) => {
                let rule = match children.get(PARENT_RULE_KEY) {
                    Some(Value::String(pattern)) => Rule::Regex {
                        pattern: pattern.clone(),
                        ignore_case: true,
                    },
                    Some(_) => msg_bail_anyhow!(Message::CategoriesInvalidNode(path.join(PATH_SEPARATOR))),
                    None => Rule::None,
                };
                out.push(Category { path: path.clone(), rule });
                parse_node(&path, children, out)?;
            }
            _ => msg_bail_anyhow!(Message::CategoriesInvalidNode(path.join(PATH_SEPARATOR))),
        }
    }
    Ok(())
}

/// The hard-coded fallback taxonomy.
pub fn default_taxonomy() -> Vec<Category> {
    vec![
        Category::regex(&["Work"], r"Programming|nvim|Code|Roam|taxes"),
        Category::bucket(&["Media"]),
        Category::regex(&["Media", "Social Media"], r"Twitter|twitter\.com|Home / X|reddit"),
        Category::regex(&["Media", "Games"], r"Minecraft|Steam|Dolphin"),
    ]
}
