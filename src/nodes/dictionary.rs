//! Dictionary node - build an object from parallel key and value lists.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::types::{Node, NodeContext, NodeResult};
use crate::display::display_string;
use crate::error::{Error, Result};

/// Dictionary node implementation.
pub struct DictionaryNode;

impl DictionaryNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DictionaryNode {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DictionaryConfig {
    /// Inline key list
    #[serde(default)]
    keys: Option<Value>,

    /// Field path in input containing the keys
    #[serde(default)]
    keys_field: Option<String>,

    /// Inline value list
    #[serde(default)]
    values: Option<Value>,

    /// Field path in input containing the values
    #[serde(default)]
    values_field: Option<String>,
}

#[async_trait]
impl Node for DictionaryNode {
    fn node_type(&self) -> &str {
        "dictionary"
    }

    fn description(&self) -> &str {
        "Build an object by pairing keys and values positionally"
    }

    async fn execute(&self, config: &Value, ctx: &NodeContext) -> Result<NodeResult> {
        let config: DictionaryConfig = serde_json::from_value(config.clone())
            .map_err(|e| Error::Node(format!("Invalid dictionary config: {}", e)))?;

        let keys = resolve_list(&config.keys, &config.keys_field, "keys", ctx);
        let values = resolve_list(&config.values, &config.values_field, "values", ctx);

        let dict = build_dict(&keys, &values);

        Ok(NodeResult::with_metadata(
            Value::Object(dict.clone()),
            json!({
                "pairs": dict.len(),
                "keys_count": keys.len(),
                "values_count": values.len(),
            }),
        ))
    }
}

/// Pair keys with values by position.
///
/// Every key is converted to its display string. Trailing keys with no
/// value map to null; trailing values with no key are dropped. A key whose
/// display form is empty is skipped unless it is the only key supplied and
/// a value exists for it. Duplicate keys keep the position of their first
/// occurrence and the value of their last.
pub fn build_dict(keys: &[Value], values: &[Value]) -> Map<String, Value> {
    let mut out = Map::new();
    let single_key = keys.len() == 1;

    for (index, key) in keys.iter().enumerate() {
        let name = display_string(key);
        if name.is_empty() && !(single_key && index < values.len()) {
            continue;
        }
        out.insert(name, values.get(index).cloned().unwrap_or(Value::Null));
    }

    out
}

/// Resolve a list from inline config, a dot-path into the input, or an
/// input field named after the parameter. Anything that is not an array
/// counts as empty.
fn resolve_list(
    inline: &Option<Value>,
    field: &Option<String>,
    default_field: &str,
    ctx: &NodeContext,
) -> Vec<Value> {
    let resolved = if let Some(value) = inline {
        value.clone()
    } else if let Some(path) = field {
        get_path_value(&ctx.input, path).unwrap_or(Value::Null)
    } else {
        get_path_value(&ctx.input, default_field).unwrap_or(Value::Null)
    };

    match resolved {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn get_path_value(root: &Value, path: &str) -> Option<Value> {
    let mut current = root;
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        match current {
            Value::Object(map) => current = map.get(segment)?,
            Value::Array(items) => {
                let index = segment.parse::<usize>().ok()?;
                current = items.get(index)?;
            }
            _ => return None,
        }
    }
    Some(current.clone())
}
