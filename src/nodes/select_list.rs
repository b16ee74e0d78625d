//! Select-from-list node - single stateful choice over a changing list.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::types::{Node, NodeContext, NodeResult};
use crate::error::{Error, Result};
use crate::selection::ListSelection;

/// Select-from-list node implementation.
///
/// The selection lives in the node instance, so a registry-held node acts
/// as one dropdown across every execution of its session: upstream list
/// replacements preserve the choice when possible and fall back to the
/// first element when not.
pub struct SelectFromListNode {
    state: Mutex<ListSelection>,
}

impl SelectFromListNode {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ListSelection::new()),
        }
    }
}

impl Default for SelectFromListNode {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum SelectOperation {
    /// Replace the option list, preserving the selection when possible
    #[default]
    SetList,
    /// Explicitly select one of the current options
    Select,
    /// Read the current selection without changing state
    Get,
}

#[derive(Debug, Deserialize)]
struct SelectConfig {
    /// Operation to perform
    #[serde(default)]
    operation: SelectOperation,

    /// Inline option list (for set_list)
    #[serde(default)]
    items: Option<Value>,

    /// Field path resolving to the list (for set_list). If neither this
    /// nor `items` is set, the node input is used.
    #[serde(default)]
    field: Option<String>,

    /// Value to select (for select)
    #[serde(default)]
    value: Option<String>,
}

#[async_trait]
impl Node for SelectFromListNode {
    fn node_type(&self) -> &str {
        "select_list"
    }

    fn description(&self) -> &str {
        "Keep a single selection consistent with a changing list"
    }

    async fn execute(&self, config: &Value, ctx: &NodeContext) -> Result<NodeResult> {
        let config: SelectConfig = serde_json::from_value(config.clone())
            .map_err(|e| Error::Node(format!("Invalid select_list config: {}", e)))?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::Node("select_list state lock poisoned".to_string()))?;

        match config.operation {
            SelectOperation::SetList => {
                let list = if let Some(items) = &config.items {
                    items.clone()
                } else if let Some(field) = &config.field {
                    resolve_field(field, ctx)
                } else {
                    ctx.input.clone()
                };

                let before = state.selected().to_string();
                state.set_list(&list);
                let preserved = !before.is_empty() && state.selected() == before;
                if !preserved && !before.is_empty() {
                    tracing::debug!(
                        previous = %before,
                        selected = %state.selected(),
                        "selection reset on list replacement"
                    );
                }

                Ok(NodeResult::with_metadata(
                    json!({
                        "selected": state.selected(),
                        "options": state.options(),
                    }),
                    json!({
                        "operation": "set_list",
                        "options_count": state.options().len(),
                        "preserved": preserved,
                    }),
                ))
            }
            SelectOperation::Select => {
                let value = config.value.ok_or_else(|| {
                    Error::Node("select operation requires 'value' field".to_string())
                })?;

                state.select(&value)?;

                Ok(NodeResult::with_metadata(
                    json!({
                        "selected": state.selected(),
                        "options": state.options(),
                    }),
                    json!({
                        "operation": "select",
                    }),
                ))
            }
            SelectOperation::Get => Ok(NodeResult::with_metadata(
                json!({
                    "selected": state.selected(),
                    "options": state.options(),
                }),
                json!({
                    "operation": "get",
                }),
            )),
        }
    }
}

fn resolve_field(field: &str, ctx: &NodeContext) -> Value {
    let expr = normalize_template(field.trim());

    if expr == "input" {
        return ctx.input.clone();
    }

    if let Some(path) = expr.strip_prefix("input.") {
        return get_path_value(&ctx.input, path).unwrap_or(Value::Null);
    }

    if let Some(rest) = expr.strip_prefix("nodes.") {
        if let Some((node_id, path)) = rest.split_once(".output") {
            let base = ctx
                .node_outputs
                .get(node_id)
                .cloned()
                .unwrap_or(Value::Null);
            let path = path.strip_prefix('.').unwrap_or(path);
            if path.is_empty() {
                return base;
            }
            return get_path_value(&base, path).unwrap_or(Value::Null);
        }
    }

    get_path_value(&ctx.input, expr).unwrap_or(Value::Null)
}

fn normalize_template(expr: &str) -> &str {
    let trimmed = expr.trim();
    if trimmed.starts_with("{{") && trimmed.ends_with("}}") {
        trimmed[2..trimmed.len() - 2].trim()
    } else {
        trimmed
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_list_from_input() {
        let node = SelectFromListNode::new();
        let config = json!({});
        let ctx = NodeContext::new("exec")
            .with_input(json!(["Option A", "Option B", "Option C"]));

        let result = node.execute(&config, &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "Option A");
        assert_eq!(result.metadata["options_count"], 3);
        assert_eq!(result.metadata["preserved"], false);
    }

    #[tokio::test]
    async fn test_selection_survives_list_replacement() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");

        let set = json!({"items": ["Option A", "Option B", "Option C"]});
        node.execute(&set, &ctx).await.unwrap();

        let pick = json!({"operation": "select", "value": "Option B"});
        node.execute(&pick, &ctx).await.unwrap();

        let update = json!({"items": ["Option A", "Option B", "Option D", "Option E"]});
        let result = node.execute(&update, &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "Option B");
        assert_eq!(result.metadata["preserved"], true);
    }

    #[tokio::test]
    async fn test_reselects_first_when_selection_disappears() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");

        node.execute(&json!({"items": ["Option A", "Option B", "Option C"]}), &ctx)
            .await
            .unwrap();
        node.execute(&json!({"operation": "select", "value": "Option B"}), &ctx)
            .await
            .unwrap();

        let result = node
            .execute(&json!({"items": ["Option X", "Option Y", "Option Z"]}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.data["selected"], "Option X");
        assert_eq!(result.metadata["preserved"], false);
    }

    #[tokio::test]
    async fn test_set_list_idempotent() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");
        let config = json!({"items": ["a", "b"]});

        node.execute(&config, &ctx).await.unwrap();
        node.execute(&json!({"operation": "select", "value": "b"}), &ctx)
            .await
            .unwrap();

        let result = node.execute(&config, &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "b");
        assert_eq!(result.metadata["preserved"], true);
    }

    #[tokio::test]
    async fn test_set_list_from_field_path() {
        let node = SelectFromListNode::new();
        let config = json!({"field": "input.choices"});
        let ctx = NodeContext::new("exec").with_input(json!({
            "choices": ["x", "y"]
        }));

        let result = node.execute(&config, &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "x");
        assert_eq!(result.data["options"], json!(["x", "y"]));
    }

    #[tokio::test]
    async fn test_set_list_from_upstream_node_output() {
        let node = SelectFromListNode::new();
        let config = json!({"field": "nodes.list-builder.output.items"});
        let mut ctx = NodeContext::new("exec");
        ctx.add_output("list-builder", json!({"items": [1, 2, 3]}));

        let result = node.execute(&config, &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "1");
        assert_eq!(result.data["options"], json!(["1", "2", "3"]));
    }

    #[tokio::test]
    async fn test_non_list_input_clears_selection() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");

        node.execute(&json!({"items": ["a", "b"]}), &ctx).await.unwrap();

        let result = node
            .execute(&json!({"items": {"not": "a list"}}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.data["selected"], "");
        assert_eq!(result.metadata["options_count"], 0);
    }

    #[tokio::test]
    async fn test_select_missing_value_is_error() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");

        node.execute(&json!({"items": ["a", "b"]}), &ctx).await.unwrap();

        let err = node
            .execute(&json!({"operation": "select", "value": "zzz"}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SELECTION_ERROR");

        // State unchanged after the failed select.
        let result = node.execute(&json!({"operation": "get"}), &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "a");
    }

    #[tokio::test]
    async fn test_select_requires_value_field() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec");

        let err = node
            .execute(&json!({"operation": "select"}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NODE_ERROR");
    }

    #[tokio::test]
    async fn test_get_does_not_touch_state() {
        let node = SelectFromListNode::new();
        let ctx = NodeContext::new("exec").with_input(json!(["ignored"]));

        let result = node.execute(&json!({"operation": "get"}), &ctx).await.unwrap();
        assert_eq!(result.data["selected"], "");
        assert_eq!(result.data["options"], json!([]));
    }

    #[test]
    fn test_normalize_template() {
        assert_eq!(normalize_template("{{ input.items }}"), "input.items");
        assert_eq!(normalize_template("input.items"), "input.items");
    }
}
