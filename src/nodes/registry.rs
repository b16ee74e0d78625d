//! Node registry - manages available node types.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::types::{Node, NodeContext, NodeResult};
use super::{DictionaryNode, SelectFromListNode};
use crate::config::Config;
use crate::error::{Error, Result};

/// Registry of available node types.
///
/// Nodes are shared `Arc` instances, so a stateful node (select_list) keeps
/// its session state across every execution dispatched through the same
/// registry.
#[derive(Clone)]
pub struct NodeRegistry {
    nodes: HashMap<String, Arc<dyn Node>>,
}

impl NodeRegistry {
    /// Create a new registry with default nodes.
    pub fn new() -> Self {
        let mut registry = Self {
            nodes: HashMap::new(),
        };

        registry.register(Arc::new(SelectFromListNode::new()));
        registry.register(Arc::new(DictionaryNode::new()));

        registry
    }

    /// Create a registry honoring the configured disabled node types.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for node_type in &config.nodes.disabled {
            registry.nodes.remove(node_type);
        }
        registry
    }

    /// Create an empty registry (for testing).
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Register a node type.
    pub fn register(&mut self, node: Arc<dyn Node>) {
        self.nodes.insert(node.node_type().to_string(), node);
    }

    /// Get a node by type name.
    pub fn get(&self, node_type: &str) -> Option<Arc<dyn Node>> {
        self.nodes.get(node_type).cloned()
    }

    /// Check if a node type is registered.
    pub fn has(&self, node_type: &str) -> bool {
        self.nodes.contains_key(node_type)
    }

    /// Execute a node by type.
    pub async fn execute(
        &self,
        node_type: &str,
        config: &Value,
        ctx: &NodeContext,
    ) -> Result<NodeResult> {
        let node = self
            .get(node_type)
            .ok_or_else(|| Error::Node(format!("Unknown node type: {}", node_type)))?;

        node.execute(config, ctx).await
    }

    /// List all registered node types.
    pub fn list(&self) -> Vec<&str> {
        self.nodes.keys().map(|s| s.as_str()).collect()
    }

    /// Get descriptions of all registered nodes.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.nodes
            .iter()
            .map(|(name, node)| (name.as_str(), node.description()))
            .collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_default_nodes() {
        let registry = NodeRegistry::new();

        assert!(registry.has("select_list"));
        assert!(registry.has("dictionary"));
        assert!(!registry.has("nonexistent"));
    }

    #[test]
    fn test_registry_from_config_disables_nodes() {
        let mut config = Config::default();
        config.nodes.disabled = vec!["dictionary".to_string()];

        let registry = NodeRegistry::from_config(&config);
        assert!(registry.has("select_list"));
        assert!(!registry.has("dictionary"));
    }

    #[tokio::test]
    async fn test_registry_unknown_type_is_error() {
        let registry = NodeRegistry::new();
        let ctx = NodeContext::new("exec");

        let err = registry.execute("nope", &json!({}), &ctx).await.unwrap_err();
        assert_eq!(err.code(), "NODE_ERROR");
    }

    #[tokio::test]
    async fn test_registry_keeps_select_state_across_executions() {
        let registry = NodeRegistry::new();
        let ctx = NodeContext::new("exec");

        registry
            .execute("select_list", &json!({"items": ["a", "b"]}), &ctx)
            .await
            .unwrap();
        registry
            .execute(
                "select_list",
                &json!({"operation": "select", "value": "b"}),
                &ctx,
            )
            .await
            .unwrap();

        let result = registry
            .execute("select_list", &json!({"operation": "get"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.data["selected"], "b");
    }
}
