//! Node trait and context types.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;

/// Result of node execution.
#[derive(Debug, Clone)]
pub struct NodeResult {
    /// Output data from the node
    pub data: Value,
    /// Metadata (operation, counts, debug info)
    pub metadata: Value,
}

impl NodeResult {
    /// Create a new result with just data.
    pub fn new(data: Value) -> Self {
        Self {
            data,
            metadata: serde_json::json!({}),
        }
    }

    /// Create a result with data and metadata.
    pub fn with_metadata(data: Value, metadata: Value) -> Self {
        Self { data, metadata }
    }

    /// Create an empty result.
    pub fn empty() -> Self {
        Self::new(Value::Null)
    }
}

/// Context passed to a node during execution.
#[derive(Debug, Clone)]
pub struct NodeContext {
    /// Input data (from the upstream producer)
    pub input: Value,

    /// Outputs of earlier nodes, keyed by node ID
    pub node_outputs: HashMap<String, Value>,

    /// Execution ID
    pub execution_id: String,
}

impl NodeContext {
    /// Create a new context.
    pub fn new(execution_id: &str) -> Self {
        Self {
            input: Value::Null,
            node_outputs: HashMap::new(),
            execution_id: execution_id.to_string(),
        }
    }

    /// Set the input data.
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = input;
        self
    }

    /// Add a node output.
    pub fn add_output(&mut self, node_id: &str, output: Value) {
        self.node_outputs.insert(node_id.to_string(), output);
    }

    /// Get a previous node's output.
    pub fn get_output(&self, node_id: &str) -> Option<&Value> {
        self.node_outputs.get(node_id)
    }
}

/// Trait that all node types must implement.
#[async_trait]
pub trait Node: Send + Sync {
    /// Get the node type name (e.g., "select_list", "dictionary").
    fn node_type(&self) -> &str;

    /// Execute the node with the given configuration and context.
    ///
    /// # Arguments
    /// * `config` - Node-specific configuration
    /// * `ctx` - Execution context with input data and previous outputs
    ///
    /// # Returns
    /// The node's output data wrapped in NodeResult
    async fn execute(&self, config: &Value, ctx: &NodeContext) -> Result<NodeResult>;

    /// Get a description of this node type.
    fn description(&self) -> &str {
        "A workflow node"
    }
}
