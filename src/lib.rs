//! repick - reactive parameter-selection nodes for workflow automation
//!
//! repick packages the parameter behavior of a dropdown-style workflow
//! node: a list input whose elements can be any JSON value, a single
//! string selection derived from it, and update rules that keep the two
//! consistent as upstream data changes. It also ships the dictionary node
//! that shares the same "two parallel lists, positional pairing" shape.
//!
//! ## Example
//!
//! ```
//! use repick::ListSelection;
//! use serde_json::json;
//!
//! let mut state = ListSelection::new();
//! state.set_list(&json!(["Option A", "Option B", "Option C"]));
//! state.select("Option B").unwrap();
//!
//! // Upstream replaced the list; "Option B" is still present, so the
//! // selection survives.
//! state.set_list(&json!(["Option A", "Option B", "Option D", "Option E"]));
//! assert_eq!(state.selected(), "Option B");
//!
//! // Now it is gone; the first element wins.
//! state.set_list(&json!(["Option X", "Option Y", "Option Z"]));
//! assert_eq!(state.selected(), "Option X");
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod nodes;
pub mod selection;
pub mod telemetry;

pub use display::display_string;
pub use error::{Error, Result, SelectionError};
pub use nodes::{build_dict, Node, NodeContext, NodeRegistry, NodeResult};
pub use selection::ListSelection;
