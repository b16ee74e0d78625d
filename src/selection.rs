//! Stateful list selection.
//!
//! A select-from-list parameter keeps a single selection consistent with a
//! list that upstream nodes replace wholesale on every change. The
//! selection survives an update when its value is still present in the new
//! list and falls back to the first element otherwise.

use serde_json::Value;

use crate::display::display_string;
use crate::error::SelectionError;

/// Selection state over a list parameter.
///
/// The list is held as display strings; the selection, when non-empty, is
/// always the display form of some current element. State lives in memory
/// only, for the lifetime of the owning node instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSelection {
    options: Vec<String>,
    selected: String,
}

impl ListSelection {
    /// Create an empty selection (no options, nothing selected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the option list and recompute the selection.
    ///
    /// Non-array input counts as an empty list rather than an error. An
    /// empty list clears the selection. Otherwise the previous selection is
    /// kept when it still names an option; if not, the first element wins.
    /// Calling this twice with the same list changes nothing.
    pub fn set_list(&mut self, list: &Value) {
        let items: &[Value] = match list {
            Value::Array(items) => items,
            _ => &[],
        };

        self.options = items.iter().map(display_string).collect();

        if self.options.is_empty() {
            self.selected.clear();
        } else if self.selected.is_empty() || !self.options.contains(&self.selected) {
            self.selected = self.options[0].clone();
        }
    }

    /// Explicitly select one of the current options.
    ///
    /// Fails with [`SelectionError::NotInList`] when `value` is not the
    /// display form of any current element; the selection is unchanged in
    /// that case.
    pub fn select(&mut self, value: &str) -> Result<(), SelectionError> {
        if self.options.iter().any(|option| option == value) {
            self.selected = value.to_string();
            Ok(())
        } else {
            Err(SelectionError::NotInList(value.to_string()))
        }
    }

    /// The current selection; empty string when nothing is selected.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Display forms of the current list, in upstream order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether the list is currently empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
