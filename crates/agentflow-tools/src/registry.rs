use std::collections::BTreeMap;
use std::sync::Arc;

use agentflow_classifier::Category;
use serde::Serialize;

use crate::builtin::SimulatedTool;
use crate::handler::ToolHandler;

/// Public description of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
  pub category: Category,
  pub name: String,
  pub description: String,
  pub required_params: Vec<String>,
  pub optional_params: Vec<String>,
}

/// Maps each category to the handler that serves it.
#[derive(Clone, Default)]
pub struct ToolRegistry {
  handlers: BTreeMap<Category, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry with the simulated tool for every category.
  pub fn with_builtin_tools() -> Self {
    let mut registry = Self::new();
    for category in Category::ALL {
      registry.register(SimulatedTool::for_category(category));
    }
    registry
  }

  /// Register a handler under its category, returning the one it replaced.
  pub fn register<H: ToolHandler + 'static>(&mut self, handler: H) -> Option<Arc<dyn ToolHandler>> {
    self.handlers.insert(handler.category(), Arc::new(handler))
  }

  pub fn get(&self, category: Category) -> Option<Arc<dyn ToolHandler>> {
    self.handlers.get(&category).cloned()
  }

  pub fn len(&self) -> usize {
    self.handlers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty()
  }

  /// Descriptors of every registered tool, in category priority order.
  pub fn descriptors(&self) -> Vec<ToolDescriptor> {
    self
      .handlers
      .values()
      .map(|h| ToolDescriptor {
        category: h.category(),
        name: h.tool_name().to_string(),
        description: h.description().to_string(),
        required_params: h.required_params().iter().map(|p| p.to_string()).collect(),
        optional_params: h.optional_params().iter().map(|p| p.to_string()).collect(),
      })
      .collect()
  }
}

impl std::fmt::Debug for ToolRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ToolRegistry")
      .field("categories", &self.handlers.keys().collect::<Vec<_>>())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_registry_covers_every_category() {
    let registry = ToolRegistry::with_builtin_tools();

    assert_eq!(registry.len(), Category::ALL.len());
    for category in Category::ALL {
      assert_eq!(registry.get(category).unwrap().category(), category);
    }
  }

  #[test]
  fn test_descriptors_follow_priority_order() {
    let descriptors = ToolRegistry::with_builtin_tools().descriptors();
    let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();

    assert_eq!(
      names,
      vec!["Weather API", "Google Search API", "Data Analysis Tool"]
    );
    assert_eq!(descriptors[0].required_params, vec!["location"]);
    assert_eq!(descriptors[0].optional_params, vec!["days"]);
    assert_eq!(descriptors[1].optional_params, vec!["limit", "category"]);
    assert!(descriptors[2].optional_params.is_empty());

    let value = serde_json::to_value(&descriptors[1]).unwrap();
    assert_eq!(value["optionalParams"], serde_json::json!(["limit", "category"]));
  }

  #[test]
  fn test_register_replaces_existing_handler() {
    let mut registry = ToolRegistry::new();
    assert!(registry.register(SimulatedTool::news()).is_none());
    assert!(registry.register(SimulatedTool::news()).is_some());
    assert_eq!(registry.len(), 1);
    assert!(registry.get(Category::Weather).is_none());
  }
}
