use std::fmt;

use serde::{Deserialize, Serialize};

/// The task types the pipeline knows how to route.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Weather,
  News,
  /// Fallback when nothing more specific matches.
  #[default]
  Data,
}

impl Category {
  /// Every category, in match priority order.
  pub const ALL: [Category; 3] = [Category::Weather, Category::News, Category::Data];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Weather => "weather",
      Category::News => "news",
      Category::Data => "data",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
