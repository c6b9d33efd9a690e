use serde::{Deserialize, Serialize};

/// A row of tabular evidence. Keys are opaque to the engine.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// How the result's chart should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
  Line,
  Bar,
  #[default]
  None,
}

/// One named point of a chart; every other key is a series value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
  pub name: String,
  #[serde(flatten)]
  pub series: serde_json::Map<String, serde_json::Value>,
}

/// The synthesized output of a successful task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
  pub summary: String,
  #[serde(default)]
  pub chart_type: ChartType,
  /// Empty when `chart_type` is `none`.
  #[serde(default)]
  pub chart_data: Vec<ChartPoint>,
  #[serde(default)]
  pub raw_data: Vec<RawRecord>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_chart_point_flattens_series() {
    let point: ChartPoint =
      serde_json::from_value(serde_json::json!({"name": "2023-11-01", "temperature": 12}))
        .unwrap();

    assert_eq!(point.name, "2023-11-01");
    assert_eq!(point.series["temperature"], 12);
    assert!(!point.series.contains_key("name"));
  }

  #[test]
  fn test_result_uses_camel_case() {
    let result = WorkflowResult {
      summary: "ok".to_string(),
      chart_type: ChartType::None,
      chart_data: vec![],
      raw_data: vec![],
    };
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["chartType"], "none");
    assert!(value["chartData"].as_array().unwrap().is_empty());
    assert!(value.get("rawData").is_some());
  }
}
