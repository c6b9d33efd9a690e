//! Simulated tools with canned results.
//!
//! These stand in for real weather, search and analysis services. Each
//! routes to a fixed request, acknowledges every call, and synthesizes its
//! category's result template verbatim.

use agentflow_classifier::Category;
use agentflow_workflow::{ChartPoint, ChartType, RawRecord, WorkflowResult};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::handler::{ToolHandler, ToolRequest, ToolResponse};

/// Acknowledgement returned by every simulated call.
pub const SIMULATED_ACK: &str = r#"{"status": 200, "data_size": "2KB"}"#;

/// A tool that never leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedTool {
  category: Category,
  tool_name: &'static str,
  description: &'static str,
  required_params: &'static [&'static str],
  optional_params: &'static [&'static str],
  params: Value,
  template: WorkflowResult,
}

impl SimulatedTool {
  /// The simulated tool for a category.
  pub fn for_category(category: Category) -> Self {
    match category {
      Category::Weather => Self::weather(),
      Category::News => Self::news(),
      Category::Data => Self::data(),
    }
  }

  pub fn weather() -> Self {
    Self {
      category: Category::Weather,
      tool_name: "Weather API",
      description: "天气查询工具，支持7天预报",
      required_params: &["location"],
      optional_params: &["days"],
      params: json!({"location": "Beijing", "days": 3}),
      template: WorkflowResult {
        summary: "根据气象工具查询，北京未来三天受冷空气影响，气温呈下降趋势。建议出行携带保暖衣物。"
          .to_string(),
        chart_type: ChartType::Line,
        chart_data: vec![
          point("2023-11-01", json!({"temperature": 12, "humidity": 40})),
          point("2023-11-02", json!({"temperature": 9, "humidity": 35})),
          point("2023-11-03", json!({"temperature": 5, "humidity": 30})),
          point("2023-11-04", json!({"temperature": 8, "humidity": 32})),
        ],
        raw_data: vec![
          record(json!({"date": "2023-11-01", "weather": "Cloudy", "wind": "North 3-4"})),
          record(json!({"date": "2023-11-02", "weather": "Sunny", "wind": "North 4-5"})),
        ],
      },
    }
  }

  pub fn news() -> Self {
    Self {
      category: Category::News,
      tool_name: "Google Search API",
      description: "新闻检索工具",
      required_params: &["query"],
      optional_params: &["limit", "category"],
      params: json!({"query": "AI News", "limit": 3}),
      template: WorkflowResult {
        summary: "为您抓取到最近 3 条 AI 相关新闻。主要集中在 OpenAI 新模型发布、欧盟 AI 法案更新以及 Google Gemini 的多模态能力升级。"
          .to_string(),
        chart_type: ChartType::None,
        chart_data: vec![],
        raw_data: vec![
          record(json!({"title": "OpenAI Releases GPT-5 Preview", "source": "TechCrunch", "time": "2h ago"})),
          record(json!({"title": "EU AI Act Finalized", "source": "Reuters", "time": "5h ago"})),
          record(json!({"title": "Google Integrates Gemini into Android", "source": "The Verge", "time": "1d ago"})),
        ],
      },
    }
  }

  pub fn data() -> Self {
    Self {
      category: Category::Data,
      tool_name: "Data Analysis Tool",
      description: "数据分析工具",
      required_params: &["dataset"],
      optional_params: &[],
      params: json!({"dataset": "sales_q3.csv"}),
      template: WorkflowResult {
        summary: "已根据上传的数据集完成分析。数据显示 A 类产品在 Q3 季度增长显著，占比达到 45%，建议增加该类产品的库存投入。"
          .to_string(),
        chart_type: ChartType::Bar,
        chart_data: vec![
          point("Product A", json!({"sales": 4000, "profit": 2400})),
          point("Product B", json!({"sales": 3000, "profit": 1398})),
          point("Product C", json!({"sales": 2000, "profit": 9800})),
          point("Product D", json!({"sales": 2780, "profit": 3908})),
        ],
        raw_data: vec![
          record(json!({"product": "A", "q3_growth": "+15%"})),
          record(json!({"product": "B", "q3_growth": "-2%"})),
        ],
      },
    }
  }
}

#[async_trait]
impl ToolHandler for SimulatedTool {
  fn category(&self) -> Category {
    self.category
  }

  fn tool_name(&self) -> &str {
    self.tool_name
  }

  fn description(&self) -> &str {
    self.description
  }

  fn required_params(&self) -> &[&'static str] {
    self.required_params
  }

  fn optional_params(&self) -> &[&'static str] {
    self.optional_params
  }

  fn route(&self, _text: &str) -> ToolRequest {
    ToolRequest::new(self.tool_name, self.params.clone())
  }

  async fn invoke(&self, request: &ToolRequest) -> Result<ToolResponse, ToolError> {
    for name in self.required_params {
      request.require(name)?;
    }
    let payload = serde_json::from_str(SIMULATED_ACK)
      .map_err(|e| ToolError::failed(format!("invalid acknowledgement: {}", e)))?;
    Ok(ToolResponse { payload })
  }

  fn synthesize(&self, _response: &ToolResponse) -> WorkflowResult {
    self.template.clone()
  }
}

fn point(name: &str, series: Value) -> ChartPoint {
  ChartPoint {
    name: name.to_string(),
    series: record(series),
  }
}

fn record(value: Value) -> RawRecord {
  match value {
    Value::Object(map) => map,
    _ => RawRecord::new(),
  }
}
