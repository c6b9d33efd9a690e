use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StepStatus;

/// Identifier of a pipeline step. Ids run from 1 to 4 and define pipeline order.
pub type StepId = u32;

/// Static definition of a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef {
  pub id: StepId,
  pub name: &'static str,
  pub description: &'static str,
}

/// The fixed pipeline, in execution order.
pub const PIPELINE: [StepDef; 4] = [
  StepDef {
    id: 1,
    name: "意图识别",
    description: "分析用户自然语言需求",
  },
  StepDef {
    id: 2,
    name: "工具路由",
    description: "选择合适的工具链",
  },
  StepDef {
    id: 3,
    name: "执行调用",
    description: "与外部 API 进行交互",
  },
  StepDef {
    id: 4,
    name: "结果生成",
    description: "整合数据并生成可视化报告",
  },
];

/// One stage of a task's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
  pub id: StepId,
  pub name: String,
  pub description: String,
  pub status: StepStatus,
  /// Set when the step enters `running`, never changed afterwards.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<DateTime<Utc>>,
}

impl From<&StepDef> for Step {
  fn from(def: &StepDef) -> Self {
    Self {
      id: def.id,
      name: def.name.to_string(),
      description: def.description.to_string(),
      status: StepStatus::Pending,
      timestamp: None,
    }
  }
}
