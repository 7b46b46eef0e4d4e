//! 轮次状态与响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::IntentKind;

/// 轮次阶段：start → intent_classified → <handler>_completed → memory_updated → end。
/// 每轮恰好走一条路径，无重试、无环。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Start,
    IntentClassified,
    QaCompleted,
    SummarizationCompleted,
    CalculationCompleted,
    DefaultCompleted,
    MemoryUpdated,
    End,
}

impl TurnPhase {
    /// 处理器执行完毕后的阶段；意图缺失对应默认处理器
    pub fn handler_completed(kind: Option<IntentKind>) -> Self {
        match kind {
            Some(IntentKind::Qa) => TurnPhase::QaCompleted,
            Some(IntentKind::Summarization) => TurnPhase::SummarizationCompleted,
            Some(IntentKind::Calculation) => TurnPhase::CalculationCompleted,
            None => TurnPhase::DefaultCompleted,
        }
    }
}

/// 单轮响应：每轮由选中的处理器（或编排器的错误兜底）创建恰好一次，创建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub question: String,
    pub answer: String,
    /// 来源标签，有序且非空
    pub sources: Vec<String>,
    /// 构造时钳制到 [0,1]
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl TurnResponse {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<String>,
        confidence: f32,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            sources,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        }
    }

    /// 整轮失败时的兜底响应：error_handler 来源、零置信度
    pub fn error_sentinel(question: impl Into<String>, description: &str) -> Self {
        Self::new(
            question,
            format!("Error processing request: {}", description),
            vec!["error_handler".to_string()],
            0.0,
        )
    }
}
