//! 意图层：意图类型、LLM 分类器与关键词回退

pub mod classifier;
pub mod fallback;

pub use classifier::IntentClassifier;
pub use fallback::KeywordFallback;

use serde::{Deserialize, Serialize};

/// 意图类别（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// 普通问答（问题、信息请求、解释）
    Qa,
    /// 总结（文本、对话、文档）
    Summarization,
    /// 数学计算
    Calculation,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Qa => "qa",
            IntentKind::Summarization => "summarization",
            IntentKind::Calculation => "calculation",
        }
    }
}

/// 单轮的意图分类结果；每轮由分类器创建恰好一次，创建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIntent {
    pub intent_type: IntentKind,
    /// 分类置信度，构造时钳制到 [0,1]
    pub confidence: f32,
    pub reasoning: String,
    #[serde(default)]
    pub keywords_found: Vec<String>,
    #[serde(default)]
    pub context_influence: Option<String>,
}

impl UserIntent {
    pub fn new(intent_type: IntentKind, confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            intent_type,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            keywords_found: Vec::new(),
            context_influence: None,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords_found = keywords;
        self
    }

    pub fn with_context_influence(mut self, influence: Option<String>) -> Self {
        self.context_influence = influence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped_at_construction() {
        let high = UserIntent::new(IntentKind::Qa, 1.7, "r");
        assert_eq!(high.confidence, 1.0);
        let low = UserIntent::new(IntentKind::Calculation, -0.2, "r");
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&IntentKind::Summarization).unwrap();
        assert_eq!(json, "\"summarization\"");
    }
}
