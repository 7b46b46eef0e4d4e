//! 意图处理器
//!
//! 每个意图一个处理器，输入为 (用户输入, 记忆只读快照)，输出为答案 + 来源标签 + 置信度。
//! 处理器从不把错误抛过边界：内部失败一律转为描述性答案文本加低置信度（≤ 0.3）。

pub mod calculation;
pub mod qa;
pub mod summarize;
pub mod unknown;

pub use calculation::CalculationHandler;
pub use qa::QaHandler;
pub use summarize::SummarizationHandler;
pub use unknown::UnknownHandler;

use async_trait::async_trait;

use crate::intent::IntentKind;
use crate::memory::MemoryEntry;

/// 处理器输出：答案文本、来源标签（有序）、置信度
#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    pub answer: String,
    pub sources: Vec<String>,
    pub confidence: f32,
}

/// 处理器 trait：名称（用于会话日志）与处理逻辑
#[async_trait]
pub trait Handler: Send + Sync {
    /// 处理器名称（会话日志中的 tool_name）
    fn name(&self) -> &str;

    /// 处理一轮输入；memory 是轮次开始时的快照，不含本轮
    async fn handle(&self, input: &str, memory: &[MemoryEntry]) -> HandlerOutcome;
}

/// 路由表：意图枚举到处理器的全覆盖映射，带显式默认分支
pub struct HandlerSet {
    qa: QaHandler,
    summarization: SummarizationHandler,
    calculation: CalculationHandler,
    unknown: UnknownHandler,
}

impl HandlerSet {
    pub fn new(calculation_confidence: f32) -> Self {
        Self {
            qa: QaHandler,
            summarization: SummarizationHandler,
            calculation: CalculationHandler::new(calculation_confidence),
            unknown: UnknownHandler,
        }
    }

    /// 按意图路由；意图缺失走默认处理器，任何输入都不会被丢弃
    pub fn route(&self, intent: Option<IntentKind>) -> &dyn Handler {
        match intent {
            Some(IntentKind::Qa) => &self.qa,
            Some(IntentKind::Summarization) => &self.summarization,
            Some(IntentKind::Calculation) => &self.calculation,
            None => &self.unknown,
        }
    }
}

impl Default for HandlerSet {
    fn default() -> Self {
        Self::new(0.95)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_covers_every_intent_and_default() {
        let set = HandlerSet::default();
        assert_eq!(set.route(Some(IntentKind::Qa)).name(), "qa_agent");
        assert_eq!(
            set.route(Some(IntentKind::Summarization)).name(),
            "summarization_agent"
        );
        assert_eq!(
            set.route(Some(IntentKind::Calculation)).name(),
            "calculation_agent"
        );
        assert_eq!(set.route(None).name(), "default_agent");
    }
}
