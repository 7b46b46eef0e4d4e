//! 问答处理器
//!
//! 两个确定性特例：法国首都的事实问题，以及 "what did i just ask"（回看上一轮输入）。
//! 其余输入回显为通用问答文本，在更完整的部署中该分支会改为调用生成服务。

use async_trait::async_trait;

use crate::handlers::{Handler, HandlerOutcome};
use crate::memory::MemoryEntry;

const SOURCE_TAG: &str = "knowledge_base";

pub struct QaHandler;

#[async_trait]
impl Handler for QaHandler {
    fn name(&self) -> &str {
        "qa_agent"
    }

    async fn handle(&self, input: &str, memory: &[MemoryEntry]) -> HandlerOutcome {
        let lower = input.to_lowercase();

        let answer = if lower.contains("capital of france") {
            "Paris".to_string()
        } else if lower.contains("what did i just ask") {
            // 快照不含本轮，末条即上一轮
            match memory.last() {
                Some(previous) => format!("You asked: {}", previous.user_input),
                None => "I don't have any previous questions in memory.".to_string(),
            }
        } else {
            format!("This is a Q&A response to: {}", input)
        };

        HandlerOutcome {
            answer,
            sources: vec![SOURCE_TAG.to_string()],
            confidence: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn factual_question_returns_fixed_answer() {
        let outcome = QaHandler
            .handle("What is the capital of France?", &[])
            .await;
        assert_eq!(outcome.answer, "Paris");
        assert_eq!(outcome.sources, vec!["knowledge_base"]);
    }

    #[tokio::test]
    async fn recall_echoes_previous_input() {
        let memory = vec![MemoryEntry::new("What is the capital of France?", None, None)];
        let outcome = QaHandler.handle("What did I just ask?", &memory).await;
        assert!(outcome
            .answer
            .contains("What is the capital of France?"));
    }

    #[tokio::test]
    async fn recall_with_empty_memory_says_so() {
        let outcome = QaHandler.handle("What did I just ask?", &[]).await;
        assert_eq!(
            outcome.answer,
            "I don't have any previous questions in memory."
        );
    }

    #[tokio::test]
    async fn other_questions_get_generic_answer() {
        let outcome = QaHandler.handle("How does this work?", &[]).await;
        assert_eq!(outcome.answer, "This is a Q&A response to: How does this work?");
        assert!((outcome.confidence - 0.8).abs() < 1e-6);
    }
}
