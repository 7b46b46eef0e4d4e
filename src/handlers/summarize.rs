//! 总结处理器
//!
//! 请求对象是对话本身且已有历史时，给出已讨论轮数；否则对输入做定长前缀截断式摘要。

use async_trait::async_trait;

use crate::handlers::{Handler, HandlerOutcome};
use crate::memory::MemoryEntry;

const SOURCE_TAG: &str = "document_processor";

/// 截断式摘要保留的输入前缀长度（字符数）
const SUMMARY_PREFIX_CHARS: usize = 50;

/// 命中这些词且记忆非空时，视为对会话本身的总结请求
const CONVERSATION_WORDS: [&str; 4] = ["conversation", "discussion", "recap", "chat"];

pub struct SummarizationHandler;

#[async_trait]
impl Handler for SummarizationHandler {
    fn name(&self) -> &str {
        "summarization_agent"
    }

    async fn handle(&self, input: &str, memory: &[MemoryEntry]) -> HandlerOutcome {
        let lower = input.to_lowercase();
        let about_conversation = CONVERSATION_WORDS.iter().any(|w| lower.contains(w));

        let answer = if about_conversation && !memory.is_empty() {
            let turns = memory.len();
            let noun = if turns == 1 { "turn" } else { "turns" };
            format!("We have discussed {} {} so far in this conversation.", turns, noun)
        } else {
            let prefix: String = input.chars().take(SUMMARY_PREFIX_CHARS).collect();
            format!("Summary: {}... [This is a summarized version]", prefix)
        };

        HandlerOutcome {
            answer,
            sources: vec![SOURCE_TAG.to_string()],
            confidence: 0.9,
        }
    }
}
