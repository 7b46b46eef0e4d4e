//! 默认处理器：无法识别的意图

use async_trait::async_trait;

use crate::handlers::{Handler, HandlerOutcome};
use crate::memory::MemoryEntry;

pub struct UnknownHandler;

#[async_trait]
impl Handler for UnknownHandler {
    fn name(&self) -> &str {
        "default_agent"
    }

    async fn handle(&self, _input: &str, _memory: &[MemoryEntry]) -> HandlerOutcome {
        HandlerOutcome {
            answer: "I'm not sure how to help with that.".to_string(),
            sources: vec!["default".to_string()],
            confidence: 0.3,
        }
    }
}
