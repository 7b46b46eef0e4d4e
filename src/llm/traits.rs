//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Simulator）实现 LlmClient：generate（单条 prompt）、chat（多轮消息）。
//! 两者都可能失败（网络 / 鉴权 / 超时），调用方必须把失败当作可恢复情况走回退路径。

use async_trait::async_trait;

use crate::memory::Message;

/// LLM 客户端 trait：单条 prompt 生成与多轮对话
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 对单条 prompt 生成文本（意图分类使用）
    async fn generate(&self, prompt: &str) -> Result<String, String>;

    /// 对多轮消息生成回复
    async fn chat(&self, messages: &[Message]) -> Result<String, String>;
}
