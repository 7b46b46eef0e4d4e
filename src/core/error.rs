//! 编排层错误类型
//!
//! 分类失败在分类器内部用关键词回退消化，处理器失败转为低置信度答案文本；
//! 能到达这里的只剩外部服务类错误，由编排器边界一次性捕获并转为 error_handler 响应。

use thiserror::Error;

/// 轮次执行中可能出现的错误
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    LlmError(String),
}
