//! Waggle - Rust 意图路由对话智能体
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 单轮编排状态机（分类 → 路由 → 处理 → 记忆更新）与错误类型
//! - **handlers**: 按意图分发的处理器（qa / summarization / calculation / default）
//! - **intent**: 意图分类（LLM 结构化输出解析 + 关键词回退）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Simulator）
//! - **memory**: 追加式会话记忆（逐轮累积，处理器只读快照）
//! - **prompts**: 分类与各意图的提示词模板
//! - **session**: 单轮会话日志（JSON 文件，失败不影响响应）
//! - **tools**: 计算器（递归下降算术求值）

pub mod config;
pub mod core;
pub mod handlers;
pub mod intent;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod prompts;
pub mod session;
pub mod tools;

pub use crate::core::{Orchestrator, TurnResponse};
pub use intent::{IntentKind, UserIntent};
