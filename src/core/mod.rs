//! 核心编排层：错误类型、轮次状态机与主流程

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::AgentError;
pub use orchestrator::{create_llm_from_config, Orchestrator};
pub use state::{TurnPhase, TurnResponse};
