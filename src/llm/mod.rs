//! LLM 客户端层：trait 抽象与各后端实现

pub mod openai;
pub mod simulator;
pub mod traits;

pub use openai::OpenAiClient;
pub use simulator::SimulatorLlm;
pub use traits::LlmClient;
