//! 轮次编排器
//!
//! 持有分类器、路由表、记忆与会话日志器，对外只暴露 process：
//! 开会话 → 分类（带有限历史窗口）→ 路由 → 处理器（只读记忆快照）→ 追加记忆 → 关会话。
//! process 从不把错误抛给调用方；整轮失败时返回 error_handler 兜底响应。
//! &mut self 使同一实例的轮次天然串行，记忆只在轮次边界由编排器写入。

use std::sync::Arc;

use serde_json::json;

use crate::config::AppConfig;
use crate::core::{AgentError, TurnPhase, TurnResponse};
use crate::handlers::HandlerSet;
use crate::intent::IntentClassifier;
use crate::llm::{LlmClient, OpenAiClient, SimulatorLlm};
use crate::memory::{MemoryEntry, MemoryStore};
use crate::session::SessionLogger;

/// 根据配置与环境变量选择 LLM 后端（OpenAI 兼容 / Simulator）
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    let use_openai = provider == "openai" && std::env::var("OPENAI_API_KEY").is_ok();

    if use_openai {
        let base = cfg.llm.base_url.as_deref();
        tracing::info!("Using OpenAI LLM ({})", cfg.llm.model);
        Arc::new(OpenAiClient::new(
            base,
            &cfg.llm.model,
            std::env::var("OPENAI_API_KEY").ok().as_deref(),
        ))
    } else {
        tracing::info!("No API key set or provider is simulator, using Simulator LLM");
        Arc::new(SimulatorLlm)
    }
}

/// 轮次编排器：长生命周期实例，跨 process 调用累积记忆
pub struct Orchestrator {
    classifier: IntentClassifier,
    handlers: HandlerSet,
    memory: MemoryStore,
    logger: SessionLogger,
    max_history_turns: usize,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, cfg: &AppConfig) -> Self {
        let log_dir = cfg
            .logging
            .log_dir
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from("logs"));
        Self {
            classifier: IntentClassifier::new(llm),
            handlers: HandlerSet::new(cfg.app.calculation_confidence),
            memory: MemoryStore::new(),
            logger: SessionLogger::new(log_dir),
            max_history_turns: cfg.app.max_history_turns,
        }
    }

    /// 从配置构建：后端选择见 create_llm_from_config
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(create_llm_from_config(cfg), cfg)
    }

    /// 只读访问累积记忆
    pub fn memory(&self) -> &[MemoryEntry] {
        self.memory.entries()
    }

    /// 处理一轮输入；总是返回 TurnResponse，从不向调用方抛错
    pub async fn process(&mut self, user_input: &str) -> TurnResponse {
        self.logger.start_session(user_input);

        let response = match self.run_turn(user_input).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Turn failed: {}", e);
                let response = TurnResponse::error_sentinel(user_input, &e.to_string());
                // 失败轮同样留痕：记忆条数与 process 调用次数保持一致
                self.memory.push(MemoryEntry::new(
                    user_input,
                    None,
                    Some(response.clone()),
                ));
                response
            }
        };

        self.logger.end_session(Some(&response.answer));
        response
    }

    /// 单轮状态机：start → intent_classified → <handler>_completed → memory_updated → end
    async fn run_turn(&mut self, user_input: &str) -> Result<TurnResponse, AgentError> {
        let mut phase = TurnPhase::Start;
        tracing::debug!(?phase, "turn started");

        // 快照在分类前取定，处理器看不到本轮条目
        let snapshot = self.memory.snapshot();
        let history = self.memory.recent_window(self.max_history_turns);

        let intent = self
            .classifier
            .classify_with_fallback(user_input, &history)
            .await;
        phase = TurnPhase::IntentClassified;
        tracing::debug!(
            ?phase,
            intent = intent.intent_type.as_str(),
            confidence = intent.confidence,
            "intent classified"
        );
        self.logger.log_tool_call(
            "classify_intent",
            json!({ "user_input": user_input }),
            Some(intent.intent_type.as_str().to_string()),
        );

        let handler = self.handlers.route(Some(intent.intent_type));
        let outcome = handler.handle(user_input, &snapshot).await;
        phase = TurnPhase::handler_completed(Some(intent.intent_type));
        tracing::debug!(?phase, handler = handler.name(), "handler completed");
        self.logger.log_tool_call(
            handler.name(),
            json!({ "user_input": user_input }),
            Some(outcome.answer.clone()),
        );

        let response = TurnResponse::new(
            user_input,
            outcome.answer,
            outcome.sources,
            outcome.confidence,
        );

        self.memory.push(MemoryEntry::new(
            user_input,
            Some(intent),
            Some(response.clone()),
        ));
        phase = TurnPhase::MemoryUpdated;
        tracing::debug!(?phase, entries = self.memory.len(), "memory updated");

        phase = TurnPhase::End;
        tracing::debug!(?phase, "turn finished");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentKind;
    use tempfile::TempDir;

    fn test_orchestrator(dir: &TempDir) -> Orchestrator {
        let mut cfg = AppConfig::default();
        cfg.logging.log_dir = Some(dir.path().to_path_buf());
        Orchestrator::new(Arc::new(SimulatorLlm), &cfg)
    }

    #[tokio::test]
    async fn calculation_turn_routes_to_calculator() {
        let dir = TempDir::new().unwrap();
        let mut orchestrator = test_orchestrator(&dir);
        let response = orchestrator.process("2 + 3").await;
        assert_eq!(response.answer, "5");
        assert_eq!(response.sources, vec!["calculator_tool"]);
        assert!((response.confidence - 0.95).abs() < 1e-6);
    }

    #[tokio::test]
    async fn memory_grows_by_one_entry_per_turn() {
        let dir = TempDir::new().unwrap();
        let mut orchestrator = test_orchestrator(&dir);
        for i in 0..4 {
            orchestrator.process(&format!("question number {i}")).await;
        }
        let memory = orchestrator.memory();
        assert_eq!(memory.len(), 4);
        let inputs: Vec<&str> = memory.iter().map(|e| e.user_input.as_str()).collect();
        assert_eq!(
            inputs,
            vec![
                "question number 0",
                "question number 1",
                "question number 2",
                "question number 3"
            ]
        );
    }

    #[tokio::test]
    async fn each_turn_records_exactly_one_intent() {
        let dir = TempDir::new().unwrap();
        let mut orchestrator = test_orchestrator(&dir);
        orchestrator.process("summarize this text").await;
        let entry = &orchestrator.memory()[0];
        let intent = entry.intent.as_ref().unwrap();
        assert_eq!(intent.intent_type, IntentKind::Summarization);
        assert!(entry.response.is_some());
    }

    #[tokio::test]
    async fn session_file_is_written_per_turn() {
        let dir = TempDir::new().unwrap();
        let mut orchestrator = test_orchestrator(&dir);
        orchestrator.process("10 * 5").await;
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let data = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert!(data.contains("\"user_query\": \"10 * 5\""));
        assert!(data.contains("classify_intent"));
        assert!(data.contains("calculation_agent"));
    }
}
