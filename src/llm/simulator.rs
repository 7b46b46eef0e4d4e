//! Simulator LLM 客户端（用于测试与无 API Key 运行）
//!
//! generate 从分类 prompt 中提取 "User Input:" 行，按关键词规则产出带标签字段的
//! 分类文本（Intent / Confidence / Reasoning / Keywords_Found），与真实模型的
//! 结构化输出格式一致；chat 按 system prompt 的类型回显。完全确定性。

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::memory::{Message, Role};

const QA_WORDS: [&str; 6] = ["what", "how", "why", "who", "when", "where"];
const SUMM_WORDS: [&str; 4] = ["summarize", "summary", "brief", "overview"];
const CALC_WORDS: [&str; 7] = ["calculate", "compute", "math", "+", "-", "*", "/"];

/// Simulator 客户端：关键词规则分类 + 按 system prompt 类型回显
#[derive(Debug, Default)]
pub struct SimulatorLlm;

impl SimulatorLlm {
    /// 从分类 prompt 中提取 "User Input:" 行的内容
    fn extract_user_input(prompt: &str) -> &str {
        prompt
            .lines()
            .find_map(|line| line.trim().strip_prefix("User Input:"))
            .map(str::trim)
            .unwrap_or("")
    }

    /// 关键词规则分类，输出 (意图标签, 置信度, 理由, 命中词)
    fn classify(input: &str) -> (&'static str, f32, &'static str, Vec<&'static str>) {
        let lower = input.to_lowercase();

        let qa_hits: Vec<&str> = QA_WORDS
            .iter()
            .copied()
            .filter(|w| lower.contains(w))
            .collect();
        if !qa_hits.is_empty() {
            return (
                "QA",
                0.8,
                "Detected question words indicating Q&A intent",
                qa_hits,
            );
        }

        let summ_hits: Vec<&str> = SUMM_WORDS
            .iter()
            .copied()
            .filter(|w| lower.contains(w))
            .collect();
        if !summ_hits.is_empty() {
            return (
                "SUMMARIZATION",
                0.9,
                "Detected summarization keywords",
                summ_hits,
            );
        }

        let calc_hits: Vec<&str> = CALC_WORDS
            .iter()
            .copied()
            .filter(|w| lower.contains(w))
            .collect();
        if !calc_hits.is_empty() {
            return (
                "CALCULATION",
                0.85,
                "Detected calculation keywords or operators",
                calc_hits,
            );
        }

        ("QA", 0.6, "Default to Q&A for unclear intent", Vec::new())
    }
}

#[async_trait]
impl LlmClient for SimulatorLlm {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let input = Self::extract_user_input(prompt);
        let (intent, confidence, reasoning, keywords) = Self::classify(input);

        Ok(format!(
            "Intent: {}\nConfidence: {}\nReasoning: {}\nKeywords_Found: [{}]",
            intent,
            confidence,
            reasoning,
            keywords.join(", ")
        ))
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, String> {
        let user_message = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");
        let system_message = messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .unwrap_or("");

        let reply = if system_message.contains("question-answering") {
            format!("Q&A Response: {}", user_message)
        } else if system_message.contains("summarization") {
            let prefix: String = user_message.chars().take(50).collect();
            format!("Summary: {}...", prefix)
        } else if system_message.contains("calculation") {
            format!("Calculation: Processing {}", user_message)
        } else {
            format!("General response to: {}", user_message)
        };
        Ok(reply)
    }
}
