//! 意图分类器
//!
//! 主路径：拼分类 prompt → 调 LLM → 按标签行解析结构化字段（Intent / Confidence /
//! Reasoning / Keywords_Found / Context_Influence），缺失字段取安全默认值。
//! classify_with_fallback 在主路径失败或置信度过低时改用关键词回退，公开边界从不抛错。

use std::sync::Arc;

use crate::core::AgentError;
use crate::intent::{IntentKind, KeywordFallback, UserIntent};
use crate::llm::LlmClient;
use crate::prompts;

/// 低于该置信度时尝试关键词回退
const LOW_CONFIDENCE_THRESHOLD: f32 = 0.3;

const DEFAULT_REASONING: &str = "Default classification based on input analysis.";

/// 意图分类器：持有 LLM 客户端与关键词回退
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
    fallback: KeywordFallback,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            fallback: KeywordFallback::new(),
        }
    }

    /// 主路径：LLM 分类，网络或后端失败时返回 Err
    pub async fn classify(
        &self,
        user_input: &str,
        conversation_history: &str,
    ) -> Result<UserIntent, AgentError> {
        let history = if conversation_history.trim().is_empty() {
            "No previous conversation."
        } else {
            conversation_history
        };
        let prompt = prompts::intent_classification_prompt(user_input, history);

        let response = self
            .llm
            .generate(&prompt)
            .await
            .map_err(AgentError::LlmError)?;

        Ok(parse_classification_response(&response))
    }

    /// 总路径：主路径失败走回退；主路径置信度 < 0.3 且回退更高时取回退
    pub async fn classify_with_fallback(
        &self,
        user_input: &str,
        conversation_history: &str,
    ) -> UserIntent {
        match self.classify(user_input, conversation_history).await {
            Ok(primary) => {
                if primary.confidence < LOW_CONFIDENCE_THRESHOLD {
                    let fallback = self.fallback.classify(user_input);
                    if fallback.confidence > primary.confidence {
                        return fallback;
                    }
                }
                primary
            }
            Err(e) => {
                tracing::warn!("LLM classification failed ({}), using keyword fallback", e);
                self.fallback.classify(user_input)
            }
        }
    }
}

/// 解析 LLM 的标签行输出；任何字段缺失或无法识别都取安全默认
fn parse_classification_response(response: &str) -> UserIntent {
    let intent_type = labeled_field(response, "Intent")
        .map(|v| parse_intent_label(&v))
        .unwrap_or(IntentKind::Qa);

    let confidence = labeled_field(response, "Confidence")
        .and_then(|v| parse_leading_number(&v))
        .unwrap_or(0.5);

    let reasoning =
        labeled_field(response, "Reasoning").unwrap_or_else(|| DEFAULT_REASONING.to_string());

    let keywords_found = labeled_field(response, "Keywords_Found")
        .map(|v| parse_keyword_list(&v))
        .unwrap_or_default();

    let context_influence = labeled_field(response, "Context_Influence");

    UserIntent::new(intent_type, confidence, reasoning)
        .with_keywords(keywords_found)
        .with_context_influence(context_influence)
}

/// 意图标签映射；未知标签回到 qa
fn parse_intent_label(value: &str) -> IntentKind {
    let label = value
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    match label.as_str() {
        "CALCULATION" => IntentKind::Calculation,
        "SUMMARIZATION" => IntentKind::Summarization,
        _ => IntentKind::Qa,
    }
}

/// 取值开头的数字（容忍 "0.85 (high)" 这类尾巴）
fn parse_leading_number(value: &str) -> Option<f32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// "[a, b, 'c']" → ["a", "b", "c"]
fn parse_keyword_list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|k| k.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// 定位 "Label:" 行并取其值；值可跨行，直到下一个标签行为止。找不到或为空返回 None
fn labeled_field(response: &str, label: &str) -> Option<String> {
    let mut lines = response.lines();
    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if let Some(rest) = strip_label(trimmed, label) {
            let mut value = rest.trim().to_string();
            for cont in lines.by_ref() {
                let cont = cont.trim();
                if cont.is_empty() || is_label_line(cont) {
                    break;
                }
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(cont);
            }
            let value = value.trim().to_string();
            return if value.is_empty() { None } else { Some(value) };
        }
    }
    None
}

/// 大小写不敏感地剥掉 "Label:" 前缀
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let prefix = line.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    line[label.len()..].strip_prefix(':')
}

/// 形如 "Some_Label: ..." 的行视为下一个字段的开始
fn is_label_line(line: &str) -> bool {
    match line.split_once(':') {
        Some((head, _)) => {
            !head.is_empty()
                && head.chars().next().is_some_and(|c| c.is_ascii_uppercase())
                && head.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}
