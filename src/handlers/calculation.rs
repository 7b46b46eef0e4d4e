//! 计算处理器
//!
//! 剥掉常见计算动词前缀与尾部标点后交给算术求值器；求值器的文本结果原样作为答案。
//! 求值失败转为固定错误消息加低置信度，不向上抛。

use async_trait::async_trait;

use crate::handlers::{Handler, HandlerOutcome};
use crate::memory::MemoryEntry;
use crate::tools::calculator;

const SOURCE_TAG: &str = "calculator_tool";

/// 可剥除的前导动词（长词在前，避免 "what is" 被 "what's" 截断）
const LEADING_VERBS: [&str; 5] = ["calculate", "compute", "solve", "what is", "what's"];

/// 计算处理器；成功置信度可配置（0.95 或 1.0）
pub struct CalculationHandler {
    confidence: f32,
}

impl CalculationHandler {
    pub fn new(confidence: f32) -> Self {
        Self {
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl Handler for CalculationHandler {
    fn name(&self) -> &str {
        "calculation_agent"
    }

    async fn handle(&self, input: &str, _memory: &[MemoryEntry]) -> HandlerOutcome {
        let expression = strip_calculation_phrasing(input);

        let (answer, confidence) = match calculator::try_evaluate(&expression) {
            Ok(result) => (result, self.confidence),
            Err(e) => (e.to_string(), 0.3),
        };

        HandlerOutcome {
            answer,
            sources: vec![SOURCE_TAG.to_string()],
            confidence,
        }
    }
}

/// 去掉前导计算动词与尾部标点，留下纯表达式
fn strip_calculation_phrasing(input: &str) -> String {
    let mut s = input.trim();

    for verb in LEADING_VERBS {
        let matches = s
            .get(..verb.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(verb));
        if matches {
            s = s[verb.len()..].trim_start();
            break;
        }
    }

    s.trim_end_matches(['?', '.', '!', '=']).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_expression_is_evaluated() {
        let handler = CalculationHandler::new(0.95);
        let outcome = handler.handle("2 + 3", &[]).await;
        assert_eq!(outcome.answer, "5");
        assert_eq!(outcome.sources, vec!["calculator_tool"]);
        assert!((outcome.confidence - 0.95).abs() < 1e-6);
    }

    #[tokio::test]
    async fn leading_verb_and_trailing_punctuation_are_stripped() {
        let handler = CalculationHandler::new(0.95);
        let outcome = handler.handle("What is 10 * 5?", &[]).await;
        assert_eq!(outcome.answer, "50");
    }

    #[tokio::test]
    async fn invalid_expression_lowers_confidence() {
        let handler = CalculationHandler::new(0.95);
        let outcome = handler.handle("abc + 3", &[]).await;
        assert!(outcome.answer.starts_with("Invalid expression"));
        assert!(outcome.confidence <= 0.3);
    }

    #[test]
    fn stripping_keeps_expression_intact() {
        assert_eq!(strip_calculation_phrasing("calculate 2 + 3"), "2 + 3");
        assert_eq!(strip_calculation_phrasing("What's 5 * 8?"), "5 * 8");
        assert_eq!(strip_calculation_phrasing("solve 7 - 4."), "7 - 4");
        assert_eq!(strip_calculation_phrasing("2 + 3"), "2 + 3");
    }
}
