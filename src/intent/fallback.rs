//! 关键词回退分类
//!
//! 不依赖 LLM 的确定性分类：对输入分别打计算 / 总结 / 问答三组关键词与模式的命中分，
//! 按固定优先级取分：calculation ≥ max(其余) 优先，其次 summarization > qa，否则回到
//! qa@0.6 的全局默认。相同输入永远得到相同结果。

use regex::Regex;

use crate::intent::{IntentKind, UserIntent};

const CALC_KEYWORDS: [&str; 15] = [
    "calculate", "compute", "+", "-", "*", "/", "=", "solve", "math", "%", "times", "plus",
    "minus", "divided", "multiply",
];
const SUMM_KEYWORDS: [&str; 8] = [
    "summarize",
    "summary",
    "recap",
    "overview",
    "main points",
    "key points",
    "gist",
    "brief",
];
const QA_KEYWORDS: [&str; 10] = [
    "what", "how", "why", "when", "where", "who", "explain", "tell me", "define", "describe",
];

const CALC_PATTERNS: [&str; 5] = [
    r"\d+\s*[+\-*/]\s*\d+",
    r"\bsolve\b",
    r"\btimes\b",
    r"\bplus\b",
    r"\bminus\b",
];
const SUMM_PATTERNS: [&str; 4] = [
    r"\bmain\s+points?\b",
    r"\bkey\s+points?\b",
    r"\bsummar[iy]",
    r"\brecap\b",
];

/// 关键词回退分类器；正则在构造时编译一次
pub struct KeywordFallback {
    calc_patterns: Vec<Regex>,
    summ_patterns: Vec<Regex>,
}

impl Default for KeywordFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordFallback {
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("static pattern"))
                .collect()
        };
        Self {
            calc_patterns: compile(&CALC_PATTERNS),
            summ_patterns: compile(&SUMM_PATTERNS),
        }
    }

    /// 确定性分类：关键词计数 + 模式命中计分
    pub fn classify(&self, user_input: &str) -> UserIntent {
        let lower = user_input.to_lowercase();

        let calc_score = count_keywords(&lower, &CALC_KEYWORDS)
            + count_patterns(&lower, &self.calc_patterns);
        let summ_score = count_keywords(&lower, &SUMM_KEYWORDS)
            + count_patterns(&lower, &self.summ_patterns);
        let qa_score = count_keywords(&lower, &QA_KEYWORDS);

        if calc_score > 0 && calc_score >= summ_score.max(qa_score) {
            UserIntent::new(
                IntentKind::Calculation,
                score_confidence(calc_score),
                "Keyword-based fallback classification detected calculation intent.",
            )
            .with_keywords(matched_keywords(&lower, &CALC_KEYWORDS))
        } else if summ_score > 0 && summ_score > qa_score {
            UserIntent::new(
                IntentKind::Summarization,
                score_confidence(summ_score),
                "Keyword-based fallback classification detected summarization intent.",
            )
            .with_keywords(matched_keywords(&lower, &SUMM_KEYWORDS))
        } else {
            // 全局默认：空输入或无任何命中也归为 qa，从不报错
            UserIntent::new(
                IntentKind::Qa,
                0.6,
                "Default QA classification via keyword-based fallback.",
            )
            .with_keywords(matched_keywords(&lower, &QA_KEYWORDS))
        }
    }
}

fn count_keywords(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| lower.contains(*kw)).count()
}

fn count_patterns(lower: &str, patterns: &[Regex]) -> usize {
    patterns.iter().filter(|p| p.is_match(lower)).count()
}

fn matched_keywords(lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// 命中分转置信度：0.5 + 0.1/分，封顶 0.8
fn score_confidence(score: usize) -> f32 {
    (0.5 + score as f32 * 0.1).min(0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_expression_is_calculation() {
        let fb = KeywordFallback::new();
        let intent = fb.classify("2 + 3");
        assert_eq!(intent.intent_type, IntentKind::Calculation);
        assert!(intent.confidence > 0.5);
        assert!(intent.keywords_found.contains(&"+".to_string()));
    }

    #[test]
    fn summarize_request_is_summarization() {
        let fb = KeywordFallback::new();
        let intent = fb.classify("Please give me a summary of the document");
        assert_eq!(intent.intent_type, IntentKind::Summarization);
    }

    #[test]
    fn unmatched_input_defaults_to_qa() {
        let fb = KeywordFallback::new();
        let intent = fb.classify("help");
        assert_eq!(intent.intent_type, IntentKind::Qa);
        assert_eq!(intent.confidence, 0.6);
    }

    #[test]
    fn empty_and_whitespace_inputs_default_to_qa() {
        let fb = KeywordFallback::new();
        for input in ["", "   "] {
            let intent = fb.classify(input);
            assert_eq!(intent.intent_type, IntentKind::Qa);
            assert_eq!(intent.confidence, 0.6);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let fb = KeywordFallback::new();
        let a = fb.classify("calculate 15% of 200");
        let b = fb.classify("calculate 15% of 200");
        assert_eq!(a.intent_type, b.intent_type);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.keywords_found, b.keywords_found);
    }

    #[test]
    fn calculation_wins_ties_against_summarization() {
        let fb = KeywordFallback::new();
        // "solve" 同时命中关键词与模式，计算意图按优先级胜出
        let intent = fb.classify("solve this and recap");
        assert_eq!(intent.intent_type, IntentKind::Calculation);
    }

    #[test]
    fn confidence_is_capped_at_point_eight() {
        let fb = KeywordFallback::new();
        let intent = fb.classify("calculate and compute 2 + 3 * 4 / 5 times plus minus");
        assert!(intent.confidence <= 0.8);
    }
}
