//! 提示词模板：意图分类 prompt 与各意图的 system prompt
//!
//! 纯字符串拼装，无控制流；分类 prompt 的输出格式与 intent::classifier 的解析器一一对应。

use crate::intent::IntentKind;
use crate::memory::Message;

/// 意图分类模板：嵌入用户输入与最近对话历史，要求模型按标签字段输出
const INTENT_CLASSIFICATION_TEMPLATE: &str = r#"You are an expert intent classification system with sophisticated language understanding capabilities.
Your task is to accurately classify user intents based on their input and conversation context.

INTENT CATEGORIES:

1. **CALCULATION** - Mathematical operations, computations, numeric problems
   Examples: "2 + 2", "calculate 15% of 200", "what's 5 times 8", "solve x + 5 = 10"
   Keywords: calculate, compute, solve, math, equation, numbers, operators (+, -, *, /, %), percentage

2. **SUMMARIZATION** - Requests to summarize text, conversations, or documents
   Examples: "summarize this", "give me a summary", "what's the main point", "recap our conversation"
   Keywords: summarize, summary, recap, overview, main points, key takeaways, brief

3. **QA (Question-Answering)** - General questions, information requests, explanations
   Examples: "what is AI?", "how does this work?", "tell me about...", "explain the concept"
   Keywords: what, how, why, when, where, who, explain, define, tell me, describe

CLASSIFICATION INSTRUCTIONS:

1. **Primary Analysis**: Look for explicit keywords and phrases that indicate intent
2. **Context Analysis**: Consider conversation history for ambiguous cases
3. **Semantic Understanding**: Understand the underlying purpose, not just surface words
4. **Confidence Assessment**:
   - HIGH (0.8-1.0): Clear keywords and unambiguous intent
   - MEDIUM (0.5-0.7): Some indicators but context-dependent
   - LOW (0.0-0.4): Ambiguous or unclear intent

User Input: {user_input}
Conversation History: {conversation_history}

CLASSIFICATION RULES:
- If input contains mathematical expressions or computation requests -> CALCULATION
- If input asks for summary, recap, or main points -> SUMMARIZATION
- If input is a general question or information request -> QA
- Consider conversation context for ambiguous cases
- Default to QA for unclear cases

Provide your classification in the following structured format:

Intent: [CALCULATION|SUMMARIZATION|QA]
Confidence: [0.0-1.0]
Reasoning: [Detailed explanation of classification decision including key indicators, context considerations, and confidence factors]
Keywords_Found: [List specific keywords or phrases that influenced the decision]
Context_Influence: [How conversation history affected the classification, if applicable]
"#;

pub const QA_SYSTEM_PROMPT: &str = "You are a helpful question-answering assistant.\n\
Answer user questions clearly and concisely based on the conversation history.\n\
Provide accurate information and cite sources when possible.\n\
Use the conversation context to provide more relevant and personalized responses.";

pub const SUMMARIZATION_SYSTEM_PROMPT: &str = "You are a text summarization assistant.\n\
Create concise and informative summaries of the provided text or conversation.\n\
Focus on key points and main ideas from the entire conversation context.\n\
Consider the conversation history to provide better context for summaries.";

pub const CALCULATION_SYSTEM_PROMPT: &str = "You are a mathematical calculation assistant.\n\
Solve mathematical problems step by step using the calculator tool when needed.\n\
Show your work and provide clear explanations.\n\
Reference previous calculations from the conversation history if relevant.";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.\n\
Provide clear and helpful responses to user queries.\n\
Use the conversation history to maintain context and provide better assistance.";

/// 拼装意图分类 prompt；history 为空时由调用方传入占位文本
pub fn intent_classification_prompt(user_input: &str, conversation_history: &str) -> String {
    INTENT_CLASSIFICATION_TEMPLATE
        .replace("{user_input}", user_input)
        .replace("{conversation_history}", conversation_history)
}

/// 各意图对应的 system prompt；None 表示未识别意图，用通用助手 prompt
pub fn system_prompt_for(kind: Option<IntentKind>) -> &'static str {
    match kind {
        Some(IntentKind::Qa) => QA_SYSTEM_PROMPT,
        Some(IntentKind::Summarization) => SUMMARIZATION_SYSTEM_PROMPT,
        Some(IntentKind::Calculation) => CALCULATION_SYSTEM_PROMPT,
        None => DEFAULT_SYSTEM_PROMPT,
    }
}

/// 构建 chat 边界的消息列表：system prompt + 历史消息 + 当前输入
pub fn chat_messages(
    kind: Option<IntentKind>,
    history: &[Message],
    user_input: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(system_prompt_for(kind)));
    messages.extend_from_slice(history);
    messages.push(Message::user(user_input));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Role;

    #[test]
    fn prompt_embeds_input_and_history() {
        let p = intent_classification_prompt("2 + 3", "No previous conversation.");
        assert!(p.contains("User Input: 2 + 3"));
        assert!(p.contains("Conversation History: No previous conversation."));
        assert!(p.contains("Intent: [CALCULATION|SUMMARIZATION|QA]"));
    }

    #[test]
    fn chat_messages_order_is_system_history_user() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let msgs = chat_messages(Some(IntentKind::Qa), &history, "What is AI?");
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0].role, Role::System);
        assert!(msgs[0].content.contains("question-answering"));
        assert_eq!(msgs[3].role, Role::User);
        assert_eq!(msgs[3].content, "What is AI?");
    }

    #[test]
    fn unknown_intent_gets_default_system_prompt() {
        assert_eq!(system_prompt_for(None), DEFAULT_SYSTEM_PROMPT);
    }
}
