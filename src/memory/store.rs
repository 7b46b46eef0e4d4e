//! 追加式会话记忆
//!
//! 每完成一轮追加一条 MemoryEntry，仅编排器可写；处理器拿到的是轮次开始时的只读快照，
//! 因此处理器永远看不到本轮自身的条目。条目不删除、不修改、不去重，顺序即轮次顺序。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TurnResponse;
use crate::intent::UserIntent;

/// 单轮记忆条目：输入、意图、响应与时间戳
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub timestamp: DateTime<Utc>,
    pub user_input: String,
    pub intent: Option<UserIntent>,
    pub response: Option<TurnResponse>,
}

impl MemoryEntry {
    pub fn new(
        user_input: impl Into<String>,
        intent: Option<UserIntent>,
        response: Option<TurnResponse>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            user_input: user_input.into(),
            intent,
            response,
        }
    }
}

/// 追加式记忆存储：push / snapshot / recent_window
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<MemoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 轮次结束后追加一条记录（每轮恰好一次）
    pub fn push(&mut self, entry: MemoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// 轮次开始时取只读快照，供处理器使用
    pub fn snapshot(&self) -> Vec<MemoryEntry> {
        self.entries.clone()
    }

    /// 渲染最近 n 轮为分类 prompt 的历史片段；无历史时返回固定占位文本
    pub fn recent_window(&self, n: usize) -> String {
        if self.entries.is_empty() {
            return "No previous conversation.".to_string();
        }
        let start = self.entries.len().saturating_sub(n);
        let mut s = String::new();
        for entry in &self.entries[start..] {
            s.push_str(&format!("User: {}\n", entry.user_input));
            if let Some(resp) = &entry.response {
                s.push_str(&format!("Assistant: {}\n", resp.answer));
            }
        }
        s
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut store = MemoryStore::new();
        store.push(MemoryEntry::new("first", None, None));
        store.push(MemoryEntry::new("second", None, None));
        store.push(MemoryEntry::new("third", None, None));

        let inputs: Vec<&str> = store
            .entries()
            .iter()
            .map(|e| e.user_input.as_str())
            .collect();
        assert_eq!(inputs, vec!["first", "second", "third"]);
    }

    #[test]
    fn snapshot_is_detached_from_later_pushes() {
        let mut store = MemoryStore::new();
        store.push(MemoryEntry::new("first", None, None));
        let snap = store.snapshot();
        store.push(MemoryEntry::new("second", None, None));

        assert_eq!(snap.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn recent_window_is_bounded() {
        let mut store = MemoryStore::new();
        for i in 0..5 {
            store.push(MemoryEntry::new(format!("question {i}"), None, None));
        }
        let window = store.recent_window(3);
        assert!(!window.contains("question 0"));
        assert!(!window.contains("question 1"));
        assert!(window.contains("question 2"));
        assert!(window.contains("question 4"));
    }

    #[test]
    fn empty_window_has_placeholder() {
        let store = MemoryStore::new();
        assert_eq!(store.recent_window(3), "No previous conversation.");
    }
}
