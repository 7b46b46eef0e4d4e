//! 会话日志
//!
//! 每轮一个会话：start_session 创建，log_tool_call 追加工具事件，end_session 落盘为
//! logs/session_<id>.json。日志不在响应关键路径上，任何写失败只 warn 不影响本轮结果。

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 单次工具调用记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    pub parameters: Value,
    pub result: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// 单轮会话记录：查询、工具调用序列、最终响应与起止时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    pub session_id: String,
    pub user_query: String,
    pub response: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// 会话日志器：同一时刻至多一个进行中的会话（一轮一个）
pub struct SessionLogger {
    log_dir: PathBuf,
    current: Option<SessionLog>,
}

impl SessionLogger {
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            current: None,
        }
    }

    /// 开启新会话并返回会话 id（uuid 前 8 位）
    pub fn start_session(&mut self, user_query: &str) -> String {
        let session_id = Uuid::new_v4().to_string()[..8].to_string();
        self.current = Some(SessionLog {
            session_id: session_id.clone(),
            user_query: user_query.to_string(),
            response: None,
            tool_calls: Vec::new(),
            started_at: Utc::now(),
            ended_at: None,
        });
        session_id
    }

    /// 向当前会话追加一条工具调用；无进行中会话则忽略
    pub fn log_tool_call(&mut self, tool_name: &str, parameters: Value, result: Option<String>) {
        let Some(session) = self.current.as_mut() else {
            return;
        };
        session.tool_calls.push(ToolCall {
            tool_name: tool_name.to_string(),
            parameters,
            result,
            timestamp: Utc::now(),
        });
    }

    /// 结束当前会话并写盘；写失败只记 warn
    pub fn end_session(&mut self, response: Option<&str>) {
        let Some(mut session) = self.current.take() else {
            return;
        };
        session.response = response.map(String::from);
        session.ended_at = Some(Utc::now());

        if let Err(e) = self.persist(&session) {
            tracing::warn!("Failed to persist session {}: {}", session.session_id, e);
        }
    }

    fn persist(&self, session: &SessionLog) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.log_dir)?;
        let path = self
            .log_dir
            .join(format!("session_{}.json", session.session_id));
        std::fs::write(&path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }
}
