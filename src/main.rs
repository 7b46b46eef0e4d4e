//! Waggle - Rust 意图路由对话智能体
//!
//! 入口：初始化日志、加载配置、创建编排器，并在 stdin 上跑单轮循环。

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use waggle::config::{load_config, AppConfig};
use waggle::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    let mut orchestrator = Orchestrator::from_config(&cfg);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"waggle ready. Type a message, or 'quit' to exit.\n> ")
        .await
        .context("stdout write failed")?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await.context("stdin read failed")? {
        let input = line.trim();
        if input.is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }

        let response = orchestrator.process(input).await;
        let reply = format!(
            "{}\n  [sources: {} | confidence: {:.2}]\n> ",
            response.answer,
            response.sources.join(", "),
            response.confidence
        );
        stdout.write_all(reply.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
